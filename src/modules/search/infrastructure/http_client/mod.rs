pub mod fetcher;

#[cfg(test)]
pub use fetcher::MockHttpFetcher;
pub use fetcher::{FetchResponse, HttpFetcher, ReqwestFetcher};
