pub mod http_client;
pub mod models;
pub mod reshaper;

pub use http_client::{FetchResponse, HttpFetcher, ReqwestFetcher};
pub use reshaper::ResponseReshaper;
