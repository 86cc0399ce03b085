pub mod search_response;

pub use search_response::{SearchResponse, SUCCESS_MESSAGE};
