//! Mock transport for pipeline tests

use async_trait::async_trait;
use mockall::mock;
use sauce_lens::{ApiError, FetchResponse, HttpFetcher};

mock! {
    pub Fetcher {}

    #[async_trait]
    impl HttpFetcher for Fetcher {
        async fn get_text(&self, url: &str) -> Result<String, ApiError>;

        async fn post_form(
            &self,
            url: &str,
            fields: Vec<(String, String)>,
        ) -> Result<FetchResponse, ApiError>;
    }
}

/// Value of a named form field
#[allow(dead_code)]
pub fn form_field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
