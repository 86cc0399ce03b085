// Wire models for the search service's JSON output

use serde::{Deserialize, Deserializer};

/// Top-level `header` object describing the request as a whole
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseHeader {
    /// 0 on success, negative for client-side and positive for server-side failures
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub short_remaining: Option<i64>,
    #[serde(default)]
    pub long_remaining: Option<i64>,
    #[serde(default)]
    pub results_returned: Option<u32>,
}

/// Reshaped response: every `{header, data}` pair flattened into one record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergedEnvelope {
    pub results: Vec<MergedRecord>,
}

/// Union of one result's `header` and `data` objects
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergedRecord {
    pub index_id: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub similarity: f64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub ext_urls: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// The live service reports similarity as a string such as `"87.50"`
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid similarity '{}': {}", text, e))),
    }
}
