//! Repairs the service's split `{header, data}` result layout.
//!
//! Each match arrives as two sibling objects that share no key. They are
//! merged structurally (map union) into one record, the records are wrapped
//! back under `results`, and the envelope is decoded into `SourceResult`s.

use serde_json::{Map, Value};

use super::models::{MergedEnvelope, ResponseHeader};
use crate::modules::search::domain::{SiteIndex, SourceResult};
use crate::shared::errors::{AppError, AppResult};

pub struct ResponseReshaper;

impl ResponseReshaper {
    pub const ENVELOPE_KEY: &'static str = "results";

    /// Read the top-level `header`, failing when the service reports an error
    pub fn check_status(raw: &Value) -> AppResult<Option<ResponseHeader>> {
        let Some(header) = raw.get("header") else {
            return Ok(None);
        };

        let header: ResponseHeader = serde_json::from_value(header.clone())?;
        if header.status != 0 {
            let side = if header.status < 0 { "client" } else { "server" };
            return Err(AppError::UpstreamError(format!(
                "Service reported {}-side status {}: {}",
                side,
                header.status,
                header.message.as_deref().unwrap_or("no message")
            )));
        }

        if let (Some(short), Some(long)) = (header.short_remaining, header.long_remaining) {
            log::debug!(
                "Search service quota: {} short-term, {} long-term searches remaining",
                short,
                long
            );
        }

        Ok(Some(header))
    }

    /// Merge every `{header, data}` pair and wrap the records under `results`
    pub fn reshape(raw: Value) -> AppResult<Value> {
        let Value::Object(mut top) = raw else {
            return Err(AppError::MalformedResponse(
                "Top-level response is not a JSON object".to_string(),
            ));
        };

        let results = top.remove(Self::ENVELOPE_KEY).ok_or_else(|| {
            AppError::MalformedResponse(format!("Response has no '{}' key", Self::ENVELOPE_KEY))
        })?;

        let Value::Array(pairs) = results else {
            return Err(AppError::MalformedResponse(format!(
                "'{}' is not an array",
                Self::ENVELOPE_KEY
            )));
        };

        let merged = pairs
            .into_iter()
            .enumerate()
            .map(|(position, pair)| Self::merge_pair(position, pair).map(Value::Object))
            .collect::<AppResult<Vec<_>>>()?;

        let mut envelope = Map::new();
        envelope.insert(Self::ENVELOPE_KEY.to_string(), Value::Array(merged));
        Ok(Value::Object(envelope))
    }

    /// Reshape and decode into results, in response order.
    ///
    /// A record without any source URL keeps its position as an empty slot,
    /// so the output always has one entry per returned record.
    pub fn decode(raw: Value) -> AppResult<Vec<Option<SourceResult>>> {
        let envelope: MergedEnvelope = serde_json::from_value(Self::reshape(raw)?)?;

        let results = envelope
            .results
            .into_iter()
            .map(|record| {
                let index = SiteIndex::from(record.index_id);
                let result =
                    SourceResult::new(record.ext_urls, index, record.similarity, record.thumbnail);
                if result.is_none() {
                    log::warn!("{} result has no source URLs; leaving its slot empty", index);
                }
                result
            })
            .collect();

        Ok(results)
    }

    fn merge_pair(position: usize, pair: Value) -> AppResult<Map<String, Value>> {
        let Value::Object(mut pair) = pair else {
            return Err(AppError::MalformedResponse(format!(
                "Result {} is not an object",
                position
            )));
        };

        let mut merged = Self::take_object(&mut pair, "header", position)?;
        let data = Self::take_object(&mut pair, "data", position)?;

        for (key, value) in data {
            if merged.contains_key(&key) {
                log::debug!("Result {}: data field '{}' overrides header", position, key);
            }
            merged.insert(key, value);
        }

        Ok(merged)
    }

    fn take_object(
        pair: &mut Map<String, Value>,
        key: &str,
        position: usize,
    ) -> AppResult<Map<String, Value>> {
        match pair.remove(key) {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(AppError::MalformedResponse(format!(
                "Result {} has a non-object '{}'",
                position, key
            ))),
            None => Err(AppError::MalformedResponse(format!(
                "Result {} is missing '{}'",
                position, key
            ))),
        }
    }
}
