use serde::{Deserialize, Serialize};

use crate::modules::search::domain::value_objects::{SiteIndex, SourceRating};

/// One match returned by a reverse image search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    /// Source page URLs, never empty
    pub urls: Vec<String>,
    pub index: SiteIndex,
    /// Percentage in 0..=100
    pub similarity: f64,
    pub thumbnail_url: String,
    pub website_name: String,
    pub rating: SourceRating,
}

impl SourceResult {
    /// Build a result with an `Unknown` rating. Returns `None` when `urls` is empty.
    pub fn new(
        urls: Vec<String>,
        index: SiteIndex,
        similarity: f64,
        thumbnail_url: String,
    ) -> Option<Self> {
        if urls.is_empty() {
            return None;
        }

        let similarity = if similarity.is_finite() {
            similarity.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Some(Self {
            urls,
            index,
            similarity,
            thumbnail_url,
            website_name: index.display_name(),
            rating: SourceRating::Unknown,
        })
    }

    /// First source URL; empty only if `urls` was cleared after construction
    pub fn primary_url(&self) -> &str {
        self.urls.first().map(String::as_str).unwrap_or_default()
    }

    pub fn with_rating(mut self, rating: SourceRating) -> Self {
        self.rating = rating;
        self
    }
}
