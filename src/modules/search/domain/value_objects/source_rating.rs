use serde::{Deserialize, Serialize};
use std::fmt;

/// Explicitness of a source image, ordered by severity.
///
/// `Unknown` means the rating could not be determined; it is not a synonym
/// for `Safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRating {
    Unknown = 0,
    Safe = 1,
    Questionable = 2,
    Nsfw = 3,
}

impl SourceRating {
    /// Questionable or worse
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Questionable | Self::Nsfw)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Safe => "Safe",
            Self::Questionable => "Questionable",
            Self::Nsfw => "NSFW",
        }
    }
}

impl Default for SourceRating {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for SourceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
