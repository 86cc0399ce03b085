use serde::{Deserialize, Serialize};

/// Response format requested from the service.
///
/// Only `Json` can be decoded; the others are accepted by configuration but
/// rejected when a search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputType {
    Normal,
    Xml,
    Json,
}

impl OutputType {
    /// Numeric `output_type` form value
    pub fn code(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Xml => 1,
            Self::Json => 2,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Json)
    }
}

impl Default for OutputType {
    fn default() -> Self {
        Self::Json
    }
}
