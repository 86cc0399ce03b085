// Shared kernel used by every feature module

pub mod errors; // Shared error types
pub mod utils; // Rate limiting, validation, logging
