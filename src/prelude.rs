//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the formsmith
//! crate. Import this module to get access to the core functionality without
//! having to import each type individually.

// Generation pipeline
pub use crate::generator::{DEFAULT_MAX_ATTEMPTS, Generated, Generator, GeneratorBuilder};

// Backend seam
pub use crate::backend::{CommandBackend, TextGenerationBackend};

// Schema model
pub use crate::schema::{
    Control, ControlProperties, ControlType, FormDefinition, canonical_example,
    canonical_example_json,
};

// Pipeline stages, usable standalone
pub use crate::extract::extract_json;
pub use crate::parse::parse_lenient;
pub use crate::prompt::build_instructions;
pub use crate::validate::{ValidationReport, validate_form};

// Error types
pub use crate::error::{AttemptError, BackendError, ErrorResponse, GenerateError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
