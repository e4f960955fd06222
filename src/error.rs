use crate::validate::ValidationReport;
use serde::Serialize;
use thiserror::Error;

/// Errors from a single invocation of the text-generation backend.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("failed to spawn backend process: {0}")]
    Spawn(String),

    #[error("backend invocation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("backend process failed: {message}")]
    Process { message: String },
}

/// A recoverable failure inside a single generation attempt.
///
/// Each variant maps to one pipeline stage. These are consumed by the retry
/// loop, turned into corrective feedback for the next prompt, and never cross
/// the API boundary on their own.
#[derive(Error, Debug, Clone)]
pub enum AttemptError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("no JSON object found in backend output")]
    Extraction,

    #[error("backend output is not valid JSON: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(ValidationReport),
}

/// Terminal outcomes of a generation request. Only these reach the caller.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("no valid form definition produced after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        /// The raw text of the last backend response, for diagnosis.
        last_raw_output: Option<String>,
        last_error: String,
    },
}

/// The serialized error shape handed to callers of the generate operation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_raw_output: Option<String>,
}

impl From<&GenerateError> for ErrorResponse {
    fn from(err: &GenerateError) -> Self {
        let last_raw_output = match err {
            GenerateError::EmptyPrompt => None,
            GenerateError::RetriesExhausted {
                last_raw_output, ..
            } => last_raw_output.clone(),
        };
        ErrorResponse {
            error: err.to_string(),
            last_raw_output,
        }
    }
}
