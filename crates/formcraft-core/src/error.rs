//! Error types for the editing engine and the persistence seam.
//!
//! `StoreError` is defined here so that callers of any `FormsApi`
//! implementation can downcast and classify failures (for example a missing
//! form during hydration) without string matching.

use thiserror::Error;

/// Errors raised by a `FormsApi` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No form exists with the given identifier.
    #[error("form not found: {0}")]
    NotFound(String),

    /// The payload violates the form contract.
    #[error("invalid form payload: {0}")]
    InvalidPayload(String),

    /// The API answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Returns `true` if the error means the requested form does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Look for a `StoreError` anywhere in an `anyhow` error chain.
    pub fn classify(err: &anyhow::Error) -> Option<&StoreError> {
        err.chain().find_map(|cause| cause.downcast_ref::<StoreError>())
    }
}

/// Errors raised by the form editors when an index or input is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("question index {index} out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("range index {index} out of range for question {question} ({len} ranges)")]
    RangeOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },

    #[error("option index {index} out of range for question {question} ({len} options)")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },

    /// A min/max input did not start with an integer.
    #[error("not a whole number: {0:?}")]
    InvalidNumber(String),
}
