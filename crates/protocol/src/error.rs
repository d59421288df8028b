//! Protocol error types
//!
//! Decoding is best-effort and the public `decode` entry point never fails;
//! these errors classify the recoverable faults the decoder logs and absorbs.

use thiserror::Error;

/// Errors that can occur while decoding envelope wire data
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Header or item-header line is not valid JSON
    #[error("malformed header line: {0}")]
    MalformedHeader(String),

    /// Item payload is not valid JSON
    #[error("malformed item payload ({length} bytes): {reason}")]
    MalformedPayload { length: usize, reason: String },

    /// Item header declares more payload bytes than remain in the envelope
    #[error("truncated item payload: declared {declared} bytes, {available} available")]
    TruncatedPayload { declared: usize, available: usize },
}

impl ProtocolError {
    /// Create a malformed header error
    #[inline]
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        Self::MalformedHeader(reason.into())
    }

    /// Create a malformed payload error
    #[inline]
    pub fn malformed_payload(length: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            length,
            reason: reason.into(),
        }
    }
}
