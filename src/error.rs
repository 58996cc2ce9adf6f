//! Errors for the few fallible surfaces of the crate.
//!
//! Validation and text parsing are total and never return these; they are
//! only produced when decoding serialized packages or configuration.

/// Failure to decode or encode a serialized document.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported document: {0}")]
    Unsupported(String),
}

impl DecodeError {
    pub(crate) fn json(what: &'static str, source: serde_json::Error) -> Self {
        Self::Json { what, source }
    }
}
