use thiserror::Error;

/// Errors returned by trace operations.
///
/// These are caller errors: the offending argument must be fixed, nothing
/// is retried inside the library.
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraceError {
    /// An empty trace id was passed to [`init_trace`].
    ///
    /// [`init_trace`]: crate::tracer::init_trace
    #[error("traceId must be non-empty: {0}")]
    InvalidTraceId(String),

    /// An empty parent trace id was passed to [`start_propagated_span`].
    ///
    /// [`start_propagated_span`]: crate::tracer::start_propagated_span
    #[error("parentTraceId must be non-empty: {0}")]
    InvalidParentTraceId(String),
}

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_embed_the_offending_value() {
        assert_eq!(
            TraceError::InvalidTraceId(String::new()).to_string(),
            "traceId must be non-empty: "
        );
        assert_eq!(
            TraceError::InvalidParentTraceId(String::new()).to_string(),
            "parentTraceId must be non-empty: "
        );
    }
}
