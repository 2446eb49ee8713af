use std::error::Error;
use std::fmt;

use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::params::{format_message, Param};

/// An internal error that can be reported to a remote caller without leaking
/// detail.
///
/// The full, substituted message (including sensitive parameter values) is
/// available locally through `Display` and [`log`]; the remote caller only
/// ever sees the [`SerializableError`] payload, which carries the generated
/// error id and nothing else.
///
/// # Examples
///
/// ```
/// use http::StatusCode;
/// use tracestack_errors::{Param, ServiceError};
///
/// let err = ServiceError::new(
///     "user {} not found in realm {}",
///     vec![Param::safe("userId", 42), Param::sensitive("realm", "internal")],
/// )
/// .with_status(StatusCode::NOT_FOUND);
///
/// assert_eq!(err.to_string(), "user 42 not found in realm internal");
/// err.log(); // local log line carries the error id and full message
/// let payload = err.serializable(); // remote payload carries the id only
/// ```
///
/// [`log`]: ServiceError::log
#[derive(Debug)]
pub struct ServiceError {
    message: String,
    params: Vec<Param>,
    status: StatusCode,
    error_id: String,
    cause: Option<Box<dyn Error + Send + Sync>>,
}

impl ServiceError {
    /// Creates an error from a `{}`-placeholder template and its parameters.
    ///
    /// A fresh error id is generated per instance; the status defaults to
    /// `500 Internal Server Error`.
    pub fn new(template: impl Into<String>, params: Vec<Param>) -> Self {
        let template = template.into();
        let message = format_message(&template, &params);
        ServiceError {
            message,
            params,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error_id: Uuid::new_v4().to_string(),
            cause: None,
        }
    }

    /// Sets the HTTP-style status classification reported to the caller.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Attaches the underlying cause, exposed through [`Error::source`].
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The machine-generated identifier correlating the caller-facing
    /// payload with the local log line. Unique per instance.
    pub fn error_id(&self) -> &str {
        &self.error_id
    }

    /// The status classification. Defaults to `500 Internal Server Error`.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message parameters, with their safety classification.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The local log line: `Error handling request <errorId>: <message>`.
    pub fn log_message(&self) -> String {
        format!("Error handling request {}: {}", self.error_id, self.message)
    }

    /// Emits [`log_message`] at WARN through `tracing`, with the error id
    /// and status as structured fields.
    ///
    /// [`log_message`]: ServiceError::log_message
    pub fn log(&self) {
        tracing::warn!(
            error_id = self.error_id.as_str(),
            status = self.status.as_u16(),
            "{}",
            self.log_message()
        );
    }

    /// The caller-facing payload. Contains only the error id pointer and
    /// this type's name; parameter values never appear here.
    pub fn serializable(&self) -> SerializableError {
        SerializableError {
            message: format!(
                "Refer to the server logs with this errorId: {}",
                self.error_id
            ),
            error_name: "ServiceError".to_string(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}

/// The redacted error representation sent to remote callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableError {
    message: String,
    error_name: String,
}

impl SerializableError {
    /// The caller-facing message, pointing at the server logs.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The name of the error type that produced this payload.
    pub fn error_name(&self) -> &str {
        &self.error_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_is_the_substituted_message() {
        let err = ServiceError::new(
            "arg1={}, arg2={}",
            vec![Param::safe("arg1", "foo"), Param::sensitive("arg2", "bar")],
        );
        assert_eq!(err.to_string(), "arg1=foo, arg2=bar");
    }

    #[test]
    fn log_message_carries_the_error_id() {
        let err = ServiceError::new("error", vec![]);
        assert_eq!(
            err.log_message(),
            format!("Error handling request {}: error", err.error_id())
        );
        err.log();
    }

    #[test]
    fn source_is_the_cause() {
        let err = ServiceError::new("wrapper", vec![])
            .with_cause(io::Error::other("disk on fire"));
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");

        assert!(ServiceError::new("no cause", vec![]).source().is_none());
    }

    #[test]
    fn status_defaults_to_internal_server_error() {
        let err = ServiceError::new("error", vec![]);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = err.with_status(StatusCode::BAD_GATEWAY);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_ids_are_unique_uuids() {
        let first = ServiceError::new("error", vec![]);
        let second = ServiceError::new("error", vec![]);
        assert_ne!(first.error_id(), second.error_id());
        Uuid::parse_str(first.error_id()).unwrap();
        Uuid::parse_str(second.error_id()).unwrap();
    }

    #[test]
    fn payload_never_contains_parameter_values() {
        let err = ServiceError::new(
            "login failed for {}",
            vec![Param::sensitive("password", "hunter2")],
        );
        let payload = err.serializable();
        assert_eq!(
            payload.message(),
            format!(
                "Refer to the server logs with this errorId: {}",
                err.error_id()
            )
        );
        assert_eq!(payload.error_name(), "ServiceError");

        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains(err.error_id()));
        assert!(json.contains("errorName"));
    }
}
