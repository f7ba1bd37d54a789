//! error types
//!
//! structured errors for config, http, json, server faults, and result shapes.

use crate::response::ServerFault;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for query execution and result decoding
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}", fault_message(.status, .fault))]
    Server {
        /// http status returned by the server
        status: u16,
        /// decoded fault body (zero-valued if the body was malformed)
        fault: ServerFault,
        /// raw response body
        body: String,
    },

    #[error("shape mismatch: expected {expected}, found {found}")]
    Shape {
        /// the shape the accessor assumed
        expected: &'static str,
        /// what the result actually held
        found: String,
    },
}

impl Error {
    pub(crate) fn shape(expected: &'static str, found: impl Into<String>) -> Self {
        Error::Shape {
            expected,
            found: found.into(),
        }
    }

    /// the server fault, if the server rejected the query
    pub fn fault(&self) -> Option<&ServerFault> {
        match self {
            Error::Server { fault, .. } => Some(fault),
            _ => None,
        }
    }

    /// http status for server faults and http errors that carry one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// true if an accessor did not match the result shape
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Error::Shape { .. })
    }
}

fn fault_message(status: &u16, fault: &ServerFault) -> String {
    if fault.message.is_empty() {
        format!("server returned status {status}")
    } else {
        fault.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(message: &str) -> Error {
        Error::Server {
            status: 400,
            fault: ServerFault {
                message: message.to_string(),
                ..ServerFault::default()
            },
            body: String::new(),
        }
    }

    #[test]
    fn test_server_error_displays_fault_message() {
        let err = server_error("boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.fault().unwrap().message, "boom");
    }

    #[test]
    fn test_server_error_without_message() {
        let err = server_error("");
        assert_eq!(err.to_string(), "server returned status 400");
    }

    #[test]
    fn test_shape_helpers() {
        let err = Error::shape("a string", "number");
        assert!(err.is_shape_mismatch());
        assert!(err.fault().is_none());
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "shape mismatch: expected a string, found number"
        );
    }
}
