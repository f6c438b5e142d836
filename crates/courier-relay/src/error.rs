use std::fmt;

use courier_core::HttpError;
use http::StatusCode;
use thiserror::Error;

/// Errors produced while relaying a generation request
///
/// Every variant is scoped to the request that produced it.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound payload is missing a field or has the wrong shape
    #[error("{message}")]
    Validation {
        /// Name of the offending field (`body` for the payload as a whole)
        field: &'static str,
        message: String,
    },

    /// No usable credential or model could be resolved for the request
    #[error("{0}")]
    Configuration(String),

    /// Provider answered with a failure (or with nothing usable)
    #[error("provider returned {status}: {message}")]
    Upstream {
        /// HTTP status reported by the provider
        status: StatusCode,
        /// Provider's own diagnosis, passed through verbatim
        message: String,
    },

    /// Outbound call could not complete
    #[error("provider request failed ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },
}

/// Why an outbound call failed to complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Timeout elapsed before the provider answered
    Timeout,
    /// Connection could not be established (refused, DNS, TLS)
    Connect,
    /// Any other I/O failure, including a body that broke off mid-read
    Other,
}

impl TransportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RelayError {
    /// Shorthand for a validation failure on `field`
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Classify a `reqwest` failure that happened before a response arrived
    pub fn transport(error: &reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportKind::Timeout
        } else if error.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };

        Self::Transport {
            kind,
            message: error_chain(error),
        }
    }

    /// Stable machine-readable kind, also used as the metrics outcome
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Configuration(_) => "configuration_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Transport { .. } => "transport_error",
        }
    }
}

/// Join an error with its sources, e.g. `error sending request: connection refused`
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl HttpError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // One status for every failure past validation; `type` tells them apart
            Self::Configuration(_) | Self::Upstream { .. } | Self::Transport { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        self.kind()
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn details(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut details = serde_json::Map::new();
        match self {
            Self::Validation { field, .. } => {
                details.insert("field".to_owned(), (*field).into());
            }
            Self::Upstream { status, .. } => {
                details.insert("upstream_status".to_owned(), status.as_u16().into());
            }
            Self::Transport { kind, .. } => {
                details.insert("reason".to_owned(), kind.as_str().into());
            }
            Self::Configuration(_) => {}
        }
        details
    }
}
