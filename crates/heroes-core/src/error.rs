// ── Core error types ──
//
// User-facing errors from heroes-core. Presenters never see HTTP status
// codes or JSON parse failures directly: the `From<heroes_api::Error>`
// impl translates transport-layer errors into domain variants, and
// `kind()` gives callers a coarse category to branch on.

use strum::{AsRefStr, Display};
use thiserror::Error;

/// Coarse failure category carried alongside every [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// The service could not be reached or did not answer in time.
    Transport,
    /// The addressed hero does not exist.
    NotFound,
    /// The service answered with a non-success status.
    Rejected,
    /// The service answered with a body that is not a hero.
    MalformedResponse,
    /// Local input was rejected before any request was made.
    InvalidInput,
    /// The client is misconfigured.
    Config,
    Internal,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("cannot reach hero service at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("request to hero service timed out")]
    Timeout,

    // ── Service errors ───────────────────────────────────────────────
    #[error("not found: {resource}")]
    NotFound { resource: String },

    #[error("hero service rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    // ── Local validation ─────────────────────────────────────────────
    #[error("invalid hero id {raw:?}")]
    InvalidId { raw: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreachable { .. } | Self::Timeout => ErrorKind::Transport,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::InvalidId { .. } | Self::Validation { .. } => ErrorKind::InvalidInput,
            Self::Config { .. } => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<heroes_api::Error> for CoreError {
    fn from(err: heroes_api::Error) -> Self {
        let not_found = err.is_not_found();
        let transient = err.is_transient();

        match err {
            heroes_api::Error::Transport(e) if e.is_timeout() => CoreError::Timeout,
            heroes_api::Error::Transport(e) if transient => CoreError::Unreachable {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            heroes_api::Error::Transport(e) if e.is_decode() => CoreError::MalformedResponse {
                message: e.to_string(),
            },
            heroes_api::Error::Transport(e) => CoreError::Internal(e.to_string()),
            heroes_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            heroes_api::Error::ClientBuild(message) => CoreError::Config { message },
            heroes_api::Error::Http { message, .. } if not_found => {
                CoreError::NotFound { resource: message }
            }
            heroes_api::Error::Http { status, message } => CoreError::Rejected { status, message },
            heroes_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = CoreError::from(heroes_api::Error::Http {
            status: 404,
            message: "hero 99".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "not found: hero 99");
    }

    #[test]
    fn other_status_maps_to_rejected() {
        let err = CoreError::from(heroes_api::Error::Http {
            status: 500,
            message: "Internal Server Error".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(
            err.to_string(),
            "hero service rejected request (HTTP 500): Internal Server Error"
        );
    }

    #[test]
    fn gateway_status_keeps_its_code() {
        let err = CoreError::from(heroes_api::Error::Http {
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert!(matches!(err, CoreError::Rejected { status: 503, .. }));
    }

    #[test]
    fn deserialization_maps_to_malformed_response() {
        let err = CoreError::from(heroes_api::Error::Deserialization {
            message: "expected value at line 1".into(),
            body: "<html>".into(),
        });
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn local_errors_are_invalid_input() {
        assert_eq!(
            CoreError::InvalidId { raw: "abc".into() }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            CoreError::Validation {
                message: "blank".into()
            }
            .kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn kind_renders_kebab_case() {
        assert_eq!(ErrorKind::MalformedResponse.to_string(), "malformed-response");
        assert_eq!(ErrorKind::NotFound.as_ref(), "not-found");
    }
}
