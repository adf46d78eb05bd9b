//! `ClientError` - classified TMDB client failures.

use std::error::Error as StdError;

/// Boxed transport error kept as the `source` of a `ClientError`.
type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Category of a `ClientError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before any request was sent.
    Validation,
    /// HTTP 401.
    Auth,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimit,
    /// Any other non-2xx status.
    Server,
    /// The request was sent but no response arrived (connect failure, timeout).
    Network,
    /// The request could not be constructed.
    Config,
    /// A 2xx response whose body is not the expected JSON.
    Decode,
}

/// Classified error returned by every TMDB client operation.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
#[allow(clippy::module_name_repetitions)]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    status_text: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl ClientError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            status_text: None,
            source: None,
        }
    }

    /// Input rejected before any network call.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Request construction failure.
    pub fn config(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Config, format!("configuration error: {detail}"))
    }

    /// Response body could not be decoded.
    pub fn decode(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Decode, format!("invalid response body: {detail}"))
    }

    /// Classifies a non-success HTTP status.
    ///
    /// `server_message` is the `status_message` from the TMDB error body, if any.
    /// It is only used for statuses without a dedicated kind.
    pub fn from_status(
        status: u16,
        status_text: Option<&str>,
        server_message: Option<String>,
    ) -> Self {
        let (kind, message) = match status {
            401 => (
                ErrorKind::Auth,
                String::from("authentication failed: API key is invalid or missing"),
            ),
            404 => (
                ErrorKind::NotFound,
                String::from("resource not found: the movie or endpoint does not exist"),
            ),
            429 => (
                ErrorKind::RateLimit,
                String::from("rate limit exceeded: try again later"),
            ),
            _ => (
                ErrorKind::Server,
                server_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("server error: {}", status_text.unwrap_or("unknown"))),
            ),
        };
        Self {
            kind,
            message,
            status: Some(status),
            status_text: status_text.map(String::from),
            source: None,
        }
    }

    /// Classifies a `reqwest` transport error.
    ///
    /// The URL is stripped first since it carries the API key.
    pub fn from_transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let mut classified = if err.is_builder() {
            Self::config(&err)
        } else if err.is_decode() {
            Self::decode(&err)
        } else {
            Self::new(
                ErrorKind::Network,
                "network error: could not reach the server",
            )
        };
        classified.source = Some(Box::new(err));
        classified
    }

    /// Error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// HTTP status text, when known.
    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    /// Whether the credential was rejected.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// Whether the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Whether the request was throttled.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.kind == ErrorKind::RateLimit
    }

    /// Whether the server could not be reached.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

/// Result alias for TMDB client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
