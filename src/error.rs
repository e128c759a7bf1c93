//! Client-level error types shared across the API surface, authenticator, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Server rejected the request's credentials (HTTP 401).
	#[error("Server rejected the request as unauthorized: {reason}.")]
	Unauthorized {
		/// Server- or client-supplied reason string.
		reason: String,
	},
	/// Authenticated account lacks permission for the resource (HTTP 403).
	#[error("Server forbade access to the resource: {reason}.")]
	Forbidden {
		/// Server- or client-supplied reason string.
		reason: String,
	},
	/// Server rejected the submitted payload (HTTP 400).
	#[error("Server rejected the submitted payload: {reason}.")]
	Validation {
		/// Server- or client-supplied reason string.
		reason: String,
	},
	/// Requested resource does not exist (HTTP 404).
	#[error("Requested resource was not found: {reason}.")]
	NotFound {
		/// Server- or client-supplied reason string.
		reason: String,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot serve as a base for endpoint paths.
	#[error("Base URL `{base}` cannot be joined with endpoint paths.")]
	UnsupportedBaseUrl {
		/// The offending URL string.
		base: String,
	},
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` is invalid.")]
	InvalidEndpoint {
		/// The offending endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// Credential key validation failed.
	#[error("Credential key is invalid.")]
	InvalidCredentialKey(#[from] crate::store::CredentialKeyError),
	/// Post draft validation failed.
	#[error("Post draft is invalid.")]
	InvalidDraft(#[from] crate::model::PostDraftError),
	/// Multipart form payload could not be assembled.
	#[error("Multipart form payload could not be assembled: {reason}.")]
	Multipart {
		/// Human-readable failure summary.
		reason: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// API returned an unexpected but non-fatal response.
	#[error("API returned an unexpected response: {message}.")]
	Api {
		/// Server- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// API responded with malformed JSON that could not be parsed.
	#[error("API returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
