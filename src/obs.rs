//! Diagnostics channel and optional observability helpers for API operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `blog_api_client.api` with the `op`
//!   (operation) and `stage` (call site) fields, and to route [`TracingDiagnostics`]
//!   notices through `tracing` events.
//! - Enable `metrics` to increment the `blog_api_client_api_total` counter for every
//!   attempt/success/failure (labeled by `op` + `outcome`) and the
//!   `blog_api_client_auth_total` counter for every authentication decision.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// API operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiKind {
	/// Session login call.
	Login,
	/// Paginated post listing.
	ListPosts,
	/// Post creation upload.
	CreatePost,
	/// Post update upload.
	UpdatePost,
}
impl ApiKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiKind::Login => "login",
			ApiKind::ListPosts => "list_posts",
			ApiKind::CreatePost => "create_post",
			ApiKind::UpdatePost => "update_post",
		}
	}
}
impl Display for ApiKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl ApiOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiOutcome::Attempt => "attempt",
			ApiOutcome::Success => "success",
			ApiOutcome::Failure => "failure",
		}
	}
}
impl Display for ApiOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Authentication decision labels recorded once per outgoing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthOutcome {
	/// A valid credential was attached.
	Attached,
	/// No credential was stored.
	Missing,
	/// The stored credential had expired and was purged.
	Expired,
	/// The stored credential was undecodable and was purged.
	Invalid,
}
impl AuthOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthOutcome::Attached => "attached",
			AuthOutcome::Missing => "missing",
			AuthOutcome::Expired => "expired",
			AuthOutcome::Invalid => "invalid",
		}
	}
}
impl Display for AuthOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Non-fatal notices emitted by the request authenticator.
///
/// Notices never carry token material, only the expiry instant or a failure summary.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AuthNotice {
	/// Stored token reached its expiry instant and was purged.
	#[error("Stored token expired at {expired_at}; credential purged.")]
	TokenExpired {
		/// Expiry instant decoded from the token.
		expired_at: OffsetDateTime,
	},
	/// Stored token could not be decoded and was purged.
	#[error("Stored token could not be decoded: {reason}")]
	TokenInvalid {
		/// Human-readable decode failure summary.
		reason: String,
	},
	/// Credential store rejected a read; the request proceeds unauthenticated.
	#[error("Credential store read failed: {reason}")]
	StoreReadFailed {
		/// Human-readable backend failure summary.
		reason: String,
	},
	/// Credential store rejected a purge; the stale credential may linger.
	#[error("Credential store purge failed: {reason}")]
	StorePurgeFailed {
		/// Human-readable backend failure summary.
		reason: String,
	},
}

/// Non-fatal diagnostic sink for authentication notices.
///
/// Injected into [`RequestAuthenticator`](crate::auth::RequestAuthenticator) so callers
/// can assert on emitted notices in tests without capturing an output stream.
pub trait Diagnostics
where
	Self: Send + Sync,
{
	/// Reports an expected degradation (e.g. an expired token).
	fn warn(&self, notice: AuthNotice);

	/// Reports an unexpected-but-survivable failure (e.g. an undecodable token).
	fn error(&self, notice: AuthNotice);
}
