//! Per-request bearer credential attachment.
//!
//! [`RequestAuthenticator`] is the client's interception stage: before a request
//! leaves the process it loads the stored credential, decodes the expiry claim, and
//! either attaches `Authorization: Bearer <token>` or purges the credential. The
//! stage never fails the request; every degraded path sends it unauthenticated and
//! lets the server issue the authoritative 401.

// crates.io
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::AccessClaims,
	obs::{self, AuthNotice, AuthOutcome, Diagnostics},
	store::{CredentialKey, CredentialStore},
};

/// Outcome of a single authentication decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthDecision {
	/// A valid credential was attached to the request.
	Attached {
		/// Expiry instant of the attached credential.
		expires_at: OffsetDateTime,
	},
	/// No credential is stored; the request proceeds anonymously.
	Missing,
	/// The stored credential reached its expiry instant and was purged.
	Expired,
	/// The stored credential could not be decoded (or encoded into a header) and
	/// was purged.
	Invalid,
}
impl AuthDecision {
	/// Returns `true` when a credential was attached.
	pub const fn is_attached(&self) -> bool {
		matches!(self, AuthDecision::Attached { .. })
	}

	/// Maps the decision onto its observability label.
	pub const fn outcome(&self) -> AuthOutcome {
		match self {
			AuthDecision::Attached { .. } => AuthOutcome::Attached,
			AuthDecision::Missing => AuthOutcome::Missing,
			AuthDecision::Expired => AuthOutcome::Expired,
			AuthDecision::Invalid => AuthOutcome::Invalid,
		}
	}
}
impl Display for AuthDecision {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.outcome().as_str())
	}
}

/// Decides, per outgoing request, whether to attach a bearer credential.
///
/// The authenticator holds the injected store and diagnostics sink; construct one
/// per client rather than reaching for process-global state. Clones share both.
#[derive(Clone)]
pub struct RequestAuthenticator {
	store: Arc<dyn CredentialStore>,
	key: CredentialKey,
	diagnostics: Arc<dyn Diagnostics>,
}
impl RequestAuthenticator {
	/// Creates an authenticator bound to the provided store, key, and diagnostics sink.
	pub fn new(
		store: Arc<dyn CredentialStore>,
		key: CredentialKey,
		diagnostics: Arc<dyn Diagnostics>,
	) -> Self {
		Self { store, key, diagnostics }
	}

	/// Key under which the authenticator looks credentials up.
	pub fn key(&self) -> &CredentialKey {
		&self.key
	}

	/// Runs the authentication decision against the current UTC instant.
	pub async fn authenticate(&self, headers: &mut HeaderMap) -> AuthDecision {
		self.authenticate_at(headers, OffsetDateTime::now_utc()).await
	}

	/// Runs the authentication decision against an explicit instant.
	///
	/// [`authenticate`](Self::authenticate) is the production entry point; this
	/// variant exists so callers can pin the clock.
	pub async fn authenticate_at(
		&self,
		headers: &mut HeaderMap,
		now: OffsetDateTime,
	) -> AuthDecision {
		let decision = self.decide(headers, now).await;

		obs::record_auth_outcome(decision.outcome());

		decision
	}

	async fn decide(&self, headers: &mut HeaderMap, now: OffsetDateTime) -> AuthDecision {
		let token = match self.store.load(&self.key).await {
			Ok(Some(token)) => token,
			// An anonymous session is the normal state, not a fault.
			Ok(None) => return AuthDecision::Missing,
			Err(e) => {
				self.diagnostics.error(AuthNotice::StoreReadFailed { reason: e.to_string() });

				return AuthDecision::Missing;
			},
		};
		let claims = match AccessClaims::decode(&token) {
			Ok(claims) => claims,
			Err(e) => {
				self.diagnostics.error(AuthNotice::TokenInvalid { reason: e.to_string() });
				self.purge().await;

				return AuthDecision::Invalid;
			},
		};

		if claims.is_expired_at(now) {
			self.diagnostics.warn(AuthNotice::TokenExpired { expired_at: claims.expires_at });
			self.purge().await;

			return AuthDecision::Expired;
		}

		let mut value = match HeaderValue::from_str(&format!("Bearer {token}")) {
			Ok(value) => value,
			// Decodable claims do not guarantee a header-safe token; treat the
			// mismatch like any other undecodable credential.
			Err(e) => {
				self.diagnostics.error(AuthNotice::TokenInvalid { reason: e.to_string() });
				self.purge().await;

				return AuthDecision::Invalid;
			},
		};

		value.set_sensitive(true);
		headers.insert(AUTHORIZATION, value);

		AuthDecision::Attached { expires_at: claims.expires_at }
	}

	async fn purge(&self) {
		if let Err(e) = self.store.remove(&self.key).await {
			self.diagnostics.error(AuthNotice::StorePurgeFailed { reason: e.to_string() });
		}
	}
}
impl Debug for RequestAuthenticator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestAuthenticator").field("key", &self.key).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{RecordingDiagnostics, forge_access_token},
		store::MemoryStore,
	};

	fn build_authenticator() -> (RequestAuthenticator, Arc<MemoryStore>, Arc<RecordingDiagnostics>)
	{
		let store = Arc::new(MemoryStore::default());
		let diagnostics = Arc::new(RecordingDiagnostics::default());
		let authenticator = RequestAuthenticator::new(
			store.clone(),
			CredentialKey::default(),
			diagnostics.clone(),
		);

		(authenticator, store, diagnostics)
	}

	#[test]
	fn decisions_map_to_outcome_labels() {
		let attached = AuthDecision::Attached { expires_at: OffsetDateTime::UNIX_EPOCH };

		assert!(attached.is_attached());
		assert_eq!(attached.outcome(), AuthOutcome::Attached);
		assert_eq!(attached.to_string(), "attached");
		assert_eq!(AuthDecision::Missing.outcome(), AuthOutcome::Missing);
		assert_eq!(AuthDecision::Expired.outcome(), AuthOutcome::Expired);
		assert_eq!(AuthDecision::Invalid.outcome(), AuthOutcome::Invalid);
	}

	#[tokio::test]
	async fn header_unsafe_token_is_purged_like_a_malformed_one() {
		let (authenticator, store, diagnostics) = build_authenticator();
		// Valid claims, but the control character in the header segment can never
		// appear inside a `HeaderValue`.
		let token = forge_access_token(OffsetDateTime::now_utc() + Duration::hours(1))
			.replace("test_header", "bad\nheader");

		store
			.save(&CredentialKey::default(), token)
			.await
			.expect("Saving the token fixture should succeed.");

		let mut headers = HeaderMap::new();
		let decision = authenticator.authenticate(&mut headers).await;

		assert_eq!(decision, AuthDecision::Invalid);
		assert!(headers.get(AUTHORIZATION).is_none());
		assert!(
			store
				.load(&CredentialKey::default())
				.await
				.expect("Loading after the purge should succeed.")
				.is_none()
		);
		assert_eq!(diagnostics.errors().len(), 1);
		assert!(diagnostics.warnings().is_empty());
	}

	#[tokio::test]
	async fn non_ascii_token_still_attaches() {
		let (authenticator, store, diagnostics) = build_authenticator();
		// Header values admit bytes at 0x80 and above, so a token carrying `é`
		// attaches as-is instead of taking the invalid path.
		let token = forge_access_token(OffsetDateTime::now_utc() + Duration::hours(1))
			.replace("test_header", "caf\u{e9}_header");

		store
			.save(&CredentialKey::default(), token.clone())
			.await
			.expect("Saving the token fixture should succeed.");

		let mut headers = HeaderMap::new();
		let decision = authenticator.authenticate(&mut headers).await;

		assert!(decision.is_attached());

		let header = headers
			.get(AUTHORIZATION)
			.expect("A non-ASCII token should still produce an authorization header.");

		assert_eq!(header.as_bytes(), format!("Bearer {token}").as_bytes());
		assert!(
			store
				.load(&CredentialKey::default())
				.await
				.expect("Loading after attachment should succeed.")
				.is_some()
		);
		assert!(diagnostics.is_empty());
	}
}
