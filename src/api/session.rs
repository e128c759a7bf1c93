//! Session lifecycle operations: login, logout, and status inspection.

// self
use crate::{
	_prelude::*,
	api::BlogClient,
	auth::{AccessClaims, TokenSecret},
	obs::{self, ApiKind, ApiOutcome, ApiSpan},
};

/// Read-only summary of the stored session credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
	/// No credential is stored.
	Anonymous,
	/// A well-formed credential with a future expiry is stored.
	Active {
		/// Expiry instant of the stored credential.
		expires_at: OffsetDateTime,
	},
	/// The stored credential reached its expiry instant.
	Expired {
		/// Expiry instant of the stored credential.
		expired_at: OffsetDateTime,
	},
	/// The stored credential cannot be decoded.
	Invalid,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
	username: &'a str,
	password: &'a str,
}
impl Debug for LoginRequest<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[derive(Debug, Deserialize)]
struct TokenPair {
	access: TokenSecret,
	refresh: Option<TokenSecret>,
}

impl BlogClient {
	/// Authenticates against the token endpoint and stores the returned secrets.
	///
	/// The access token lands under the client's access key and the refresh token,
	/// when the server issues one, under the refresh key. The login request itself
	/// flows through the authenticator like every other call, so a stale credential
	/// left over from a previous session is purged on the way out.
	pub async fn login(&self, username: &str, password: &str) -> Result<()> {
		const KIND: ApiKind = ApiKind::Login;

		let span = ApiSpan::new(KIND, "login");

		obs::record_api_outcome(KIND, ApiOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint("token/")?;
				let body = LoginRequest { username, password };
				let request = self.http_client.post(url).json(&body);
				let response = self.dispatch(request).await?;
				let pair: TokenPair = self.read_json(response).await?;

				self.store.save(&self.access_key, pair.access.into_inner()).await?;

				if let Some(refresh) = pair.refresh {
					self.store.save(&self.refresh_key, refresh.into_inner()).await?;
				}

				Ok(())
			})
			.await;

		match &result {
			Ok(_) => obs::record_api_outcome(KIND, ApiOutcome::Success),
			Err(_) => obs::record_api_outcome(KIND, ApiOutcome::Failure),
		}

		result
	}

	/// Removes both stored session credentials.
	///
	/// Purely local; no server call is made. Logging out of an anonymous session is
	/// a successful no-op.
	pub async fn logout(&self) -> Result<()> {
		self.store.remove(&self.access_key).await?;
		self.store.remove(&self.refresh_key).await?;

		Ok(())
	}

	/// Inspects the stored credential against the current UTC instant.
	pub async fn session_status(&self) -> Result<SessionStatus> {
		self.session_status_at(OffsetDateTime::now_utc()).await
	}

	/// Inspects the stored credential against an explicit instant.
	///
	/// Unlike the authenticator, inspection never purges: a stale credential stays
	/// in place until a request or logout removes it.
	pub async fn session_status_at(&self, now: OffsetDateTime) -> Result<SessionStatus> {
		let token = match self.store.load(&self.access_key).await? {
			Some(token) => token,
			None => return Ok(SessionStatus::Anonymous),
		};

		Ok(match AccessClaims::decode(&token) {
			Ok(claims) if claims.is_expired_at(now) =>
				SessionStatus::Expired { expired_at: claims.expires_at },
			Ok(claims) => SessionStatus::Active { expires_at: claims.expires_at },
			Err(_) => SessionStatus::Invalid,
		})
	}
}
