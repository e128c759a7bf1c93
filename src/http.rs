//! Transport primitives for API calls.

// std
use std::ops::Deref;
// crates.io
use reqwest::{
	Request, Response,
	header::{HeaderMap, RETRY_AFTER},
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransientError, TransportError},
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapper is cheap to clone. Callers needing custom TLS, proxies, or timeouts
/// build their own [`ReqwestClient`] and hand it to [`ApiHttpClient::with_client`];
/// everything else goes through the default client.
#[derive(Clone, Debug, Default)]
pub struct ApiHttpClient(pub ReqwestClient);
impl ApiHttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Executes a prepared request, mapping transport failures into the crate taxonomy.
	pub async fn execute(&self, request: Request) -> Result<Response> {
		self.0.execute(request).await.map_err(map_reqwest_error)
	}
}
impl AsRef<ReqwestClient> for ApiHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ApiHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Classifies a [`ReqwestError`] into the crate's error taxonomy.
pub(crate) fn map_reqwest_error(e: ReqwestError) -> Error {
	if e.is_builder() {
		return ConfigError::from(e).into();
	}
	if e.is_timeout() {
		return TransientError::Api {
			message: "Request timed out while calling the API.".into(),
			status: e.status().map(|code| code.as_u16()),
			retry_after: None,
		}
		.into();
	}

	TransportError::from(e).into()
}

/// Parses the Retry-After response header into a relative duration.
///
/// Accepts both delta-seconds and RFC 2822 HTTP dates; dates already in the past
/// and deltas beyond the `i64` seconds range yield `None`.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return i64::try_from(secs).ok().map(Duration::seconds);
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
