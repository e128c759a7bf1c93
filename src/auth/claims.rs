//! Unverified claim extraction from stored access tokens.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

const TOKEN_SEGMENTS: usize = 3;

/// Errors produced while decoding a stored credential.
#[derive(Debug, ThisError)]
pub enum ClaimsError {
	/// Token is not a three-segment compact serialization.
	#[error("Token is malformed; expected {TOKEN_SEGMENTS} segments, found {segments}.")]
	MalformedToken {
		/// Number of dot-separated segments found.
		segments: usize,
	},
	/// Payload segment is not valid unpadded base64url.
	#[error("Token payload is not valid base64url.")]
	PayloadEncoding {
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// Payload JSON is malformed or missing the expiry claim.
	#[error("Token payload JSON is malformed.")]
	PayloadJson {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
	/// The expiry claim does not encode a representable instant.
	#[error("Token expiry is outside the representable range.")]
	ExpiryOutOfRange {
		/// Underlying conversion failure.
		#[source]
		source: time::error::ComponentRange,
	},
}

#[derive(Deserialize)]
struct RawClaims {
	exp: i64,
}

/// Claims extracted from a stored access token without signature verification.
///
/// The server verifies signatures on every request; the client only reads the
/// expiry instant to decide whether attaching the credential is worthwhile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessClaims {
	/// Expiry instant decoded from the `exp` claim (seconds since the Unix epoch).
	pub expires_at: OffsetDateTime,
}
impl AccessClaims {
	/// Decodes the payload segment of a compact token and extracts the expiry claim.
	pub fn decode(token: &str) -> Result<Self, ClaimsError> {
		let segments = token.split('.').collect::<Vec<_>>();

		if segments.len() != TOKEN_SEGMENTS {
			return Err(ClaimsError::MalformedToken { segments: segments.len() });
		}

		let payload = URL_SAFE_NO_PAD
			.decode(segments[1])
			.map_err(|source| ClaimsError::PayloadEncoding { source })?;
		let mut deserializer = serde_json::Deserializer::from_slice(&payload);
		let raw: RawClaims = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ClaimsError::PayloadJson { source })?;
		let expires_at = OffsetDateTime::from_unix_timestamp(raw.exp)
			.map_err(|source| ClaimsError::ExpiryOutOfRange { source })?;

		Ok(Self { expires_at })
	}

	/// Returns `true` if the claims are expired at the provided instant.
	///
	/// A credential expiring exactly at the instant is already unusable; only a
	/// strictly-future expiry authenticates a request.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at <= instant
	}

	/// Checks expiry against the current UTC instant.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}
