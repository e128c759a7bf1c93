//! Storage contracts and built-in store implementations for session credentials.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

const CREDENTIAL_KEY_MAX_LEN: usize = 128;

const ACCESS_KEY: &str = "access";
const REFRESH_KEY: &str = "refresh";

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by credential stores.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the credential stored under the key, if present.
	fn load<'a>(&'a self, key: &'a CredentialKey) -> StoreFuture<'a, Option<String>>;

	/// Persists or replaces the credential stored under the key.
	fn save<'a>(&'a self, key: &'a CredentialKey, value: String) -> StoreFuture<'a, ()>;

	/// Removes the credential stored under the key, reporting whether a value was present.
	///
	/// Removing an absent key is a successful no-op that resolves to `Ok(false)`, so
	/// overlapping purges never fail each other.
	fn remove<'a>(&'a self, key: &'a CredentialKey) -> StoreFuture<'a, bool>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Error raised when credential key validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum CredentialKeyError {
	/// The key was empty.
	#[error("Credential key cannot be empty.")]
	Empty,
	/// The key contains whitespace characters.
	#[error("Credential key contains whitespace.")]
	ContainsWhitespace,
	/// The key exceeded the allowed length.
	#[error("Credential key exceeds {max} bytes.")]
	TooLong {
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

/// Validated slot name under which a credential is stored.
///
/// The default key is `"access"`, the slot the login operation writes access tokens
/// to; [`CredentialKey::refresh`] names the matching refresh slot.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CredentialKey(String);
impl CredentialKey {
	/// Creates a key after validating it is non-empty, whitespace-free, and within
	/// the length limit.
	pub fn new(key: impl AsRef<str>) -> Result<Self, CredentialKeyError> {
		let view = key.as_ref();

		if view.is_empty() {
			return Err(CredentialKeyError::Empty);
		}
		if view.chars().any(char::is_whitespace) {
			return Err(CredentialKeyError::ContainsWhitespace);
		}
		if view.len() > CREDENTIAL_KEY_MAX_LEN {
			return Err(CredentialKeyError::TooLong { max: CREDENTIAL_KEY_MAX_LEN });
		}

		Ok(Self(view.to_owned()))
	}

	/// Returns the access-token slot key (`"access"`).
	pub fn access() -> Self {
		Self(ACCESS_KEY.into())
	}

	/// Returns the refresh-token slot key (`"refresh"`).
	pub fn refresh() -> Self {
		Self(REFRESH_KEY.into())
	}
}
impl Default for CredentialKey {
	fn default() -> Self {
		Self::access()
	}
}
impl AsRef<str> for CredentialKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<CredentialKey> for String {
	fn from(key: CredentialKey) -> Self {
		key.0
	}
}
impl TryFrom<String> for CredentialKey {
	type Error = CredentialKeyError;

	fn try_from(key: String) -> Result<Self, Self::Error> {
		Self::new(key)
	}
}
impl FromStr for CredentialKey {
	type Err = CredentialKeyError;

	fn from_str(key: &str) -> Result<Self, Self::Err> {
		Self::new(key)
	}
}
impl Debug for CredentialKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CredentialKey({})", self.0)
	}
}
impl Display for CredentialKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
