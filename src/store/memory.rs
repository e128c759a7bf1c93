//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{CredentialKey, CredentialStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Thread-safe storage backend that keeps credentials in-process for tests and demos.
///
/// Clones share the same underlying map, so a client and a test can observe each
/// other's writes through separate handles.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn load_now(map: StoreMap, key: CredentialKey) -> Option<String> {
		map.read().get(key.as_ref()).cloned()
	}

	fn save_now(map: StoreMap, key: CredentialKey, value: String) -> Result<(), StoreError> {
		map.write().insert(key.into(), value);

		Ok(())
	}

	fn remove_now(map: StoreMap, key: CredentialKey) -> bool {
		map.write().remove(key.as_ref()).is_some()
	}
}
impl CredentialStore for MemoryStore {
	fn load<'a>(&'a self, key: &'a CredentialKey) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::load_now(map, key)) })
	}

	fn save<'a>(&'a self, key: &'a CredentialKey, value: String) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Self::save_now(map, key, value) })
	}

	fn remove<'a>(&'a self, key: &'a CredentialKey) -> StoreFuture<'a, bool> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::remove_now(map, key)) })
	}
}
