//! End-to-end coverage for the request authenticator's attach/purge decisions.

// crates.io
use reqwest::header::{AUTHORIZATION, HeaderMap};
use time::macros;
// self
use blog_api_client::{
	_preludet::*,
	auth::{AuthDecision, RequestAuthenticator},
	obs::AuthNotice,
	store::{CredentialKey, CredentialStore, MemoryStore, StoreError, StoreFuture},
};

fn build_authenticator() -> (RequestAuthenticator, Arc<MemoryStore>, Arc<RecordingDiagnostics>) {
	let store = Arc::new(MemoryStore::default());
	let diagnostics = Arc::new(RecordingDiagnostics::default());
	let authenticator =
		RequestAuthenticator::new(store.clone(), CredentialKey::default(), diagnostics.clone());

	(authenticator, store, diagnostics)
}

async fn store_token(store: &MemoryStore, token: &str) {
	store
		.save(&CredentialKey::default(), token.to_owned())
		.await
		.expect("Saving the token fixture should succeed.");
}

async fn stored_token(store: &MemoryStore) -> Option<String> {
	store.load(&CredentialKey::default()).await.expect("Loading the stored token should succeed.")
}

#[tokio::test]
async fn absent_credential_passes_through_silently() {
	let (authenticator, _store, diagnostics) = build_authenticator();
	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate(&mut headers).await;

	assert_eq!(decision, AuthDecision::Missing);
	assert!(headers.get(AUTHORIZATION).is_none());
	assert!(diagnostics.is_empty(), "Anonymous requests should not emit diagnostics.");
}

#[tokio::test]
async fn valid_credential_attaches_the_exact_bearer_header() {
	let (authenticator, store, diagnostics) = build_authenticator();
	let now = OffsetDateTime::now_utc();
	let expires_at = OffsetDateTime::from_unix_timestamp(now.unix_timestamp() + 3_600)
		.expect("Expiry fixture should be representable.");
	let token = forge_access_token(expires_at);

	store_token(&store, &token).await;

	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate(&mut headers).await;

	assert_eq!(decision, AuthDecision::Attached { expires_at });

	let header = headers
		.get(AUTHORIZATION)
		.expect("Valid credentials should attach an authorization header.");

	assert_eq!(
		header.to_str().expect("Bearer header should be ASCII."),
		format!("Bearer {token}")
	);
	assert!(header.is_sensitive(), "Attached bearer headers must be marked sensitive.");
	assert_eq!(stored_token(&store).await.as_deref(), Some(token.as_str()));
	assert!(diagnostics.is_empty(), "Successful attachment should not emit diagnostics.");
}

#[tokio::test]
async fn expired_credential_is_purged_with_a_warning() {
	let (authenticator, store, diagnostics) = build_authenticator();
	let expired_at = macros::datetime!(2020-01-01 00:00 UTC);
	let token = forge_access_token(expired_at);

	store_token(&store, &token).await;

	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate(&mut headers).await;

	assert_eq!(decision, AuthDecision::Expired);
	assert!(headers.get(AUTHORIZATION).is_none());
	assert!(stored_token(&store).await.is_none(), "Expired credentials must be purged.");
	assert_eq!(diagnostics.warnings(), vec![AuthNotice::TokenExpired { expired_at }]);
	assert!(diagnostics.errors().is_empty());
}

#[tokio::test]
async fn credential_expiring_exactly_now_is_rejected() {
	let (authenticator, store, _diagnostics) = build_authenticator();
	let now = macros::datetime!(2030-01-01 00:00 UTC);

	store_token(&store, &forge_access_token(now)).await;

	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate_at(&mut headers, now).await;

	assert_eq!(decision, AuthDecision::Expired);
	assert!(headers.get(AUTHORIZATION).is_none());
	assert!(stored_token(&store).await.is_none());
}

#[tokio::test]
async fn malformed_credential_is_purged_with_an_error() {
	let (authenticator, store, diagnostics) = build_authenticator();

	store_token(&store, "not-a-token").await;

	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate(&mut headers).await;

	assert_eq!(decision, AuthDecision::Invalid);
	assert!(headers.get(AUTHORIZATION).is_none());
	assert!(stored_token(&store).await.is_none(), "Malformed credentials must be purged.");

	let errors = diagnostics.errors();

	assert_eq!(errors.len(), 1);
	assert!(matches!(errors[0], AuthNotice::TokenInvalid { .. }));
	assert!(diagnostics.warnings().is_empty());
}

#[tokio::test]
async fn repeated_expired_requests_degrade_to_missing() {
	let (authenticator, store, diagnostics) = build_authenticator();

	store_token(&store, &forge_access_token(macros::datetime!(2020-06-01 00:00 UTC))).await;

	let mut first_headers = HeaderMap::new();
	let first = authenticator.authenticate(&mut first_headers).await;
	let mut second_headers = HeaderMap::new();
	let second = authenticator.authenticate(&mut second_headers).await;

	assert_eq!(first, AuthDecision::Expired);
	assert_eq!(second, AuthDecision::Missing);
	assert!(stored_token(&store).await.is_none());
	assert_eq!(diagnostics.warnings().len(), 1, "Only the purging request should warn.");
	assert!(diagnostics.errors().is_empty());
}

#[tokio::test]
async fn purging_twice_leaves_the_store_empty_without_error() {
	let store = MemoryStore::default();
	let key = CredentialKey::default();

	store.save(&key, "temp".into()).await.expect("Saving the fixture should succeed.");

	let first = store.remove(&key).await.expect("First removal should succeed.");
	let second = store.remove(&key).await.expect("Second removal should succeed.");

	assert!(first, "First removal should report a stored value.");
	assert!(!second, "Second removal should be a silent no-op.");
	assert!(store.load(&key).await.expect("Loading after removal should succeed.").is_none());
}

#[tokio::test]
async fn stale_then_fresh_token_scenario() {
	let (authenticator, store, diagnostics) = build_authenticator();
	let now = OffsetDateTime::now_utc();
	let stale = forge_access_token(now - Duration::seconds(10));

	store_token(&store, &stale).await;

	let mut headers = HeaderMap::new();

	authenticator.authenticate(&mut headers).await;

	assert!(headers.get(AUTHORIZATION).is_none());
	assert!(stored_token(&store).await.is_none());

	let fresh = forge_access_token(now + Duration::hours(1));

	store_token(&store, &fresh).await;

	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate(&mut headers).await;

	assert!(decision.is_attached());

	let header =
		headers.get(AUTHORIZATION).expect("The fresh credential should attach a header.");

	assert_eq!(
		header.to_str().expect("Bearer header should be ASCII."),
		format!("Bearer {fresh}")
	);
	assert_eq!(stored_token(&store).await.as_deref(), Some(fresh.as_str()));
	assert_eq!(diagnostics.warnings().len(), 1, "Only the stale token should warn.");
}

#[derive(Debug, Default)]
struct FailingStore;
impl CredentialStore for FailingStore {
	fn load<'a>(&'a self, _: &'a CredentialKey) -> StoreFuture<'a, Option<String>> {
		Box::pin(async { Err(StoreError::Backend { message: "disk offline".into() }) })
	}

	fn save<'a>(&'a self, _: &'a CredentialKey, _: String) -> StoreFuture<'a, ()> {
		Box::pin(async { Err(StoreError::Backend { message: "disk offline".into() }) })
	}

	fn remove<'a>(&'a self, _: &'a CredentialKey) -> StoreFuture<'a, bool> {
		Box::pin(async { Err(StoreError::Backend { message: "disk offline".into() }) })
	}
}

#[tokio::test]
async fn store_read_failure_degrades_to_an_anonymous_request() {
	let diagnostics = Arc::new(RecordingDiagnostics::default());
	let authenticator = RequestAuthenticator::new(
		Arc::new(FailingStore),
		CredentialKey::default(),
		diagnostics.clone(),
	);
	let mut headers = HeaderMap::new();
	let decision = authenticator.authenticate(&mut headers).await;

	assert_eq!(decision, AuthDecision::Missing);
	assert!(headers.get(AUTHORIZATION).is_none());

	let errors = diagnostics.errors();

	assert_eq!(errors.len(), 1);
	assert!(matches!(errors[0], AuthNotice::StoreReadFailed { .. }));
}
