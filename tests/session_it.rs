//! Login, logout, and session inspection against a mock API server.

// crates.io
use httpmock::prelude::*;
// self
use blog_api_client::{
	_preludet::*,
	api::SessionStatus,
	error::Error,
	obs::AuthNotice,
	store::{CredentialKey, CredentialStore},
};

async fn stored(store: &dyn CredentialStore, key: &CredentialKey) -> Option<String> {
	store.load(key).await.expect("Loading from the memory store should succeed.")
}

#[tokio::test]
async fn login_stores_both_returned_secrets() {
	let server = MockServer::start_async().await;
	let (client, store, diagnostics) = build_test_client(&server.base_url());
	let access = forge_access_token(OffsetDateTime::now_utc() + Duration::hours(1));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/").header("content-type", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.body(format!("{{\"access\":\"{access}\",\"refresh\":\"refresh-secret\"}}"));
		})
		.await;

	client.login("ada", "hunter2").await.expect("Login should succeed.");

	assert_eq!(stored(store.as_ref(), &CredentialKey::access()).await.as_deref(), Some(&*access));
	assert_eq!(
		stored(store.as_ref(), &CredentialKey::refresh()).await.as_deref(),
		Some("refresh-secret")
	);
	assert!(diagnostics.is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn login_replaces_a_stale_credential() {
	let server = MockServer::start_async().await;
	let (client, store, diagnostics) = build_test_client(&server.base_url());
	let expired_at = OffsetDateTime::now_utc() - Duration::hours(2);

	store
		.save(&CredentialKey::access(), forge_access_token(expired_at))
		.await
		.expect("Seeding the stale token should succeed.");

	let fresh = forge_access_token(OffsetDateTime::now_utc() + Duration::hours(1));
	// The stale token is purged before the login request leaves, so the
	// request must arrive without an authorization header.
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token/").header_missing("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.body(format!("{{\"access\":\"{fresh}\"}}"));
		})
		.await;

	client.login("ada", "hunter2").await.expect("Login should succeed.");

	assert_eq!(stored(store.as_ref(), &CredentialKey::access()).await.as_deref(), Some(&*fresh));
	assert!(matches!(diagnostics.warnings().as_slice(), [AuthNotice::TokenExpired { .. }]));

	mock.assert_async().await;
}

#[tokio::test]
async fn rejected_login_stores_nothing() {
	let server = MockServer::start_async().await;
	let (client, store, _diagnostics) = build_test_client(&server.base_url());

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token/");
			then.status(401).header("content-type", "application/json").body(
				"{\"detail\":\"No active account found with the given credentials\"}",
			);
		})
		.await;

	let error =
		client.login("ada", "wrong").await.expect_err("A rejected login must map to an error.");

	assert!(
		matches!(error, Error::Unauthorized { ref reason } if reason == "No active account found with the given credentials")
	);
	assert_eq!(stored(store.as_ref(), &CredentialKey::access()).await, None);
	assert_eq!(stored(store.as_ref(), &CredentialKey::refresh()).await, None);
}

#[tokio::test]
async fn logout_clears_both_credentials_and_is_idempotent() {
	let server = MockServer::start_async().await;
	let (client, store, diagnostics) = build_test_client(&server.base_url());

	store
		.save(&CredentialKey::access(), "access-secret".into())
		.await
		.expect("Seeding the access token should succeed.");
	store
		.save(&CredentialKey::refresh(), "refresh-secret".into())
		.await
		.expect("Seeding the refresh token should succeed.");

	client.logout().await.expect("Logout should succeed.");

	assert_eq!(stored(store.as_ref(), &CredentialKey::access()).await, None);
	assert_eq!(stored(store.as_ref(), &CredentialKey::refresh()).await, None);

	client.logout().await.expect("Logging out twice should still succeed.");

	assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn session_status_reports_every_credential_state() {
	let server = MockServer::start_async().await;
	let (client, store, diagnostics) = build_test_client(&server.base_url());

	assert_eq!(
		client.session_status().await.expect("Inspecting an empty store should succeed."),
		SessionStatus::Anonymous
	);

	let expires_at = OffsetDateTime::from_unix_timestamp(
		(OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp(),
	)
	.expect("Truncated timestamp fixture should be in range.");

	store
		.save(&CredentialKey::access(), forge_access_token(expires_at))
		.await
		.expect("Seeding the access token should succeed.");
	assert_eq!(
		client.session_status().await.expect("Inspecting a live token should succeed."),
		SessionStatus::Active { expires_at }
	);

	let now = expires_at + Duration::hours(2);

	assert_eq!(
		client.session_status_at(now).await.expect("Inspecting a stale token should succeed."),
		SessionStatus::Expired { expired_at: expires_at }
	);
	// Inspection only reads; the stale token stays until a request purges it.
	assert!(stored(store.as_ref(), &CredentialKey::access()).await.is_some());
	assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn session_status_flags_undecodable_credentials_without_purging() {
	let server = MockServer::start_async().await;
	let (client, store, _diagnostics) = build_test_client(&server.base_url());

	store
		.save(&CredentialKey::access(), "garbage".into())
		.await
		.expect("Seeding the garbage token should succeed.");

	assert_eq!(
		client.session_status().await.expect("Inspecting a garbage token should succeed."),
		SessionStatus::Invalid
	);
	assert_eq!(
		stored(store.as_ref(), &CredentialKey::access()).await.as_deref(),
		Some("garbage")
	);
}
