//! Blog API client, configuration builder, and request dispatch pipeline.

pub mod session;

mod posts;

pub use session::*;

// crates.io
use reqwest::{RequestBuilder, Response, StatusCode};
// self
use crate::{
	_prelude::*,
	auth::RequestAuthenticator,
	error::{ConfigError, TransientError},
	http::{self, ApiHttpClient},
	obs::{Diagnostics, TracingDiagnostics},
	store::{CredentialKey, CredentialStore, MemoryStore},
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Asynchronous client for the blog REST API.
///
/// The client owns the HTTP transport, the normalized base URL, the per-request
/// authenticator, and a reference to the credential store shared with the session
/// operations. Construct it via [`BlogClient::builder`] and clone freely; all state
/// lives behind `Arc`s.
#[derive(Clone)]
pub struct BlogClient {
	http_client: ApiHttpClient,
	base_url: Url,
	authenticator: RequestAuthenticator,
	store: Arc<dyn CredentialStore>,
	access_key: CredentialKey,
	refresh_key: CredentialKey,
}
impl BlogClient {
	/// Returns a builder for the provided API base URL.
	pub fn builder(base_url: impl AsRef<str>) -> BlogClientBuilder {
		BlogClientBuilder::new(base_url)
	}

	/// Base URL every endpoint path is joined onto; always ends with a slash.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Authenticator that decides bearer attachment for each outgoing request.
	pub fn authenticator(&self) -> &RequestAuthenticator {
		&self.authenticator
	}

	/// Credential store shared with the login/logout session operations.
	pub fn store(&self) -> &Arc<dyn CredentialStore> {
		&self.store
	}

	pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
		self.base_url
			.join(path)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source }.into())
	}

	/// Builds, authenticates, and executes a request, returning the raw response.
	///
	/// Every wire call funnels through here so the authenticator sees each request
	/// exactly once before it leaves the process.
	pub(crate) async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
		let mut request = builder.build().map_err(http::map_reqwest_error)?;

		self.authenticator.authenticate(request.headers_mut()).await;

		self.http_client.execute(request).await
	}

	/// Decodes a JSON success body, mapping error statuses into the crate taxonomy.
	pub(crate) async fn read_json<T>(&self, response: Response) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let status = response.status();
		let retry_after = http::parse_retry_after(response.headers());
		let bytes = response.bytes().await.map_err(http::map_reqwest_error)?;

		if !status.is_success() {
			return Err(classify_response(status, retry_after, &bytes));
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			TransientError::ResponseParse { source, status: Some(status.as_u16()) }.into()
		})
	}
}
impl Debug for BlogClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BlogClient")
			.field("base_url", &self.base_url.as_str())
			.field("access_key", &self.access_key)
			.field("refresh_key", &self.refresh_key)
			.finish()
	}
}

/// Builder that validates configuration before constructing a [`BlogClient`].
pub struct BlogClientBuilder {
	base_url: String,
	http_client: Option<ApiHttpClient>,
	store: Option<Arc<dyn CredentialStore>>,
	diagnostics: Option<Arc<dyn Diagnostics>>,
	access_key: Option<CredentialKey>,
	refresh_key: Option<CredentialKey>,
}
impl BlogClientBuilder {
	fn new(base_url: impl AsRef<str>) -> Self {
		Self {
			base_url: base_url.as_ref().to_owned(),
			http_client: None,
			store: None,
			diagnostics: None,
			access_key: None,
			refresh_key: None,
		}
	}

	/// Overrides the HTTP transport (custom TLS, proxies, timeouts).
	pub fn http_client(mut self, http_client: ApiHttpClient) -> Self {
		self.http_client = Some(http_client);

		self
	}

	/// Overrides the credential store; defaults to a fresh [`MemoryStore`].
	pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
		self.store = Some(store);

		self
	}

	/// Overrides the diagnostics sink; defaults to [`TracingDiagnostics`].
	pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
		self.diagnostics = Some(diagnostics);

		self
	}

	/// Overrides the access-token slot key; defaults to `"access"`.
	pub fn access_key(mut self, key: CredentialKey) -> Self {
		self.access_key = Some(key);

		self
	}

	/// Overrides the refresh-token slot key; defaults to `"refresh"`.
	pub fn refresh_key(mut self, key: CredentialKey) -> Self {
		self.refresh_key = Some(key);

		self
	}

	/// Validates the configuration and constructs a [`BlogClient`].
	pub fn build(self) -> Result<BlogClient, ConfigError> {
		let base_url = normalize_base_url(&self.base_url)?;
		let http_client = self.http_client.unwrap_or_default();
		let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::default()));
		let diagnostics = self.diagnostics.unwrap_or_else(|| Arc::new(TracingDiagnostics));
		let access_key = self.access_key.unwrap_or_default();
		let refresh_key = self.refresh_key.unwrap_or_else(CredentialKey::refresh);
		let authenticator =
			RequestAuthenticator::new(store.clone(), access_key.clone(), diagnostics);

		Ok(BlogClient { http_client, base_url, authenticator, store, access_key, refresh_key })
	}
}
impl Debug for BlogClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BlogClientBuilder")
			.field("base_url", &self.base_url)
			.field("custom_http_client", &self.http_client.is_some())
			.field("custom_store", &self.store.is_some())
			.field("custom_diagnostics", &self.diagnostics.is_some())
			.field("access_key", &self.access_key)
			.field("refresh_key", &self.refresh_key)
			.finish()
	}
}

/// Parses and normalizes the configured base URL so `Url::join` treats its last path
/// segment as a directory.
fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedBaseUrl { base: raw.to_owned() });
	}
	if url.path().ends_with('/') {
		return Ok(url);
	}

	let mut normalized = url;

	normalized.set_path(&format!("{}/", normalized.path()));

	Ok(normalized)
}

fn classify_response(status: StatusCode, retry_after: Option<Duration>, body: &[u8]) -> Error {
	let reason = extract_detail(body).unwrap_or_else(|| {
		let preview = truncate_preview(String::from_utf8_lossy(body).trim().to_owned());

		if preview.is_empty() {
			status.canonical_reason().unwrap_or("unknown error").to_owned()
		} else {
			preview
		}
	});

	match status.as_u16() {
		400 => Error::Validation { reason },
		401 => Error::Unauthorized { reason },
		403 => Error::Forbidden { reason },
		404 => Error::NotFound { reason },
		code =>
			TransientError::Api { message: reason, status: Some(code), retry_after }.into(),
	}
}

/// Pulls the conventional `detail` field out of an API error payload.
fn extract_detail(body: &[u8]) -> Option<String> {
	#[derive(Deserialize)]
	struct Detail {
		detail: String,
	}

	serde_json::from_slice::<Detail>(body).ok().map(|payload| payload.detail)
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut preview = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	preview.push('…');

	preview
}
