//! Async client for a blog REST API—bearer-token request authentication, pluggable
//! credential stores, paginated listings, and multipart publishing in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod store;
pub mod _preludet {
	//! Convenience re-exports and fixtures for tests; public so downstream crates can
	//! reuse them in their own suites.

	pub use crate::_prelude::*;

	// crates.io
	use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
	// self
	use crate::{
		api::BlogClient,
		obs::{AuthNotice, Diagnostics},
		store::MemoryStore,
	};

	/// Diagnostics sink that records notices for later assertions.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingDiagnostics {
		warnings: Arc<Mutex<Vec<AuthNotice>>>,
		errors: Arc<Mutex<Vec<AuthNotice>>>,
	}
	impl RecordingDiagnostics {
		/// Returns the warnings recorded so far.
		pub fn warnings(&self) -> Vec<AuthNotice> {
			self.warnings.lock().clone()
		}

		/// Returns the errors recorded so far.
		pub fn errors(&self) -> Vec<AuthNotice> {
			self.errors.lock().clone()
		}

		/// Returns `true` when no notice of either level was recorded.
		pub fn is_empty(&self) -> bool {
			self.warnings.lock().is_empty() && self.errors.lock().is_empty()
		}
	}
	impl Diagnostics for RecordingDiagnostics {
		fn warn(&self, notice: AuthNotice) {
			self.warnings.lock().push(notice);
		}

		fn error(&self, notice: AuthNotice) {
			self.errors.lock().push(notice);
		}
	}

	/// Forges an unsigned three-segment token whose payload carries the provided expiry.
	///
	/// The header and signature segments are junk; the client never verifies them,
	/// matching the server-side-verification contract.
	pub fn forge_access_token(expires_at: OffsetDateTime) -> String {
		let payload = format!("{{\"exp\":{}}}", expires_at.unix_timestamp());

		format!("test_header.{}.test_signature", URL_SAFE_NO_PAD.encode(payload))
	}

	/// Constructs a [`BlogClient`] wired to a fresh in-memory store and recording sink.
	pub fn build_test_client(
		base_url: &str,
	) -> (BlogClient, Arc<MemoryStore>, Arc<RecordingDiagnostics>) {
		let store_backend = Arc::new(MemoryStore::default());
		let diagnostics = Arc::new(RecordingDiagnostics::default());
		let client = BlogClient::builder(base_url)
			.store(store_backend.clone())
			.diagnostics(diagnostics.clone())
			.build()
			.expect("Failed to build test client from the mock server URL.");

		(client, store_backend, diagnostics)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
