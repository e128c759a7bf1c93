//! Post listing, creation, and update operations.

// crates.io
use reqwest::multipart::{Form, Part};
// self
use crate::{
	_prelude::*,
	api::BlogClient,
	error::ConfigError,
	model::{ImageUpload, Post, PostDraft, PostDraftError, PostPage},
	obs::{self, ApiKind, ApiOutcome, ApiSpan},
};

impl BlogClient {
	/// Fetches one page of the post listing; pages are 1-indexed.
	pub async fn list_posts(&self, page: u32) -> Result<PostPage> {
		const KIND: ApiKind = ApiKind::ListPosts;

		let span = ApiSpan::new(KIND, "list_posts");

		obs::record_api_outcome(KIND, ApiOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint("posts/")?;
				let request = self.http_client.get(url).query(&[("page", page)]);
				let response = self.dispatch(request).await?;

				self.read_json(response).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_api_outcome(KIND, ApiOutcome::Success),
			Err(_) => obs::record_api_outcome(KIND, ApiOutcome::Failure),
		}

		result
	}

	/// Uploads a new post as a multipart form; the draft must carry a featured image.
	pub async fn create_post(&self, draft: PostDraft) -> Result<Post> {
		const KIND: ApiKind = ApiKind::CreatePost;

		let span = ApiSpan::new(KIND, "create_post");

		obs::record_api_outcome(KIND, ApiOutcome::Attempt);

		let result = span
			.instrument(async move {
				if draft.featured_image.is_none() {
					return Err(
						ConfigError::InvalidDraft(PostDraftError::MissingFeaturedImage).into()
					);
				}

				let url = self.endpoint("posts/")?;
				let form = build_post_form(&draft)?;
				let request = self.http_client.post(url).multipart(form);
				let response = self.dispatch(request).await?;

				self.read_json(response).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_api_outcome(KIND, ApiOutcome::Success),
			Err(_) => obs::record_api_outcome(KIND, ApiOutcome::Failure),
		}

		result
	}

	/// Updates an existing post; leaving the image out keeps the server-side one.
	pub async fn update_post(&self, id: u64, draft: PostDraft) -> Result<Post> {
		const KIND: ApiKind = ApiKind::UpdatePost;

		let span = ApiSpan::new(KIND, "update_post");

		obs::record_api_outcome(KIND, ApiOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint(&format!("posts/{id}/"))?;
				let form = build_post_form(&draft)?;
				let request = self.http_client.put(url).multipart(form);
				let response = self.dispatch(request).await?;

				self.read_json(response).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_api_outcome(KIND, ApiOutcome::Success),
			Err(_) => obs::record_api_outcome(KIND, ApiOutcome::Failure),
		}

		result
	}
}

fn build_post_form(draft: &PostDraft) -> Result<Form> {
	let mut form = Form::new()
		.text("title", draft.title.clone())
		.text("content", draft.content.clone())
		.text("category", draft.category.as_str());

	if let Some(image) = &draft.featured_image {
		form = form.part("featured_image", build_image_part(image)?);
	}

	Ok(form)
}

fn build_image_part(image: &ImageUpload) -> Result<Part> {
	let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());

	if let Some(content_type) = &image.content_type {
		part = part
			.mime_str(content_type)
			.map_err(|e| ConfigError::Multipart { reason: e.to_string() })?;
	}

	Ok(part)
}
