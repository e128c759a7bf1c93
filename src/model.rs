//! Domain models for posts, drafts, image uploads, and pagination envelopes.

// std
use std::num::NonZeroU32;
// self
use crate::_prelude::*;

/// Minimum number of characters for a post title.
pub const TITLE_MIN_CHARS: usize = 3;
/// Minimum number of characters for post content.
pub const CONTENT_MIN_CHARS: usize = 10;

/// Post category labels accepted by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
	/// Technology posts.
	Technology,
	/// Economy posts.
	Economy,
	/// Business posts.
	Business,
	/// Lifestyle posts.
	Lifestyle,
}
impl Category {
	/// Returns the category label exactly as sent over the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Category::Technology => "Technology",
			Category::Economy => "Economy",
			Category::Business => "Business",
			Category::Lifestyle => "Lifestyle",
		}
	}
}
impl Display for Category {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Published post returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
	/// Server-assigned post identifier.
	pub id: u64,
	/// Post title.
	pub title: String,
	/// Post body content.
	pub content: String,
	/// Category label.
	pub category: Category,
	/// URL of the uploaded featured image, if any.
	pub featured_image: Option<String>,
	/// Publication instant reported by the server.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub published_at: Option<OffsetDateTime>,
}

/// Errors produced while validating a [`PostDraft`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum PostDraftError {
	/// Title is shorter than the minimum character count.
	#[error("Post title must be at least {min} characters.")]
	TitleTooShort {
		/// Minimum permitted character count.
		min: usize,
	},
	/// Content is shorter than the minimum character count.
	#[error("Post content must be at least {min} characters.")]
	ContentTooShort {
		/// Minimum permitted character count.
		min: usize,
	},
	/// Creating a post requires a featured image.
	#[error("Post draft is missing a featured image.")]
	MissingFeaturedImage,
}

/// Image payload uploaded alongside a post draft.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
	/// File name reported to the server.
	pub file_name: String,
	/// MIME type of the payload, when known.
	pub content_type: Option<String>,
	/// Raw image bytes.
	pub bytes: Vec<u8>,
}
impl ImageUpload {
	/// Creates an upload from a file name and raw bytes.
	pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		Self { file_name: file_name.into(), content_type: None, bytes: bytes.into() }
	}

	/// Sets the MIME type sent with the upload.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());

		self
	}
}
impl Debug for ImageUpload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ImageUpload")
			.field("file_name", &self.file_name)
			.field("content_type", &self.content_type)
			.field("bytes", &format_args!("{} bytes", self.bytes.len()))
			.finish()
	}
}

/// Validated post payload ready for submission.
///
/// Lengths are counted in characters rather than bytes, so multi-byte input is
/// measured the way a form field would display it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
	/// Post title, at least [`TITLE_MIN_CHARS`] characters.
	pub title: String,
	/// Post content, at least [`CONTENT_MIN_CHARS`] characters.
	pub content: String,
	/// Category label.
	pub category: Category,
	/// Optional featured image upload.
	pub featured_image: Option<ImageUpload>,
}
impl PostDraft {
	/// Validates and creates a draft without a featured image.
	pub fn new(
		title: impl Into<String>,
		content: impl Into<String>,
		category: Category,
	) -> Result<Self, PostDraftError> {
		let title = title.into();
		let content = content.into();

		if title.chars().count() < TITLE_MIN_CHARS {
			return Err(PostDraftError::TitleTooShort { min: TITLE_MIN_CHARS });
		}
		if content.chars().count() < CONTENT_MIN_CHARS {
			return Err(PostDraftError::ContentTooShort { min: CONTENT_MIN_CHARS });
		}

		Ok(Self { title, content, category, featured_image: None })
	}

	/// Attaches a featured image upload.
	pub fn with_featured_image(mut self, image: ImageUpload) -> Self {
		self.featured_image = Some(image);

		self
	}
}

/// Paginated listing envelope returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
	/// Total number of posts across all pages.
	pub count: u64,
	/// URL of the next page, when one exists.
	pub next: Option<String>,
	/// URL of the previous page, when one exists.
	pub previous: Option<String>,
	/// Posts on the current page.
	pub results: Vec<Post>,
}
impl PostPage {
	/// Number of pages needed to display every post at the provided page size.
	///
	/// Uses ceiling division; an empty listing reports zero pages.
	pub fn total_pages(&self, per_page: NonZeroU32) -> u64 {
		self.count.div_ceil(u64::from(per_page.get()))
	}

	/// Returns `true` when a later page exists.
	pub fn has_next(&self) -> bool {
		self.next.is_some()
	}

	/// Returns `true` when an earlier page exists.
	pub fn has_previous(&self) -> bool {
		self.previous.is_some()
	}
}
