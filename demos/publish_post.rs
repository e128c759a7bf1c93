//! Demonstrates logging in, publishing a post with a featured image, and
//! logging back out against a local mock API server.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use color_eyre::Result;
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime};
// self
use blog_api_client::{
	api::BlogClient,
	model::{Category, ImageUpload, PostDraft},
};

// PNG magic bytes, enough to stand in for a real banner image.
const BANNER: &[u8] = &[0x89, b'P', b'N', b'G'];

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	// The API issues unsigned-looking JWTs in this demo; only the `exp` claim
	// matters to the client.
	let claims =
		format!("{{\"exp\":{}}}", (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp());
	let access = format!("demo-header.{}.demo-signature", URL_SAFE_NO_PAD.encode(claims));

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body(format!("{{\"access\":\"{access}\",\"refresh\":\"demo-refresh\"}}"));
		})
		.await;

	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/posts/").header("authorization", format!("Bearer {access}"));
			then.status(201).header("content-type", "application/json").body(
				"{\"id\":42,\"title\":\"Announcing the spring release\",\
				 \"content\":\"Everything that landed in the spring release, in one post.\",\
				 \"category\":\"Technology\",\
				 \"featured_image\":\"http://testserver/media/banner.png\",\
				 \"published_at\":\"2026-04-01T08:00:00Z\"}",
			);
		})
		.await;
	let client = BlogClient::builder(server.base_url()).build()?;

	client.login("editor", "correct horse battery staple").await?;

	println!("Session after login: {:?}.", client.session_status().await?);

	let draft = PostDraft::new(
		"Announcing the spring release",
		"Everything that landed in the spring release, in one post.",
		Category::Technology,
	)?
	.with_featured_image(ImageUpload::new("banner.png", BANNER).with_content_type("image/png"));
	let post = client.create_post(draft).await?;

	println!("Published post #{}: {}.", post.id, post.title);

	create_mock.assert_async().await;

	client.logout().await?;

	println!("Session after logout: {:?}.", client.session_status().await?);

	Ok(())
}
