//! Demonstrates anonymous post listing and pagination math against a local
//! mock API server.

// std
use std::num::NonZeroU32;
// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
// self
use blog_api_client::api::BlogClient;

const PAGE_ONE: &str = "{\"count\":3,\"next\":\"/posts/?page=2\",\"previous\":null,\"results\":[\
                        {\"id\":1,\"title\":\"Shipping the new editor\",\
                        \"content\":\"A tour of the rewritten post editor.\",\
                        \"category\":\"Technology\",\"featured_image\":null,\
                        \"published_at\":\"2026-01-10T09:00:00Z\"},\
                        {\"id\":2,\"title\":\"Quarterly market notes\",\
                        \"content\":\"What moved the markets this quarter.\",\
                        \"category\":\"Economy\",\"featured_image\":null,\
                        \"published_at\":\"2026-01-17T09:00:00Z\"}]}";
const PAGE_TWO: &str = "{\"count\":3,\"next\":null,\"previous\":\"/posts/?page=1\",\"results\":[\
                        {\"id\":3,\"title\":\"Slow mornings\",\
                        \"content\":\"Why my best writing happens before coffee.\",\
                        \"category\":\"Lifestyle\",\"featured_image\":null,\
                        \"published_at\":\"2026-01-24T09:00:00Z\"}]}";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/posts/").query_param("page", "1");
			then.status(200).header("content-type", "application/json").body(PAGE_ONE);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/posts/").query_param("page", "2");
			then.status(200).header("content-type", "application/json").body(PAGE_TWO);
		})
		.await;

	let client = BlogClient::builder(server.base_url()).build()?;
	let per_page = NonZeroU32::new(2).ok_or_else(|| eyre!("Demo page size must be non-zero."))?;
	let mut page_number = 1;
	let mut page = client.list_posts(page_number).await?;

	println!("{} posts across {} pages.", page.count, page.total_pages(per_page));

	loop {
		for post in &page.results {
			println!("#{} [{}] {}", post.id, post.category, post.title);
		}

		if !page.has_next() {
			break;
		}

		page_number += 1;
		page = client.list_posts(page_number).await?;
	}

	Ok(())
}
