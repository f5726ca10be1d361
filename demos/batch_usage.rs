//! Batch Usage Example
//!
//! Queues requests to several Diffbot APIs and resolves them with batch calls:
//! - one single call with `execute()`
//! - several queued requests resolved by the first `wait()`
//! - per-request errors versus a failed batch call
//!
//! Usage:
//!   DIFFBOT_TOKEN=... cargo run --example batch_usage -- http://example.com/post
//!
//! Set `RUST_LOG=diffbot_rust=debug` to follow slicing and correlation.

use diffbot_rust::{DiffbotClient, Error, Extracted, PageType};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let page = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://www.diffbot.com/".to_string());

    // Token comes from DIFFBOT_TOKEN.
    let client = DiffbotClient::builder().max_batch_requests(10).build()?;

    println!("--- Single call ---");
    match client.classifier(&page).stats().execute().await {
        Ok(classified) => println!("{} is a {} page", page, classified.page_type()),
        Err(e) => println!("classifier failed: {}", e),
    }

    println!("\n--- Batch ---");
    let article = client.article(&page).fields("meta,tags").queue();
    let frontpage = client.frontpage(&page).queue();
    let product = client.classifier(&page).mode(PageType::Product).queue();
    println!("queued: {}", client.queue_len());

    // The first wait sends one batch call carrying all three requests.
    match article.wait().await {
        Ok(a) => println!("article: {:?}", a.title),
        Err(e) if e.is_batch_failure() => {
            println!("batch call failed, {} requests still queued: {}", client.queue_len(), e);
            return Ok(());
        }
        Err(e) => println!("article failed: {}", e),
    }
    println!("queued after batch: {}", client.queue_len());

    match frontpage.wait().await {
        Ok(f) => println!("frontpage: {} items", f.items.len()),
        Err(Error::Api { code, message }) => println!("frontpage API error {}: {}", code, message),
        Err(e) => println!("frontpage failed: {}", e),
    }
    match product.wait().await.and_then(|c| c.as_products()) {
        Ok(p) => println!("products: {}", p.products.len()),
        Err(e) => println!("product extraction failed: {}", e),
    }

    Ok(())
}
