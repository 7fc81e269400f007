use std::time::Duration;

use ghost_content_rs::{GhostClient, GhostConfig, GhostClientBuilder, RetryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Build a client from the environment, or fall back to the public demo site.
    let client = match GhostConfig::from_env() {
        Ok(config) => GhostClientBuilder::from_config(config).build()?,
        Err(_) => GhostClient::builder()
            .admin_domain("demo.ghost.io")
            .api_key("22444f78447824223cefc48062")
            .timeout(Duration::from_secs(10))
            .retry_config(RetryConfig::default().max_attempts(4))
            .build()?,
    };

    // 2. Site settings.
    let settings = client.settings().await?;
    println!("--- {} ---", settings.title.unwrap_or_default());
    for item in &settings.navigation {
        println!("  [{}] {}", item.label, item.url);
    }
    println!();

    // 3. The latest posts with their tags and authors.
    let page = client
        .posts()
        .limit(5)
        .include(["tags", "authors"])
        .order("published_at desc")
        .fetch()
        .await?;
    println!("--- Latest posts ---");
    for post in &page.items {
        let tags: Vec<_> = post
            .tags
            .iter()
            .flatten()
            .filter_map(|t| t.name.as_deref())
            .collect();
        println!(
            "  {} ({} min) [{}]",
            post.title.as_deref().unwrap_or("untitled"),
            post.reading_time.unwrap_or_default(),
            tags.join(", ")
        );
    }
    if let Some(meta) = &page.meta {
        println!("  page {} of {}, {} posts in total", meta.page, meta.pages, meta.total);
    }
    println!();

    // 4. A second call with the same parameters is served from the cache.
    let again = client
        .posts()
        .limit(5)
        .include(["tags", "authors"])
        .order("published_at desc")
        .fetch()
        .await?;
    println!(
        "Cached copy matches: {} ({} responses cached)",
        again == page,
        client.cached_responses().await
    );
    println!();

    // 5. Every tag, with post counts, on a single page.
    let tags = client.tags().all().include(["count.posts"]).fetch().await?;
    println!("--- Tags ---");
    for tag in tags.items {
        let count = tag.count.and_then(|c| c.posts).unwrap_or_default();
        println!("  {}: {count}", tag.name.unwrap_or(tag.id));
    }

    Ok(())
}
