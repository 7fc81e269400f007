use std::time::Duration;

use ghost_content_rs::{GhostClient, GhostError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = GhostClient::new("demo.ghost.io", "22444f78447824223cefc48062")?;

    // 1. Start three requests; each one gets its own task id.
    let posts = client.spawn_cancellable(client.posts().limit(3).fetch());
    let authors = client.spawn_cancellable(client.authors().fetch());
    let all_posts = client.spawn_cancellable(client.posts().limit(15).fetch_all());
    println!("In flight: {}", client.in_flight_count());

    // 2. Cancel one through the handle and one through the client.
    all_posts.cancel();
    client.cancel(authors.task_id());

    // 3. The remaining request is unaffected.
    match posts.await {
        Ok(page) => println!("Fetched {} posts", page.len()),
        Err(e) => println!("Posts failed: {e}"),
    }
    let finished = [
        ("authors", authors.await.map(|p| p.len())),
        ("all posts", all_posts.await.map(|p| p.len())),
    ];
    for (name, result) in finished {
        match result {
            Err(GhostError::Cancelled) => println!("{name}: cancelled"),
            Err(e) => println!("{name}: failed: {e}"),
            Ok(n) => println!("{name}: finished before cancellation with {n} items"),
        }
    }

    // 4. cancel_all stops everything that is still running.
    let slow = client.spawn_cancellable(client.tags().all().fetch());
    tokio::time::sleep(Duration::from_millis(10)).await;
    client.cancel_all();
    println!("After cancel_all: {:?}", slow.await.err());
    println!("In flight: {}", client.in_flight_count());

    Ok(())
}
