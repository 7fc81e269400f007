use std::time::Duration;

use ghost_content_rs::{GhostError, RetryConfig};
use httpmock::Method::GET;

use crate::common::{self, path, posts_body};

#[tokio::test]
async fn cancelling_during_backoff_stops_further_attempts() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(503).body("busy");
    });

    let client = common::builder_for(&server)
        .retry_config(
            RetryConfig::default()
                .max_attempts(3)
                .base_delay(Duration::from_secs(2))
                .exponential_backoff(false),
        )
        .build()
        .unwrap();

    let request = client.spawn_cancellable(client.posts().fetch());
    let id = request.task_id();

    // Long enough for the first attempt to fail and the sleep to begin.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(client.is_in_flight(id));
    assert!(client.cancel(id));

    let result = request.await;
    assert!(matches!(result, Err(GhostError::Cancelled)), "got {result:?}");

    // Give a stray retry a chance to show up before counting.
    tokio::time::sleep(Duration::from_millis(100)).await;
    mock.assert_calls(1);
    assert!(!client.is_in_flight(id));
    assert!(!client.cancel(id));
}

#[tokio::test]
async fn handle_cancel_aborts_a_slow_response() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::client_for(&server);
    let request = client.spawn_cancellable(client.posts().fetch());

    tokio::time::sleep(Duration::from_millis(100)).await;
    request.cancel();
    assert!(request.is_cancelled());

    let result = tokio::time::timeout(Duration::from_secs(2), request)
        .await
        .expect("cancellation should not wait for the server");
    assert!(matches!(result, Err(GhostError::Cancelled)));
    assert_eq!(client.in_flight_count(), 0);
    assert_eq!(client.cached_responses().await, 0);
}

#[tokio::test]
async fn cancel_all_stops_every_request() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(posts_body(&[("1", "One")], 1, 1));
    });
    server.mock(|when, then| {
        when.method(GET).path(path("tags"));
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(r#"{"tags": []}"#);
    });

    let client = common::client_for(&server);
    let posts = client.spawn_cancellable(client.posts().fetch());
    let tags = client.spawn_cancellable(client.tags().fetch());

    // A plain call spawned on its own task registers itself too.
    let plain_client = client.clone();
    let plain = tokio::spawn(async move { plain_client.tags().limit(1).fetch().await });

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(client.in_flight_count(), 3);

    client.cancel_all();
    assert_eq!(client.in_flight_count(), 0);

    assert!(matches!(posts.await, Err(GhostError::Cancelled)));
    assert!(matches!(tags.await, Err(GhostError::Cancelled)));
    assert!(matches!(plain.await.unwrap(), Err(GhostError::Cancelled)));
}

#[tokio::test]
async fn cancelling_one_request_leaves_others_running() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200)
            .delay(Duration::from_millis(300))
            .body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::client_for(&server);
    let doomed = client.spawn_cancellable(client.posts().limit(1).fetch());
    let survivor = client.spawn_cancellable(client.posts().limit(2).fetch());
    assert_ne!(doomed.task_id(), survivor.task_id());

    doomed.cancel();

    assert!(matches!(doomed.await, Err(GhostError::Cancelled)));
    let page = survivor.await.unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn completed_requests_leave_the_registry() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200).body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::client_for(&server);
    let request = client.spawn_cancellable(client.posts().fetch());
    let id = request.task_id();

    let page = request.await.unwrap();
    assert_eq!(page.items[0].id, "1");
    assert_eq!(client.in_flight_count(), 0);
    assert!(!client.cancel(id));

    let _ = client.posts().limit(9).fetch().await;
    assert_eq!(client.in_flight_count(), 0);
}

#[tokio::test]
async fn cancel_all_interrupts_a_plain_request_in_backoff() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(503).body("busy");
    });

    let client = common::builder_for(&server)
        .retry_config(
            RetryConfig::default()
                .max_attempts(3)
                .base_delay(Duration::from_secs(2))
                .exponential_backoff(false),
        )
        .build()
        .unwrap();

    let plain_client = client.clone();
    let plain = tokio::spawn(async move { plain_client.posts().fetch().await });

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(client.in_flight_count(), 1);
    client.cancel_all();

    // Well under the 2s backoff, so the sleep itself was interrupted.
    let result = tokio::time::timeout(Duration::from_secs(1), plain)
        .await
        .expect("cancellation should interrupt the backoff sleep")
        .unwrap();
    assert!(matches!(result, Err(GhostError::Cancelled)), "got {result:?}");

    tokio::time::sleep(Duration::from_millis(100)).await;
    mock.assert_calls(1);
    assert_eq!(client.in_flight_count(), 0);
}

#[tokio::test]
async fn requests_on_another_client_are_tracked_by_that_client() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(posts_body(&[("1", "One")], 1, 1));
    });

    let outer = common::client_for(&server);
    let inner = common::client_for(&server);

    let request = outer.spawn_cancellable(inner.posts().fetch());
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(outer.in_flight_count(), 1);
    assert_eq!(inner.in_flight_count(), 1);
    assert!(!inner.is_in_flight(request.task_id()));

    inner.cancel_all();
    let result = tokio::time::timeout(Duration::from_secs(2), request)
        .await
        .expect("the inner client's cancel_all should reach the call");
    assert!(matches!(result, Err(GhostError::Cancelled)), "got {result:?}");
    assert_eq!(inner.in_flight_count(), 0);
    assert_eq!(outer.in_flight_count(), 0);
}

#[tokio::test]
async fn cancelling_the_outer_request_reaches_another_clients_call() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("tags"));
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(r#"{"tags": []}"#);
    });

    let outer = common::client_for(&server);
    let inner = common::client_for(&server);

    let request = outer.spawn_cancellable(inner.tags().fetch());
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(inner.in_flight_count(), 1);

    request.cancel();
    let result = tokio::time::timeout(Duration::from_secs(2), request).await.unwrap();
    assert!(matches!(result, Err(GhostError::Cancelled)));
    assert_eq!(inner.in_flight_count(), 0);
}
