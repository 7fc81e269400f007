use std::time::Duration;

use ghost_content_rs::CacheMode;
use httpmock::Method::GET;

use crate::common::{self, path, posts_body};

#[tokio::test]
async fn second_fetch_is_served_from_cache() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts")).query_param("limit", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(posts_body(&[("1", "First"), ("2", "Second")], 1, 1));
    });

    let client = common::client_for(&server);

    let first = client.posts().limit(2).fetch().await.unwrap();
    mock.assert_calls(1);

    let second = client.posts().limit(2).fetch().await.unwrap();
    mock.assert_calls(1);

    assert_eq!(first, second);
    assert_eq!(client.cached_responses().await, 1);
}

#[tokio::test]
async fn different_params_are_cached_separately() {
    let server = common::setup_server();

    let page1 = server.mock(|when, then| {
        when.method(GET).path(path("posts")).query_param("page", "1");
        then.status(200).body(posts_body(&[("1", "One")], 1, 2));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET).path(path("posts")).query_param("page", "2");
        then.status(200).body(posts_body(&[("2", "Two")], 2, 2));
    });

    let client = common::client_for(&server);
    let a = client.posts().page(1).fetch().await.unwrap();
    let b = client.posts().page(2).fetch().await.unwrap();
    let _ = client.posts().page(1).fetch().await.unwrap();

    page1.assert_calls(1);
    page2.assert_calls(1);
    assert_eq!(a.items[0].id, "1");
    assert_eq!(b.items[0].id, "2");
}

#[tokio::test]
async fn refresh_skips_the_read_but_updates_the_cache() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200).body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::client_for(&server);

    let _ = client.posts().fetch().await.unwrap();
    mock.assert_calls(1);

    let _ = client
        .posts()
        .cache_mode(CacheMode::Refresh)
        .fetch()
        .await
        .unwrap();
    mock.assert_calls(2);

    let _ = client.posts().fetch().await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn bypass_neither_reads_nor_writes() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200).body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::client_for(&server);
    for _ in 0..2 {
        let _ = client
            .posts()
            .cache_mode(CacheMode::Bypass)
            .fetch()
            .await
            .unwrap();
    }
    mock.assert_calls(2);
    assert_eq!(client.cached_responses().await, 0);
}

#[tokio::test]
async fn disabled_cache_always_hits_the_network() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("tags"));
        then.status(200).body(r#"{"tags": [{"id": "t1", "name": "News"}]}"#);
    });

    let client = common::builder_for(&server)
        .cache_enabled(false)
        .build()
        .unwrap();

    let _ = client.tags().fetch().await.unwrap();
    let _ = client.tags().fetch().await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200).body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::builder_for(&server)
        .cache_ttl(Duration::from_millis(100))
        .build()
        .unwrap();

    let _ = client.posts().fetch().await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    let _ = client.posts().fetch().await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn clear_cache_forces_a_refetch() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200).body(posts_body(&[("1", "One")], 1, 1));
    });

    let client = common::client_for(&server);
    let _ = client.posts().fetch().await.unwrap();
    client.clear_cache().await;
    let _ = client.posts().fetch().await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn capacity_evicts_least_recently_used_response() {
    let server = common::setup_server();

    let posts = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(200).body(posts_body(&[("1", "One")], 1, 1));
    });
    let tags = server.mock(|when, then| {
        when.method(GET).path(path("tags"));
        then.status(200).body(r#"{"tags": []}"#);
    });
    let authors = server.mock(|when, then| {
        when.method(GET).path(path("authors"));
        then.status(200).body(r#"{"authors": []}"#);
    });

    let client = common::builder_for(&server)
        .cache_max_items(2)
        .build()
        .unwrap();

    let _ = client.posts().fetch().await.unwrap();
    let _ = client.tags().fetch().await.unwrap();
    // Touch posts so tags becomes the eviction candidate.
    let _ = client.posts().fetch().await.unwrap();
    let _ = client.authors().fetch().await.unwrap();

    let _ = client.posts().fetch().await.unwrap();
    let _ = client.tags().fetch().await.unwrap();

    posts.assert_calls(1);
    tags.assert_calls(2);
    authors.assert_calls(1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path(path("posts"));
        then.status(404).body("missing");
    });

    let client = common::client_for(&server);
    assert!(client.posts().fetch().await.is_err());
    assert!(client.posts().fetch().await.is_err());
    mock.assert_calls(2);
    assert_eq!(client.cached_responses().await, 0);
}
