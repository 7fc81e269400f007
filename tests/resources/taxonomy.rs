use httpmock::Method::GET;
use serde_json::json;

use crate::common::{self, path};

#[tokio::test]
async fn tags_with_post_counts() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(path("tags"))
            .query_param("include", "count.posts")
            .query_param("order", "name asc");
        then.status(200).body(
            json!({
                "tags": [
                    { "id": "t1", "name": "News", "slug": "news", "visibility": "public", "count": { "posts": 12 } },
                    { "id": "t2", "name": "#internal", "slug": "hash-internal", "visibility": "internal", "count": { "posts": 0 } }
                ],
                "meta": common::pagination(1, 15, 1, 2)
            })
            .to_string(),
        );
    });

    let client = common::client_for(&server);
    let tags = client
        .tags()
        .include(["count.posts"])
        .order("name asc")
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags.items[0].count.as_ref().unwrap().posts, Some(12));
    assert_eq!(tags.items[1].visibility.as_deref(), Some("internal"));
}

#[tokio::test]
async fn tag_by_slug_and_author_by_slug() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("tags/slug/news"));
        then.status(200)
            .body(json!({ "tags": [{ "id": "t1", "name": "News", "slug": "news" }] }).to_string());
    });
    server.mock(|when, then| {
        when.method(GET).path(path("authors/slug/jane"));
        then.status(200).body(
            json!({ "authors": [{
                "id": "a1",
                "name": "Jane",
                "slug": "jane",
                "bio": "Writes things.",
                "website": null,
                "count": { "posts": 4 }
            }] })
            .to_string(),
        );
    });

    let client = common::client_for(&server);
    let tag = client.tag_by_slug("news").fetch().await.unwrap();
    assert_eq!(tag.name.as_deref(), Some("News"));

    let author = client.author_by_slug("jane").fetch().await.unwrap();
    assert_eq!(author.id, "a1");
    assert_eq!(author.bio.as_deref(), Some("Writes things."));
    assert_eq!(author.website, None);
    assert_eq!(author.count.unwrap().posts, Some(4));
}

#[tokio::test]
async fn browse_authors_and_read_by_id() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("authors"));
        then.status(200).body(
            json!({
                "authors": [{ "id": "a1", "name": "Jane" }, { "id": "a2", "name": "Sam" }],
                "meta": common::pagination(1, 15, 1, 2)
            })
            .to_string(),
        );
    });
    server.mock(|when, then| {
        when.method(GET).path(path("authors/a2"));
        then.status(200)
            .body(json!({ "authors": [{ "id": "a2", "name": "Sam" }] }).to_string());
    });
    server.mock(|when, then| {
        when.method(GET).path(path("tags/t9"));
        then.status(200)
            .body(json!({ "tags": [{ "id": "t9" }] }).to_string());
    });

    let client = common::client_for(&server);
    let authors = client.authors().fetch().await.unwrap();
    assert_eq!(authors.len(), 2);

    let sam = client.author("a2").fetch().await.unwrap();
    assert_eq!(sam.name.as_deref(), Some("Sam"));

    let tag = client.tag("t9").fetch().await.unwrap();
    assert_eq!(tag.id, "t9");
    assert_eq!(tag.name, None);
}
