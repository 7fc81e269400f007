use httpmock::Method::GET;
use serde_json::json;

use crate::common::{self, API_KEY, path};

#[tokio::test]
async fn tiers_decode_prices_and_type() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(path("tiers"))
            .query_param("include", "monthly_price,yearly_price,benefits");
        then.status(200).body(
            json!({
                "tiers": [
                    { "id": "free", "name": "Free", "slug": "free", "active": true, "type": "free", "visibility": "public", "benefits": null },
                    {
                        "id": "gold", "name": "Gold", "slug": "gold", "active": true, "type": "paid",
                        "monthly_price": 500, "yearly_price": 5000, "currency": "USD",
                        "benefits": ["Early access", "Newsletter"], "trial_days": 7
                    }
                ],
                "meta": common::pagination(1, 15, 1, 2)
            })
            .to_string(),
        );
    });

    let client = common::client_for(&server);
    let tiers = client
        .tiers()
        .include(["monthly_price", "yearly_price", "benefits"])
        .fetch()
        .await
        .unwrap();

    mock.assert();
    let free = &tiers.items[0];
    assert_eq!(free.kind.as_deref(), Some("free"));
    assert_eq!(free.benefits, None);

    let gold = &tiers.items[1];
    assert_eq!(gold.kind.as_deref(), Some("paid"));
    assert_eq!(gold.monthly_price, Some(500));
    assert_eq!(gold.currency.as_deref(), Some("USD"));
    assert_eq!(gold.benefits.as_ref().map(Vec::len), Some(2));
    assert_eq!(gold.trial_days, Some(7));
}

#[tokio::test]
async fn tier_by_id() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path(path("tiers/gold"));
        then.status(200)
            .body(json!({ "tiers": [{ "id": "gold", "name": "Gold", "active": false }] }).to_string());
    });

    let client = common::client_for(&server);
    let gold = client.tier("gold").fetch().await.unwrap();
    assert!(!gold.active);
}

#[tokio::test]
async fn settings_object_is_decoded_and_cached() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(path("settings"))
            .query_param("key", API_KEY)
            .header("accept-version", "v5.0");
        then.status(200).body(
            json!({
                "settings": {
                    "title": "Ghost Demo",
                    "description": "Thoughts, stories and ideas.",
                    "lang": "en",
                    "timezone": "Etc/UTC",
                    "navigation": [
                        { "label": "Home", "url": "/" },
                        { "label": "About", "url": "/about/" }
                    ],
                    "secondary_navigation": [],
                    "url": "https://demo.ghost.io/"
                },
                "meta": {}
            })
            .to_string(),
        );
    });

    let client = common::client_for(&server);
    let first = client.settings().await.unwrap();
    let second = client.settings().await.unwrap();

    mock.assert_calls(1);
    assert_eq!(first, second);
    assert_eq!(first.title.as_deref(), Some("Ghost Demo"));
    assert_eq!(first.navigation.len(), 2);
    assert_eq!(first.navigation[1].label, "About");
    assert!(first.secondary_navigation.is_empty());
}
