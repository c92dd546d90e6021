//! Tests for loading configuration and seed data from disk

use axum::http::StatusCode;
use axum_test::TestServer;
use grubdash::prelude::*;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

const SEED: &str = r#"
dishes:
  - id: 3c637d011d844ebab1205fef8a7e36ea
    name: Broccoli and beetroot stir fry
    description: Crunchy stir fry featuring fresh broccoli and beetroot
    price: 15
    image_url: https://images.example.com/stir-fry.jpg
orders:
  - id: f6069a542257054114138301947672ba
    deliverTo: 1600 Pennsylvania Avenue NW, Washington, DC 20500
    mobileNumber: (202) 456-1111
    status: out-for-delivery
    dishes:
      - dishId: 3c637d011d844ebab1205fef8a7e36ea
        quantity: 1
  - id: 5a887d326e83d3c5bdcbee398ea32aff
    deliverTo: 308 Negra Arroyo Lane, Albuquerque, NM
    mobileNumber: (505) 143-3369
    status: pending
    dishes:
      - dishId: 3c637d011d844ebab1205fef8a7e36ea
        quantity: 2
"#;

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_app_config_from_file() {
    let file = yaml_file(
        "server:\n  host: 0.0.0.0\n  port: 8080\nlogging:\n  filter: grubdash=debug\nseed_file: seed.yaml\n",
    );

    let config = AppConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.logging.filter, "grubdash=debug");
    assert_eq!(config.seed_file.as_deref(), Some(std::path::Path::new("seed.yaml")));
}

#[test]
fn test_app_config_missing_file() {
    let err = AppConfig::from_yaml_file("/nonexistent/grubdash.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_load_seed_follows_seed_file() {
    let seed_file = yaml_file(SEED);
    let config = AppConfig {
        seed_file: Some(seed_file.path().to_path_buf()),
        ..AppConfig::default()
    };

    let seed = config.load_seed().unwrap().unwrap();
    assert_eq!(seed.dishes.len(), 1);
    assert_eq!(seed.orders.len(), 2);
    assert_eq!(seed.orders[0].status, OrderStatus::OutForDelivery);

    assert!(AppConfig::default().load_seed().unwrap().is_none());
}

#[tokio::test]
async fn test_seeded_server_serves_records() {
    let seed = SeedData::from_yaml_file(yaml_file(SEED).path()).unwrap();
    let router = ServerBuilder::new().with_seed(seed).build().unwrap();
    let server = TestServer::new(router);

    let dishes: Value = server.get("/dishes").await.json();
    assert_eq!(dishes["data"][0]["name"], "Broccoli and beetroot stir fry");

    let response = server.delete("/orders/f6069a542257054114138301947672ba").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    server
        .delete("/orders/5a887d326e83d3c5bdcbee398ea32aff")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let orders: Value = server.get("/orders").await.json();
    assert_eq!(orders["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_random_ids_are_unique_hex() {
    let seed = SeedData::from_yaml_str(SEED).unwrap();
    let router = ServerBuilder::new().with_seed(seed).build().unwrap();
    let server = TestServer::new(router);

    let body = serde_json::json!({
        "data": {
            "name": "Dolcelatte and chickpea spaghetti",
            "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
            "price": 19,
            "image_url": "https://images.example.com/spaghetti.jpg"
        }
    });
    let created: Value = server.post("/dishes").json(&body).await.json();
    let id = created["data"]["id"].as_str().unwrap();

    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(id, "3c637d011d844ebab1205fef8a7e36ea");
}

#[tokio::test]
async fn test_create_never_overwrites_seeded_id() {
    let seed = SeedData::from_yaml_str(
        "dishes:\n  - id: \"1\"\n    name: Seeded soup\n    description: hot\n    price: 4\n    image_url: http://soup\n",
    )
    .unwrap();
    let router = ServerBuilder::new()
        .with_id_source(SequentialIdSource::new())
        .with_seed(seed)
        .build()
        .unwrap();
    let server = TestServer::new(router);

    let body = serde_json::json!({
        "data": { "name": "Bread", "description": "warm", "price": 3, "image_url": "http://b" }
    });
    let response = server.post("/dishes").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["data"]["id"], "2");

    let seeded: Value = server.get("/dishes/1").await.json();
    assert_eq!(seeded["data"]["name"], "Seeded soup");

    let dishes: Value = server.get("/dishes").await.json();
    let names: Vec<&str> = dishes["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Seeded soup", "Bread"]);
}

#[test]
fn test_invalid_seed_is_rejected() {
    let seed = SeedData::from_yaml_str(
        "orders:\n  - id: o1\n    deliverTo: here\n    mobileNumber: '1'\n    dishes: []\n",
    )
    .unwrap();

    let result = ServerBuilder::new().with_seed(seed).build();
    assert!(result.is_err());
}

#[test]
fn test_malformed_seed_yaml() {
    let err = SeedData::from_yaml_str("dishes:\n  - id: d1\n    price: twelve\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
