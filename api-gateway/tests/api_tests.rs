use std::sync::Arc;

use api_gateway::{router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bond_engine::{demo, BondEngineConfig, BondService, FixedClock};
use chrono::{DateTime, Utc};
use common::model::network::NetworkId;
use serde_json::Value;
use tower::ServiceExt;

const NOW: i64 = 1_700_000_000;

fn app() -> (demo::Demo, Router) {
    let now: DateTime<Utc> = DateTime::from_timestamp(NOW, 0).unwrap();
    let demo = demo::seed(now);
    let fetcher = demo.fetcher(Arc::new(FixedClock::new(now)));
    let state = Arc::new(AppState {
        bond_service: Arc::new(BondService::new(
            fetcher,
            &BondEngineConfig::new(60, NetworkId::Mainnet),
        )),
        networks: NetworkId::ALL.to_vec(),
        started_at: now,
    });
    (demo, router(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_bonds() {
    let (_demo, app) = app();

    let (status, body) = get(app, "/api/v1/networks/mainnet/bonds").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    let ids: Vec<u64> = data.iter().map(|view| view["bond"]["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(body["meta"]["network"], "mainnet");
    assert_eq!(body["meta"]["count"], 4);

    let dai = &data[0];
    assert_eq!(dai["durationLabel"], "14 days");
    assert_eq!(dai["bond"]["discount"], "0.050000000");
    assert_eq!(dai["bond"]["isFixedTerm"], true);
    assert_eq!(dai["bond"]["quoteToken"]["kind"], "token");
    assert_eq!(dai["bond"]["quoteToken"]["symbol"], "DAI");

    let frax = &data[1];
    assert_eq!(frax["durationLabel"], "30 days");
    assert_eq!(frax["bond"]["isFixedTerm"], false);

    assert_eq!(data[2]["bond"]["quoteToken"]["kind"], "lp");
}

#[tokio::test]
async fn test_list_bonds_sorted_by_discount_without_sold_out() {
    let (_demo, app) = app();

    let (status, body) = get(
        app,
        "/api/v1/networks/1/bonds?sort=discount&include_sold_out=false",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|view| view["bond"]["id"].as_u64().unwrap())
        .collect();
    // DAI 5%, LP 4%, FRAX 2.196%
    assert_eq!(ids, vec![0, 2, 1]);
}

#[tokio::test]
async fn test_get_bond() {
    let (_demo, app) = app();

    let (status, body) = get(app, "/api/v1/networks/mainnet/bonds/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bond"]["isSoldOut"], true);
    assert_eq!(body["data"]["durationLabel"], "5 days");
}

#[tokio::test]
async fn test_unknown_quote_token_is_not_found() {
    let (_demo, app) = app();

    let (status, body) = get(app, "/api/v1/networks/mainnet/bonds/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "unknown_token");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_missing_market_is_not_found() {
    let (_demo, app) = app();

    let (status, body) = get(app, "/api/v1/networks/mainnet/bonds/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "market_not_found");
}

#[tokio::test]
async fn test_unsupported_network() {
    let (_demo, app) = app();

    let (status, body) = get(app, "/api/v1/networks/polygon/bonds").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_depository_outage_is_bad_gateway() {
    let (demo, app) = app();
    demo.depository.set_unavailable(NetworkId::Testnet, true);

    let (status, body) = get(app, "/api/v1/networks/testnet/bonds").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "rpc_error");
}

#[tokio::test]
async fn test_networks_and_health() {
    let (_demo, app) = app();

    let (status, body) = get(app.clone(), "/api/v1/networks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!(["mainnet", "testnet"]));

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
