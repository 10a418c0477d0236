//! Integration tests for the Bondcalc Server API endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bondcalc_config::CalculatorConfig;
use bondcalc_ext_file::{InMemoryStore, JsonFileStore, StaticYieldSource};
use bondcalc_server::routes::create_router;
use bondcalc_server::{AppState, Server};
use bondcalc_traits::KeyValueStore;

/// Router over an in-memory store and the static yield table.
fn create_test_app() -> Router {
    create_app_with_store(Arc::new(InMemoryStore::new()))
}

fn create_app_with_store(store: Arc<dyn KeyValueStore>) -> Router {
    let state = AppState::new(
        CalculatorConfig::default(),
        store,
        Arc::new(StaticYieldSource::new()),
    );
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn premium_request() -> Value {
    json!({
        "coupon_percent": 5.0,
        "years_to_maturity": 10.0,
        "yield_percent": 4.5
    })
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();
    let (status, json) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// =============================================================================
// PRICING TESTS
// =============================================================================

#[tokio::test]
async fn test_price_premium_bond() {
    let app = create_test_app();
    let (status, json) = send(&app, Method::POST, "/api/v1/price", Some(premium_request())).await;

    assert_eq!(status, StatusCode::OK);
    let price = json["price"].as_f64().unwrap();
    assert!((price - 1039.9093).abs() < 1e-3);
    assert_eq!(json["classification"], "premium");
    assert_eq!(json["face_value"], 1000.0);
    assert_eq!(json["coupon_rate"], 0.05);
    assert_eq!(json["display_name"], "Custom Bond (1000 @ 5.00%)");
    assert!(json["explanation"]
        .as_str()
        .unwrap()
        .contains("trading at a premium"));
}

#[tokio::test]
async fn test_price_with_symbol_uses_live_yield() {
    let app = create_test_app();
    let body = json!({
        "coupon_percent": 4.0,
        "years_to_maturity": 10.0,
        "symbol": "US10Y"
    });
    let (status, json) = send(&app, Method::POST, "/api/v1/price", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["market_yield"], 0.0425);
    assert_eq!(json["bond_type"], "US10Y");
    assert_eq!(json["display_name"], "10-Year Treasury");
    assert_eq!(json["classification"], "discount");
}

#[tokio::test]
async fn test_price_validation_errors() {
    let app = create_test_app();

    let cases = [
        json!({ "coupon_percent": 120.0, "years_to_maturity": 10.0, "yield_percent": 4.0 }),
        json!({ "coupon_percent": 5.0, "years_to_maturity": 0.0, "yield_percent": 4.0 }),
        json!({ "coupon_percent": 5.0, "years_to_maturity": 10.0, "yield_percent": -1.0 }),
        json!({ "face_value": 0.0, "coupon_percent": 5.0, "years_to_maturity": 10.0 }),
        json!({ "coupon_percent": 5.0, "years_to_maturity": 10.0, "frequency": 3 }),
        json!({ "coupon_percent": 5.0, "years_to_maturity": 10.0, "symbol": "US15Y" }),
        json!({ "coupon_percent": 5.0, "years_to_maturity": 3.0e8, "frequency": 12, "yield_percent": 5.0 }),
        json!({ "coupon_percent": 5.0, "years_to_maturity": 100.5, "yield_percent": 5.0 }),
    ];

    for body in cases {
        let (status, json) = send(&app, Method::POST, "/api/v1/price", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_ytm_endpoint() {
    let app = create_test_app();
    let body = json!({ "price": 950.0, "coupon_percent": 5.0, "years_to_maturity": 10.0 });
    let (status, json) = send(&app, Method::POST, "/api/v1/ytm", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let ytm = json["ytm"].as_f64().unwrap();
    assert!((ytm - 55.0 / 975.0).abs() < 1e-12);
    assert!((json["ytm_percent"].as_f64().unwrap() - ytm * 100.0).abs() < 1e-12);
}

// =============================================================================
// CURVE TESTS
// =============================================================================

#[tokio::test]
async fn test_curve_default_sweep() {
    let app = create_test_app();
    let body = json!({ "coupon_percent": 5.0, "years_to_maturity": 10.0, "yield_percent": 4.25 });
    let (status, json) = send(&app, Method::POST, "/api/v1/curve", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let samples = json["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 21);
    assert_eq!(samples[0]["yield_percent"], 0.0);
    assert_eq!(samples[20]["yield_percent"], 10.0);
    // Equidistant from 4.0 and 4.5: lowest index wins.
    assert_eq!(json["highlighted_index"], 8);

    let prices: Vec<f64> = samples
        .iter()
        .map(|s| s["price"].as_f64().unwrap())
        .collect();
    assert!(prices.windows(2).all(|w| w[1] < w[0]));
}

#[tokio::test]
async fn test_curve_rejects_unbounded_maturity() {
    let app = create_test_app();
    let body = json!({
        "coupon_percent": 5.0,
        "years_to_maturity": 3.0e8,
        "frequency": 12
    });
    let (status, json) = send(&app, Method::POST, "/api/v1/curve", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("years_to_maturity"));
}

#[tokio::test]
async fn test_curve_bad_sweep() {
    let app = create_test_app();
    let body = json!({
        "coupon_percent": 5.0,
        "years_to_maturity": 10.0,
        "start_percent": 5.0,
        "end_percent": 1.0
    });
    let (status, _) = send(&app, Method::POST, "/api/v1/curve", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// MARKET DATA TESTS
// =============================================================================

#[tokio::test]
async fn test_live_yield() {
    let app = create_test_app();
    let (status, json) = send(&app, Method::GET, "/api/v1/live-yield?symbol=US10Y", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["symbol"], "US10Y");
    assert_eq!(json["yield"], 0.0425);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_live_yield_requires_symbol() {
    let app = create_test_app();

    let (status, json) = send(&app, Method::GET, "/api/v1/live-yield", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("symbol"));

    let (status, _) = send(&app, Method::GET, "/api/v1/live-yield?symbol=NOPE", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_live_yield_falls_back_when_feed_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = CalculatorConfig::default();
    config.storage.data_dir = dir.path().to_path_buf();
    config.market_data.live_url = Some("http://127.0.0.1:9/yield".into());
    config.market_data.live_timeout_ms = 500;

    let app = create_router(Arc::new(AppState::from_config(config).unwrap()));
    let (status, json) = send(&app, Method::GET, "/api/v1/live-yield?symbol=US5Y", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["yield"], 0.0435);
}

// =============================================================================
// SERVER TESTS
// =============================================================================

#[tokio::test]
async fn test_start_rejects_non_ip_host() {
    let mut config = CalculatorConfig::default();
    config.server.host = "localhost".into();
    let state = AppState::new(
        config,
        Arc::new(InMemoryStore::new()),
        Arc::new(StaticYieldSource::new()),
    );

    let err = Server::with_state(state).start().await.unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

// =============================================================================
// PORTFOLIO TESTS
// =============================================================================

#[tokio::test]
async fn test_add_without_priced_bond_conflicts() {
    let app = create_test_app();
    let (status, json) = send(&app, Method::POST, "/api/v1/portfolio", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_portfolio_lifecycle() {
    let app = create_test_app();

    send(&app, Method::POST, "/api/v1/price", Some(premium_request())).await;
    let (status, first) = send(&app, Method::POST, "/api/v1/portfolio", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = first["id"].as_str().unwrap().to_string();
    assert!(first.get("storage_warning").is_none());

    let discount = json!({ "coupon_percent": 4.0, "years_to_maturity": 10.0, "yield_percent": 5.0 });
    send(&app, Method::POST, "/api/v1/price", Some(discount)).await;
    send(&app, Method::POST, "/api/v1/portfolio", None).await;

    let (status, list) = send(&app, Method::GET, "/api/v1/portfolio", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["id"], first_id.as_str());

    let (status, metrics) = send(&app, Method::GET, "/api/v1/portfolio/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["bond_count"], 2);
    let total = metrics["total_value"].as_f64().unwrap();
    assert!((total - 1961.9635).abs() < 1e-3);
    assert_eq!(metrics["benchmark"]["benchmark"], "US10Y");
    assert_eq!(metrics["price_series"].as_array().unwrap().len(), 2);

    let uri = format!("/api/v1/portfolio/{first_id}");
    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);

    // already gone: still succeeds, nothing changes
    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], first_id.as_str());
    assert_eq!(json["removed"], false);

    let (_, list) = send(&app, Method::GET, "/api/v1/portfolio", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let app = create_test_app();
    send(&app, Method::POST, "/api/v1/price", Some(premium_request())).await;
    send(&app, Method::POST, "/api/v1/portfolio", None).await;

    let (status, _) = send(&app, Method::DELETE, "/api/v1/portfolio", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/portfolio?confirm=true", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, metrics) = send(&app, Method::GET, "/api/v1/portfolio/metrics", None).await;
    assert_eq!(metrics["bond_count"], 0);
    assert!(metrics["benchmark"].is_null());
}

#[tokio::test]
async fn test_portfolio_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let app = create_app_with_store(Arc::new(JsonFileStore::new(dir.path()).unwrap()));
        send(&app, Method::POST, "/api/v1/price", Some(premium_request())).await;
        let (status, _) = send(&app, Method::POST, "/api/v1/portfolio", None).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    assert!(dir.path().join("bondPortfolio.json").exists());

    let app = create_app_with_store(Arc::new(JsonFileStore::new(dir.path()).unwrap()));
    let (_, list) = send(&app, Method::GET, "/api/v1/portfolio", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["coupon_rate"], 0.05);
}
