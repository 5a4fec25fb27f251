//! Nominatim client tests against an in-process search endpoint

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use rainfall_backend::external::{Geocoder, NominatimClient};
use serde_json::{json, Value};
use shared::{Coordinates, GeoError};
use std::collections::HashMap;
use std::time::Duration;

const USER_AGENT: &str = "RainfallPredictor/1.0";

/// Serve `router` on an ephemeral local port and return its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: String) -> NominatimClient {
    NominatimClient::with_base_url(base_url, USER_AGENT, Duration::from_secs(5)).unwrap()
}

async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let agent_ok = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        == Some(USER_AGENT);
    let query_ok = params.get("format").map(String::as_str) == Some("json")
        && params.get("limit").map(String::as_str) == Some("1");

    if agent_ok && query_ok && params.get("q").map(String::as_str) == Some("London") {
        Json(json!([{"lat": "51.5073219", "lon": "-0.1276474", "display_name": "London"}]))
    } else {
        Json(json!([]))
    }
}

#[tokio::test]
async fn test_locate_resolves_coordinates() {
    let base = serve(Router::new().route("/search", get(search))).await;
    let coords = client(base).locate("London").await.unwrap();
    assert_eq!(coords, Coordinates::new(51.5073219, -0.1276474));
}

#[tokio::test]
async fn test_empty_result_is_not_found() {
    let base = serve(Router::new().route("/search", get(search))).await;
    let result = client(base).locate("Atlantis").await;
    assert!(matches!(result, Err(GeoError::NotFound(name)) if name == "Atlantis"));
}

#[tokio::test]
async fn test_error_status_is_network_failure() {
    let router = Router::new().route("/search", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = serve(router).await;
    let result = client(base).locate("London").await;
    assert!(matches!(result, Err(GeoError::Network(_))));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let router = Router::new().route("/search", get(|| async { "<html>busy</html>" }));
    let base = serve(router).await;
    let result = client(base).locate("London").await;
    assert!(matches!(result, Err(GeoError::Malformed(_))));
}
