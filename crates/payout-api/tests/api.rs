//! End-to-end tests against the router, without binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use payout_api::{config::ServiceConfig, create_app, middleware::REQUEST_ID_HEADER, AppState};
use payout_rates::RateCard;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(config: ServiceConfig) -> Router {
    let state = AppState::new(RateCard::standard(), config).unwrap();
    create_app(state)
}

fn app() -> Router {
    app_with(ServiceConfig::default())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn review_article() -> Value {
    json!({
        "_id": "a1",
        "status": "published",
        "views": 10000,
        "likes": 100,
        "comments": 20,
        "shares": 10,
        "bookmarks": 5,
        "totalReadTime": 3000,
        "category": "reviews",
        "isPremium": true,
        "earningsEnabled": true,
        "publishDate": "2024-05-06T09:00:00Z"
    })
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rates_carry_fingerprint() {
    let response = app()
        .oneshot(Request::builder().uri("/v1/rates").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let expected = RateCard::standard().fingerprint().unwrap();
    assert_eq!(body["fingerprint"], expected.as_str());
    assert_eq!(body["rates"]["rate_per_view"], 0.01);
}

#[tokio::test]
async fn test_engagement_score() {
    let response = app()
        .oneshot(post_json("/v1/engagement", review_article()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["id"], "a1");
    assert_eq!(body["engagement"], 10_800);
}

#[tokio::test]
async fn test_earnings_with_display() {
    let response = app()
        .oneshot(post_json("/v1/earnings", review_article()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let total = body["result"]["totalEarned"].as_f64().unwrap();
    assert!((total - 380.0).abs() < 1e-9);
    assert_eq!(body["result"]["engagement"], 10_800);
    assert_eq!(body["display"]["totalEarned"], "P380.00");
    assert_eq!(body["display"]["views"], "10.0k");
    assert_eq!(body["display"]["engagement"], "10.8k");
}

#[tokio::test]
async fn test_earnings_rejects_malformed_body() {
    let response = app()
        .oneshot(post_json("/v1/earnings", json!({ "views": "lots" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(body["code"], "invalid_body");
    assert!(body["error"].as_str().unwrap().starts_with("BODY/"));
}

#[tokio::test]
async fn test_syntax_error_is_json_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/earnings")
        .header("content-type", "application/json")
        .body(Body::from("{\"views\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["code"], "invalid_body");
}

#[tokio::test]
async fn test_bad_date_does_not_reject_batch() {
    let mut undated = review_article();
    undated["_id"] = json!("a2");
    undated["publishDate"] = json!("");
    let mut date_only = review_article();
    date_only["_id"] = json!("a3");
    date_only["publishDate"] = json!("2024-05-06");

    let body = json!({ "articles": [review_article(), undated, date_only] });
    let response = app()
        .oneshot(post_json("/v1/cashout/eligibility", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    // Monday or no date: none of the three gets the weekend bonus
    let unpaid = body["unpaidEarnings"].as_f64().unwrap();
    assert!((unpaid - 3.0 * 380.0).abs() < 1e-6);
    assert_eq!(body["totalEngagement"], 3 * 10_800);
}

#[tokio::test]
async fn test_strict_batch_rejects_invalid_counts() {
    let mut negative = review_article();
    negative["likes"] = json!(-5);

    let lenient = json!({ "articles": [negative.clone()] });
    let response = app()
        .oneshot(post_json("/v1/cashout/eligibility", lenient))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let strict = json!({ "articles": [negative], "strict": true });
    let response = app()
        .oneshot(post_json("/v1/cashout/eligibility", strict))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(body["code"], "invalid_metric");
    assert!(body["error"].as_str().unwrap().starts_with("METRIC/likes"));
}

#[tokio::test]
async fn test_strict_summary_accepts_clean_counts() {
    let body = json!({
        "articles": [review_article()],
        "strict": true,
        "now": "2024-05-20T00:00:00Z"
    });

    let response = app().oneshot(post_json("/v1/summary", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_batch_is_not_eligible() {
    let response = app()
        .oneshot(post_json("/v1/cashout/eligibility", json!({ "articles": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["eligible"], false);
    assert_eq!(body["totalEngagement"], 0);
}

#[tokio::test]
async fn test_oversized_batch_is_rejected() {
    let config = ServiceConfig {
        max_batch: 1,
        ..ServiceConfig::default()
    };
    let body = json!({ "articles": [review_article(), review_article()] });

    let response = app_with(config)
        .oneshot(post_json("/v1/cashout/eligibility", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = read_json(response).await;
    assert_eq!(body["code"], "batch_too_large");
}

#[tokio::test]
async fn test_summary_with_fixed_now() {
    let body = json!({
        "articles": [review_article()],
        "now": "2024-05-20T00:00:00Z"
    });

    let response = app().oneshot(post_json("/v1/summary", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["publishedCount"], 1);
    let this_month = body["thisMonthEarnings"].as_f64().unwrap();
    assert!((this_month - 380.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/v1/health")
        .header(REQUEST_ID_HEADER, "req-42")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
}

#[tokio::test]
async fn test_request_id_is_minted() {
    let response = app()
        .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_metrics_count_calculations() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/v1/earnings", review_article()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("payout_calculations_total{kind=\"earnings\"} 1"));
}
