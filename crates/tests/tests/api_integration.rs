use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use sewa_api::build_app;
use tower::ServiceExt;

const API_KEY: &str = "dev-sewa-key";

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-api-key", API_KEY)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", API_KEY)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = build_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], "ok");
    assert!(parsed["capabilities"]
        .as_array()
        .unwrap()
        .iter()
        .any(|value| value == "irrigation_advisory"));
}

#[tokio::test]
async fn chat_requires_api_key() {
    let app = build_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": "wheat" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn chat_routes_the_wheat_keyword() {
    let app = build_app();

    let response = app
        .oneshot(post(
            "/v1/chat",
            json!({ "text": "When should I sow wheat?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["matched_keyword"], "wheat");
    assert_eq!(parsed["fallback"], false);
    assert!(parsed["reply_text"]
        .as_str()
        .unwrap()
        .contains("October-November"));
    assert!(parsed["session_id"].as_str().is_some());
}

#[tokio::test]
async fn chat_session_id_survives_a_follow_up_turn() {
    let app = build_app();

    let first = app
        .clone()
        .oneshot(post("/v1/chat", json!({ "text": "soil testing info" })))
        .await
        .unwrap();
    let first = json_body(first).await;
    let session_id = first["session_id"].as_str().unwrap().to_string();

    let second = app
        .oneshot(post(
            "/v1/chat",
            json!({ "session_id": session_id, "text": "asdkjasdkj" }),
        ))
        .await
        .unwrap();
    let second = json_body(second).await;

    assert_eq!(second["session_id"], session_id.as_str());
    assert_eq!(second["fallback"], true);
    assert_eq!(second["matched_keyword"], serde_json::Value::Null);
}

#[tokio::test]
async fn chat_suggestions_carry_greeting_and_prompts() {
    let app = build_app();

    let response = app.oneshot(get("/v1/chat/suggestions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert!(parsed["greeting"].as_str().unwrap().contains("SEWA"));
    assert_eq!(parsed["quick_questions"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn advisory_classifies_and_respects_missing_reading() {
    let app = build_app();

    let saturated = app
        .clone()
        .oneshot(post("/v1/advisory", json!({ "soil_moisture": 0.55 })))
        .await
        .unwrap();
    let saturated = json_body(saturated).await;
    assert_eq!(saturated["advisory"]["category"], "saturated");
    assert_eq!(saturated["advisory"]["style"], "info");

    let boundary = app
        .clone()
        .oneshot(post("/v1/advisory", json!({ "soil_moisture": 0.40 })))
        .await
        .unwrap();
    let boundary = json_body(boundary).await;
    assert_eq!(boundary["advisory"]["category"], "optimal");

    let missing = app
        .oneshot(post("/v1/advisory", json!({ "soil_moisture": null })))
        .await
        .unwrap();
    let missing = json_body(missing).await;
    assert_eq!(missing["advisory"], serde_json::Value::Null);
}

#[tokio::test]
async fn weather_interpret_maps_code_bands() {
    let app = build_app();

    let response = app
        .oneshot(post("/v1/weather/interpret", json!({ "code": 63 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["condition"], "rain");
    assert_eq!(parsed["label"], "Rain");
    assert_eq!(parsed["icon"], "cloud-rain");
}

#[tokio::test]
async fn districts_add_nearest_when_location_is_given() {
    let app = build_app();

    let plain = app.clone().oneshot(get("/v1/districts")).await.unwrap();
    let plain = json_body(plain).await;
    assert_eq!(plain["districts"].as_array().unwrap().len(), 23);
    assert_eq!(plain["default"]["name"], "Amritsar");
    assert_eq!(plain["nearest"], serde_json::Value::Null);

    let located = app
        .oneshot(get("/v1/districts?lat=30.9&lon=75.85"))
        .await
        .unwrap();
    let located = json_body(located).await;
    assert_eq!(located["nearest"]["name"], "Ludhiana");
}

#[tokio::test]
async fn crops_filter_by_season_and_reject_unknown_seasons() {
    let app = build_app();

    let rabi = app
        .clone()
        .oneshot(get("/v1/crops?season=rabi"))
        .await
        .unwrap();
    let rabi = json_body(rabi).await;
    let cards = rabi["crops"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["crop"], "wheat");

    let bad = app.oneshot(get("/v1/crops?season=zaid")).await.unwrap();
    assert_eq!(bad.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bad = json_body(bad).await;
    assert_eq!(bad["error"], "invalid_season");
}

#[tokio::test]
async fn market_report_builds_summary_and_records() {
    let app = build_app();

    let response = app
        .oneshot(post(
            "/v1/market/report",
            json!({
                "state": "Punjab",
                "commodity": "Wheat",
                "rows": [
                    ["Modal Price:", "Rs 2,275"],
                    [
                        "Amritsar", "Amritsar Mandi", "Wheat", "Dara",
                        "2,350", "2,100", "2,275", "15/01/2025"
                    ]
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["summary"][0]["label"], "Modal Price");
    assert_eq!(parsed["records"][0]["avg_price"], 2275.0);
    assert_eq!(parsed["records"][0]["market"], "Amritsar Mandi");
}

#[tokio::test]
async fn pest_interpret_diagnoses_or_rejects_empty_maps() {
    let app = build_app();

    let diagnosed = app
        .clone()
        .oneshot(post(
            "/v1/pests/interpret",
            json!({ "predictions": { "leaf_rust": 0.82, "healthy": 0.18 } }),
        ))
        .await
        .unwrap();
    assert_eq!(diagnosed.status(), StatusCode::OK);
    let diagnosed = json_body(diagnosed).await;
    assert_eq!(diagnosed["disease"], "leaf_rust");
    assert_eq!(diagnosed["confidence_percent"], 82);
    assert_eq!(diagnosed["severity"], "moderate");

    let empty = app
        .oneshot(post("/v1/pests/interpret", json!({ "predictions": {} })))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let empty = json_body(empty).await;
    assert_eq!(empty["error"], "empty_predictions");
}
