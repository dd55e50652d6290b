#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use ta_planner::{TaPlanner, http_api};
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    let state = http_api::AppState::new(TaPlanner::default());
    http_api::router(state)
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn schedule_endpoint_returns_plan_and_warning() {
    let app = new_router();
    let request = json!({
        "in_store_date": "2026-09-14",
        "fabric_country": "CHINA",
        "sewing_country": "VIETNAM",
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/schedule")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: http_api::ScheduleResponse =
        serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(body.schedule.stages.len(), 5);
    assert_eq!(body.booking_date, body.schedule.booking_date());
    assert!(body.warning.is_some());
}

#[tokio::test]
async fn schedule_endpoint_rejects_bad_input() {
    let app = new_router();
    let request = json!({
        "in_store_date": "2024-01-01",
        "fabric_country": "CHINA",
        "sewing_country": "VIETNAM",
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/schedule")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn csv_endpoint_sets_download_headers() {
    let app = new_router();
    let response = get(
        app,
        "/schedule.csv?in_store_date=2026-09-14&fabric=VN&sewing=KH",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("TA_Schedule_2026-09-14.csv"));
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
}

#[tokio::test]
async fn holidays_and_countries_endpoints() {
    let app = new_router();

    let response = get(app.clone(), "/countries").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["sewing_origins"], json!(["VIETNAM", "CAMBODIA", "INDONESIA"]));
    assert_eq!(body["default_in_store_date"], "2026-09-14");

    let response = get(app.clone(), "/holidays/vn/2026").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: http_api::HolidaysResponse =
        serde_json::from_value(json_body(response).await).unwrap();
    assert!(body.dates.iter().all(|d| d.format("%Y").to_string() == "2026"));
    assert!(body.dates.len() > body.holidays.len());

    let response = get(app, "/holidays/thailand/2026").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compare_endpoint_lists_nine_pairs() {
    let app = new_router();
    let response = get(app, "/compare/2026-09-14").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn compare_endpoint_rejects_bad_dates() {
    let response = get(new_router(), "/compare/14-09-2026").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Rejected inside the blocking task, mapped back to a client error.
    let response = get(new_router(), "/compare/2024-06-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_request");
}
