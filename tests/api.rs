use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use hourglass::{
    api::create_router,
    config::WidgetSettings,
    state::{AppState, ManualClock},
};

fn app() -> (Router, Arc<AppState>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let state = Arc::new(AppState::new(
        8501,
        "127.0.0.1".to_string(),
        Duration::from_millis(100),
        clock.clone(),
    ));
    (create_router(Arc::clone(&state)), state, clock)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn start_pause_resume_cancel_round_trip() {
    let (app, _, clock) = app();

    let (status, body) = send(&app, "POST", "/timer/start", Some(json!({"minutes": 1, "seconds": 30}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["total_seconds"], 90);
    assert_eq!(body["timer"]["remaining_seconds"], 90.0);

    clock.advance(chrono::Duration::seconds(10));
    let (status, body) = send(&app, "POST", "/timer/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "paused");
    assert_eq!(body["timer"]["remaining_seconds"], 80.0);
    assert_eq!(body["timer"]["headline"], "Paused: 01:20");

    clock.advance(chrono::Duration::seconds(5));
    let (status, _) = send(&app, "POST", "/timer/resume", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, snapshot) = send(&app, "GET", "/timer", None).await;
    assert_eq!(snapshot["phase"], "running");
    assert_eq!(snapshot["remaining_seconds"], 80.0);

    let (status, body) = send(&app, "POST", "/timer/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 0.0);
}

#[tokio::test]
async fn zero_duration_is_rejected_with_hint() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "POST", "/timer/start", Some(json!({"minutes": 0, "seconds": 0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["message"], "Set at least 1 second");
    assert_eq!(body["timer"]["phase"], "idle");
}

#[tokio::test]
async fn out_of_range_seconds_are_rejected() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "POST", "/timer/start", Some(json!({"minutes": 0, "seconds": 75}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["timer"]["phase"], "idle");
}

#[tokio::test]
async fn presets() {
    let (app, _, _) = app();

    let (status, list) = send(&app, "GET", "/presets", None).await;
    assert_eq!(status, StatusCode::OK);
    let seconds: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|preset| preset["seconds"].as_u64().unwrap())
        .collect();
    assert_eq!(seconds, vec![60, 120, 180, 300, 600]);

    let (status, _) = send(&app, "POST", "/timer/preset/90", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/timer/preset/120", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["total_seconds"], 120);
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["presets_enabled"], false);

    let (status, body) = send(&app, "POST", "/timer/preset/60", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["timer"]["total_seconds"], 120);
}

#[tokio::test]
async fn transitions_outside_their_state_conflict() {
    let (app, _, _) = app();

    for path in ["/timer/pause", "/timer/resume", "/timer/cancel"] {
        let (status, body) = send(&app, "POST", path, None).await;
        assert_eq!(status, StatusCode::CONFLICT, "{}", path);
        assert_eq!(body["timer"]["phase"], "idle");
    }
}

#[tokio::test]
async fn polling_past_zero_expires_once() {
    let (app, state, clock) = app();
    let mut expiries = state.subscribe_expiry();

    send(&app, "POST", "/timer/start", Some(json!({"seconds": 30}))).await;
    clock.advance(chrono::Duration::seconds(35));

    for _ in 0..3 {
        let (_, snapshot) = send(&app, "GET", "/timer", None).await;
        assert_eq!(snapshot["phase"], "idle");
        assert_eq!(snapshot["expired_notified"], true);
        assert_eq!(snapshot["headline"], "Time's up!");
    }

    assert_eq!(expiries.try_recv().unwrap().total_seconds, 30);
    assert!(expiries.try_recv().is_err());

    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["last_action"], "expired");
    assert_eq!(status["port"], 8501);
}

#[tokio::test]
async fn page_and_hourglass_are_served() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let state = Arc::new(
        AppState::new(8501, "127.0.0.1".to_string(), Duration::from_millis(100), clock.clone())
            .with_widget(WidgetSettings {
                default_minutes: 3,
                default_seconds: 0,
                sound: None,
            }),
    );
    let app = create_router(Arc::clone(&state));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(page.to_vec()).unwrap();
    assert!(page.contains(r#"value="3""#));

    state.start(60).unwrap();
    clock.advance(chrono::Duration::seconds(30));
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/timer/hourglass.svg").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let svg = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&svg).contains("#FFA07A"));
}

#[tokio::test]
async fn sound_is_not_found_without_a_file() {
    let (app, _, _) = app();
    let (status, _) = send(&app, "GET", "/sound", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health() {
    let (app, _, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
