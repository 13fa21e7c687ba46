use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use tower::ServiceExt;
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, header, method, path};

use appointment_cell::router::appointment_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, MockApiResponses};

async fn create_test_app(config: AppConfig) -> Router {
    appointment_routes(Arc::new(config))
}

fn today_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

async fn body_json_of(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", "Bearer dashboard-token")
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", "Bearer dashboard-token")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn mount_appointments(mock_server: &MockServer, appointments: Value) {
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(appointments))
        .mount(mock_server)
        .await;
}

fn clinic_day() -> Value {
    json!([
        MockApiResponses::appointment_response(1, "scheduled", today_at(11, 0), "Maria Silva", "Dr. João Costa"),
        MockApiResponses::appointment_response(2, "checked_in", today_at(9, 0), "Pedro Alves", "Dr. Ana Souza"),
        MockApiResponses::appointment_response(3, "in_consultation", today_at(10, 0), "Lucas Rocha", "Dr. Ana Souza"),
        MockApiResponses::appointment_response(4, "cancelled", today_at(8, 0), "Marta Reis", "Dr. João Costa"),
        MockApiResponses::appointment_response(5, "confirmed", today_at(8, 30), "Julia Nunes", "Dr. João Costa"),
        MockApiResponses::appointment_response(6, "completed", today_at(7, 30), "Rafael Lima", "Dr. Ana Souza"),
    ])
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_forwards_token_and_applies_filters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .and(header("authorization", "Bearer dashboard-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clinic_day()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(get("/?search=jo%C3%A3o&status=scheduled")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json_response = body_json_of(response).await;
    assert_eq!(ids(&json_response["appointments"]), vec![1, 5]);
    assert_eq!(json_response["total"], 6);
    assert_eq!(json_response["filtered"], 2);
}

#[tokio::test]
async fn test_board_combines_calendar_and_queues() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(get("/board")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let board = body_json_of(response).await;

    assert_eq!(board["calendar_events"].as_array().unwrap().len(), 6);
    assert_eq!(ids(&board["queue"]["waiting"]), vec![3, 2]);
    assert_eq!(ids(&board["queue"]["schedulable"]), vec![5, 1]);

    let cancelled = board["calendar_events"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == "4")
        .unwrap();
    assert_eq!(cancelled["editable"], false);
}

#[tokio::test]
async fn test_calendar_events_last_thirty_minutes() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(get("/calendar")).await.unwrap();
    let json_response = body_json_of(response).await;

    for event in json_response["events"].as_array().unwrap() {
        let start = DateTime::parse_from_rfc3339(event["start"].as_str().unwrap()).unwrap();
        let end = DateTime::parse_from_rfc3339(event["end"].as_str().unwrap()).unwrap();
        assert_eq!((end - start).num_minutes(), 30);
    }
}

#[tokio::test]
async fn test_check_in_moves_appointment_to_waiting_queue() {
    let mock_server = MockServer::start().await;

    // First read (validation) sees the appointment as scheduled; reads after
    // the PATCH see it checked in.
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::appointment_response(1, "scheduled", today_at(11, 0), "Maria Silva", "Dr. Costa"),
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::appointment_response(1, "checked_in", today_at(11, 0), "Maria Silva", "Dr. Costa"),
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/appointments/1/status"))
        .and(body_json(json!({"status": "checked_in"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "status": "checked_in"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.clone().oneshot(post_json("/1/check-in", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outcome = body_json_of(response).await;
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["notice"]["level"], "success");
    assert_eq!(outcome["appointments"][0]["status"], "checked_in");

    let queue = body_json_of(app.oneshot(get("/queue")).await.unwrap()).await;
    assert_eq!(ids(&queue["waiting"]), vec![1]);
    assert!(queue["schedulable"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_drag_sends_put_with_new_datetime_and_same_participants() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    Mock::given(method("PUT"))
        .and(path("/api/appointments/1"))
        .and(body_json(json!({
            "patient_id": 101,
            "doctor_id": 7,
            "scheduled_datetime": "2026-10-21T14:30:00Z",
            "appointment_type": "consultation"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app
        .oneshot(post_json("/1/move", json!({"start": "2026-10-21T14:30:00.000Z"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json_of(response).await;
    assert_eq!(outcome["notice"]["message"], "Appointment rescheduled successfully");
}

#[tokio::test]
async fn test_rejected_drag_reports_server_message_and_reloads() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    Mock::given(method("PUT"))
        .and(path("/api/appointments/1"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(MockApiResponses::error_detail("Doctor already booked at this time")),
        )
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app
        .oneshot(post_json("/1/move", json!({"start": "2026-10-21T14:30:00"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let outcome = body_json_of(response).await;
    assert_eq!(outcome["success"], false);
    assert_eq!(outcome["notice"]["level"], "error");
    assert_eq!(outcome["notice"]["message"], "Doctor already booked at this time");
    assert_eq!(outcome["appointments"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_cancelled_appointment_cannot_be_cancelled_or_moved() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let cancel = app.clone().oneshot(post_json("/4/cancel", json!({}))).await.unwrap();
    assert_eq!(cancel.status(), StatusCode::CONFLICT);
    let error = body_json_of(cancel).await;
    assert!(error["error"].as_str().unwrap().contains("cancelled"));
    assert!(error.get("appointments").is_none());

    let moved = app
        .oneshot(post_json("/4/move", json!({"start": "2026-10-21T14:30:00Z"})))
        .await
        .unwrap();
    assert_eq!(moved.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_sends_status_patch() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    Mock::given(method("PATCH"))
        .and(path("/api/appointments/2/status"))
        .and(body_json(json!({"status": "cancelled"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(post_json("/2/cancel", json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json_of(response).await;
    assert_eq!(outcome["notice"]["message"], "Appointment cancelled");
}

#[tokio::test]
async fn test_status_change_follows_lifecycle() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    Mock::given(method("PATCH"))
        .and(path("/api/appointments/3/status"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let completed = app
        .clone()
        .oneshot(post_json("/3/status", json!({"status": "completed"})))
        .await
        .unwrap();
    assert_eq!(completed.status(), StatusCode::OK);

    // scheduled -> completed skips check-in and consultation
    let skipped = app
        .clone()
        .oneshot(post_json("/1/status", json!({"status": "completed"})))
        .await
        .unwrap();
    assert_eq!(skipped.status(), StatusCode::CONFLICT);

    let unknown = app
        .oneshot(post_json("/1/status", json!({"status": "archived"})))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_appointment_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(post_json("/99/check-in", json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_posts_and_reloads() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .and(body_json(json!({
            "patient_id": 12,
            "doctor_id": 7,
            "scheduled_datetime": "2026-10-22T13:00:00Z",
            "appointment_type": "consultation"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 50})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "patient_id": 12,
                "doctor_id": 7,
                "scheduled_datetime": "2026-10-22T10:00:00-03:00",
                "appointment_type": "consultation"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json_of(response).await;
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["appointments"], json!([]));
}

#[tokio::test]
async fn test_form_options_lists_patients_and_doctors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::patient_response(1, "Maria", "Silva"),
            MockApiResponses::patient_response(2, "Pedro", "Alves"),
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::doctor_response(7, "João", "Costa"),
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(get("/form-options")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let options = body_json_of(response).await;
    assert_eq!(options["patients"].as_array().unwrap().len(), 2);
    assert_eq!(options["doctors"][0]["last_name"], "Costa");
}

#[tokio::test]
async fn test_invalid_status_filter_is_bad_request() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server, clinic_day()).await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(get("/?status=archived")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unauthorized_without_any_token() {
    let config = TestConfig {
        access_token: None,
        ..TestConfig::default()
    };
    let app = create_test_app(config.to_app_config()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/board")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upstream_auth_failure_is_unauthorized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(MockApiResponses::error_detail("Token expired")))
        .mount(&mock_server)
        .await;

    let app = create_test_app(TestConfig::with_api_url(mock_server.uri()).to_app_config()).await;

    let response = app.oneshot(get("/board")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error = body_json_of(response).await;
    assert_eq!(error["error"], "Token expired");
}
