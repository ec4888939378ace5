use std::sync::Once;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bmi_guide_api::{api::create_application, config::AppConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn blank_app() -> Router {
    initialize();
    create_application(AppConfig {
        prefill_sample: false,
        ..AppConfig::default()
    })
}

async fn get_body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = blank_app()
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["components"]["engine"]["status"], "ok");
}

#[tokio::test]
async fn test_openapi_documentation_available() {
    let response = blank_app()
        .oneshot(empty_request(Method::GET, "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert!(json["paths"]["/api/v1/bmi"].is_object());
    assert!(json["paths"]["/api/v1/form/export"].is_object());
}

#[tokio::test]
async fn test_evaluate_bmi_scenarios() {
    let app = blank_app();
    let cases = [
        ("70", "170", 24.2, "normal", "Normal weight", "cat-normal"),
        ("45", "170", 15.6, "underweight", "Underweight", "cat-under"),
        ("80", "170", 27.7, "overweight", "Overweight", "cat-over"),
        ("95", "170", 32.9, "obese", "Obese", "cat-obese"),
    ];

    let requests = cases.iter().map(|(weight, height, ..)| {
        app.clone().oneshot(json_request(
            Method::POST,
            "/api/v1/bmi",
            json!({ "name": "Patient", "weight": weight, "height": height }),
        ))
    });
    let responses = futures::future::join_all(requests).await;

    for (response, (_, _, bmi, category, label, _)) in responses.into_iter().zip(cases) {
        let response = response.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
        assert_eq!(json["result"]["value"], json!(bmi));
        assert_eq!(json["result"]["category"], category);
        assert_eq!(json["result"]["label"], label);
        assert!(json["summary"].as_str().unwrap().contains(&format!("Category: {}", label)));
    }
}

#[tokio::test]
async fn test_evaluate_bmi_accepts_decimal_comma() {
    let response = blank_app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/bmi",
            json!({ "name": "Ann", "weight": "70,5", "height": "170" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["measurement"]["weight_kg"], json!(70.5));
    assert_eq!(json["bmi_text"], "24.4");
}

#[tokio::test]
async fn test_evaluate_bmi_reports_every_invalid_field() {
    let response = blank_app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/bmi",
            json!({ "name": "", "weight": "abc", "height": "0" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["details"]["name"]["message"], "Enter patient name.");
    assert_eq!(json["details"]["weight"]["message"], "Enter valid weight (1–500 kg).");
    assert_eq!(json["details"]["height"]["code"], "height_invalid");
}

#[tokio::test]
async fn test_evaluate_bmi_rejects_oversized_payload() {
    let response = blank_app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/bmi",
            json!({ "name": "Ann", "weight": "7".repeat(40), "height": "170" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert!(json["message"].as_str().unwrap().contains("Weight cannot exceed 32 characters"));
}

#[tokio::test]
async fn test_form_flow_and_csv_export() {
    let app = blank_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/form",
            json!({ "name": "Pat \"Red\" O'Brien", "weight": "80", "height": "170" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/form/export"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type: mime::Mime = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(content_type.essence_str(), "text/csv");
    assert_eq!(content_type.get_param(mime::CHARSET), Some(mime::UTF_8));
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"patient_bmi.csv\""
    );

    let body = String::from_utf8(get_body_bytes(response).await).unwrap();
    assert!(body.starts_with("\"Patient Name\",\"Weight (kg)\",\"Height (cm)\",\"BMI\",\"Category\"\n"));
    assert!(!body.ends_with('\n'));

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].iter().collect::<Vec<_>>(),
        vec!["Pat \"Red\" O'Brien", "80.0", "170.0", "27.7", "Overweight"]
    );

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/v1/form"))
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "CSV file downloaded.");
}

#[tokio::test]
async fn test_share_unsupported_when_disabled() {
    initialize();
    let app = create_application(AppConfig {
        share_enabled: false,
        ..AppConfig::default()
    });

    let response = app
        .oneshot(empty_request(Method::POST, "/api/v1/form/share"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["status"]["code"], "share_unsupported");
    assert_eq!(json["status"]["message"], "System share not supported; use copy instead.");
    assert!(json.get("share").is_none());
}

#[tokio::test]
async fn test_invalid_edit_blocks_actions() {
    initialize();
    let app = create_application(AppConfig::default());

    let response = app
        .clone()
        .oneshot(json_request(Method::PUT, "/api/v1/form", json!({ "height": "300" })))
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["display"]["bmi_text"], "--");
    assert_eq!(
        json["error_messages"],
        json!([{ "field": "height", "message": "Enter valid height (50–250 cm)." }])
    );

    let response = app
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/form/copy"))
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(json["status"]["message"], "Fix input errors before copying.");
    assert!(json.get("clipboard_text").is_none());

    let response = app
        .oneshot(empty_request(Method::POST, "/api/v1/form/export"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
