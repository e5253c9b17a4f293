// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP tests for POST /analyze
//!
//! A small in-process detection endpoint stands in for the remote model:
//! it decodes the base64 body the client sends and answers with canned
//! predictions for the pickup and return photos. The fail-open path is
//! exercised against an unreachable address.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::post, Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use vehicle_damage_node::{
    build_router, AnalysisConfig, AppState, DetectionClient, DetectorConfig, PriceMap,
};

const PICKUP_IMAGE: &[u8] = b"pickup-image-bytes";
const RETURN_IMAGE: &[u8] = b"return-image-bytes";

async fn mock_detect(body: String) -> Json<Value> {
    let decoded = STANDARD.decode(body.trim()).unwrap_or_default();
    if decoded == PICKUP_IMAGE {
        Json(json!({
            "predictions": [
                {"x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0,
                 "class": "scratch", "confidence": 0.92}
            ]
        }))
    } else {
        Json(json!({
            "predictions": [
                {"x": 1.0, "y": 1.0, "width": 10.0, "height": 10.0,
                 "class": "scratch", "confidence": 0.88},
                {"x": 50.0, "y": 50.0, "width": 5.0, "height": 5.0,
                 "class": "dent", "confidence": 0.81}
            ]
        }))
    }
}

async fn spawn_mock_detector() -> SocketAddr {
    let app = Router::new().route("/model/1", post(mock_detect));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_node(detector_url: String) -> SocketAddr {
    let detection = DetectionClient::new(DetectorConfig {
        model_url: detector_url,
        api_key: "test-key".to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    let state = AppState::new(
        Arc::new(detection),
        AnalysisConfig::default(),
        Arc::new(PriceMap::default()),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn analysis_form(
    pickup: Option<&'static [u8]>,
    returned: Option<&'static [u8]>,
) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    if let Some(bytes) = pickup {
        form = form.part(
            "pickup",
            reqwest::multipart::Part::bytes(bytes).file_name("pickup.jpg"),
        );
    }
    if let Some(bytes) = returned {
        form = form.part(
            "returned",
            reqwest::multipart::Part::bytes(bytes).file_name("returned.jpg"),
        );
    }
    form
}

#[tokio::test]
async fn test_health_endpoint() {
    let detector = spawn_mock_detector().await;
    let node = spawn_node(format!("http://{}/model/1", detector)).await;

    let response = reqwest::get(format!("http://{}/health", node)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"]["version"], "0.1.0");
}

#[tokio::test]
async fn test_analyze_full_flow() {
    let detector = spawn_mock_detector().await;
    let node = spawn_node(format!("http://{}/model/1", detector)).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/analyze", node))
        .multipart(analysis_form(Some(PICKUP_IMAGE), Some(RETURN_IMAGE)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["pickup"]["predictions"].as_array().unwrap().len(), 1);
    assert_eq!(body["returned"]["predictions"].as_array().unwrap().len(), 2);

    // The shifted scratch matches the pickup one; only the dent is new.
    let report = &body["report"];
    let new_damages = report["newDamages"].as_array().unwrap();
    assert_eq!(new_damages.len(), 1);
    assert_eq!(new_damages[0]["class"], "dent");
    assert_eq!(new_damages[0]["points"].as_array().unwrap().len(), 4);
    assert_eq!(report["estimatedCostRange"], json!([40, 90]));
    assert_eq!(
        report["summary"],
        "1 new damages detected. Estimated cost between $40 and $90"
    );

    // Raw detections keep the flat rect shape the detector produced.
    assert_eq!(body["returned"]["predictions"][1]["x"], 50.0);
    assert_eq!(body["returned"]["predictions"][1]["confidence"], 0.81);
}

#[tokio::test]
async fn test_analyze_missing_image_returns_400() {
    let detector = spawn_mock_detector().await;
    let node = spawn_node(format!("http://{}/model/1", detector)).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/analyze", node))
        .multipart(analysis_form(Some(PICKUP_IMAGE), None))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["message"], "Missing images");
    assert_eq!(body["details"]["field"], "returned");
}

#[tokio::test]
async fn test_analyze_invalid_confidence_returns_400() {
    let detector = spawn_mock_detector().await;
    let node = spawn_node(format!("http://{}/model/1", detector)).await;

    let form = analysis_form(Some(PICKUP_IMAGE), Some(RETURN_IMAGE))
        .text("confidence", "very-sure");
    let response = reqwest::Client::new()
        .post(format!("http://{}/analyze", node))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["details"]["field"], "confidence");
}

#[tokio::test]
async fn test_analyze_detector_down_fails_open() {
    // No detector listening at all: both detection calls degrade to empty
    // prediction lists and the comparison still answers.
    let node = spawn_node("http://127.0.0.1:59999/model/1".to_string()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/analyze", node))
        .multipart(analysis_form(Some(PICKUP_IMAGE), Some(RETURN_IMAGE)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["pickup"]["predictions"], json!([]));
    assert_eq!(body["returned"]["predictions"], json!([]));
    assert_eq!(
        body["report"]["summary"],
        "0 new damages detected. Estimated cost between $0 and $0"
    );
}
