// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use super::response::AnalyzeResponse;
use crate::analysis::build_report;
use crate::api::errors::ApiError;
use crate::api::http_server::{ApiErrorResponse, AppState};

fn missing_image(field: &str) -> ApiError {
    ApiError::ValidationError {
        field: field.to_string(),
        message: "Missing images".to_string(),
    }
}

/// POST /analyze - compare pickup and return photos of a vehicle
///
/// Accepts `multipart/form-data` with file fields `pickup` and `returned`
/// and an optional `confidence` text field. Both images are sent to the
/// detection endpoint concurrently; the comparison runs once both results
/// are in.
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiErrorResponse> {
    let mut pickup: Option<Bytes> = None;
    let mut returned: Option<Bytes> = None;
    let mut confidence: Option<f64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "pickup" => {
                pickup = Some(field.bytes().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read pickup image: {}", e))
                })?);
            }
            "returned" => {
                returned = Some(field.bytes().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read returned image: {}", e))
                })?);
            }
            "confidence" => {
                let raw = field.text().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read confidence field: {}", e))
                })?;
                let parsed = raw.trim().parse::<f64>().map_err(|_| {
                    ApiError::ValidationError {
                        field: "confidence".to_string(),
                        message: format!("confidence must be a number, got '{}'", raw.trim()),
                    }
                })?;
                confidence = Some(parsed);
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let pickup = pickup.ok_or_else(|| missing_image("pickup"))?;
    let returned = returned.ok_or_else(|| missing_image("returned"))?;
    let confidence = confidence.unwrap_or(state.analysis.confidence_threshold);

    info!(
        "analyzing pickup ({} bytes) vs returned ({} bytes), confidence={}",
        pickup.len(),
        returned.len(),
        confidence
    );

    // The two detection calls are independent; issue them concurrently and
    // join both before comparing.
    let (pickup_result, return_result) = tokio::join!(
        state.detection.detect(&pickup, confidence),
        state.detection.detect(&returned, confidence),
    );

    let report = build_report(
        &pickup_result.predictions,
        &return_result.predictions,
        state.analysis.iou_threshold,
        &state.price_map,
    )
    .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(AnalyzeResponse {
        pickup: pickup_result,
        returned: return_result,
        report,
    }))
}
