// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for the remote damage-detection endpoint

use std::time::Duration;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::analysis::{Damage, Geometry, Rect};
use crate::config::DetectorConfig;

/// One raw prediction as the detection endpoint reports it: a flat
/// axis-aligned box plus whatever metadata the model attaches.
#[derive(Debug, Clone, Deserialize)]
struct RawPrediction {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    class: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDetectionResponse {
    #[serde(default)]
    predictions: Vec<RawPrediction>,
}

impl From<RawPrediction> for Damage {
    fn from(raw: RawPrediction) -> Self {
        Damage {
            class: raw.class,
            geometry: Geometry::Rect(Rect::new(raw.x, raw.y, raw.width, raw.height)),
            confidence: raw.confidence,
            extra: raw.extra,
        }
    }
}

/// Detections for a single image, echoed back to the caller as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionResult {
    pub predictions: Vec<Damage>,
}

/// Client for the remote detection endpoint.
///
/// Endpoint URL, API key and timeout come from [`DetectorConfig`]; nothing
/// here reads the process environment.
pub struct DetectionClient {
    client: Client,
    config: DetectorConfig,
}

impl DetectionClient {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!("detection client configured: endpoint={}", config.model_url);

        Ok(Self { client, config })
    }

    /// Detect damages on one image.
    ///
    /// Fail-open by contract: any transport or parsing failure is logged
    /// and degrades to an empty prediction list, so a detector outage
    /// never blocks the comparison pipeline. The `warn!` line is the only
    /// place the degradation is visible.
    pub async fn detect(&self, image: &[u8], confidence: f64) -> DetectionResult {
        match self.try_detect(image, confidence).await {
            Ok(predictions) => DetectionResult { predictions },
            Err(e) => {
                warn!("error detecting damages, degrading to empty result: {:#}", e);
                DetectionResult::default()
            }
        }
    }

    async fn try_detect(&self, image: &[u8], confidence: f64) -> Result<Vec<Damage>> {
        let body = STANDARD.encode(image);

        let response = self
            .client
            .post(&self.config.model_url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("format", "json"),
                ("confidence", confidence.to_string().as_str()),
            ])
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let raw: RawDetectionResponse = response.json().await?;
        Ok(raw.predictions.into_iter().map(Damage::from).collect())
    }
}
