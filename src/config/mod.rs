// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration
//!
//! The environment is read exactly once at startup; everything downstream
//! receives explicit config structs so the core stays testable without
//! touching process-wide state.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::analysis::DEFAULT_IOU_THRESHOLD;

/// Default confidence threshold forwarded to the detection endpoint when
/// the request does not supply one.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.3;

const DEFAULT_API_PORT: u16 = 5000;
const DEFAULT_DETECTOR_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote detection endpoint.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub model_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Tunables for the comparison pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    pub iou_threshold: f64,
    pub confidence_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Full node configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub api_port: u16,
    pub detector: DetectorConfig,
    pub analysis: AnalysisConfig,
    /// Optional TOML price table overriding the built-in defaults.
    pub price_table_path: Option<PathBuf>,
}

impl NodeConfig {
    /// Build the configuration from environment variables.
    ///
    /// `DETECTOR_MODEL_URL` and `DETECTOR_API_KEY` are required; the rest
    /// fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_port = match env::var("API_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("API_PORT is not a valid port: {}", raw))?,
            Err(_) => DEFAULT_API_PORT,
        };

        let model_url = env::var("DETECTOR_MODEL_URL")
            .context("DETECTOR_MODEL_URL must be set to the detection endpoint URL")?;
        let api_key =
            env::var("DETECTOR_API_KEY").context("DETECTOR_API_KEY must be set")?;
        let timeout_secs = env::var("DETECTOR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DETECTOR_TIMEOUT_SECS);

        let iou_threshold = env::var("IOU_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_IOU_THRESHOLD);
        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);

        let price_table_path = env::var("PRICE_TABLE_PATH").ok().map(PathBuf::from);

        Ok(Self {
            api_port,
            detector: DetectorConfig {
                model_url,
                api_key,
                timeout_secs,
            },
            analysis: AnalysisConfig {
                iou_threshold,
                confidence_threshold,
            },
            price_table_path,
        })
    }
}
