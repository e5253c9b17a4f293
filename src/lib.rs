// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analysis;
pub mod api;
pub mod config;
pub mod detection;
pub mod version;

// Re-export the main types
pub use analysis::{
    build_report, estimate_cost, find_new_damages, iou, AnalysisError, AnalysisReport, CostRange,
    Damage, Geometry, Point, PriceMap, Rect, DEFAULT_IOU_THRESHOLD,
};
pub use api::{build_router, start_server, ApiError, AppState};
pub use config::{AnalysisConfig, DetectorConfig, NodeConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use detection::{DetectionClient, DetectionResult};
