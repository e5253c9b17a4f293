// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Damage comparison and cost estimation core
//!
//! Pure, synchronous logic: geometry overlap (IoU), the matcher that
//! partitions "return" detections into already-present vs new, the price
//! lookup, and report assembly. No I/O happens in this module tree; the
//! detection adapter lives in `crate::detection`.

pub mod damage;
pub mod geometry;
pub mod matcher;
pub mod pricing;
pub mod report;

pub use damage::Damage;
pub use geometry::{iou, Geometry, Point, Rect};
pub use matcher::{find_new_damages, DEFAULT_IOU_THRESHOLD};
pub use pricing::{estimate_cost, CostRange, PriceMap};
pub use report::{build_report, AnalysisReport};

use thiserror::Error;

/// Errors produced by the comparison core.
///
/// These indicate malformed input reaching the comparator and surface as a
/// server-side error; they are never used for "no damage found" outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("iou threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}
