// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze response types

use serde::Serialize;

use crate::analysis::AnalysisReport;
use crate::detection::DetectionResult;

/// Response for one pickup/return analysis: both raw detection results
/// echoed back, plus the comparison report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub pickup: DetectionResult,
    pub returned: DetectionResult,
    pub report: AnalysisReport,
}
