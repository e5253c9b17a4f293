// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analysis report assembly

use serde::Serialize;

use super::damage::Damage;
use super::matcher::find_new_damages;
use super::pricing::{estimate_cost, PriceMap};
use super::AnalysisError;

/// The comparison outcome for one pickup/return pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// New damages in return-image detection order, geometry always in
    /// polygon form so overlay consumers can draw `points` directly.
    pub new_damages: Vec<Damage>,
    pub estimated_cost_range: [u64; 2],
    pub summary: String,
}

/// Compare the two detection lists and price the difference.
pub fn build_report(
    before: &[Damage],
    after: &[Damage],
    iou_threshold: f64,
    price_map: &PriceMap,
) -> Result<AnalysisReport, AnalysisError> {
    let new_damages = find_new_damages(before, after, iou_threshold)?;
    let cost = estimate_cost(&new_damages, price_map);
    let new_damages: Vec<Damage> = new_damages
        .into_iter()
        .map(Damage::into_polygon_form)
        .collect();

    let summary = format!(
        "{} new damages detected. Estimated cost between ${} and ${}",
        new_damages.len(),
        cost.min,
        cost.max
    );

    Ok(AnalysisReport {
        new_damages,
        estimated_cost_range: [cost.min, cost.max],
        summary,
    })
}
