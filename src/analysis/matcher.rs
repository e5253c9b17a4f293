// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Matching of return-image damages against pickup-image damages

use super::damage::Damage;
use super::geometry::iou;
use super::AnalysisError;

/// Default IoU above which a same-class pair counts as the same damage.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.3;

/// Partition `after` into damages already present in `before` and new
/// ones, returning the new ones in their original relative order.
///
/// A damage `r` from `after` is matched when some `p` in `before` has the
/// same class and `iou(r, p)` strictly exceeds `iou_threshold`; an IoU
/// exactly equal to the threshold does not match. The inner search stops
/// at the first qualifying pair.
///
/// Pure function; O(|before| * |after|), which is fine for the tens of
/// detections a single photo produces.
pub fn find_new_damages(
    before: &[Damage],
    after: &[Damage],
    iou_threshold: f64,
) -> Result<Vec<Damage>, AnalysisError> {
    if !(0.0..=1.0).contains(&iou_threshold) {
        return Err(AnalysisError::InvalidThreshold(iou_threshold));
    }
    for damage in before.iter().chain(after.iter()) {
        damage.geometry.validate()?;
    }

    let mut new_damages = Vec::new();
    for r in after {
        let r_rect = r.geometry.bounding_rect();
        let matched = before
            .iter()
            .any(|p| p.class == r.class && iou(&r_rect, &p.geometry.bounding_rect()) > iou_threshold);
        if !matched {
            new_damages.push(r.clone());
        }
    }
    Ok(new_damages)
}
