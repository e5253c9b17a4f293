// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The damage type shared by the detection adapter and the comparison core

use serde::Serialize;
use serde_json::{Map, Value};

use super::geometry::{Geometry, Point, Rect};

/// A single detected damage instance.
///
/// `class` and `geometry` are the only fields the core interprets;
/// `confidence` and anything else the detector attached ride along in
/// `extra` and are echoed back to the caller unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Damage {
    pub class: String,

    #[serde(flatten)]
    pub geometry: Geometry,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Damage {
    /// A rectangular damage with no detector metadata.
    pub fn rect(class: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            class: class.into(),
            geometry: Geometry::Rect(Rect::new(x, y, width, height)),
            confidence: None,
            extra: Map::new(),
        }
    }

    /// A polygonal damage with no detector metadata.
    pub fn polygon(class: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            class: class.into(),
            geometry: Geometry::Polygon { points },
            confidence: None,
            extra: Map::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Convert the geometry to explicit polygon form; a rect becomes the
    /// 4-point polygon of its corners. Used when assembling the report,
    /// whose consumers draw `points` overlays.
    pub fn into_polygon_form(mut self) -> Self {
        self.geometry = Geometry::Polygon {
            points: self.geometry.polygon_points(),
        };
        self
    }
}
