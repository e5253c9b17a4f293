// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Region geometry and Intersection-over-Union

use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// A point in image-pixel coordinates of the original, unscaled image.
///
/// Display scaling is a UI concern and never happens inside the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corner points in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }
}

/// Geometry of a detected region.
///
/// The two forms the detector ecosystem produces are an explicit variant
/// each, so consumers must handle both exhaustively. On the wire this
/// serializes untagged: a rect inlines its `x`/`y`/`width`/`height`
/// fields, a polygon carries a `points` array, matching the established
/// JSON contract of the detection endpoint and the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    Rect(Rect),
    Polygon { points: Vec<Point> },
}

impl Geometry {
    /// Check the structural invariants: finite coordinates, non-negative
    /// rect extents, at least 3 polygon vertices.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self {
            Geometry::Rect(rect) => {
                let coords = [rect.x, rect.y, rect.width, rect.height];
                if coords.iter().any(|c| !c.is_finite()) {
                    return Err(AnalysisError::InvalidGeometry(format!(
                        "rect has non-finite coordinates: {:?}",
                        rect
                    )));
                }
                if rect.width < 0.0 || rect.height < 0.0 {
                    return Err(AnalysisError::InvalidGeometry(format!(
                        "rect has negative extent: {}x{}",
                        rect.width, rect.height
                    )));
                }
                Ok(())
            }
            Geometry::Polygon { points } => {
                if points.len() < 3 {
                    return Err(AnalysisError::InvalidGeometry(format!(
                        "polygon needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                    return Err(AnalysisError::InvalidGeometry(
                        "polygon has non-finite coordinates".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Axis-aligned bounding rect of the region.
    ///
    /// The detection endpoint only ever emits axis-aligned rectangles, so
    /// overlap between polygons is measured on their bounding rects.
    pub fn bounding_rect(&self) -> Rect {
        match self {
            Geometry::Rect(rect) => *rect,
            Geometry::Polygon { points } => {
                let mut min_x = f64::INFINITY;
                let mut min_y = f64::INFINITY;
                let mut max_x = f64::NEG_INFINITY;
                let mut max_y = f64::NEG_INFINITY;
                for p in points {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                if points.is_empty() {
                    return Rect::new(0.0, 0.0, 0.0, 0.0);
                }
                Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
            }
        }
    }

    /// Vertex list in drawing order; a rect becomes its 4 corners
    /// clockwise from the top-left.
    pub fn polygon_points(&self) -> Vec<Point> {
        match self {
            Geometry::Rect(rect) => rect.corners().to_vec(),
            Geometry::Polygon { points } => points.clone(),
        }
    }
}

/// Intersection-over-Union of two axis-aligned rectangles, in [0, 1].
///
/// Zero-extent rectangles are treated as degenerate; if the union area is
/// zero the result is defined as 0 so callers never divide by zero.
pub fn iou(a: &Rect, b: &Rect) -> f64 {
    let x_a = a.x.max(b.x);
    let y_a = a.y.max(b.y);
    let x_b = (a.x + a.width).min(b.x + b.width);
    let y_b = (a.y + a.height).min(b.y + b.height);

    let inter_width = (x_b - x_a).max(0.0);
    let inter_height = (y_b - y_a).max(0.0);
    let inter_area = inter_width * inter_height;

    let union_area = a.area() + b.area() - inter_area;
    if union_area <= 0.0 {
        return 0.0;
    }

    inter_area / union_area
}
