// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Repair cost estimation from a class -> price-range table

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::damage::Damage;

/// Accumulated low/high repair cost estimate in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CostRange {
    pub min: u64,
    pub max: u64,
}

/// Lookup from damage class to an estimated `[min, max]` repair price.
///
/// The built-in defaults cover the six classes the detection model emits.
/// A deployment can override the table with a TOML file (one
/// `class = [min, max]` entry per line) without touching code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMap(HashMap<String, (u64, u64)>);

impl Default for PriceMap {
    fn default() -> Self {
        let entries = [
            ("crack", (60, 120)),
            ("dent", (40, 90)),
            ("glass shatter", (120, 250)),
            ("lamp broken", (70, 150)),
            ("scratch", (40, 120)),
            ("tire flat", (20, 80)),
        ];
        Self(
            entries
                .into_iter()
                .map(|(class, range)| (class.to_string(), range))
                .collect(),
        )
    }
}

impl PriceMap {
    pub fn get(&self, class: &str) -> Option<(u64, u64)> {
        self.0.get(class).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a price table from TOML, rejecting inverted ranges.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let map: PriceMap = toml::from_str(raw).context("failed to parse price table")?;
        for (class, (min, max)) in &map.0 {
            if min > max {
                bail!(
                    "price range for '{}' is inverted: min {} > max {}",
                    class,
                    min,
                    max
                );
            }
        }
        Ok(map)
    }

    /// Load a price table from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read price table {}", path.display()))?;
        Self::from_toml_str(&raw)
    }
}

/// Sum the price ranges of the new damages.
///
/// Classes absent from the table contribute nothing to either bound; the
/// damage still counts in the report. Order-independent.
pub fn estimate_cost(new_damages: &[Damage], price_map: &PriceMap) -> CostRange {
    let mut cost = CostRange::default();
    for damage in new_damages {
        if let Some((low, high)) = price_map.get(&damage.class) {
            cost.min += low;
            cost.max += high;
        }
    }
    cost
}
