// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Price table override tests: a deployment can swap the repair price
//! ranges via a TOML file without code changes.

use std::io::Write;

use vehicle_damage_node::{build_report, Damage, PriceMap, DEFAULT_IOU_THRESHOLD};

#[test]
fn test_file_backed_table_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dent = [500, 900]").unwrap();
    writeln!(file, "\"glass shatter\" = [1000, 2000]").unwrap();

    let price_map = PriceMap::load(file.path()).unwrap();
    let returned = vec![
        Damage::rect("dent", 0.0, 0.0, 5.0, 5.0),
        Damage::rect("glass shatter", 20.0, 0.0, 5.0, 5.0),
    ];
    let report = build_report(&[], &returned, DEFAULT_IOU_THRESHOLD, &price_map).unwrap();

    assert_eq!(report.estimated_cost_range, [1500, 2900]);
}

#[test]
fn test_file_backed_table_drops_unlisted_classes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dent = [10, 20]").unwrap();

    let price_map = PriceMap::load(file.path()).unwrap();
    // Known to the default table but absent from the override.
    assert_eq!(price_map.get("scratch"), None);

    let returned = vec![Damage::rect("scratch", 0.0, 0.0, 5.0, 5.0)];
    let report = build_report(&[], &returned, DEFAULT_IOU_THRESHOLD, &price_map).unwrap();
    assert_eq!(report.new_damages.len(), 1);
    assert_eq!(report.estimated_cost_range, [0, 0]);
}

#[test]
fn test_malformed_table_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dent = \"cheap\"").unwrap();
    assert!(PriceMap::load(file.path()).is_err());
}
