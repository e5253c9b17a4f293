// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use std::{env, sync::Arc};
use vehicle_damage_node::{
    api::{start_server, AppState},
    config::NodeConfig,
    detection::DetectionClient,
    version, PriceMap,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚗 Starting {}...", version::get_version_string());

    let config = NodeConfig::from_env()?;

    let price_map = match &config.price_table_path {
        Some(path) => {
            let map = PriceMap::load(path)?;
            tracing::info!(
                "loaded price table from {} ({} classes)",
                path.display(),
                map.len()
            );
            map
        }
        None => PriceMap::default(),
    };

    let detection = DetectionClient::new(config.detector.clone())?;

    let state = AppState::new(
        Arc::new(detection),
        config.analysis,
        Arc::new(price_map),
    );

    start_server(state, config.api_port).await
}
