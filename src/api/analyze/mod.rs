// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Damage analysis endpoint

pub mod handler;
pub mod response;

pub use handler::analyze_handler;
pub use response::AnalyzeResponse;
