// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Boundary with the external object-detection endpoint

pub mod client;

pub use client::{DetectionClient, DetectionResult};
