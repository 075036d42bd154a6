// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Vision Query Node

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name reported at startup
pub const NAME: &str = env!("CARGO_PKG_NAME");
