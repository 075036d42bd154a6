// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed set of models every query is sent to

/// A response key paired with the model name the remote API knows it by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendTarget {
    /// Key used in the JSON response
    pub id: &'static str,
    /// Model name sent to the chat-completions API
    pub model: &'static str,
}

/// Targets queried for each upload, in response order
pub const BACKEND_TARGETS: [BackendTarget; 2] = [
    BackendTarget {
        id: "llama1",
        model: "meta-llama/llama-4-scout-17b-16e-instruct",
    },
    BackendTarget {
        id: "llama2",
        model: "meta-llama/llama-4-maverick-17b-128e-instruct",
    },
];
