// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-target outcomes and the combined response

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::inference::{BackendTarget, CompletionError};
use crate::vision::ImageError;

/// Request-level failures; everything else is reported in-band
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("empty file")]
    EmptyFile,

    #[error("invalid image format: {0}")]
    InvalidImage(String),

    #[error("image too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<ImageError> for DispatchError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::EmptyData => DispatchError::EmptyFile,
            ImageError::TooLarge(size, max) => DispatchError::TooLarge(size, max),
            other => DispatchError::InvalidImage(other.to_string()),
        }
    }
}

/// What one target answered, or why it did not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendResult {
    Answer(String),
    Failed(String),
}

impl BackendResult {
    /// Fold a completion outcome into the string the caller will see
    pub fn from_completion(target: &BackendTarget, outcome: Result<String, CompletionError>) -> Self {
        match outcome {
            Ok(answer) => BackendResult::Answer(answer),
            Err(CompletionError::Transport(_)) => {
                BackendResult::Failed(format!("API request failed for {}", target.id))
            }
            Err(CompletionError::Status { status, .. }) => {
                BackendResult::Failed(format!("API error: {}", status))
            }
            Err(CompletionError::MalformedResponse(_)) => {
                BackendResult::Failed("Malformed API response".to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BackendResult::Answer(text) | BackendResult::Failed(text) => text,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, BackendResult::Answer(_))
    }
}

impl Serialize for BackendResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Results keyed by target id, serialized as a flat JSON object in target order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse(Vec<(&'static str, BackendResult)>);

impl QueryResponse {
    pub fn insert(&mut self, id: &'static str, result: BackendResult) {
        match self.0.iter_mut().find(|(key, _)| *key == id) {
            Some(slot) => slot.1 = result,
            None => self.0.push((id, result)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&BackendResult> {
        self.0.iter().find(|(key, _)| *key == id).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BackendResult)> + '_ {
        self.0.iter().map(|(id, r)| (*id, r))
    }
}

impl Serialize for QueryResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, result) in &self.0 {
            map.serialize_entry(id, result)?;
        }
        map.end()
    }
}
