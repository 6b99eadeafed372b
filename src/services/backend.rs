// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! The narrow query interface the application needs from a content backend.

use crate::services::query::{lookup, ObjectQuery};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend matched no objects. Callers treat this as an empty result.
    #[error("no objects matched the query")]
    NotFound,

    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound)
    }
}

/// Read access to typed objects in a content bucket.
///
/// Both operations signal "no match" with [`BackendError::NotFound`] rather
/// than an empty success, mirroring the hosted API.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// All objects matching `query`, restricted to its requested props.
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, BackendError>;

    /// The first object matching `query`.
    async fn find_one(&self, query: &ObjectQuery) -> Result<Value, BackendError> {
        let query = query.clone().limit(1);
        self.find(&query)
            .await?
            .into_iter()
            .next()
            .ok_or(BackendError::NotFound)
    }
}

/// In-process backend serving a fixed set of objects.
///
/// Evaluates [`ObjectQuery`] constraints locally and applies prop selection,
/// so it answers exactly like the hosted API for the queries this crate
/// issues. References are assumed to be stored already expanded.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    objects: Vec<Value>,
}

impl MemoryBackend {
    pub fn new(objects: Vec<Value>) -> Self {
        Self { objects }
    }

    /// Load objects from a JSON file holding either an array of objects or a
    /// backend response document with an `objects` array.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let doc: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not valid JSON", path.display()))?;

        let objects = match doc {
            Value::Array(objects) => objects,
            Value::Object(mut map) => match map.remove("objects") {
                Some(Value::Array(objects)) => objects,
                _ => anyhow::bail!("Seed file {} has no 'objects' array", path.display()),
            },
            _ => anyhow::bail!("Seed file {} must hold a JSON array", path.display()),
        };

        Ok(Self::new(objects))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ContentBackend for MemoryBackend {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, BackendError> {
        let limit = query.max_results().unwrap_or(usize::MAX);
        let matched: Vec<Value> = self
            .objects
            .iter()
            .filter(|object| query.matches(object))
            .take(limit)
            .map(|object| project(object, query.requested_props()))
            .collect();

        if matched.is_empty() {
            return Err(BackendError::NotFound);
        }
        Ok(matched)
    }
}

/// Keep only the requested (possibly dotted) props of `object`.
/// An empty prop list keeps the whole object.
fn project(object: &Value, props: &[String]) -> Value {
    if props.is_empty() {
        return object.clone();
    }

    let mut projected = Value::Object(Map::new());
    for prop in props {
        if let Some(value) = lookup(object, prop) {
            insert_path(&mut projected, prop, value.clone());
        }
    }
    projected
}

fn insert_path(target: &mut Value, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = target;
    while let Some(segment) = segments.next() {
        let Value::Object(map) = current else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
