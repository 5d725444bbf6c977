//! Opaque route tokens for wizard steps.
//!
//! A route token stands in for a step's position so the visible location never
//! reveals how far through the wizard the user is.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, path-safe identifier for one wizard step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteToken(String);

impl RouteToken {
    /// Generate a fresh token from a random UUID, formatted as a path segment
    pub fn random() -> Self {
        Self(format!("/{}", Uuid::new_v4().simple()))
    }

    /// Wrap an arbitrary router location (e.g. an application route)
    pub fn from_path(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
