//! Backend project configuration and the opaque app handle.
//!
//! The host application deserializes a [`BackendConfig`] (build-time JSON or
//! an injected blob), initializes its SDK from it, and hands the resulting
//! handles to `SessionProvider`. This crate only carries the project identity
//! along for introspection.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

/// Connection settings for one backend project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend project identifier.
    pub project_id: String,
    /// Client API key for the project.
    pub api_key: String,
    /// Auth endpoint override, if the project uses one.
    #[serde(default)]
    pub auth_domain: Option<String>,
    /// Document database endpoint override, if the project uses one.
    #[serde(default)]
    pub database_url: Option<String>,
}

/// Opaque handle to an initialized backend app.
///
/// Owned by the caller; `SessionProvider` holds it by value but never acts on
/// it beyond availability checks and labeling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppHandle {
    project_id: String,
}

impl AppHandle {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}
