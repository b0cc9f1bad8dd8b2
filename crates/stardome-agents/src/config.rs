// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layer configuration.
//!
//! Layers are described in RON, either one at a time or as a manifest:
//!
//! ```ron
//! (
//!     layers: [
//!         (name: "stars", file_name: "stars.bin"),
//!         (name: "messier", file_name: "messier.bin", failure_policy: Ignore),
//!     ],
//! )
//! ```

use crate::catalog_agent::FailurePolicy;
use serde::{Deserialize, Serialize};
use stardome_core::AccessMode;

/// Errors produced while reading layer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The text is not valid RON for this structure.
    #[error("invalid layer configuration")]
    Parse(#[from] ron::error::SpannedError),
    /// A layer has no name.
    #[error("layer at position {0} has an empty name")]
    EmptyName(usize),
    /// A layer has no catalog file.
    #[error("layer '{0}' has an empty file name")]
    EmptyFileName(String),
    /// Two layers share a name.
    #[error("layer name '{0}' is used more than once")]
    DuplicateName(String),
}

/// How one file-based layer is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// The layer's name, used in logs and render notifications.
    pub name: String,
    /// The catalog file, as named in the asset store.
    pub file_name: String,
    /// Access hint passed to the asset store.
    #[serde(default)]
    pub access: AccessMode,
    /// What to do when the catalog fails to load.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl LayerConfig {
    /// A layer with the default access hint and failure policy.
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            access: AccessMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Sets the access hint.
    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Parses a single layer from RON.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate(0)?;
        Ok(config)
    }

    fn validate(&self, position: usize) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName(position));
        }
        if self.file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName(self.name.clone()));
        }
        Ok(())
    }
}

/// The set of file-based layers an application loads.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerManifest {
    /// Layers in scheduling order.
    pub layers: Vec<LayerConfig>,
}

impl LayerManifest {
    /// Parses a manifest from RON and checks that layer names are unique.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let manifest: Self = ron::from_str(text)?;

        let mut seen = std::collections::HashSet::new();
        for (position, layer) in manifest.layers.iter().enumerate() {
            layer.validate(position)?;
            if !seen.insert(layer.name.as_str()) {
                return Err(ConfigError::DuplicateName(layer.name.clone()));
            }
        }
        Ok(manifest)
    }
}
