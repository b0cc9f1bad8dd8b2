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

//! The read-only asset store contract.
//!
//! An [`AssetStore`] maps a file name to a byte stream. Concrete stores
//! (plain directories, in-memory maps, pack files) live in `stardome-lanes`;
//! this module only defines what every store promises.

use serde::{Deserialize, Serialize};
use std::io::Read;

/// How the caller intends to read an opened asset.
///
/// This is a hint: a store may ignore it, and correctness never depends on it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// The whole asset will be read at once; buffering is welcome.
    #[default]
    Buffer,
    /// The asset will be read sequentially in chunks.
    Streaming,
    /// The asset will be read with seeks.
    Random,
}

/// A readable, owned byte stream returned by [`AssetStore::open`].
///
/// The stream is released when it is dropped.
pub type AssetStream = Box<dyn Read + Send>;

/// Errors an [`AssetStore`] can report when opening an asset.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No asset with this name exists in the store.
    #[error("asset '{0}' not found")]
    NotFound(String),
    /// The name is not a valid asset name for this store.
    #[error("invalid asset name '{0}'")]
    InvalidName(String),
    /// The asset exists but could not be opened.
    #[error("failed to open asset '{name}'")]
    Io {
        /// The asset that failed to open.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Returns `true` if the error means the asset is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// A read-only source of named assets.
///
/// Implementations must be shareable across threads: layers open their files
/// from the load worker, not from the thread that created the store.
pub trait AssetStore: Send + Sync {
    /// Opens the asset called `name` for reading.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the store has no such asset.
    fn open(&self, name: &str, access: AccessMode) -> Result<AssetStream, StoreError>;

    /// Returns `true` if the store has an asset called `name`.
    ///
    /// The default implementation tries to open it.
    fn contains(&self, name: &str) -> bool {
        self.open(name, AccessMode::Streaming).is_ok()
    }
}
