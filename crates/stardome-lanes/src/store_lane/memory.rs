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

use stardome_core::store::AssetStream;
use stardome_core::{AccessMode, AssetStore, StoreError};
use std::{collections::HashMap, io::Cursor, sync::Arc};

/// An asset store holding its assets in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssetStore {
    assets: HashMap<String, Arc<[u8]>>,
}

impl MemoryAssetStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Adds an asset, replacing any previous asset with the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), bytes.into().into());
    }

    /// Builder form of [`MemoryAssetStore::insert`].
    pub fn with_asset(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Number of assets in the store.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if the store holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetStore for MemoryAssetStore {
    fn open(&self, name: &str, _access: AccessMode) -> Result<AssetStream, StoreError> {
        let bytes = self
            .assets
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(Box::new(Cursor::new(bytes.clone())))
    }

    fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn serves_inserted_assets() {
        let store = MemoryAssetStore::new().with_asset("constellations.bin", vec![1, 2, 3]);
        let mut stream = store.open("constellations.bin", AccessMode::Buffer).unwrap();
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_asset_is_not_found() {
        let store = MemoryAssetStore::new();
        assert!(store.is_empty());
        let err = store.open("stars.bin", AccessMode::Buffer).err().unwrap();
        assert!(matches!(err, StoreError::NotFound(name) if name == "stars.bin"));
    }
}
