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

use serde::{Deserialize, Serialize};
use stardome_core::store::AssetStream;
use stardome_core::{AccessMode, AssetStore, StoreError};
use std::{
    collections::HashMap,
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom},
    sync::{Mutex, PoisonError},
};

/// Where one asset lives inside a pack file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackEntry {
    /// The asset name used to open it.
    pub name: String,
    /// Byte offset of the asset in the pack file.
    pub offset: u64,
    /// Size of the asset in bytes.
    pub size: u64,
}

/// The pack index could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid pack index")]
pub struct PackIndexError(#[from] bincode::error::DecodeError);

/// An asset store reading assets out of a single pack file.
///
/// The index is a bincode-encoded list of [`PackEntry`] values, loaded once
/// into a map for O(1) lookups. The pack file handle is shared, so reads are
/// serialized by an internal lock; each `open` reads the entry fully into
/// memory and returns a stream over that copy.
#[derive(Debug)]
pub struct PackAssetStore {
    index: HashMap<String, PackEntry>,
    pack_file: Mutex<File>,
}

impl PackAssetStore {
    /// Creates a store from the raw bytes of an index and an open pack file.
    ///
    /// # Errors
    /// Returns a [`PackIndexError`] if `index_bytes` is not a valid,
    /// bincode-encoded list of `PackEntry`.
    pub fn new(index_bytes: &[u8], pack_file: File) -> Result<Self, PackIndexError> {
        let config = bincode::config::standard();
        let (entries, _): (Vec<PackEntry>, _) =
            bincode::serde::decode_from_slice(index_bytes, config)?;

        let index = entries
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();

        Ok(Self {
            index,
            pack_file: Mutex::new(pack_file),
        })
    }

    /// Retrieves the index entry for a given asset name.
    pub fn entry(&self, name: &str) -> Option<&PackEntry> {
        self.index.get(name)
    }

    /// Reads an entry's bytes. The entry must lie inside the pack file; its
    /// size is never trusted for an allocation before that is checked.
    fn read_entry(&self, entry: &PackEntry) -> io::Result<Vec<u8>> {
        let mut pack_file = self.pack_file.lock().unwrap_or_else(PoisonError::into_inner);
        let pack_len = pack_file.metadata()?.len();

        let end = entry.offset.checked_add(entry.size);
        let size = match (end, usize::try_from(entry.size)) {
            (Some(end), Ok(size)) if end <= pack_len => size,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "entry '{}' ({} bytes at offset {}) exceeds the {} byte pack file",
                        entry.name, entry.size, entry.offset, pack_len
                    ),
                ))
            }
        };

        let mut buffer = vec![0; size];
        pack_file.seek(SeekFrom::Start(entry.offset))?;
        pack_file.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

impl AssetStore for PackAssetStore {
    fn open(&self, name: &str, _access: AccessMode) -> Result<AssetStream, StoreError> {
        let entry = self
            .entry(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let bytes = self.read_entry(entry).map_err(|source| StoreError::Io {
            name: name.to_string(),
            source,
        })?;

        Ok(Box::new(Cursor::new(bytes)))
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}
