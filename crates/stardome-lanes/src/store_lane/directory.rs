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
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Component, Path, PathBuf},
};

/// An asset store backed by the files of a directory.
///
/// Asset names are relative paths using `/` separators. Names that would
/// leave the root directory are rejected.
#[derive(Debug, Clone)]
pub struct DirectoryAssetStore {
    root: PathBuf,
}

impl DirectoryAssetStore {
    /// Creates a store serving the files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store serves files from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetStore for DirectoryAssetStore {
    fn open(&self, name: &str, access: AccessMode) -> Result<AssetStream, StoreError> {
        let path = self.resolve(name)?;

        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            _ => StoreError::Io {
                name: name.to_string(),
                source,
            },
        })?;

        log::trace!("Opened {:?} with {:?} access.", path, access);

        Ok(match access {
            AccessMode::Buffer | AccessMode::Streaming => Box::new(BufReader::new(file)),
            AccessMode::Random => Box::new(file),
        })
    }

    fn contains(&self, name: &str) -> bool {
        self.resolve(name).map(|path| path.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn opens_files_under_the_root() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("layers")).unwrap();
        std::fs::write(dir.path().join("layers/stars.bin"), b"stars").unwrap();

        let store = DirectoryAssetStore::new(dir.path());
        let mut stream = store.open("layers/stars.bin", AccessMode::Buffer).unwrap();
        let mut contents = Vec::new();
        stream.read_to_end(&mut contents).unwrap();

        assert_eq!(contents, b"stars");
        assert!(store.contains("layers/stars.bin"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = DirectoryAssetStore::new(dir.path());

        let err = store.open("messier.bin", AccessMode::Buffer).err().unwrap();
        assert!(err.is_not_found());
        assert!(!store.contains("messier.bin"));
    }

    #[test]
    fn names_escaping_the_root_are_rejected() {
        let dir = tempdir().unwrap();
        let store = DirectoryAssetStore::new(dir.path().join("assets"));

        for name in ["../secret.bin", "/etc/passwd", "", "a/../../b"] {
            let err = store.open(name, AccessMode::Random).err().unwrap();
            assert!(
                matches!(err, StoreError::InvalidName(_)),
                "'{name}' should be rejected, got {err:?}"
            );
        }
    }
}
