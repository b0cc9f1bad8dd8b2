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

//! Concrete [`AssetStore`](stardome_core::AssetStore) backends.
//!
//! - [`DirectoryAssetStore`]: loose files under a root directory.
//! - [`MemoryAssetStore`]: assets kept in memory, for embedded data and tests.
//! - [`PackAssetStore`]: assets stored back to back in a single pack file,
//!   located through a bincode index.

mod directory;
mod memory;
mod pack;

pub use directory::DirectoryAssetStore;
pub use memory::MemoryAssetStore;
pub use pack::{PackAssetStore, PackEntry, PackIndexError};
