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

use super::Asset;
use std::{ops::Deref, sync::Arc};

/// A shared, read-only view of a loaded collection of assets.
///
/// Layers publish their catalog as an `AssetSlice` so that readers on any
/// thread can hold a snapshot while the layer swaps in a newer one. Cloning
/// only bumps a reference count.
#[derive(Debug)]
pub struct AssetSlice<T: Asset>(Arc<[T]>);

impl<T: Asset> AssetSlice<T> {
    /// Takes ownership of the loaded values, preserving their order.
    pub fn new(items: Vec<T>) -> Self {
        Self(items.into())
    }

    /// An empty snapshot, used before anything has been loaded.
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Returns the underlying shared slice.
    pub fn shared(&self) -> Arc<[T]> {
        self.0.clone()
    }

    /// Returns `true` when both snapshots point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Asset> Default for AssetSlice<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Asset> Clone for AssetSlice<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Asset> Deref for AssetSlice<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);
    impl Asset for Marker {}

    #[test]
    fn empty_slice_has_no_items() {
        let slice = AssetSlice::<Marker>::empty();
        assert!(slice.is_empty());
    }

    #[test]
    fn clones_share_the_same_allocation() {
        let slice = AssetSlice::new(vec![Marker(1), Marker(2)]);
        let clone = slice.clone();
        assert!(slice.ptr_eq(&clone));
        assert_eq!(clone[1], Marker(2));
    }
}
