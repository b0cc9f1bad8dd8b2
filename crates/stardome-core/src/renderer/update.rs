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

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// One kind of change a layer can report to the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UpdateType {
    /// Drop everything the renderer holds for the layer and rebuild it.
    Reset,
    /// Positions changed, the set of objects did not.
    UpdatePositions,
    /// Images changed, the set of objects did not.
    UpdateImages,
}

impl UpdateType {
    const ALL: [UpdateType; 3] = [
        UpdateType::Reset,
        UpdateType::UpdatePositions,
        UpdateType::UpdateImages,
    ];

    const fn bit(self) -> u8 {
        match self {
            UpdateType::Reset => 1 << 0,
            UpdateType::UpdatePositions => 1 << 1,
            UpdateType::UpdateImages => 1 << 2,
        }
    }
}

/// A set of [`UpdateType`]s sent along with a refresh.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UpdateTypes {
    bits: u8,
}

impl UpdateTypes {
    /// An empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// The full-reset notification file-based layers always send.
    pub const RESET: Self = Self {
        bits: UpdateType::Reset.bit(),
    };

    /// Creates a set holding a single update type.
    pub const fn of(update: UpdateType) -> Self {
        Self { bits: update.bit() }
    }

    /// Returns `true` if `update` is in the set.
    pub const fn contains(&self, update: UpdateType) -> bool {
        self.bits & update.bit() != 0
    }

    /// Adds `update` to the set.
    pub fn insert(&mut self, update: UpdateType) {
        self.bits |= update.bit();
    }

    /// Returns `true` if the set holds nothing.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates over the update types in the set.
    pub fn iter(&self) -> impl Iterator<Item = UpdateType> + '_ {
        UpdateType::ALL
            .into_iter()
            .filter(move |update| self.contains(*update))
    }
}

impl From<UpdateType> for UpdateTypes {
    fn from(update: UpdateType) -> Self {
        Self::of(update)
    }
}

impl BitOr<UpdateType> for UpdateTypes {
    type Output = Self;
    fn bitor(mut self, other: UpdateType) -> Self {
        self.insert(other);
        self
    }
}

impl BitOr for UpdateTypes {
    type Output = Self;
    fn bitor(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

impl BitOrAssign<UpdateType> for UpdateTypes {
    fn bitor_assign(&mut self, other: UpdateType) {
        self.insert(other);
    }
}

impl fmt::Debug for UpdateTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
