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

//! Marker trait and shared handle for data produced by the loading pipeline.
//!
//! Anything a layer loads in the background crosses a thread boundary twice:
//! once from the load worker into the layer, and once from the layer into the
//! renderer. The [`Asset`] bound captures that requirement in one place.

mod handle;

pub use handle::*;

/// A marker trait for types that can be produced by the loading pipeline.
///
/// - `Send` + `Sync`: the value is built on the load worker and read from
///   the render thread.
/// - `'static`: the value owns its data and can live as long as the layer.
///
/// # Examples
///
/// ```
/// use stardome_core::asset::Asset;
///
/// struct Sprite {
///     // ... fields
/// }
///
/// impl Asset for Sprite {}
/// ```
pub trait Asset: Send + Sync + 'static {}
