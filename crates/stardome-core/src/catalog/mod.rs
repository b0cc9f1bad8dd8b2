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

//! The catalog data model.
//!
//! A catalog file holds a [`CatalogFile`]: an ordered list of
//! [`SourceRecord`]s, each describing one object with its names, an optional
//! search location, and the points, labels, and lines used to draw it.
//! Records are converted one-to-one into [`AstronomicalSource`]s, whose
//! positions are unit vectors the renderer can use directly.

mod coords;
mod record;
mod source;

pub use coords::*;
pub use record::*;
pub use source::*;
