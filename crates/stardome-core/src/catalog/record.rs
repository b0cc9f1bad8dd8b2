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

//! Wire-level records, exactly as they are stored in a catalog file.

use super::coords::CelestialCoords;
use serde::{Deserialize, Serialize};

/// The shape a point primitive is drawn with.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointShape {
    /// A plain disc. Used for stars.
    #[default]
    Circle,
    /// A star glyph.
    Star,
    /// An elliptical galaxy icon.
    EllipticalGalaxy,
    /// A spiral galaxy icon.
    SpiralGalaxy,
    /// An irregular galaxy icon.
    IrregularGalaxy,
    /// A lenticular galaxy icon.
    LenticularGalaxy,
    /// A globular cluster icon.
    GlobularCluster,
    /// An open cluster icon.
    OpenCluster,
    /// A nebula icon.
    Nebula,
    /// The Hubble deep field marker.
    HubbleDeepField,
}

/// A single point to draw, e.g. one star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Position on the sky.
    pub location: CelestialCoords,
    /// Packed ARGB color.
    pub color: u32,
    /// Size in pixels.
    pub size: u32,
    /// How the point is drawn.
    pub shape: PointShape,
}

/// A text label anchored on the sky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    /// Anchor position on the sky.
    pub location: CelestialCoords,
    /// The label text.
    pub text: String,
    /// Packed ARGB color.
    pub color: u32,
    /// Font size in points.
    pub font_size: u32,
    /// Offset of the text from its anchor, in radians.
    pub offset: f32,
}

/// A polyline on the sky, e.g. a constellation figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Packed ARGB color.
    pub color: u32,
    /// Line width in pixels.
    pub line_width: f32,
    /// The vertices of the polyline, in drawing order.
    pub vertices: Vec<CelestialCoords>,
}

/// One parsed entry from a catalog file.
///
/// Records are immutable once decoded. A loader owns them until it converts
/// them into [`super::AstronomicalSource`]s.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Display names, the first one being the primary name.
    pub names: Vec<String>,
    /// Where search results for this object should point, if specified.
    pub search_location: Option<CelestialCoords>,
    /// Zoom level from which the object becomes searchable.
    pub search_level: f32,
    /// Detail level the object is drawn at.
    pub level: u32,
    /// Point primitives.
    pub points: Vec<PointRecord>,
    /// Label primitives.
    pub labels: Vec<LabelRecord>,
    /// Line primitives.
    pub lines: Vec<LineRecord>,
}

/// The top-level message of a catalog file: a repeated field of records.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// All records, in file order.
    pub sources: Vec<SourceRecord>,
}
