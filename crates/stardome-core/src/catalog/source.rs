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

//! Render-ready domain objects built from [`SourceRecord`]s.

use super::coords::GeocentricCoords;
use super::record::{LabelRecord, LineRecord, PointRecord, PointShape, SourceRecord};
use crate::asset::Asset;

/// A point ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    /// Unit vector on the celestial sphere.
    pub coords: GeocentricCoords,
    /// Packed ARGB color.
    pub color: u32,
    /// Size in pixels.
    pub size: u32,
    /// How the point is drawn.
    pub shape: PointShape,
}

/// A label ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    /// Unit vector on the celestial sphere.
    pub coords: GeocentricCoords,
    /// The label text.
    pub text: String,
    /// Packed ARGB color.
    pub color: u32,
    /// Font size in points.
    pub font_size: u32,
    /// Offset of the text from its anchor, in radians.
    pub offset: f32,
}

/// A polyline ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    /// Packed ARGB color.
    pub color: u32,
    /// Line width in pixels.
    pub line_width: f32,
    /// Unit vectors, in drawing order.
    pub vertices: Vec<GeocentricCoords>,
}

/// One astronomical object of a layer, converted for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomicalSource {
    /// Display names, the first one being the primary name.
    pub names: Vec<String>,
    /// Where search results should point, if the object can be searched for.
    pub search_location: Option<GeocentricCoords>,
    /// Zoom level from which the object becomes searchable.
    pub search_level: f32,
    /// Detail level the object is drawn at.
    pub level: u32,
    /// Point primitives, in source order.
    pub points: Vec<PointPrimitive>,
    /// Label primitives, in source order.
    pub labels: Vec<TextPrimitive>,
    /// Line primitives, in source order.
    pub lines: Vec<LinePrimitive>,
}

impl Asset for AstronomicalSource {}

impl AstronomicalSource {
    /// The primary display name, if the object has any.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Case-insensitive match against any of the object's names.
    pub fn matches_name(&self, name: &str) -> bool {
        self.matching_name(name).is_some()
    }

    /// The first of the object's names equal to `name`, ignoring case.
    pub fn matching_name(&self, name: &str) -> Option<&str> {
        let wanted = fold_case(name);
        self.names
            .iter()
            .map(String::as_str)
            .find(|n| fold_case(n) == wanted)
    }

    /// The object's names that start with `prefix`, ignoring case.
    pub fn names_with_prefix<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = fold_case(prefix);
        self.names
            .iter()
            .map(String::as_str)
            .filter(move |n| fold_case(n).starts_with(&prefix))
    }
}

/// The one case fold used for name lookups, so search and completion agree.
fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

impl From<PointRecord> for PointPrimitive {
    fn from(record: PointRecord) -> Self {
        Self {
            coords: record.location.into(),
            color: record.color,
            size: record.size,
            shape: record.shape,
        }
    }
}

impl From<LabelRecord> for TextPrimitive {
    fn from(record: LabelRecord) -> Self {
        Self {
            coords: record.location.into(),
            text: record.text,
            color: record.color,
            font_size: record.font_size,
            offset: record.offset,
        }
    }
}

impl From<LineRecord> for LinePrimitive {
    fn from(record: LineRecord) -> Self {
        Self {
            color: record.color,
            line_width: record.line_width,
            vertices: record.vertices.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SourceRecord> for AstronomicalSource {
    fn from(record: SourceRecord) -> Self {
        // Objects without an explicit search location are found at their first
        // drawn point, then at their first label.
        let search_location = record
            .search_location
            .or_else(|| record.points.first().map(|p| p.location))
            .or_else(|| record.labels.first().map(|l| l.location))
            .map(GeocentricCoords::from);

        Self {
            names: record.names,
            search_location,
            search_level: record.search_level,
            level: record.level,
            points: record.points.into_iter().map(Into::into).collect(),
            labels: record.labels.into_iter().map(Into::into).collect(),
            lines: record.lines.into_iter().map(Into::into).collect(),
        }
    }
}
