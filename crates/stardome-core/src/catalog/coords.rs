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

/// An equatorial position as stored in catalog files.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialCoords {
    /// Right ascension, in degrees.
    pub ra_deg: f32,
    /// Declination, in degrees.
    pub dec_deg: f32,
}

impl CelestialCoords {
    /// Creates a new position from right ascension and declination in degrees.
    #[inline]
    pub const fn new(ra_deg: f32, dec_deg: f32) -> Self {
        Self { ra_deg, dec_deg }
    }
}

/// A unit vector on the celestial sphere, the form the renderer consumes.
///
/// The x axis points at (ra 0, dec 0), the z axis at the north celestial pole.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocentricCoords {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl GeocentricCoords {
    /// Converts a right ascension / declination pair (degrees) into a unit vector.
    pub fn from_ra_dec(ra_deg: f32, dec_deg: f32) -> Self {
        let ra = ra_deg.to_radians();
        let dec = dec_deg.to_radians();
        let cos_dec = dec.cos();
        Self {
            x: ra.cos() * cos_dec,
            y: ra.sin() * cos_dec,
            z: dec.sin(),
        }
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<CelestialCoords> for GeocentricCoords {
    fn from(coords: CelestialCoords) -> Self {
        Self::from_ra_dec(coords.ra_deg, coords.dec_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: GeocentricCoords, b: GeocentricCoords) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn vernal_equinox_maps_to_x_axis() {
        let v = GeocentricCoords::from_ra_dec(0.0, 0.0);
        assert!(approx_eq(v, GeocentricCoords { x: 1.0, y: 0.0, z: 0.0 }));
    }

    #[test]
    fn ninety_degrees_ra_maps_to_y_axis() {
        let v = GeocentricCoords::from_ra_dec(90.0, 0.0);
        assert!(approx_eq(v, GeocentricCoords { x: 0.0, y: 1.0, z: 0.0 }));
    }

    #[test]
    fn north_pole_maps_to_z_axis() {
        let v: GeocentricCoords = CelestialCoords::new(123.0, 90.0).into();
        assert!((v.z - 1.0).abs() < EPSILON);
        assert!(v.x.abs() < EPSILON && v.y.abs() < EPSILON);
    }

    #[test]
    fn conversion_yields_unit_vectors() {
        for (ra, dec) in [(10.5, -33.0), (201.3, 12.25), (359.9, -89.0)] {
            let v = GeocentricCoords::from_ra_dec(ra, dec);
            assert!((v.length() - 1.0).abs() < 1e-5, "{ra}/{dec} -> {v:?}");
        }
    }
}
