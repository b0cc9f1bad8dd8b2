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

use anyhow::Result;
use stardome_core::catalog::{CelestialCoords, PointRecord, PointShape};
use stardome_core::{AccessMode, AssetStore, SourceRecord};
use stardome_lanes::asset_lane::{encode_catalog, FramedCatalogDecoder, RecordDecoder};
use stardome_lanes::store_lane::{PackAssetStore, PackEntry};
use std::{fs::File, io::Read};
use tempfile::tempdir;

fn star(name: &str, ra: f32, dec: f32) -> SourceRecord {
    SourceRecord {
        names: vec![name.to_string()],
        points: vec![PointRecord {
            location: CelestialCoords::new(ra, dec),
            color: 0xFFFF_FFFF,
            size: 2,
            shape: PointShape::Circle,
        }],
        ..Default::default()
    }
}

#[test]
fn test_load_catalog_from_pack() -> Result<()> {
    // --- 1. Setup: two catalogs stored back to back in a real pack file ---
    let dir = tempdir()?;
    let index_path = dir.path().join("index.bin");
    let data_path = dir.path().join("data.pack");

    let stars = encode_catalog(&[star("Vega", 279.23, 38.78), star("Deneb", 310.36, 45.28)])?;
    let messier = encode_catalog(&[star("M42", 83.82, -5.39)])?;

    let entries = vec![
        PackEntry {
            name: "stars.bin".into(),
            offset: 0,
            size: stars.len() as u64,
        },
        PackEntry {
            name: "messier.bin".into(),
            offset: stars.len() as u64,
            size: messier.len() as u64,
        },
    ];
    let index_bytes = bincode::serde::encode_to_vec(&entries, bincode::config::standard())?;

    let mut data_bytes = stars.clone();
    data_bytes.extend_from_slice(&messier);
    std::fs::write(&index_path, &index_bytes)?;
    std::fs::write(&data_path, &data_bytes)?;

    // --- 2. Open the store and read both assets back ---
    let store = PackAssetStore::new(&std::fs::read(&index_path)?, File::open(&data_path)?)?;
    assert!(store.contains("stars.bin"));
    assert!(store.contains("messier.bin"));

    let mut bytes = Vec::new();
    store
        .open("messier.bin", AccessMode::Random)?
        .read_to_end(&mut bytes)?;
    let records = FramedCatalogDecoder::new().decode(&bytes)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].names[0], "M42");

    let mut bytes = Vec::new();
    store
        .open("stars.bin", AccessMode::Buffer)?
        .read_to_end(&mut bytes)?;
    let names: Vec<_> = FramedCatalogDecoder::new()
        .decode(&bytes)?
        .into_iter()
        .map(|r| r.names[0].clone())
        .collect();
    assert_eq!(names, vec!["Vega", "Deneb"]);

    // --- 3. Unknown names are reported as missing ---
    let err = store.open("planets.bin", AccessMode::Buffer).err().unwrap();
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_entry_past_end_of_pack_is_io_error() -> Result<()> {
    let dir = tempdir()?;
    let data_path = dir.path().join("data.pack");
    std::fs::write(&data_path, [0u8; 8])?;

    let entries = vec![PackEntry {
        name: "broken.bin".into(),
        offset: 4,
        size: 64,
    }];
    let index_bytes = bincode::serde::encode_to_vec(&entries, bincode::config::standard())?;

    let store = PackAssetStore::new(&index_bytes, File::open(&data_path)?)?;
    let err = store.open("broken.bin", AccessMode::Buffer).err().unwrap();
    assert!(matches!(err, stardome_core::StoreError::Io { .. }));
    Ok(())
}

#[test]
fn test_garbage_index_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let data_path = dir.path().join("data.pack");
    std::fs::write(&data_path, b"")?;

    let result = PackAssetStore::new(&[0xFF, 0xFF, 0xFF], File::open(&data_path)?);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_oversized_entry_is_rejected_before_reading() -> Result<()> {
    // --- 1. Setup: an 8 byte pack whose index claims far more ---
    let dir = tempdir()?;
    let data_path = dir.path().join("data.pack");
    std::fs::write(&data_path, [0u8; 8])?;

    let entries = vec![
        PackEntry {
            name: "huge.bin".into(),
            offset: 0,
            size: 1 << 46,
        },
        PackEntry {
            name: "wrapping.bin".into(),
            offset: u64::MAX - 2,
            size: 4,
        },
    ];
    let index_bytes = bincode::serde::encode_to_vec(&entries, bincode::config::standard())?;
    let store = PackAssetStore::new(&index_bytes, File::open(&data_path)?)?;

    // --- 2. Both fail as I/O errors instead of allocating or wrapping ---
    for name in ["huge.bin", "wrapping.bin"] {
        let err = store.open(name, AccessMode::Buffer).err().unwrap();
        match err {
            stardome_core::StoreError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData, "{name}");
            }
            other => panic!("unexpected error for {name}: {other:?}"),
        }
    }
    Ok(())
}
