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

//! The framed catalog format.
//!
//! A catalog file is a single length-delimited frame:
//!
//! | bytes | content |
//! |-------|---------|
//! | 0..4  | magic, `b"SDCT"` |
//! | 4..8  | format version, `u32` little-endian |
//! | 8..12 | payload length, `u32` little-endian |
//! | 12..  | payload: bincode (standard config) encoding of a [`CatalogFile`] |
//!
//! The frame must account for every byte of the file.

use super::decoder::{DecodeError, RecordDecoder};
use serde::Serialize;
use stardome_core::catalog::CatalogFile;
use stardome_core::SourceRecord;

/// The four bytes every catalog file starts with.
pub const CATALOG_MAGIC: &[u8; 4] = b"SDCT";
/// The only format version this crate reads and writes.
pub const CATALOG_VERSION: u32 = 1;

const HEADER_SIZE: usize = 12;
const MAX_PAYLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Errors produced while writing a catalog frame.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The records could not be serialized.
    #[error("failed to serialize catalog payload")]
    Payload(#[from] bincode::error::EncodeError),
    /// The payload does not fit in a frame.
    #[error("catalog payload of {0} bytes exceeds the frame limit")]
    TooLarge(usize),
}

/// Borrowed twin of [`CatalogFile`], so encoding does not clone the records.
#[derive(Serialize)]
struct CatalogFileRef<'a> {
    sources: &'a [SourceRecord],
}

/// Decodes catalog files written by [`encode_catalog`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FramedCatalogDecoder;

impl FramedCatalogDecoder {
    /// Creates a new instance of `FramedCatalogDecoder`.
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for FramedCatalogDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<SourceRecord>, DecodeError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DecodeError::Truncated {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let magic: [u8; 4] = read_array(bytes, 0);
        if &magic != CATALOG_MAGIC {
            return Err(DecodeError::BadMagic { found: magic });
        }

        let version = u32::from_le_bytes(read_array(bytes, 4));
        if version != CATALOG_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let payload_len = u32::from_le_bytes(read_array(bytes, 8));
        let expected = usize::try_from(payload_len)
            .ok()
            .and_then(|len| len.checked_add(HEADER_SIZE))
            .ok_or(DecodeError::Truncated {
                expected: usize::MAX,
                actual: bytes.len(),
            })?;
        if bytes.len() < expected {
            return Err(DecodeError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }
        if bytes.len() > expected {
            return Err(DecodeError::TrailingBytes(bytes.len() - expected));
        }

        let config = bincode::config::standard().with_limit::<MAX_PAYLOAD_BYTES>();
        let payload = &bytes[HEADER_SIZE..];
        let (file, consumed): (CatalogFile, usize) =
            bincode::serde::decode_from_slice(payload, config).map_err(DecodeError::Payload)?;

        if consumed != payload.len() {
            return Err(DecodeError::TrailingBytes(payload.len() - consumed));
        }

        Ok(file.sources)
    }

    fn max_input_len(&self) -> Option<u64> {
        Some((HEADER_SIZE + MAX_PAYLOAD_BYTES) as u64)
    }
}

fn read_array(bytes: &[u8], at: usize) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&bytes[at..at + 4]);
    out
}

/// Writes `records` as a complete catalog frame.
pub fn encode_catalog(records: &[SourceRecord]) -> Result<Vec<u8>, EncodeError> {
    let config = bincode::config::standard();
    let payload = bincode::serde::encode_to_vec(CatalogFileRef { sources: records }, config)?;

    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(EncodeError::TooLarge(payload.len()));
    }

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(CATALOG_MAGIC);
    frame.extend_from_slice(&CATALOG_VERSION.to_le_bytes());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardome_core::catalog::{CelestialCoords, LabelRecord, PointRecord, PointShape};

    fn sample_records() -> Vec<SourceRecord> {
        vec![
            SourceRecord {
                names: vec!["Sirius".into(), "Alpha Canis Majoris".into()],
                search_level: 1.0,
                points: vec![PointRecord {
                    location: CelestialCoords::new(101.287, -16.716),
                    color: 0xFFFF_FFFF,
                    size: 4,
                    shape: PointShape::Circle,
                }],
                ..Default::default()
            },
            SourceRecord {
                names: vec!["M31".into()],
                search_location: Some(CelestialCoords::new(10.684, 41.269)),
                labels: vec![LabelRecord {
                    location: CelestialCoords::new(10.684, 41.269),
                    text: "Andromeda Galaxy".into(),
                    color: 0xFF80_80FF,
                    font_size: 14,
                    offset: 0.02,
                }],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn decodes_what_it_encodes_in_order() {
        let records = sample_records();
        let bytes = encode_catalog(&records).unwrap();

        let decoded = FramedCatalogDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let bytes = encode_catalog(&[]).unwrap();
        assert!(FramedCatalogDecoder::new().decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = encode_catalog(&sample_records()).unwrap();
        bytes[0] = b'X';
        let err = FramedCatalogDecoder::new().decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::BadMagic { found } if &found == b"XDCT"));
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = encode_catalog(&sample_records()).unwrap();
        bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
        let err = FramedCatalogDecoder::new().decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVersion(7)));
    }

    #[test]
    fn rejects_truncated_header() {
        let err = FramedCatalogDecoder::new().decode(b"SDCT").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                expected: 12,
                actual: 4
            }
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let bytes = encode_catalog(&sample_records()).unwrap();
        let cut = &bytes[..bytes.len() - 5];
        let err = FramedCatalogDecoder::new().decode(cut).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn rejects_length_field_larger_than_the_file() {
        let mut bytes = encode_catalog(&sample_records()).unwrap();
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = FramedCatalogDecoder::new().decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { actual, .. } if actual == bytes.len()));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = encode_catalog(&sample_records()).unwrap();
        bytes.extend_from_slice(&[0, 0, 0]);
        let err = FramedCatalogDecoder::new().decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::TrailingBytes(3)));
    }

    #[test]
    fn rejects_corrupt_payload() {
        let mut bytes = encode_catalog(&sample_records()).unwrap();
        // A huge sequence length at the start of the payload.
        for b in &mut bytes[HEADER_SIZE..HEADER_SIZE + 4] {
            *b = 0xFF;
        }
        let err = FramedCatalogDecoder::new().decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Payload(_)));
    }
}
