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

use stardome_core::SourceRecord;
use std::error::Error;

/// Errors produced while turning catalog bytes into records.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame does not start with the catalog magic bytes.
    #[error("not a catalog file: bad magic {found:?}")]
    BadMagic {
        /// The first four bytes that were found instead.
        found: [u8; 4],
    },
    /// The frame was written by an unknown format version.
    #[error("unsupported catalog version {0}")]
    UnsupportedVersion(u32),
    /// The data ends before the frame says it should.
    #[error("catalog truncated: expected {expected} bytes, found {actual}")]
    Truncated {
        /// Number of bytes the frame requires.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },
    /// Bytes remain after the payload.
    #[error("{0} unexpected trailing bytes after catalog payload")]
    TrailingBytes(usize),
    /// The payload itself is malformed.
    #[error("malformed catalog payload")]
    Payload(#[source] bincode::error::DecodeError),
    /// A custom decoder failed.
    #[error("catalog decoding failed")]
    Other(#[source] Box<dyn Error + Send + Sync>),
}

/// A lane that parses a complete catalog file into its records.
///
/// This is the CPU-bound part of loading a layer. Decoding is all-or-nothing:
/// either every record of the file is returned, in file order, or an error.
/// No record is available before the whole input has been parsed.
pub trait RecordDecoder: Send + Sync {
    /// Parses `bytes` into the ordered list of records it contains.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<SourceRecord>, DecodeError>;

    /// The largest input this decoder accepts, in bytes.
    ///
    /// Callers reading a catalog stop at this bound instead of buffering the
    /// whole file first. `None` means unbounded.
    fn max_input_len(&self) -> Option<u64> {
        None
    }
}
