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

use stardome_core::StoreError;
use stardome_lanes::asset_lane::DecodeError;

/// Errors reported by a [`LoadWorker`](super::LoadWorker).
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The worker has been shut down and no longer accepts jobs.
    #[error("load worker is shut down")]
    Disconnected,
    /// The worker thread could not be started.
    #[error("failed to spawn load worker thread")]
    Spawn(#[source] std::io::Error),
}

/// Why a layer ended up without a catalog.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The asset store could not open the catalog file.
    #[error("unable to open '{file}'")]
    Open {
        /// The catalog file name.
        file: String,
        /// The store's error.
        #[source]
        source: StoreError,
    },
    /// The catalog file was opened but could not be read.
    #[error("unable to read '{file}'")]
    Read {
        /// The catalog file name.
        file: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is larger than the decoder accepts.
    #[error("'{file}' exceeds the {limit} byte catalog limit")]
    TooLarge {
        /// The catalog file name.
        file: String,
        /// The decoder's input limit.
        limit: u64,
    },
    /// The catalog file is malformed.
    #[error("unable to decode '{file}'")]
    Decode {
        /// The catalog file name.
        file: String,
        /// The decoder's error.
        #[source]
        source: DecodeError,
    },
    /// The load could not be scheduled.
    #[error("unable to schedule load of '{file}'")]
    Worker {
        /// The catalog file name.
        file: String,
        /// The worker's error.
        #[source]
        source: WorkerError,
    },
    /// The load job stopped without producing a result.
    #[error("load of '{file}' was abandoned")]
    Abandoned {
        /// The catalog file name.
        file: String,
    },
}

impl LoadError {
    /// Returns `true` if the catalog file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Open { source, .. } if source.is_not_found())
    }

    /// Returns `true` if the catalog file exists but is malformed.
    pub fn is_decode(&self) -> bool {
        matches!(self, LoadError::Decode { .. })
    }
}
