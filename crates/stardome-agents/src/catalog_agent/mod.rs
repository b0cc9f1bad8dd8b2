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

//! Acts as the agent for file-based catalog layers.
//!
//! A [`CatalogLayer`] owns the tactical side of loading: it decides when a
//! load runs, keeps the loaded catalog, applies the layer's
//! [`FailurePolicy`], and notifies the renderer. The heavy lifting is
//! delegated to the lanes: an [`AssetStore`](stardome_core::AssetStore) for
//! I/O and a [`RecordDecoder`](stardome_lanes::asset_lane::RecordDecoder) for
//! parsing.
//!
//! Every load runs on a [`LoadWorker`]. Layers that share a worker are loaded
//! one at a time, in the order they were scheduled.

mod error;
mod layer;
mod policy;
mod ticket;
mod worker;

pub use error::{LoadError, WorkerError};
pub use layer::{CatalogLayer, LoadState, SearchResult};
pub use policy::FailurePolicy;
pub use ticket::{LoadResult, LoadTicket};
pub use worker::LoadWorker;
