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

//! Agents that drive the loading lanes on behalf of the planetarium.
//!
//! The main entry point is [`CatalogLayer`]: a named, file-based layer that
//! loads its catalog on a shared [`LoadWorker`] and hands the result to a
//! [`RenderSink`](stardome_core::RenderSink).

pub mod catalog_agent;
pub mod config;

pub use catalog_agent::{
    CatalogLayer, FailurePolicy, LoadError, LoadResult, LoadState, LoadTicket, LoadWorker,
    SearchResult, WorkerError,
};
pub use config::{ConfigError, LayerConfig, LayerManifest};
