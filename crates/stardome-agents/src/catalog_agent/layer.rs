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

//! The file-based catalog layer.

use super::error::LoadError;
use super::ticket::{LoadResult, LoadTicket};
use super::worker::LoadWorker;
use crate::config::LayerConfig;
use stardome_core::asset::AssetSlice;
use stardome_core::catalog::GeocentricCoords;
use stardome_core::{AssetStore, AstronomicalSource, RenderSink, UpdateTypes};
use stardome_lanes::asset_lane::RecordDecoder;
use std::collections::BTreeSet;
use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Where a layer is in its loading lifecycle.
///
/// `Uninitialized -> Loading -> Ready | Empty`. An explicit
/// [`CatalogLayer::reload`] moves `Ready | Empty` back to `Loading`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// `initialize` has not been called yet.
    Uninitialized,
    /// A load is queued or running.
    Loading,
    /// The catalog was loaded.
    Ready,
    /// The load failed; the catalog is empty.
    Empty,
}

/// A search hit: the matched name and where to point the view.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The name that matched.
    pub name: String,
    /// Where the object is on the sky.
    pub location: GeocentricCoords,
}

struct Progress {
    state: LoadState,
    last: Option<LoadResult>,
    waiters: Vec<flume::Sender<LoadResult>>,
}

struct LayerShared {
    config: LayerConfig,
    store: Arc<dyn AssetStore>,
    decoder: Arc<dyn RecordDecoder>,
    sink: Arc<dyn RenderSink>,
    worker: Arc<LoadWorker>,
    catalog: RwLock<AssetSlice<AstronomicalSource>>,
    progress: Mutex<Progress>,
}

/// A layer whose objects are read from a catalog file.
///
/// Construction does no I/O. [`CatalogLayer::initialize`] schedules a single
/// load on the injected [`LoadWorker`], which opens the file through the
/// [`AssetStore`], decodes it with the [`RecordDecoder`], converts every
/// record into an [`AstronomicalSource`], publishes the result, and finally
/// sends a full reset to the [`RenderSink`].
///
/// The handle is cheap to clone; clones refer to the same layer.
#[derive(Clone)]
pub struct CatalogLayer {
    shared: Arc<LayerShared>,
}

impl std::fmt::Debug for CatalogLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLayer")
            .field("name", &self.shared.config.name)
            .field("file_name", &self.shared.config.file_name)
            .field("state", &self.state())
            .finish()
    }
}

impl CatalogLayer {
    /// Creates a layer from its configuration and collaborators.
    pub fn new(
        config: LayerConfig,
        store: Arc<dyn AssetStore>,
        decoder: Arc<dyn RecordDecoder>,
        sink: Arc<dyn RenderSink>,
        worker: Arc<LoadWorker>,
    ) -> Self {
        Self {
            shared: Arc::new(LayerShared {
                config,
                store,
                decoder,
                sink,
                worker,
                catalog: RwLock::new(AssetSlice::empty()),
                progress: Mutex::new(Progress {
                    state: LoadState::Uninitialized,
                    last: None,
                    waiters: Vec::new(),
                }),
            }),
        }
    }

    /// The layer's name.
    pub fn name(&self) -> &str {
        &self.shared.config.name
    }

    /// The catalog file the layer reads.
    pub fn file_name(&self) -> &str {
        &self.shared.config.file_name
    }

    /// The layer's configuration.
    pub fn config(&self) -> &LayerConfig {
        &self.shared.config
    }

    /// Schedules the catalog load and returns immediately.
    ///
    /// Only the first call schedules anything. Later calls return a ticket
    /// for that same load, resolved right away if it already finished, so a
    /// catalog is never loaded twice or doubled. Use [`CatalogLayer::reload`]
    /// to load the file again.
    pub fn initialize(&self) -> LoadTicket {
        let mut progress = self.shared.lock_progress();
        match progress.state {
            LoadState::Uninitialized => self.schedule(&mut progress),
            LoadState::Loading => self.join(&mut progress),
            LoadState::Ready | LoadState::Empty => self.finished(&progress),
        }
    }

    /// Loads the catalog file again and replaces the current catalog.
    ///
    /// If a load is already queued or running the returned ticket follows it
    /// instead of scheduling another one.
    pub fn reload(&self) -> LoadTicket {
        let mut progress = self.shared.lock_progress();
        match progress.state {
            LoadState::Loading => self.join(&mut progress),
            LoadState::Uninitialized | LoadState::Ready | LoadState::Empty => {
                self.schedule(&mut progress)
            }
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> LoadState {
        self.shared.lock_progress().state
    }

    /// A snapshot of the loaded objects, in catalog file order.
    ///
    /// Empty until a load completes. Never blocks on I/O.
    pub fn loaded_objects(&self) -> Arc<[AstronomicalSource]> {
        self.shared.snapshot().shared()
    }

    /// Number of objects currently loaded.
    pub fn len(&self) -> usize {
        self.shared.snapshot().len()
    }

    /// Returns `true` if no objects are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds searchable objects one of whose names equals `name`, ignoring case.
    pub fn search_by_name(&self, name: &str) -> Vec<SearchResult> {
        self.shared
            .snapshot()
            .iter()
            .filter_map(|source| {
                let location = source.search_location?;
                let matched = source.matching_name(name)?;
                Some(SearchResult {
                    name: matched.to_string(),
                    location,
                })
            })
            .collect()
    }

    /// Names of searchable objects starting with `prefix`, ignoring case.
    pub fn names_matching_prefix(&self, prefix: &str) -> BTreeSet<String> {
        self.shared
            .snapshot()
            .iter()
            .filter(|source| source.search_location.is_some())
            .flat_map(|source| source.names_with_prefix(prefix))
            .map(str::to_string)
            .collect()
    }

    fn schedule(&self, progress: &mut Progress) -> LoadTicket {
        let (sender, ticket) = LoadTicket::pending(self.file_name());
        progress.state = LoadState::Loading;
        progress.waiters.push(sender);

        let shared = self.shared.clone();
        let submitted = self.shared.worker.submit(move || {
            let mut pending = PendingLoad {
                shared,
                done: false,
            };
            let outcome = pending.shared.read_catalog();
            pending.shared.publish(outcome);
            pending.done = true;
        });

        if let Err(source) = submitted {
            let error = LoadError::Worker {
                file: self.file_name().to_string(),
                source,
            };
            let result = self.shared.config.failure_policy.apply(self.name(), error);
            self.shared.replace_catalog(AssetSlice::empty());
            self.shared.finish(progress, LoadState::Empty, result);
        } else {
            log::trace!(
                "Layer '{}' queued on worker '{}'.",
                self.name(),
                self.shared.worker.name()
            );
        }
        ticket
    }

    fn join(&self, progress: &mut Progress) -> LoadTicket {
        let (sender, ticket) = LoadTicket::pending(self.file_name());
        progress.waiters.push(sender);
        ticket
    }

    fn finished(&self, progress: &Progress) -> LoadTicket {
        let result = progress.last.clone().unwrap_or(Ok(0));
        LoadTicket::resolved(self.file_name(), result)
    }
}

impl LayerShared {
    fn lock_progress(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> AssetSlice<AstronomicalSource> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_catalog(&self, catalog: AssetSlice<AstronomicalSource>) -> usize {
        let mut current = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        let previous = current.len();
        *current = catalog;
        previous
    }

    /// Runs on the load worker: open, read, decode, convert.
    fn read_catalog(&self) -> Result<Vec<AstronomicalSource>, LoadError> {
        let file = self.config.file_name.as_str();
        log::debug!("Loading catalog file: {}...", file);

        let bytes = {
            let stream =
                self.store
                    .open(file, self.config.access)
                    .map_err(|source| LoadError::Open {
                        file: file.to_string(),
                        source,
                    })?;
            let limit = self.decoder.max_input_len();
            let mut bytes = Vec::new();
            // One byte past the limit is enough to tell an oversized file apart.
            stream
                .take(limit.map_or(u64::MAX, |limit| limit.saturating_add(1)))
                .read_to_end(&mut bytes)
                .map_err(|source| LoadError::Read {
                    file: file.to_string(),
                    source,
                })?;
            if let Some(limit) = limit.filter(|&limit| bytes.len() as u64 > limit) {
                return Err(LoadError::TooLarge {
                    file: file.to_string(),
                    limit,
                });
            }
            bytes
        };

        let records = self
            .decoder
            .decode(&bytes)
            .map_err(|source| LoadError::Decode {
                file: file.to_string(),
                source,
            })?;

        Ok(records.into_iter().map(AstronomicalSource::from).collect())
    }

    /// Runs on the load worker: store the outcome, notify, resolve tickets.
    fn publish(&self, outcome: Result<Vec<AstronomicalSource>, LoadError>) {
        let layer = self.config.name.as_str();
        match outcome {
            Ok(sources) => {
                let count = sources.len();
                let catalog = AssetSlice::new(sources);
                self.replace_catalog(catalog.clone());

                log::debug!(
                    "Finished loading: {} | Found {} sources.",
                    self.config.file_name,
                    count
                );
                self.sink.refresh(layer, UpdateTypes::RESET, catalog.shared());

                let mut progress = self.lock_progress();
                self.finish(&mut progress, LoadState::Ready, Ok(count));
            }
            Err(error) => {
                let previous = self.replace_catalog(AssetSlice::empty());
                if previous > 0 {
                    // The renderer still holds the objects of an earlier load.
                    self.sink
                        .refresh(layer, UpdateTypes::RESET, AssetSlice::empty().shared());
                }

                let result = self.config.failure_policy.apply(layer, error);
                let mut progress = self.lock_progress();
                self.finish(&mut progress, LoadState::Empty, result);
            }
        }
    }

    fn finish(&self, progress: &mut Progress, state: LoadState, result: LoadResult) {
        progress.state = state;
        for waiter in progress.waiters.drain(..) {
            // A dropped ticket is not an error.
            let _ = waiter.send(result.clone());
        }
        progress.last = Some(result);
    }

    fn abandon(&self) {
        let mut progress = self.lock_progress();
        if progress.state != LoadState::Loading {
            return;
        }
        drop(progress);

        self.replace_catalog(AssetSlice::empty());
        let error = LoadError::Abandoned {
            file: self.config.file_name.clone(),
        };
        let result = self.config.failure_policy.apply(&self.config.name, error);

        progress = self.lock_progress();
        self.finish(&mut progress, LoadState::Empty, result);
    }
}

/// Resolves a layer's tickets even when its load job unwinds.
struct PendingLoad {
    shared: Arc<LayerShared>,
    done: bool,
}

impl Drop for PendingLoad {
    fn drop(&mut self) {
        if !self.done {
            self.shared.abandon();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardome_core::catalog::{CelestialCoords, PointRecord, PointShape};
    use stardome_core::renderer::NullRenderSink;
    use stardome_core::SourceRecord;
    use stardome_lanes::asset_lane::{encode_catalog, FramedCatalogDecoder};
    use stardome_lanes::store_lane::MemoryAssetStore;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

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

    fn layer_with(store: MemoryAssetStore) -> CatalogLayer {
        CatalogLayer::new(
            LayerConfig::new("stars", "stars.bin"),
            Arc::new(store),
            Arc::new(FramedCatalogDecoder::new()),
            Arc::new(NullRenderSink),
            LoadWorker::shared("layer-unit-test").unwrap(),
        )
    }

    fn catalog_store() -> MemoryAssetStore {
        let bytes = encode_catalog(&[
            star("Sirius", 101.287, -16.716),
            star("Canopus", 95.988, -52.696),
            star("Arcturus", 213.915, 19.182),
        ])
        .unwrap();
        MemoryAssetStore::new().with_asset("stars.bin", bytes)
    }

    #[test]
    fn starts_uninitialized_and_empty() {
        let layer = layer_with(catalog_store());
        assert_eq!(layer.state(), LoadState::Uninitialized);
        assert!(layer.is_empty());
    }

    #[test]
    fn search_uses_loaded_names() {
        let layer = layer_with(catalog_store());
        assert_eq!(layer.initialize().wait_timeout(TIMEOUT).unwrap().ok(), Some(3));

        let hits = layer.search_by_name("sirius");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sirius");
        assert!(layer.search_by_name("Vega").is_empty());

        let names: Vec<_> = layer.names_matching_prefix("ca").into_iter().collect();
        assert_eq!(names, vec!["Canopus".to_string()]);
    }

    #[test]
    fn completion_and_search_agree_on_non_ascii_names() {
        let bytes = encode_catalog(&[star("Ésprit", 10.0, 20.0), star("Étoile", 30.0, 5.0)]).unwrap();
        let layer = layer_with(MemoryAssetStore::new().with_asset("stars.bin", bytes));
        assert_eq!(layer.initialize().wait_timeout(TIMEOUT).unwrap().ok(), Some(2));

        let completions = layer.names_matching_prefix("és");
        assert_eq!(completions.len(), 1);
        for name in &completions {
            let hits = layer.search_by_name(&name.to_lowercase());
            assert_eq!(hits.len(), 1);
            assert_eq!(&hits[0].name, name);
        }
        assert_eq!(layer.search_by_name("ÉTOILE")[0].name, "Étoile");
    }

    #[test]
    fn joined_ticket_sees_the_same_outcome() {
        let layer = layer_with(catalog_store());
        let first = layer.initialize();
        let second = layer.reload();

        assert_eq!(first.wait_timeout(TIMEOUT).unwrap().ok(), Some(3));
        assert_eq!(second.wait_timeout(TIMEOUT).unwrap().ok(), Some(3));
        assert_eq!(layer.len(), 3);
    }
}
