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

// Stardome Sandbox
// Loads a few catalog layers on one shared worker and prints what arrives.
//
// Usage: sandbox [<catalog-dir> <manifest.ron>]
// Without arguments the catalogs are generated in memory.

use anyhow::{Context, Result};
use stardome_agents::{CatalogLayer, LayerManifest, LoadWorker};
use stardome_core::catalog::{
    CelestialCoords, LabelRecord, LineRecord, PointRecord, PointShape,
};
use stardome_core::renderer::ChannelRenderSink;
use stardome_core::{AssetStore, SourceRecord};
use stardome_lanes::asset_lane::{encode_catalog, FramedCatalogDecoder};
use stardome_lanes::store_lane::{DirectoryAssetStore, MemoryAssetStore};
use std::sync::Arc;
use std::time::Duration;

const DEMO_MANIFEST: &str = r#"(
    layers: [
        (name: "stars", file_name: "stars.bin"),
        (name: "constellations", file_name: "constellations.bin"),
        (name: "messier", file_name: "messier.bin"),
        (name: "planets", file_name: "planets.bin", failure_policy: Ignore),
    ],
)"#;

fn point(ra: f32, dec: f32, size: u32, shape: PointShape) -> PointRecord {
    PointRecord {
        location: CelestialCoords::new(ra, dec),
        color: 0xFFFF_FFFF,
        size,
        shape,
    }
}

fn star(name: &str, ra: f32, dec: f32) -> SourceRecord {
    SourceRecord {
        names: vec![name.to_string()],
        points: vec![point(ra, dec, 3, PointShape::Circle)],
        labels: vec![LabelRecord {
            location: CelestialCoords::new(ra, dec),
            text: name.to_string(),
            color: 0xFFAA_AAFF,
            font_size: 15,
            offset: 0.02,
        }],
        ..Default::default()
    }
}

fn demo_store() -> Result<MemoryAssetStore> {
    let stars = [
        star("Sirius", 101.287, -16.716),
        star("Canopus", 95.988, -52.696),
        star("Arcturus", 213.915, 19.182),
        star("Vega", 279.235, 38.784),
        star("Capella", 79.172, 45.998),
    ];

    let orion = SourceRecord {
        names: vec!["Orion".to_string()],
        search_location: Some(CelestialCoords::new(83.0, 0.0)),
        lines: vec![LineRecord {
            color: 0x8080_FFFF,
            line_width: 1.5,
            vertices: vec![
                CelestialCoords::new(88.793, 7.407),
                CelestialCoords::new(83.002, -0.299),
                CelestialCoords::new(78.634, -8.202),
            ],
        }],
        ..Default::default()
    };

    let messier = [
        SourceRecord {
            names: vec!["M31".to_string(), "Andromeda Galaxy".to_string()],
            points: vec![point(10.685, 41.269, 6, PointShape::SpiralGalaxy)],
            ..Default::default()
        },
        SourceRecord {
            names: vec!["M42".to_string(), "Orion Nebula".to_string()],
            points: vec![point(83.822, -5.391, 5, PointShape::Nebula)],
            ..Default::default()
        },
    ];

    // The planets file is deliberately missing.
    Ok(MemoryAssetStore::new()
        .with_asset("stars.bin", encode_catalog(&stars)?)
        .with_asset("constellations.bin", encode_catalog(&[orion])?)
        .with_asset("messier.bin", encode_catalog(&messier)?))
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (store, manifest): (Arc<dyn AssetStore>, LayerManifest) = match args.as_slice() {
        [dir, manifest_path] => {
            let text = std::fs::read_to_string(manifest_path)
                .with_context(|| format!("reading manifest '{manifest_path}'"))?;
            (
                Arc::new(DirectoryAssetStore::new(dir)),
                LayerManifest::from_ron_str(&text)?,
            )
        }
        [] => (Arc::new(demo_store()?), LayerManifest::from_ron_str(DEMO_MANIFEST)?),
        _ => anyhow::bail!("usage: sandbox [<catalog-dir> <manifest.ron>]"),
    };

    let worker = LoadWorker::shared("catalog-loader")?;
    let sink = Arc::new(ChannelRenderSink::new());
    let decoder = Arc::new(FramedCatalogDecoder::new());

    let layers: Vec<CatalogLayer> = manifest
        .layers
        .into_iter()
        .map(|config| {
            CatalogLayer::new(
                config,
                store.clone(),
                decoder.clone(),
                sink.clone(),
                worker.clone(),
            )
        })
        .collect();

    let tickets: Vec<_> = layers.iter().map(CatalogLayer::initialize).collect();
    log::info!(
        "Scheduled {} layers on worker '{}'.",
        layers.len(),
        worker.name()
    );

    for (layer, ticket) in layers.iter().zip(&tickets) {
        match ticket.wait_timeout(Duration::from_secs(30)) {
            Some(Ok(count)) => log::info!("{}: {:?}, {} objects", layer.name(), layer.state(), count),
            Some(Err(e)) => log::error!("{}: {}", layer.name(), e),
            None => log::warn!("{}: still loading", layer.name()),
        }
    }

    for event in sink.drain() {
        let names: Vec<&str> = event
            .sources
            .iter()
            .filter_map(|source| source.primary_name())
            .collect();
        log::info!("Render {} {:?}: {:?}", event.layer, event.updates, names);
    }

    for layer in &layers {
        for hit in layer.search_by_name("orion") {
            log::info!(
                "Found '{}' in {} at ({:.3}, {:.3}, {:.3})",
                hit.name,
                layer.name(),
                hit.location.x,
                hit.location.y,
                hit.location.z
            );
        }
    }

    Ok(())
}
