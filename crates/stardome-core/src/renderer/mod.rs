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

//! The narrow interface layers use to talk to the renderer.
//!
//! Layers never draw anything themselves. When their object set changes they
//! call [`RenderSink::refresh`] with the kind of change and the new objects;
//! what the renderer does with them is outside this crate.

mod channel;
mod update;

pub use channel::{ChannelRenderSink, RenderEvent};
pub use update::{UpdateType, UpdateTypes};

use crate::catalog::AstronomicalSource;
use std::sync::Arc;

/// A consumer that redraws a layer when told its objects changed.
///
/// `refresh` is invoked on the load worker thread. Implementations that own
/// GPU or UI state must hand the notification over to their own thread.
pub trait RenderSink: Send + Sync {
    /// Tells the renderer that `layer` changed in the ways described by
    /// `updates`, and supplies the layer's current objects.
    fn refresh(&self, layer: &str, updates: UpdateTypes, sources: Arc<[AstronomicalSource]>);
}

/// A sink that drops every notification. Handy for headless loading.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn refresh(&self, layer: &str, updates: UpdateTypes, sources: Arc<[AstronomicalSource]>) {
        log::trace!(
            "Discarding {:?} for layer '{}' ({} sources).",
            updates,
            layer,
            sources.len()
        );
    }
}
