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

use super::{RenderSink, UpdateTypes};
use crate::catalog::AstronomicalSource;
use std::sync::Arc;

/// A refresh notification, as queued by [`ChannelRenderSink`].
#[derive(Debug, Clone)]
pub struct RenderEvent {
    /// The layer that changed.
    pub layer: String,
    /// What changed.
    pub updates: UpdateTypes,
    /// The layer's objects at the time of the notification.
    pub sources: Arc<[AstronomicalSource]>,
}

/// A [`RenderSink`] that forwards every refresh over an unbounded channel.
///
/// The render loop owns the receiving end and drains it once per frame, so the
/// load worker never touches renderer state directly.
#[derive(Debug)]
pub struct ChannelRenderSink {
    sender: flume::Sender<RenderEvent>,
    receiver: flume::Receiver<RenderEvent>,
}

impl ChannelRenderSink {
    /// Creates a new sink with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Returns a clone of the receiving end for the render loop.
    pub fn receiver(&self) -> flume::Receiver<RenderEvent> {
        self.receiver.clone()
    }

    /// Drains every pending notification without blocking.
    pub fn drain(&self) -> Vec<RenderEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Default for ChannelRenderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for ChannelRenderSink {
    fn refresh(&self, layer: &str, updates: UpdateTypes, sources: Arc<[AstronomicalSource]>) {
        log::trace!("Queueing {:?} for layer '{}'.", updates, layer);

        let event = RenderEvent {
            layer: layer.to_string(),
            updates,
            sources,
        };
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to queue render event: {e}. Receiver likely disconnected.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::UpdateType;
    use std::{thread, time::Duration};

    fn no_sources() -> Arc<[AstronomicalSource]> {
        Arc::from(Vec::new())
    }

    #[test]
    fn refresh_is_received_in_order() {
        let sink = ChannelRenderSink::new();
        sink.refresh("stars", UpdateTypes::RESET, no_sources());
        sink.refresh(
            "planets",
            UpdateTypes::of(UpdateType::UpdatePositions),
            no_sources(),
        );

        let events = sink.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].layer, "stars");
        assert!(events[0].updates.contains(UpdateType::Reset));
        assert_eq!(events[1].layer, "planets");
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn refresh_from_thread() {
        let sink = Arc::new(ChannelRenderSink::new());
        let receiver = sink.receiver();

        let worker_sink = sink.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            worker_sink.refresh("messier", UpdateTypes::RESET, no_sources());
        });

        match receiver.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => assert_eq!(event.layer, "messier"),
            Err(e) => panic!("Failed to receive render event from thread: {e:?}"),
        }

        handle.join().expect("Thread join failed");
    }
}
