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

use super::error::LoadError;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// The outcome of a load: the number of objects now in the catalog, or the
/// error when the layer's policy is [`FailurePolicy::Propagate`](super::FailurePolicy::Propagate).
pub type LoadResult = Result<usize, Arc<LoadError>>;

/// A completion handle for a scheduled load.
///
/// Returned by [`CatalogLayer::initialize`](super::CatalogLayer::initialize)
/// and [`CatalogLayer::reload`](super::CatalogLayer::reload). Dropping it does
/// not cancel anything; the load runs to completion regardless.
#[derive(Debug)]
pub struct LoadTicket {
    file: String,
    receiver: flume::Receiver<LoadResult>,
    result: OnceLock<LoadResult>,
}

impl LoadTicket {
    /// A ticket still waiting for its load, and the sender that resolves it.
    pub(crate) fn pending(file: &str) -> (flume::Sender<LoadResult>, Self) {
        let (sender, receiver) = flume::bounded(1);
        let ticket = Self {
            file: file.to_string(),
            receiver,
            result: OnceLock::new(),
        };
        (sender, ticket)
    }

    /// A ticket for a load that has already finished.
    pub(crate) fn resolved(file: &str, result: LoadResult) -> Self {
        let (_, receiver) = flume::bounded(1);
        let ticket = Self {
            file: file.to_string(),
            receiver,
            result: OnceLock::new(),
        };
        let _ = ticket.result.set(result);
        ticket
    }

    /// Blocks until the load finishes and returns its outcome.
    pub fn wait(&self) -> LoadResult {
        if let Some(result) = self.result.get() {
            return result.clone();
        }
        let received = self.receiver.recv().unwrap_or_else(|_| self.abandoned());
        self.store(received)
    }

    /// Like [`LoadTicket::wait`], giving up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<LoadResult> {
        if let Some(result) = self.result.get() {
            return Some(result.clone());
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(received) => Some(self.store(received)),
            Err(flume::RecvTimeoutError::Timeout) => None,
            Err(flume::RecvTimeoutError::Disconnected) => Some(self.store(self.abandoned())),
        }
    }

    /// Returns the outcome if the load has finished, without blocking.
    pub fn try_result(&self) -> Option<LoadResult> {
        if let Some(result) = self.result.get() {
            return Some(result.clone());
        }
        match self.receiver.try_recv() {
            Ok(received) => Some(self.store(received)),
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => Some(self.store(self.abandoned())),
        }
    }

    /// Returns `true` once the outcome is available.
    pub fn is_finished(&self) -> bool {
        self.try_result().is_some()
    }

    fn store(&self, result: LoadResult) -> LoadResult {
        self.result.get_or_init(|| result).clone()
    }

    fn abandoned(&self) -> LoadResult {
        Err(Arc::new(LoadError::Abandoned {
            file: self.file.clone(),
        }))
    }
}
