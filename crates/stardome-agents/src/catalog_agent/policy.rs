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
use super::ticket::LoadResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a layer does when its catalog fails to load.
///
/// Whatever the policy, the layer ends up `Empty`, its catalog is cleared,
/// and nothing is raised on the thread that called `initialize`. The policy
/// only decides how loudly the failure is reported and whether completion
/// tickets carry the error.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Report at debug level only; tickets resolve to `Ok(0)`.
    Ignore,
    /// Report at error level; tickets resolve to `Ok(0)`.
    #[default]
    Log,
    /// Report at error level; tickets resolve to the error.
    Propagate,
}

impl FailurePolicy {
    /// Reports `error` for `layer` and turns it into what tickets receive.
    pub(crate) fn apply(self, layer: &str, error: LoadError) -> LoadResult {
        match self {
            FailurePolicy::Ignore => {
                log::debug!("Layer '{}': {} (ignored)", layer, error_chain(&error));
                Ok(0)
            }
            FailurePolicy::Log => {
                log::error!("Layer '{}': {}", layer, error_chain(&error));
                Ok(0)
            }
            FailurePolicy::Propagate => {
                log::error!("Layer '{}': {}", layer, error_chain(&error));
                Err(Arc::new(error))
            }
        }
    }
}

/// Formats an error with all of its sources, `outer: inner: root`.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
