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

//! Logger setup.

use env_logger::{Builder, Env};
use log::SetLoggerError;

/// Installs the global `env_logger` with `default_level` as the fallback filter.
///
/// `RUST_LOG` takes precedence over `default_level`. Fails if a logger is
/// already installed.
pub fn init_logging(default_level: &str) -> Result<(), SetLoggerError> {
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
}
