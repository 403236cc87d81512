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

//! Provides RAII-based timers that log how long a scope took.

use log::Level;
use std::time::{Duration, Instant};

/// Measures the duration of a scope and logs it when dropped.
///
/// The measurement is logged even on early returns.
pub struct ScopedTimer {
    label: String,
    level: Level,
    start: Instant,
}

impl ScopedTimer {
    /// Starts a timer that logs `"<label> took <ms>ms"` at `info` level.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_level(label, Level::Info)
    }

    /// Starts a timer that logs at the given level.
    pub fn with_level(label: impl Into<String>, level: Level) -> Self {
        Self {
            label: label.into(),
            level,
            start: Instant::now(),
        }
    }

    /// Time elapsed since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed().as_secs_f64() * 1000.0;
        log::log!(self.level, "{} took {:.2}ms", self.label, elapsed_ms);
    }
}
