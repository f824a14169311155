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

//! Wall-clock frame timing for the pass constants.

use std::time::Instant;

/// Tracks total elapsed time and the delta between consecutive frames.
///
/// `tick()` is called once per frame before the constant-buffer update so the
/// shader-visible `total_time`/`delta_time` pair stays consistent within the
/// frame.
#[derive(Debug)]
pub struct FrameTimer {
    start: Instant,
    last_tick: Instant,
    total_time: f32,
    delta_time: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            total_time: 0.0,
            delta_time: 0.0,
        }
    }

    /// Advances the clock. Returns the delta since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_tick).as_secs_f32();
        self.total_time = now.duration_since(self.start).as_secs_f32();
        self.last_tick = now;
        self.delta_time
    }

    /// Seconds since the timer was created, as of the last tick.
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Seconds between the two most recent ticks.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tick_advances_monotonically() {
        let mut timer = FrameTimer::new();
        std::thread::sleep(Duration::from_millis(5));
        let dt = timer.tick();
        assert!(dt > 0.0);
        assert!(timer.total_time() >= dt);

        let total_before = timer.total_time();
        std::thread::sleep(Duration::from_millis(5));
        timer.tick();
        assert!(timer.total_time() > total_before);
    }
}
