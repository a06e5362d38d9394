// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Loop pacing
//!
//! The clock core does not care how often it is updated; this keeps the
//! caller's loop at a steady rate without busy-waiting and reports the rate it
//! actually achieved.

use crate::core::error::{Result, SnookerError};
use std::thread;
use std::time::{Duration, Instant};

/// Default loop rate (ticks per second)
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Fixed-rate tick pacer
///
/// # Example
///
/// ```
/// use speed_snooker::frontend::TickTimer;
///
/// let mut timer = TickTimer::new(60).unwrap();
/// for _ in 0..3 {
///     let _now = timer.tick();
///     timer.sleep_until_next();
/// }
/// assert_eq!(timer.tick_count(), 3);
/// ```
pub struct TickTimer {
    /// Target time between ticks
    interval: Duration,
    /// Instant of the last tick
    last_tick: Instant,
    /// Total number of ticks
    tick_count: u64,
    /// Measured rate, refreshed about once per second
    rate: f32,
    /// Start of the current rate measurement window
    rate_start: Instant,
    /// Ticks in the current rate measurement window
    rate_ticks: u64,
}

impl TickTimer {
    /// Create a pacer for `tick_rate` ticks per second
    ///
    /// # Errors
    ///
    /// `InvalidTickRate` if `tick_rate` is 0.
    pub fn new(tick_rate: u32) -> Result<Self> {
        if tick_rate == 0 {
            return Err(SnookerError::InvalidTickRate(tick_rate));
        }
        let now = Instant::now();
        Ok(Self {
            interval: Duration::from_nanos(1_000_000_000 / tick_rate as u64),
            last_tick: now,
            tick_count: 0,
            rate: 0.0,
            rate_start: now,
            rate_ticks: 0,
        })
    }

    /// Record a tick and return its timestamp
    pub fn tick(&mut self) -> Instant {
        let now = Instant::now();

        self.tick_count += 1;
        self.rate_ticks += 1;

        let window = now.duration_since(self.rate_start);
        if window >= Duration::from_secs(1) {
            self.rate = self.rate_ticks as f32 / window.as_secs_f32();
            self.rate_ticks = 0;
            self.rate_start = now;
        }

        self.last_tick = now;
        now
    }

    /// Instant the next tick is due
    #[inline(always)]
    pub fn next_tick_instant(&self) -> Instant {
        self.last_tick + self.interval
    }

    /// Block until the next tick is due (returns at once if it already is)
    pub fn sleep_until_next(&self) {
        let wait = self
            .next_tick_instant()
            .saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }

    /// Target time between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Measured ticks per second (0 until the first full second)
    #[inline(always)]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    #[inline(always)]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            TickTimer::new(0),
            Err(SnookerError::InvalidTickRate(0))
        ));
    }

    #[test]
    fn test_interval() {
        let timer = TickTimer::new(50).unwrap();
        assert_eq!(timer.interval(), Duration::from_millis(20));
        assert_eq!(timer.rate(), 0.0);
        assert_eq!(timer.tick_count(), 0);
    }

    #[test]
    fn test_tick_advances_schedule() {
        let mut timer = TickTimer::new(100).unwrap();
        let now = timer.tick();
        assert_eq!(timer.tick_count(), 1);
        assert_eq!(timer.next_tick_instant(), now + Duration::from_millis(10));
    }

    #[test]
    fn test_sleep_until_next_waits() {
        let mut timer = TickTimer::new(50).unwrap();
        let now = timer.tick();
        timer.sleep_until_next();
        assert!(Instant::now() >= now + Duration::from_millis(20));
    }

    #[test]
    fn test_rate_measured() {
        let mut timer = TickTimer::new(100).unwrap();
        for _ in 0..60 {
            timer.tick();
            thread::sleep(Duration::from_millis(20));
        }
        timer.tick();
        assert!(timer.rate() > 0.0);
    }
}
