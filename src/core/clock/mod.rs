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

//! Frame clock and shot clock controller
//!
//! A frame is played against two countdowns that only move while a shot run is
//! active:
//!
//! - the **frame clock**, counting down the whole frame
//! - the **shot clock**, counting down the current shot (15s, or 10s once the
//!   frame is in its final 5 minutes)
//!
//! Both clocks are advanced together by [`ShotClockController::update`] from a
//! monotonic timestamp, in whole seconds only. Sub-second time is carried in an
//! accumulator so the display never jitters with the caller's tick rate.
//!
//! ## Run state
//!
//! ```text
//!            toggle (frame > 0)
//!   PAUSED ---------------------> RUNNING
//!     ^  <---------------------     |
//!     |     toggle (shot dropped)   |
//!     +-----------------------------+
//!        shot == 0 or frame == 0
//! ```
//!
//! Stopping a run abandons the shot: the shot clock drops to 0 and the next
//! start begins a fresh shot.

use crate::core::error::{Result, SnookerError};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Frame time at or below which the frame is in its final phase (seconds)
pub const FINAL_PHASE_THRESHOLD: u64 = 5 * 60;

/// Shot length outside the final phase (seconds)
pub const NORMAL_SHOT_LENGTH: u64 = 15;

/// Shot length inside the final phase (seconds)
pub const FINAL_SHOT_LENGTH: u64 = 10;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Shot length policy
///
/// Defaults to the standard speed snooker rules: 15 second shots, dropping to
/// 10 seconds once 5 minutes or less remain in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotClockRules {
    /// Frame-remaining value (seconds) at or below which the final phase starts
    pub final_phase_threshold: u64,
    /// Shot length before the final phase (seconds)
    pub normal_shot_length: u64,
    /// Shot length during the final phase (seconds)
    pub final_shot_length: u64,
}

impl ShotClockRules {
    /// Reject rule sets that would start a shot with no time on it
    pub fn validate(&self) -> Result<()> {
        if self.normal_shot_length == 0 {
            return Err(SnookerError::InvalidRules(
                "normal_shot_length must be greater than 0".to_string(),
            ));
        }
        if self.final_shot_length == 0 {
            return Err(SnookerError::InvalidRules(
                "final_shot_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the given frame time falls in the final phase
    #[inline(always)]
    pub fn is_final_phase(&self, frame_remaining: u64) -> bool {
        frame_remaining <= self.final_phase_threshold
    }

    /// Shot length that applies with `frame_remaining` seconds left
    #[inline(always)]
    pub fn shot_length_for(&self, frame_remaining: u64) -> u64 {
        if self.is_final_phase(frame_remaining) {
            self.final_shot_length
        } else {
            self.normal_shot_length
        }
    }
}

impl Default for ShotClockRules {
    fn default() -> Self {
        Self {
            final_phase_threshold: FINAL_PHASE_THRESHOLD,
            normal_shot_length: NORMAL_SHOT_LENGTH,
            final_shot_length: FINAL_SHOT_LENGTH,
        }
    }
}

/// Shot clock value transition reported by [`ShotClockController::poll_shot_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotChange {
    /// Last value reported (or set by a start/stop transition)
    pub previous: u64,
    /// Current shot clock value
    pub current: u64,
}

/// Effect of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new shot run started with the given shot length
    Started { shot_length: u64 },
    /// The running shot was abandoned
    Stopped,
    /// The frame has no time left; the clocks were reset to paused
    Refused,
}

/// Frame clock + shot clock state machine
///
/// One controller lives for exactly one frame. It is owned by the caller's loop
/// and driven with [`toggle_at`](Self::toggle_at) and
/// [`update`](Self::update); returning to frame selection simply drops it.
///
/// # Example
///
/// ```
/// use speed_snooker::core::clock::ShotClockController;
/// use std::time::{Duration, Instant};
///
/// let t0 = Instant::now();
/// let mut clock = ShotClockController::new_at(330, t0);
/// clock.toggle_at(t0);
/// assert_eq!(clock.shot_remaining(), 15);
///
/// clock.update(t0 + Duration::from_secs(16));
/// assert_eq!(clock.frame_remaining(), 314);
/// assert_eq!(clock.shot_remaining(), 0);
/// assert!(!clock.is_running());
/// ```
#[derive(Debug, Clone)]
pub struct ShotClockController {
    /// Shot length policy
    rules: ShotClockRules,

    /// Seconds left in the frame
    frame_remaining: u64,

    /// Seconds left in the current shot (0 while paused)
    shot_remaining: u64,

    /// Whether both clocks are counting down
    running: bool,

    /// Last instant at which elapsed time was consumed
    last_tick: Instant,

    /// Elapsed time not yet applied as whole seconds
    accumulator: Duration,

    /// Last shot clock value handed out by `poll_shot_change`
    previous_shot_remaining: u64,
}

impl ShotClockController {
    /// Create a paused controller for a frame of `frame_total_seconds`
    ///
    /// Uses the default rules and the current instant as the tick baseline.
    pub fn new(frame_total_seconds: u64) -> Self {
        Self::new_at(frame_total_seconds, Instant::now())
    }

    /// Create a paused controller with an explicit tick baseline
    pub fn new_at(frame_total_seconds: u64, now: Instant) -> Self {
        Self::with_rules(frame_total_seconds, ShotClockRules::default(), now)
    }

    /// Create a paused controller with custom shot length rules
    pub fn with_rules(frame_total_seconds: u64, rules: ShotClockRules, now: Instant) -> Self {
        Self {
            rules,
            frame_remaining: frame_total_seconds,
            shot_remaining: 0,
            running: false,
            last_tick: now,
            accumulator: Duration::ZERO,
            previous_shot_remaining: 0,
        }
    }

    /// Seconds left in the frame
    #[inline(always)]
    pub fn frame_remaining(&self) -> u64 {
        self.frame_remaining
    }

    /// Seconds left in the current shot
    #[inline(always)]
    pub fn shot_remaining(&self) -> u64 {
        self.shot_remaining
    }

    /// Whether a shot run is in progress
    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Instant of the last `update` (or start transition)
    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Shot length policy in effect
    pub fn rules(&self) -> &ShotClockRules {
        &self.rules
    }

    /// Shot length a shot started right now would get
    pub fn current_shot_length(&self) -> u64 {
        self.rules.shot_length_for(self.frame_remaining)
    }

    /// Start or stop a shot run, measured from `Instant::now()`
    pub fn toggle(&mut self) -> ToggleOutcome {
        self.toggle_at(Instant::now())
    }

    /// Start or stop a shot run
    ///
    /// - frame expired: forced back to paused with an empty shot clock
    /// - running: the shot is abandoned (shot clock drops to 0)
    /// - paused: a new shot starts and `now` becomes the tick baseline, so time
    ///   spent paused is never charged to either clock
    pub fn toggle_at(&mut self, now: Instant) -> ToggleOutcome {
        if self.frame_remaining == 0 {
            self.halt();
            log::debug!("Shot clock: toggle refused, frame expired");
            return ToggleOutcome::Refused;
        }

        if self.running {
            self.halt();
            log::debug!(
                "Shot clock: run stopped with {}s of frame left",
                self.frame_remaining
            );
            return ToggleOutcome::Stopped;
        }

        let shot_length = self.current_shot_length();
        self.running = true;
        self.shot_remaining = shot_length;
        self.previous_shot_remaining = shot_length;
        self.last_tick = now;
        self.accumulator = Duration::ZERO;

        log::debug!(
            "Shot clock: run started, shot {}s, frame {}s",
            shot_length,
            self.frame_remaining
        );
        ToggleOutcome::Started { shot_length }
    }

    /// Paused with an empty shot clock
    ///
    /// Clearing `previous_shot_remaining` here means a manual stop never
    /// reports a transition to 0.
    fn halt(&mut self) {
        self.running = false;
        self.shot_remaining = 0;
        self.accumulator = Duration::ZERO;
        self.previous_shot_remaining = 0;
    }

    /// Consume the time elapsed since the last call
    ///
    /// The baseline always moves to `now`, running or not. While running,
    /// every whole second taken off the accumulator is taken off both clocks.
    /// A timestamp earlier than the baseline counts as zero elapsed.
    pub fn update(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        if !self.running {
            return;
        }

        self.accumulator += elapsed;
        let dec = self.accumulator.as_secs();
        if dec == 0 {
            return;
        }
        self.accumulator -= Duration::from_secs(dec);

        self.frame_remaining = self.frame_remaining.saturating_sub(dec);
        self.shot_remaining = self.shot_remaining.saturating_sub(dec);

        // Crossing into the final phase truncates a shot started under the
        // normal rule.
        if self.rules.is_final_phase(self.frame_remaining)
            && self.shot_remaining > self.rules.final_shot_length
        {
            self.shot_remaining = self.rules.final_shot_length;
        }

        if self.frame_remaining == 0 || self.shot_remaining == 0 {
            self.running = false;
            self.accumulator = Duration::ZERO;
            log::debug!(
                "Shot clock: run halted (frame {}s, shot {}s)",
                self.frame_remaining,
                self.shot_remaining
            );
        }

        debug_assert!(self.accumulator < ONE_SECOND);
    }

    /// Report the shot clock transition since the last poll, once
    ///
    /// Returns `None` when the value has not moved. Start and stop transitions
    /// reset the comparison baseline themselves, so they are not reported.
    pub fn poll_shot_change(&mut self) -> Option<ShotChange> {
        let current = self.shot_remaining;
        let previous = self.previous_shot_remaining;
        if current == previous {
            return None;
        }
        self.previous_shot_remaining = current;
        Some(ShotChange { previous, current })
    }
}
