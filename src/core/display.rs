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

//! Display helpers
//!
//! Text formatting for the two countdowns plus the emphasis rules a presenter
//! needs. Layout and drawing are up to the presenter.

use crate::core::clock::ShotClockController;
use crate::core::cue::CuePolicy;
use std::fmt;

/// Frame clock as `MM:SS`
///
/// Minutes are not wrapped, so a 100 minute frame reads `100:00`.
pub fn format_frame_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Shot clock as two-digit seconds
pub fn format_shot_time(seconds: u64) -> String {
    format!("{:02}", seconds)
}

/// Run state label
pub fn status_label(running: bool) -> &'static str {
    if running {
        "RUNNING"
    } else {
        "PAUSED"
    }
}

/// Visual treatment for the shot clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotEmphasis {
    /// Inside the warning window (drawn red)
    Critical,
    /// Counting, outside the warning window
    Active,
    /// No shot on the clock
    Idle,
}

impl ShotEmphasis {
    pub fn for_value(shot_remaining: u64, policy: &CuePolicy) -> Self {
        if policy.is_warning(shot_remaining) {
            ShotEmphasis::Critical
        } else if shot_remaining > 0 {
            ShotEmphasis::Active
        } else {
            ShotEmphasis::Idle
        }
    }
}

/// Presentation view of a controller at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub frame_remaining: u64,
    pub shot_remaining: u64,
    pub running: bool,
}

impl ClockSnapshot {
    /// Capture the controller's public state
    pub fn capture(clock: &ShotClockController) -> Self {
        Self {
            frame_remaining: clock.frame_remaining(),
            shot_remaining: clock.shot_remaining(),
            running: clock.is_running(),
        }
    }

    pub fn shot_emphasis(&self, policy: &CuePolicy) -> ShotEmphasis {
        ShotEmphasis::for_value(self.shot_remaining, policy)
    }
}

impl fmt::Display for ClockSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            format_frame_time(self.frame_remaining),
            format_shot_time(self.shot_remaining),
            status_label(self.running)
        )
    }
}
