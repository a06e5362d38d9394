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

//! Audio/visual cue selection
//!
//! Turns shot clock transitions into the cues the presentation layer plays:
//! a short cue for each of the last few seconds of a shot, and a long cue when
//! a shot runs out on its own. Generating the actual tones is left to the
//! [`CueSink`](crate::frontend::app::CueSink) in use.

use crate::core::clock::ShotChange;
use serde::{Deserialize, Serialize};

/// Seconds at the end of a shot that get a countdown cue
pub const DEFAULT_WARNING_SECONDS: u64 = 5;

/// A cue to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Short cue: the shot clock just reached this value (within the warning window)
    Countdown(u64),
    /// Long cue: the shot expired naturally
    Expired,
}

/// Which shot clock values deserve a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuePolicy {
    /// Values `1..=warning_seconds` get a countdown cue
    pub warning_seconds: u64,
}

impl CuePolicy {
    /// Whether `value` falls in the warning window
    #[inline(always)]
    pub fn is_warning(&self, value: u64) -> bool {
        (1..=self.warning_seconds).contains(&value)
    }

    /// Pick the cue for a reported transition, if any
    ///
    /// A transition to 0 only cues when it came from a non-zero value; a run
    /// stopped by hand never reports one.
    pub fn select(&self, change: ShotChange) -> Option<Cue> {
        if self.is_warning(change.current) {
            Some(Cue::Countdown(change.current))
        } else if change.current == 0 && change.previous > 0 {
            Some(Cue::Expired)
        } else {
            None
        }
    }
}

impl Default for CuePolicy {
    fn default() -> Self {
        Self {
            warning_seconds: DEFAULT_WARNING_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ShotClockController;
    use std::time::{Duration, Instant};

    fn change(previous: u64, current: u64) -> ShotChange {
        ShotChange { previous, current }
    }

    #[test]
    fn test_countdown_window() {
        let policy = CuePolicy::default();
        assert_eq!(policy.select(change(7, 6)), None);
        assert_eq!(policy.select(change(6, 5)), Some(Cue::Countdown(5)));
        assert_eq!(policy.select(change(2, 1)), Some(Cue::Countdown(1)));
    }

    #[test]
    fn test_expiry() {
        let policy = CuePolicy::default();
        assert_eq!(policy.select(change(1, 0)), Some(Cue::Expired));
        // Several seconds swallowed by one long tick still expire the shot
        assert_eq!(policy.select(change(9, 0)), Some(Cue::Expired));
        assert_eq!(policy.select(change(0, 0)), None);
    }

    #[test]
    fn test_final_phase_clamp_is_silent() {
        let policy = CuePolicy::default();
        assert_eq!(policy.select(change(13, 10)), None);
    }

    #[test]
    fn test_custom_window() {
        let policy = CuePolicy { warning_seconds: 3 };
        assert_eq!(policy.select(change(5, 4)), None);
        assert_eq!(policy.select(change(4, 3)), Some(Cue::Countdown(3)));

        let silent = CuePolicy { warning_seconds: 0 };
        assert_eq!(silent.select(change(2, 1)), None);
        assert_eq!(silent.select(change(1, 0)), Some(Cue::Expired));
    }

    #[test]
    fn test_full_shot_cue_sequence() {
        let policy = CuePolicy::default();
        let t0 = Instant::now();
        let mut clock = ShotClockController::new_at(900, t0);
        clock.toggle_at(t0);

        let mut cues = Vec::new();
        for s in 1..=20 {
            clock.update(t0 + Duration::from_secs(s));
            if let Some(cue) = clock.poll_shot_change().and_then(|c| policy.select(c)) {
                cues.push(cue);
            }
        }

        assert_eq!(
            cues,
            vec![
                Cue::Countdown(5),
                Cue::Countdown(4),
                Cue::Countdown(3),
                Cue::Countdown(2),
                Cue::Countdown(1),
                Cue::Expired,
            ]
        );
    }

    #[test]
    fn test_manual_stop_has_no_cue() {
        let policy = CuePolicy::default();
        let t0 = Instant::now();
        let mut clock = ShotClockController::new_at(900, t0);
        clock.toggle_at(t0);
        clock.update(t0 + Duration::from_secs(12));
        assert_eq!(
            clock.poll_shot_change().and_then(|c| policy.select(c)),
            Some(Cue::Countdown(3))
        );

        clock.toggle_at(t0 + Duration::from_secs(12));
        assert_eq!(clock.poll_shot_change().and_then(|c| policy.select(c)), None);
    }
}
