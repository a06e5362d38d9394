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

//! Operator session
//!
//! The two screens of the timer:
//!
//! - **Menu**: pick a frame length from the configured presets
//! - **Frame**: one live [`ShotClockController`], toggled by the operator
//!
//! Leaving a frame drops its controller; nothing carries over to the next one.

use crate::core::clock::{ShotClockController, ShotClockRules, ToggleOutcome};
use crate::core::cue::{Cue, CuePolicy};
use crate::core::display::ClockSnapshot;
use crate::core::error::{Result, SnookerError};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A selectable frame length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOption {
    /// Menu label
    pub label: String,
    /// Frame length in seconds
    pub seconds: u64,
}

impl FrameOption {
    pub fn new(label: &str, seconds: u64) -> Self {
        Self {
            label: label.to_string(),
            seconds,
        }
    }
}

/// Standard speed snooker frame lengths
pub fn default_frame_options() -> Vec<FrameOption> {
    vec![
        FrameOption::new("30 MINUTES", 30 * 60),
        FrameOption::new("20 MINUTES", 20 * 60),
        FrameOption::new("15 MINUTES", 15 * 60),
        FrameOption::new("5:30", 5 * 60 + 30),
    ]
}

/// Operator input, independent of where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Previous menu entry
    Up,
    /// Next menu entry
    Down,
    /// Menu: load the selected frame. Frame: start/stop.
    Confirm,
    /// Start/stop from a remote trigger; ignored outside a frame
    Trigger,
    /// Drop the frame and return to the menu
    Back,
    /// Leave the program
    Quit,
}

/// Current screen
#[derive(Debug, Clone)]
pub enum Screen {
    Menu { selected: usize },
    Frame(ShotClockController),
}

/// Menu/frame state machine wrapping the clock
pub struct Session {
    /// Frame presets shown on the menu
    options: Vec<FrameOption>,
    /// Shot length rules for new frames
    rules: ShotClockRules,
    /// Cue policy
    cues: CuePolicy,
    /// Current screen
    screen: Screen,
    /// Quit requested
    quit_requested: bool,
}

impl Session {
    /// Create a session on the menu screen
    ///
    /// # Errors
    ///
    /// `NoFrameOptions` if `options` is empty.
    pub fn new(options: Vec<FrameOption>, rules: ShotClockRules, cues: CuePolicy) -> Result<Self> {
        if options.is_empty() {
            return Err(SnookerError::NoFrameOptions);
        }
        Ok(Self {
            options,
            rules,
            cues,
            screen: Screen::Menu { selected: 0 },
            quit_requested: false,
        })
    }

    pub fn options(&self) -> &[FrameOption] {
        &self.options
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn cue_policy(&self) -> &CuePolicy {
        &self.cues
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Index of the selected menu entry, if on the menu
    pub fn selected_index(&self) -> Option<usize> {
        match self.screen {
            Screen::Menu { selected } => Some(selected),
            Screen::Frame(_) => None,
        }
    }

    /// Selected menu entry, if on the menu
    pub fn selected(&self) -> Option<&FrameOption> {
        self.selected_index().and_then(|i| self.options.get(i))
    }

    /// Live clock, if a frame is loaded
    pub fn clock(&self) -> Option<&ShotClockController> {
        match &self.screen {
            Screen::Frame(clock) => Some(clock),
            Screen::Menu { .. } => None,
        }
    }

    /// Clock view for the presenter, if a frame is loaded
    pub fn snapshot(&self) -> Option<ClockSnapshot> {
        self.clock().map(ClockSnapshot::capture)
    }

    /// Load a paused frame of `seconds`, skipping the menu
    pub fn start_frame(&mut self, seconds: u64, now: Instant) {
        log::info!("Frame loaded: {}s, paused", seconds);
        self.screen = Screen::Frame(ShotClockController::with_rules(seconds, self.rules, now));
    }

    /// Apply one operator command
    pub fn handle(&mut self, command: Command, now: Instant) {
        if command == Command::Quit {
            log::info!("Quit requested");
            self.quit_requested = true;
            return;
        }

        let len = self.options.len();
        match &mut self.screen {
            Screen::Menu { selected } => match command {
                Command::Up => {
                    *selected = (*selected + len - 1) % len;
                    log::debug!("Menu: {}", self.options[*selected].label);
                }
                Command::Down => {
                    *selected = (*selected + 1) % len;
                    log::debug!("Menu: {}", self.options[*selected].label);
                }
                Command::Confirm => {
                    let seconds = self.options[*selected].seconds;
                    self.start_frame(seconds, now);
                }
                Command::Trigger | Command::Back | Command::Quit => {}
            },
            Screen::Frame(clock) => match command {
                Command::Confirm | Command::Trigger => match clock.toggle_at(now) {
                    ToggleOutcome::Started { shot_length } => {
                        log::info!("Shot started: {}s", shot_length)
                    }
                    ToggleOutcome::Stopped => log::info!("Shot stopped"),
                    ToggleOutcome::Refused => log::info!("Frame over, shot not started"),
                },
                Command::Back => {
                    log::info!("Back to menu");
                    self.screen = Screen::Menu { selected: 0 };
                }
                Command::Up | Command::Down | Command::Quit => {}
            },
        }
    }

    /// Advance the live clock to `now` and return the cue it produced, if any
    pub fn tick(&mut self, now: Instant) -> Option<Cue> {
        let Screen::Frame(clock) = &mut self.screen else {
            return None;
        };

        let was_running = clock.is_running();
        clock.update(now);
        if was_running && !clock.is_running() {
            log::info!(
                "Run halted: frame {}s, shot {}s",
                clock.frame_remaining(),
                clock.shot_remaining()
            );
        }

        let cue = clock.poll_shot_change().and_then(|change| {
            log::debug!("Shot clock {} -> {}", change.previous, change.current);
            self.cues.select(change)
        });
        if let Some(cue) = cue {
            log::debug!("Cue: {:?}", cue);
        }
        cue
    }
}
