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

//! speed-snooker: frame clock and shot clock for timed snooker
//!
//! A frame is played against two countdowns. The frame clock only runs while
//! a shot is being played; the shot clock gives each shot 15 seconds, or 10 in
//! the last 5 minutes of the frame. Both stop when either reaches zero.
//!
//! # Architecture
//!
//! - [`core`]: the clock controller and the session state machine around it
//! - [`frontend`]: configuration, key bindings, input hand-off and the tick loop
//!
//! # Example
//!
//! ```
//! use speed_snooker::core::clock::ShotClockController;
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut clock = ShotClockController::new_at(310, t0);
//! clock.toggle_at(t0);
//! clock.update(t0 + Duration::from_secs(11));
//!
//! assert_eq!(clock.frame_remaining(), 299);
//! assert_eq!(clock.shot_remaining(), 4);
//! ```
//!
//! # Error Handling
//!
//! The clock never fails. Configuration and I/O return [`Result<T>`], an alias
//! for `Result<T, SnookerError>`.

pub mod core;
pub mod frontend;

// Re-export commonly used types
pub use crate::core::error::{Result, SnookerError};
