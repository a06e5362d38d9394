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

//! Clock core
//!
//! Pure timing and state-machine logic with no I/O:
//!
//! - [`clock`]: frame clock + shot clock controller
//! - [`cue`]: which shot clock transitions get an audio/visual cue
//! - [`display`]: text formatting and emphasis rules
//! - [`session`]: menu/frame screens and operator commands
//! - [`error`]: error type for the layers around the core

pub mod clock;
pub mod cue;
pub mod display;
pub mod error;
pub mod session;
