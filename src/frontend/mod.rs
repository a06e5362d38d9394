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

//! Frontend module
//!
//! Everything around the clock core that talks to the outside world:
//!
//! - [`Application`]: the tick loop tying input, clock, cues and display together
//! - [`config`]: TOML configuration
//! - [`input`]: key name to command bindings
//! - [`trigger`]: thread-safe command queue for input sources
//! - [`tick_timer`]: loop pacing
//!
//! # Example
//!
//! ```no_run
//! use speed_snooker::frontend::{Application, AppConfig, ConsolePresenter, LogCueSink};
//!
//! let config = AppConfig::default();
//! let mut app = Application::new(
//!     &config,
//!     Box::new(LogCueSink),
//!     Box::new(ConsolePresenter::new(std::io::stdout())),
//! )?;
//! app.run()?;
//! # Ok::<(), speed_snooker::SnookerError>(())
//! ```

pub mod app;
pub mod config;
pub mod input;
pub mod tick_timer;
pub mod trigger;

pub use app::{Application, BellCueSink, ConsolePresenter, CueSink, LogCueSink, Presenter, View};
pub use config::AppConfig;
pub use input::{InputConfig, InputHandler};
pub use tick_timer::TickTimer;
pub use trigger::{spawn_console_reader, TriggerQueue, TriggerSender};
