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

//! Speed snooker application
//!
//! Owns the session and runs the caller-side loop around the clock:
//!
//! 1. drain queued operator commands and apply them in order
//! 2. advance the live clock to now and pick up at most one cue
//! 3. hand the cue to the [`CueSink`]
//! 4. show the current [`View`] through the [`Presenter`] when it changed
//! 5. sleep until the next tick

use crate::core::cue::Cue;
use crate::core::display::{ClockSnapshot, ShotEmphasis};
use crate::core::error::Result;
use crate::core::session::Session;
use crate::frontend::config::AppConfig;
use crate::frontend::tick_timer::TickTimer;
use crate::frontend::trigger::{TriggerQueue, TriggerSender};
use std::io::{self, Write};
use std::time::Instant;

/// Plays cues
pub trait CueSink {
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

/// Cue sink that only logs
#[derive(Debug, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        match cue {
            Cue::Countdown(n) => log::info!("Shot clock: {}", n),
            Cue::Expired => log::info!("Shot clock expired"),
        }
        Ok(())
    }
}

/// Cue sink ringing the terminal bell: once per countdown second, three
/// times on expiry
pub struct BellCueSink<W: Write> {
    out: W,
}

impl<W: Write> BellCueSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CueSink for BellCueSink<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        let bells: &[u8] = match cue {
            Cue::Countdown(_) => b"\x07",
            Cue::Expired => b"\x07\x07\x07",
        };
        self.out.write_all(bells)?;
        self.out.flush()
    }
}

/// What the operator should currently see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Frame selection
    Menu {
        label: String,
        index: usize,
        count: usize,
    },
    /// A loaded frame
    Frame {
        snapshot: ClockSnapshot,
        emphasis: ShotEmphasis,
    },
}

impl View {
    /// Current view of a session
    pub fn of(session: &Session) -> Self {
        match session.snapshot() {
            Some(snapshot) => View::Frame {
                snapshot,
                emphasis: snapshot.shot_emphasis(session.cue_policy()),
            },
            None => {
                let index = session.selected_index().unwrap_or(0);
                View::Menu {
                    label: session.options()[index].label.clone(),
                    index,
                    count: session.options().len(),
                }
            }
        }
    }
}

/// Shows views to the operator
pub trait Presenter {
    fn present(&mut self, view: &View) -> io::Result<()>;
}

/// Presenter writing one status line per change
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, view: &View) -> io::Result<()> {
        match view {
            View::Menu {
                label,
                index,
                count,
            } => writeln!(self.out, "MENU [{}/{}] {}", index + 1, count, label)?,
            View::Frame { snapshot, emphasis } => {
                let marker = if *emphasis == ShotEmphasis::Critical {
                    " !"
                } else {
                    ""
                };
                writeln!(self.out, "{}{}", snapshot, marker)?
            }
        }
        self.out.flush()
    }
}

/// Speed snooker application
pub struct Application {
    /// Menu/frame state
    session: Session,
    /// Commands from input threads
    queue: TriggerQueue,
    /// Loop pacing
    timer: TickTimer,
    /// Cue output
    cue_sink: Box<dyn CueSink>,
    /// View output
    presenter: Box<dyn Presenter>,
    /// Last view shown
    last_view: Option<View>,
}

impl Application {
    /// Create an application on the menu screen
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(
        config: &AppConfig,
        cue_sink: Box<dyn CueSink>,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            session: Session::new(config.frame_options.clone(), config.rules, config.cues)?,
            queue: TriggerQueue::new(),
            timer: TickTimer::new(config.tick_rate)?,
            cue_sink,
            presenter,
            last_view: None,
        })
    }

    /// Producer handle for an input source
    pub fn sender(&self) -> TriggerSender {
        self.queue.sender()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// One loop iteration at `now`
    pub fn step(&mut self, now: Instant) -> Result<()> {
        for command in self.queue.drain() {
            self.session.handle(command, now);
        }

        if let Some(cue) = self.session.tick(now) {
            self.cue_sink.play(cue)?;
        }

        let view = View::of(&self.session);
        if self.last_view.as_ref() != Some(&view) {
            self.presenter.present(&view)?;
            self.last_view = Some(view);
        }
        Ok(())
    }

    /// Run until a quit command arrives
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "Running at {} ticks/s",
            1.0 / self.timer.interval().as_secs_f64()
        );

        while !self.session.quit_requested() {
            let now = self.timer.tick();
            self.step(now)?;
            self.timer.sleep_until_next();
        }

        log::info!(
            "Stopped after {} ticks ({:.1} ticks/s)",
            self.timer.tick_count(),
            self.timer.rate()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Command;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Recorder {
        cues: Rc<RefCell<Vec<Cue>>>,
        views: Rc<RefCell<Vec<View>>>,
    }

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue) -> io::Result<()> {
            self.cues.borrow_mut().push(cue);
            Ok(())
        }
    }

    impl Presenter for Recorder {
        fn present(&mut self, view: &View) -> io::Result<()> {
            self.views.borrow_mut().push(view.clone());
            Ok(())
        }
    }

    fn new_app(recorder: &Recorder) -> Application {
        Application::new(
            &AppConfig::default(),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        )
        .unwrap()
    }

    #[test]
    fn test_menu_view_shown_once() {
        let recorder = Recorder::default();
        let mut app = new_app(&recorder);
        let t0 = Instant::now();

        app.step(t0).unwrap();
        app.step(t0 + Duration::from_millis(16)).unwrap();

        let views = recorder.views.borrow();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0],
            View::Menu {
                label: "30 MINUTES".to_string(),
                index: 0,
                count: 4,
            }
        );
    }

    #[test]
    fn test_queued_commands_drive_frame() {
        let recorder = Recorder::default();
        let mut app = new_app(&recorder);
        let sender = app.sender();
        let t0 = Instant::now();

        sender.send(Command::Up);
        sender.send(Command::Confirm);
        app.step(t0).unwrap();
        assert_eq!(app.session().clock().unwrap().frame_remaining(), 330);

        sender.send(Command::Trigger);
        app.step(t0).unwrap();

        for s in 1..=16 {
            app.step(t0 + Duration::from_secs(s)).unwrap();
        }

        assert_eq!(
            *recorder.cues.borrow(),
            vec![
                Cue::Countdown(5),
                Cue::Countdown(4),
                Cue::Countdown(3),
                Cue::Countdown(2),
                Cue::Countdown(1),
                Cue::Expired,
            ]
        );

        let clock = app.session().clock().unwrap();
        assert_eq!(clock.frame_remaining(), 315);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_quit_stops_run() {
        let recorder = Recorder::default();
        let mut app = new_app(&recorder);
        app.sender().send(Command::Quit);

        app.run().unwrap();
        assert!(app.session().quit_requested());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AppConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(Application::new(&config, Box::new(LogCueSink), Box::new(NullPresenter)).is_err());
    }

    struct NullPresenter;

    impl Presenter for NullPresenter {
        fn present(&mut self, _view: &View) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_bell_sink() {
        let mut sink = BellCueSink::new(Vec::new());
        sink.play(Cue::Countdown(3)).unwrap();
        sink.play(Cue::Expired).unwrap();
        assert_eq!(sink.into_inner(), b"\x07\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_console_presenter() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter
            .present(&View::Menu {
                label: "5:30".to_string(),
                index: 3,
                count: 4,
            })
            .unwrap();
        presenter
            .present(&View::Frame {
                snapshot: ClockSnapshot {
                    frame_remaining: 319,
                    shot_remaining: 4,
                    running: true,
                },
                emphasis: ShotEmphasis::Critical,
            })
            .unwrap();

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(text, "MENU [4/4] 5:30\n05:19 | 04 | RUNNING !\n");
    }
}
