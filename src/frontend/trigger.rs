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

//! Command hand-off between input threads and the tick loop
//!
//! Input sources that block (console reads, accessory listeners) run on their
//! own threads and post [`Command`]s through a [`TriggerSender`]. The loop
//! drains the queue once per tick, so the clock only ever sees one call at a
//! time, in arrival order.

use crate::core::session::Command;
use crate::frontend::input::InputHandler;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

/// Producer side of a [`TriggerQueue`]; clone one per input source
#[derive(Debug, Clone)]
pub struct TriggerSender {
    tx: Sender<Command>,
}

impl TriggerSender {
    /// Post a command; returns false once the loop has gone away
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Consumer side, owned by the tick loop
pub struct TriggerQueue {
    rx: Receiver<Command>,
    tx: Sender<Command>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { rx, tx }
    }

    /// New producer handle
    pub fn sender(&self) -> TriggerSender {
        TriggerSender {
            tx: self.tx.clone(),
        }
    }

    /// Take everything queued so far, oldest first, without blocking
    pub fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(command) => commands.push(command),
                // The queue keeps its own sender, so it never disconnects
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        commands
    }
}

impl Default for TriggerQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Read key names line by line and forward the bound commands
///
/// Unbound keys are logged and skipped. End of input (or a read error) sends
/// [`Command::Quit`].
pub fn spawn_console_reader<R>(reader: R, handler: InputHandler, sender: TriggerSender) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Console input error: {}", e);
                    break;
                }
            };

            match handler.handle_line(&line) {
                Some(command) => {
                    if !sender.send(command) {
                        return;
                    }
                }
                None => log::warn!("Unbound key: {:?}", line.trim()),
            }
        }

        log::debug!("Console input closed");
        sender.send(Command::Quit);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::input::InputConfig;
    use std::io::Cursor;

    #[test]
    fn test_drain_preserves_order() {
        let queue = TriggerQueue::new();
        let sender = queue.sender();

        assert!(queue.drain().is_empty());

        sender.send(Command::Down);
        sender.send(Command::Confirm);
        sender.send(Command::Trigger);

        assert_eq!(
            queue.drain(),
            vec![Command::Down, Command::Confirm, Command::Trigger]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_senders_from_many_threads() {
        let queue = TriggerQueue::new();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sender = queue.sender();
                thread::spawn(move || {
                    for _ in 0..25 {
                        sender.send(Command::Trigger);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.drain().len(), 100);
    }

    #[test]
    fn test_console_reader() {
        let queue = TriggerQueue::new();
        let handler = InputHandler::from_config(InputConfig::default_config(), "test-input.toml");
        let input = Cursor::new("down\n\nbogus\nfob\nbackspace\n");

        spawn_console_reader(input, handler, queue.sender())
            .join()
            .unwrap();

        assert_eq!(
            queue.drain(),
            vec![
                Command::Down,
                Command::Confirm,
                Command::Trigger,
                Command::Back,
                Command::Quit,
            ]
        );
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let queue = TriggerQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.send(Command::Trigger));
    }
}
