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

//! Key bindings
//!
//! Maps key names to operator [`Command`]s. Key names are whatever the input
//! source reports (`"enter"`, `"up"`, `"volumeup"` for a Bluetooth shutter
//! fob, ...); matching is case-insensitive. Bindings can be saved to and loaded
//! from a TOML file.

use crate::core::error::{Result, SnookerError};
use crate::core::session::Command;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key name an empty console line stands for
pub const EMPTY_LINE_KEY: &str = "enter";

/// Key bindings that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Key name to command mapping
    pub key_mapping: HashMap<String, Command>,
}

impl InputConfig {
    /// Default bindings
    pub fn default_config() -> Self {
        let mut key_mapping = HashMap::new();

        // Menu navigation
        key_mapping.insert("up".to_string(), Command::Up);
        key_mapping.insert("w".to_string(), Command::Up);
        key_mapping.insert("down".to_string(), Command::Down);
        key_mapping.insert("s".to_string(), Command::Down);

        // Select / start / stop
        key_mapping.insert("enter".to_string(), Command::Confirm);
        key_mapping.insert("return".to_string(), Command::Confirm);
        key_mapping.insert("kp_enter".to_string(), Command::Confirm);

        // Remote trigger (shutter fobs report volume-up)
        key_mapping.insert("volumeup".to_string(), Command::Trigger);
        key_mapping.insert("fob".to_string(), Command::Trigger);

        // Leave frame / program
        key_mapping.insert("backspace".to_string(), Command::Back);
        key_mapping.insert("delete".to_string(), Command::Back);
        key_mapping.insert("escape".to_string(), Command::Quit);
        key_mapping.insert("esc".to_string(), Command::Quit);

        Self { key_mapping }
    }

    /// Load bindings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| SnookerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SnookerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save bindings to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| SnookerError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Normalized form of a key name
fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// Display name for a command
fn command_name(command: Command) -> &'static str {
    match command {
        Command::Up => "UP",
        Command::Down => "DOWN",
        Command::Confirm => "ENTER",
        Command::Trigger => "FOB",
        Command::Back => "MENU",
        Command::Quit => "QUIT",
    }
}

/// Key name to command resolver
pub struct InputHandler {
    /// Normalized key name -> command
    key_mapping: HashMap<String, Command>,

    /// Where `save_config` writes to
    config_path: PathBuf,
}

impl InputHandler {
    /// Create a handler from `input.toml`, or the defaults if it can't be read
    pub fn new() -> Self {
        Self::with_config_path("input.toml")
    }

    /// Create a handler from a bindings file, or the defaults if it can't be read
    pub fn with_config_path(config_path: impl AsRef<Path>) -> Self {
        let config_path = config_path.as_ref();
        let config = InputConfig::load(config_path).unwrap_or_else(|e| {
            log::info!("Using default key bindings ({})", e);
            InputConfig::default_config()
        });
        Self::from_config(config, config_path)
    }

    /// Create a handler from bindings already in memory
    pub fn from_config(config: InputConfig, config_path: impl AsRef<Path>) -> Self {
        let mut key_mapping = HashMap::new();
        for (key, command) in config.key_mapping {
            let normalized = normalize_key(&key);
            if normalized.is_empty() {
                log::warn!("Ignoring empty key name bound to {:?}", command);
                continue;
            }
            key_mapping.insert(normalized, command);
        }

        Self {
            key_mapping,
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve a key name
    pub fn handle_key(&self, key: &str) -> Option<Command> {
        self.key_mapping.get(&normalize_key(key)).copied()
    }

    /// Resolve one line of console input (an empty line is `enter`)
    pub fn handle_line(&self, line: &str) -> Option<Command> {
        let key = line.trim();
        if key.is_empty() {
            self.handle_key(EMPTY_LINE_KEY)
        } else {
            self.handle_key(key)
        }
    }

    /// Bind a key
    pub fn set_key_mapping(&mut self, key: &str, command: Command) {
        self.key_mapping.insert(normalize_key(key), command);
    }

    /// Unbind a key
    pub fn remove_key_mapping(&mut self, key: &str) {
        self.key_mapping.remove(&normalize_key(key));
    }

    pub fn key_mapping(&self) -> &HashMap<String, Command> {
        &self.key_mapping
    }

    /// Save current bindings to the config path
    pub fn save_config(&self) -> Result<()> {
        let config = InputConfig {
            key_mapping: self.key_mapping.clone(),
        };
        config.save(&self.config_path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Commands with their bound keys, sorted for display
    pub fn get_command_mappings(&self) -> Vec<(String, Vec<String>)> {
        let mut command_to_keys: HashMap<Command, Vec<String>> = HashMap::new();
        for (key, &command) in &self.key_mapping {
            command_to_keys.entry(command).or_default().push(key.clone());
        }

        let mut result: Vec<_> = command_to_keys
            .into_iter()
            .map(|(command, mut keys)| {
                keys.sort();
                (command_name(command).to_string(), keys)
            })
            .collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
