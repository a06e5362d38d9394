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

//! Application configuration
//!
//! Loaded from a TOML file; every field has a default so a partial file (or
//! none at all) works:
//!
//! ```toml
//! tick_rate = 60
//! bindings = "input.toml"
//!
//! [rules]
//! final_phase_threshold = 300
//! normal_shot_length = 15
//! final_shot_length = 10
//!
//! [cues]
//! warning_seconds = 5
//!
//! [[frame_options]]
//! label = "30 MINUTES"
//! seconds = 1800
//! ```

use crate::core::clock::ShotClockRules;
use crate::core::cue::CuePolicy;
use crate::core::error::{Result, SnookerError};
use crate::core::session::{default_frame_options, FrameOption};
use crate::frontend::tick_timer::DEFAULT_TICK_RATE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SPEED_SNOOKER_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Loop rate (ticks per second)
    pub tick_rate: u32,

    /// Key bindings file; built-in bindings when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<PathBuf>,

    /// Shot length rules
    pub rules: ShotClockRules,

    /// Cue policy
    pub cues: CuePolicy,

    /// Menu presets
    pub frame_options: Vec<FrameOption>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            bindings: None,
            rules: ShotClockRules::default(),
            cues: CuePolicy::default(),
            frame_options: default_frame_options(),
        }
    }
}

impl AppConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| SnookerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| SnookerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| SnookerError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check values the rest of the program relies on
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(SnookerError::InvalidTickRate(self.tick_rate));
        }
        if self.frame_options.is_empty() {
            return Err(SnookerError::NoFrameOptions);
        }
        self.rules.validate()
    }

    /// Resolve a frame selection to seconds
    ///
    /// Accepts a preset label (case-insensitive), `MM:SS`, or plain seconds.
    pub fn resolve_frame(&self, selection: &str) -> Result<u64> {
        let selection = selection.trim();

        if let Some(option) = self
            .frame_options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(selection))
        {
            return Ok(option.seconds);
        }

        parse_duration(selection).ok_or_else(|| SnookerError::UnknownFrame(selection.to_string()))
    }
}

/// `MM:SS` or whole seconds
fn parse_duration(s: &str) -> Option<u64> {
    match s.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            if seconds >= 60 {
                return None;
            }
            minutes.checked_mul(60)?.checked_add(seconds)
        }
        None => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.frame_options.len(), 4);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("tick_rate = 30\n[rules]\nnormal_shot_length = 20\n").unwrap();
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.rules.normal_shot_length, 20);
        assert_eq!(config.rules.final_shot_length, 10);
        assert_eq!(config.rules.final_phase_threshold, 300);
        assert_eq!(config.cues.warning_seconds, 5);
        assert_eq!(config.frame_options, default_frame_options());
    }

    #[test]
    fn test_validate() {
        let config = AppConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SnookerError::InvalidTickRate(0))
        ));

        let config = AppConfig {
            frame_options: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SnookerError::NoFrameOptions)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speed-snooker.toml");

        let mut config = AppConfig::default();
        config.frame_options.push(FrameOption::new("10 MINUTES", 600));
        config.bindings = Some(PathBuf::from("keys.toml"));
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_invalid_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[rules]\nnormal_shot_length = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(SnookerError::InvalidRules(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::load(&dir.path().join("nope.toml")),
            Err(SnookerError::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_resolve_frame() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_frame("20 minutes").unwrap(), 1200);
        assert_eq!(config.resolve_frame("5:30").unwrap(), 330);
        assert_eq!(config.resolve_frame("07:05").unwrap(), 425);
        assert_eq!(config.resolve_frame("90").unwrap(), 90);
        assert!(matches!(
            config.resolve_frame("5:75"),
            Err(SnookerError::UnknownFrame(_))
        ));
        assert!(matches!(
            config.resolve_frame("-10"),
            Err(SnookerError::UnknownFrame(_))
        ));
    }
}
