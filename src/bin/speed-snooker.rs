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

//! Speed snooker timer entry point
//!
//! Console frontend: key names are read from stdin one per line (an empty
//! line is ENTER), the clock status is printed whenever it changes and cues
//! are logged or rung on the terminal bell.

use clap::Parser;
use speed_snooker::frontend::config::CONFIG_ENV_VAR;
use speed_snooker::frontend::{
    spawn_console_reader, AppConfig, Application, BellCueSink, ConsolePresenter, CueSink,
    InputConfig, InputHandler, LogCueSink,
};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "speed-snooker", version, about = "Frame clock and shot clock for speed snooker")]
struct Cli {
    /// Config file (TOML); falls back to $SPEED_SNOOKER_CONFIG, then defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load a frame directly: preset label, MM:SS or seconds
    #[arg(short, long)]
    frame: Option<String>,

    /// Loop rate in ticks per second (overrides the config file)
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Ring the terminal bell on cues
    #[arg(long)]
    bell: bool,

    /// Write the default config to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,

    /// Write the default key bindings to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_default_bindings: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> speed_snooker::Result<AppConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let mut config = match path {
        Some(path) => {
            log::info!("Config: {}", path.display());
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    if let Some(tick_rate) = cli.tick_rate {
        config.tick_rate = tick_rate;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.write_default_config {
        AppConfig::default().save(path)?;
        log::info!("Wrote default config to {}", path.display());
        return Ok(());
    }
    if let Some(path) = &cli.write_default_bindings {
        InputConfig::default_config().save(path)?;
        log::info!("Wrote default key bindings to {}", path.display());
        return Ok(());
    }

    let config = load_config(&cli)?;

    let input_handler = match &config.bindings {
        Some(path) => InputHandler::with_config_path(path),
        None => InputHandler::from_config(InputConfig::default_config(), "input.toml"),
    };
    for (command, keys) in input_handler.get_command_mappings() {
        log::info!("{:<6} {}", command, keys.join(", "));
    }

    let cue_sink: Box<dyn CueSink> = if cli.bell {
        Box::new(BellCueSink::new(io::stderr()))
    } else {
        Box::new(LogCueSink)
    };
    let presenter = Box::new(ConsolePresenter::new(io::stdout()));

    let mut app = Application::new(&config, cue_sink, presenter)?;

    if let Some(selection) = &cli.frame {
        let seconds = config.resolve_frame(selection)?;
        app.session_mut().start_frame(seconds, Instant::now());
    }

    log::info!("Starting speed snooker timer...");

    // Detached: it is blocked on stdin and ends with the process
    let _console = spawn_console_reader(io::BufReader::new(io::stdin()), input_handler, app.sender());

    app.run()?;

    Ok(())
}
