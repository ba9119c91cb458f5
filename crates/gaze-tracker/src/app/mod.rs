#![expect(clippy::print_stdout, reason = "CLI output is emitted here")]
#![expect(clippy::print_stderr, reason = "CLI output is emitted here")]

//! CLI application layer and composition root wiring.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing::debug;

pub mod commands;
pub mod output;

use crate::app::commands::Cli;
use crate::app::commands::Commands;
use crate::app::commands::OutputFormat;
use crate::app::commands::ReplayArgs;
use crate::app::commands::TuningArgs;
use crate::app::output::ConfigOutput;
use crate::app::output::ReportOutput;
use gaze_common::common::telemetry;
use gaze_domain::domain::SettingsError;
use gaze_infra::LayoutError;
use gaze_infra::LayoutSurface;
use gaze_infra::ReplayError;
use gaze_infra::ReplayMode;
use gaze_infra::TrackerConfig;
use gaze_infra::run_replay;

const PROGRAM_NAME: &str = "gaze-tracker";

/// Exit codes following sysexits.h.
mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const USAGE: i32 = 64;
    pub const DATAERR: i32 = 65;
    pub const UNAVAILABLE: i32 = 69;
}

pub struct Application;

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<i32> {
        let exit_code = match self.execute() {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => self.handle_error(e),
        };
        Ok(exit_code)
    }

    fn execute(&self) -> Result<()> {
        let cli = Cli::parse();
        let _telemetry = telemetry::init_tracing(if cli.verbose { "debug" } else { "warn" });
        let format = cli.effective_format();
        debug!(command = ?cli.command, format = ?format, "CLI command parsed");

        match &cli.command {
            Commands::Replay(args) => self
                .handle_replay(args, format)
                .context("failed to replay trace"),
            Commands::Config(tuning) => self
                .handle_config(tuning, format)
                .context("failed to resolve configuration"),
        }
    }

    fn handle_replay(&self, args: &ReplayArgs, format: OutputFormat) -> Result<()> {
        let config = resolve_config(&args.tuning)?;
        let surface = Arc::new(LayoutSurface::load(&args.layout)?);
        let mode = if args.realtime {
            ReplayMode::Realtime
        } else {
            ReplayMode::Virtual
        };
        let report = run_replay(surface, &args.trace, &config, mode)?;
        let output = ReportOutput::from(&report);
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => print!("{}", output.to_text()),
        }
        Ok(())
    }

    fn handle_config(&self, tuning: &TuningArgs, format: OutputFormat) -> Result<()> {
        let config = resolve_config(tuning)?;
        let output = ConfigOutput::from(&config);
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => print!("{}", output.to_text()),
        }
        Ok(())
    }

    fn handle_error(&self, e: anyhow::Error) -> i32 {
        eprintln!("{}: Error: {:#}", PROGRAM_NAME, e);
        exit_code_for(&e)
    }
}

/// Environment first, then command-line overrides.
fn resolve_config(tuning: &TuningArgs) -> Result<TrackerConfig, SettingsError> {
    let mut config = TrackerConfig::from_env();
    config.override_settings(|mut builder| {
        if let Some(ms) = tuning.dwell_ms {
            builder = builder.dwell(Duration::from_millis(ms));
        }
        if let Some(alpha) = tuning.smoothing {
            builder = builder.smoothing(alpha);
        }
        if let Some(selector) = &tuning.scroll_selector {
            builder = builder.scroll_selector(selector.clone());
        }
        builder
    })?;
    if let Some(ms) = tuning.tick_ms {
        if ms == 0 {
            return Err(SettingsError::ZeroDuration { name: "Tick" });
        }
        config.set_tick_interval(Duration::from_millis(ms));
    }
    Ok(config)
}

fn exit_code_for(e: &anyhow::Error) -> i32 {
    if find_error::<SettingsError>(e).is_some() {
        exit_codes::USAGE
    } else if find_error::<LayoutError>(e).is_some() {
        exit_codes::DATAERR
    } else if let Some(err) = find_error::<ReplayError>(e) {
        match err {
            ReplayError::Start(_) => exit_codes::UNAVAILABLE,
            ReplayError::Spawn(_) => exit_codes::GENERAL_ERROR,
        }
    } else {
        exit_codes::GENERAL_ERROR
    }
}

fn find_error<T: std::error::Error + 'static>(error: &anyhow::Error) -> Option<&T> {
    error.chain().find_map(|source| source.downcast_ref::<T>())
}
