use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap::ValueHint;
use std::path::PathBuf;

const AFTER_HELP: &str = "Use --format json for machine-readable output.";

const LONG_ABOUT: &str = "\
Head-tracking cursor with dwell activation and edge scrolling.\n\
\n\
Replays a recorded landmark trace against a UI layout and reports which\n\
elements were activated and how far the scroll container moved.";

const AFTER_LONG_HELP: &str = r#"INPUT FILES:
    layout.json   Viewport, scroll regions and an element tree
    trace.jsonl   One detector result per line:
                  {"at_ms": 0, "point": {"x": 0.5, "y": 0.5}}
                  {"at_ms": 33, "point": null}

ENVIRONMENT:
    GAZE_SMOOTHING, GAZE_DWELL_MS, GAZE_SCROLL_ZONE, GAZE_SCROLL_TTL_MS,
    GAZE_HIGHLIGHT_MS, GAZE_SCROLL_SELECTOR, GAZE_TICK_MS
    GAZE_LOG (log file), GAZE_LOG_FORMAT (text|json), GAZE_LOG_STREAM

EXAMPLES:
    gaze-tracker replay --layout chat.json --trace session.jsonl
    gaze-tracker replay --layout chat.json --trace session.jsonl --realtime
    gaze-tracker --format json config"#;

#[derive(Parser)]
#[command(name = "gaze-tracker")]
#[command(author, version, propagate_version = true)]
#[command(about = "Head-tracking cursor with dwell activation and edge scrolling")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = AFTER_HELP)]
#[command(after_long_help = AFTER_LONG_HELP)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        value_name = "FORMAT",
        default_value_t = OutputFormat::Text,
        help_heading = "Output Options"
    )]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true, help_heading = "Output Options")]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, help_heading = "Debug Options")]
    pub verbose: bool,
}

impl Cli {
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a landmark trace against a layout
    Replay(ReplayArgs),

    /// Show effective tracker settings
    Config(TuningArgs),
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Layout JSON describing the viewport, scroll regions and elements
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub layout: PathBuf,

    /// Landmark trace in JSON Lines
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub trace: PathBuf,

    /// Pace frames on the wall clock instead of virtual time
    #[arg(long)]
    pub realtime: bool,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Overrides applied on top of environment configuration.
#[derive(Debug, Default, Args)]
pub struct TuningArgs {
    /// Animation tick interval in milliseconds
    #[arg(long, value_name = "MS", help_heading = "Tuning")]
    pub tick_ms: Option<u64>,

    /// Dwell time before activation in milliseconds
    #[arg(long, value_name = "MS", help_heading = "Tuning")]
    pub dwell_ms: Option<u64>,

    /// Exponential smoothing factor in (0, 1]
    #[arg(long, value_name = "ALPHA", help_heading = "Tuning")]
    pub smoothing: Option<f64>,

    /// Selector of the region that edge scrolling drives
    #[arg(long, value_name = "SELECTOR", help_heading = "Tuning")]
    pub scroll_selector: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
