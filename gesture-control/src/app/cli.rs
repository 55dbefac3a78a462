//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture Control - Turn hand landmarks into pointer actions
#[derive(Parser, Debug)]
#[command(name = "gesture-ctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed a recorded landmark stream through a session
    Replay {
        /// JSON-lines file, one frame per line
        input: PathBuf,

        /// Profile JSON to open the session with
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Print only stable frames
        #[arg(long)]
        stable_only: bool,

        /// Do not write gesture telemetry
        #[arg(long)]
        no_telemetry: bool,
    },

    /// Classify a single hand observation
    Classify {
        /// JSON file holding one hand observation
        input: PathBuf,

        /// Also print every detector's raw score
        #[arg(short, long)]
        scores: bool,
    },

    /// Summarize a gesture telemetry log
    Stats {
        /// Telemetry file (defaults to the configured log)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Only count records from this profile
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "stabilizer.buffer_size", "thresholds.pinch")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the data directory
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture_control"))
            .unwrap_or_else(|| PathBuf::from(".gesture_control"))
    }
}
