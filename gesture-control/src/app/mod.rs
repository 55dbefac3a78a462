//! Application Layer
//!
//! Everything the `gesture-ctl` binary needs beyond the engine itself: the
//! clap command tree and the TOML config under `~/.gesture_control/`.

pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, ConfigAction};
pub use config::Config;
