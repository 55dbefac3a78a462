//! Gesture Control - hand landmark to pointer action engine
//!
//! Replays recorded landmark streams, classifies single observations and
//! summarizes gesture telemetry.

use gesture_control::app::cli::{Cli, Commands, ConfigAction};
use gesture_control::app::config::Config;
use gesture_control::classifier::GestureClassifier;
use gesture_control::landmarks::{encode_data_url, HandObservation};
use gesture_control::profile::{InMemoryProfileStore, ProfileStore, UserProfile};
use gesture_control::session::{FrameReport, ReplayResources, SessionManager};
use gesture_control::telemetry::{JsonlTelemetryStore, TelemetryLogger, TelemetryStats};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Replay {
            input,
            profile,
            stable_only,
            no_telemetry,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_replay(
                &input,
                profile.as_deref(),
                stable_only,
                no_telemetry,
                &config,
            ))?;
        }
        Commands::Classify { input, scores } => {
            run_classify(&input, scores, &config)?;
        }
        Commands::Stats { input, profile } => {
            run_stats(input, profile.as_deref(), &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

async fn run_replay(
    input: &Path,
    profile: Option<&Path>,
    stable_only: bool,
    no_telemetry: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let resources = ReplayResources::new(config.controller);
    let backend = resources.backend().clone();

    // A profile file is loaded into a throwaway store for this run
    let profiles = Arc::new(InMemoryProfileStore::new());
    let profile_id = match profile {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let profile: UserProfile = serde_json::from_str(&content)?;
            let id = profile.id.clone();
            profiles.save(profile)?;
            Some(id)
        }
        None => None,
    };

    let telemetry = if config.telemetry.enabled && !no_telemetry {
        let path = config.telemetry.log_path();
        info!("Writing gesture telemetry to {}", path.display());
        TelemetryLogger::spawn(Arc::new(JsonlTelemetryStore::new(path)))
    } else {
        TelemetryLogger::disabled()
    };

    let manager = SessionManager::new(Arc::new(resources))
        .with_profiles(profiles)
        .with_telemetry(telemetry.clone())
        .with_defaults(config.session_options());
    let session = manager.open_session_for_profile(profile_id.as_deref())?;

    let content = tokio::fs::read_to_string(input).await?;
    let mut frames = 0usize;
    let mut errors = 0usize;
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        frames += 1;

        // Lines are either ready-made data URLs or raw landmark JSON
        let payload = if line.starts_with("data:") {
            line.to_string()
        } else {
            encode_data_url("application/json", line.as_bytes())
        };

        let report = manager.handle_payload(session, &payload).await?;
        if let FrameReport::Error { error } = &report {
            warn!("Line {}: {}", line_no + 1, error);
            errors += 1;
        }
        let stable = report.detection().map_or(false, |d| d.stable);
        if stable_only && !stable {
            continue;
        }
        println!("{}", serde_json::to_string(&report)?);
    }

    let stats = manager.session_stats(session).await?;
    manager.close_session(session);
    telemetry.flush().await;

    info!(
        frames,
        errors,
        processed = stats.total_processed,
        input_calls = backend.calls().len(),
        "Replay finished"
    );
    for (gesture, count) in &stats.gesture_counts {
        info!("  {}: {} transition(s)", gesture, count);
    }
    if telemetry.failed_writes() > 0 {
        warn!("{} gesture log(s) could not be written", telemetry.failed_writes());
    }

    Ok(())
}

fn run_classify(input: &Path, scores: bool, config: &Config) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)?;
    let observation: HandObservation = serde_json::from_str(&content)?;

    if !observation.is_complete() {
        warn!(
            "Observation has {} landmarks, expected 21",
            observation.landmarks.len()
        );
    }

    let classifier = GestureClassifier::with_thresholds(config.thresholds);
    let result = classifier.classify(&observation);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if scores {
        if let Some(scores) = classifier.scores(&observation.landmarks) {
            println!("\nDetector scores:");
            for (gesture, score) in scores {
                println!(
                    "  {:<12} {:.2} (threshold {:.2})",
                    gesture.as_str(),
                    score,
                    config.thresholds.threshold_for(gesture)
                );
            }
        }
    }

    Ok(())
}

fn run_stats(input: Option<PathBuf>, profile: Option<&str>, config: &Config) -> anyhow::Result<()> {
    let path = input.unwrap_or_else(|| config.telemetry.log_path());
    if !path.exists() {
        anyhow::bail!("No telemetry log found at {:?}", path);
    }

    let logs = JsonlTelemetryStore::read_file(&path)?;
    let stats = TelemetryStats::from_logs(&logs, profile);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if let Some((gesture, count)) = stats.top_gesture() {
        info!("Most frequent gesture: {} ({})", gesture, count);
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::data_dir())?;
    println!("\nData directory: {:?}", Cli::data_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            // Simple key lookup in TOML output
            let value = find_toml_value(&toml_str, &key);
            match value {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'gesture-ctl init' first.");
            }

            // Load, modify, validate, and save
            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if !set_toml_value(&mut toml_content, &key, &value) {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
            let updated: Config = toml::from_str(&toml_content)?;
            updated.validate()?;
            std::fs::write(&config_path, &toml_content)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let (section_name, leaf_key) = match key.split_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", key),
    };
    let mut in_section = section_name.is_empty();

    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = &trimmed[1..trimmed.len() - 1] == section_name;
            continue;
        }

        if in_section {
            if let Some((line_key, value)) = trimmed.split_once('=') {
                if line_key.trim() == leaf_key {
                    return Some(value.trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let (section_name, leaf_key) = match key.split_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", key),
    };
    let mut in_section = section_name.is_empty();
    let mut found = false;

    let mut new_lines = Vec::new();
    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = &trimmed[1..trimmed.len() - 1] == section_name;
        }

        if in_section && !found {
            if let Some((line_key, _)) = trimmed.split_once('=') {
                if line_key.trim() == leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.to_string());
    }

    if found {
        *toml_str = new_lines.join("\n");
        // Ensure trailing newline
        if !toml_str.ends_with('\n') {
            toml_str.push('\n');
        }
    }

    found
}
