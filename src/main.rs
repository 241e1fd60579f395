//! Key Event Harness - interactive keyboard event verification
//!
//! Opens a prompt in the terminal and asks the operator for key
//! combinations or characters until enough rounds pass.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use log::{info, warn, LevelFilter};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use key_event_harness::{
    config::{self, Config},
    report::SessionReport,
    session::{self, Session, SessionOutcome},
    ui::TerminalWindow,
    verifier::{KeyComboVerifier, TextInputVerifier, Verifier, VerifierContext},
};

#[derive(Parser, Debug)]
#[command(name = "key-event-harness")]
#[command(about = "Check keyboard press, release and text events by hand")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounds needed to pass
    #[arg(long)]
    checks: Option<u32>,

    /// Seed for challenge selection
    #[arg(long)]
    seed: Option<u64>,

    /// Fail on modifier keys that are not part of the target combination
    #[arg(long)]
    strict_modifiers: bool,

    /// Write a JSON report of the session here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,

    /// Log file (defaults to the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Press and release random key combinations
    Keys,
    /// Type random characters
    Text,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(checks) = self.checks {
            config.verifier.number_of_checks = checks;
        }
        if let Some(seed) = self.seed {
            config.verifier.seed = Some(seed);
        }
        if self.strict_modifiers {
            config.verifier.strict_modifier_keys = true;
        }
    }
}

/// The terminal belongs to the prompt, so logs go to a file.
fn init_logging(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    let path = match log_file {
        Some(path) => Some(path.to_path_buf()),
        None => config::log_path().ok(),
    };
    match path.map(|p| File::create(&p)) {
        Some(Ok(file)) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Some(Err(e)) => {
            eprintln!("Cannot open log file ({}), logging disabled", e);
            builder.filter_level(LevelFilter::Off);
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Using default config: {}", e);
            Config::default()
        }),
    };
    cli.apply(&mut config);

    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
        .context("Failed to save config")?;
        info!("Configuration saved");
    }
    Ok(config)
}

fn run_verifier<V: Verifier>(
    verifier: V,
    config: &Config,
    exit: Arc<AtomicBool>,
) -> Result<(SessionOutcome, SessionReport)> {
    let mut window = TerminalWindow::open(&config.window, config.refresh_interval(), exit)?;
    let mut session = Session::new(verifier);
    let outcome = session::run(&mut window, &mut session)?;
    let report = SessionReport::new(&session, &outcome);
    Ok((outcome, report))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    let config = load_config(&cli)?;
    let context = VerifierContext::from_config(&config.verifier);

    let exit = Arc::new(AtomicBool::new(false));
    let handler_exit = Arc::clone(&exit);
    ctrlc::set_handler(move || handler_exit.store(true, Ordering::SeqCst))
        .context("Failed to install signal handler")?;

    let (outcome, report) = match cli.command {
        Commands::Keys => run_verifier(KeyComboVerifier::new(context), &config, exit)?,
        Commands::Text => run_verifier(TextInputVerifier::new(context), &config, exit)?,
    };

    println!(
        "\n{}: {} ({}/{} checks, {} events)",
        report.summary.verifier,
        outcome.as_str(),
        report.summary.checks_passed,
        report.summary.number_of_checks,
        report.summary.events_processed
    );

    if let Some(path) = &cli.report {
        report
            .export_json(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    outcome.into_result()?;
    Ok(())
}
