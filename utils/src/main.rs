use allfreqs_config::{OutputStyle, SETTINGS_LOCATION, Settings};
use clap::{Parser, Subcommand};
use std::{io::stdout, path::PathBuf, process::ExitCode};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod list;
mod pretty;
mod solve;

#[derive(Clone, Debug, Parser)]
#[clap(version, about)]
pub struct Cli {
    /// Settings file to read instead of the one in the storage directory
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    /// Base clock frequency, overriding the settings file
    #[clap(short, long, global = true)]
    base_freq: Option<f64>,
    #[clap(subcommand)]
    action: Option<Action>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Action {
    /// Lists every frequency in the band the clock can produce (the default)
    List {
        #[clap(short, long)]
        style: Option<OutputStyle>,
        /// Show the multiplier/divisor pairs behind each frequency
        #[clap(short, long)]
        pairs: bool,
    },
    /// Prints the clock register values for the fastest frequency not above the one given
    Solve { frequency: f64 },
    /// Writes the current settings, defaults plus any overrides, to the settings file
    Init {
        /// Replace an existing settings file
        #[clap(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Cli::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings_path = args
        .config
        .as_deref()
        .unwrap_or_else(|| SETTINGS_LOCATION.as_path());
    let mut settings = Settings::load_or_default(settings_path)?;

    if let Some(base_freq) = args.base_freq {
        settings.base_frequency = base_freq;
    }

    match args.action.unwrap_or(Action::List {
        style: None,
        pairs: false,
    }) {
        Action::List { style, pairs } => list::list(
            &settings,
            style.unwrap_or(settings.output_style),
            pairs,
            stdout().lock(),
        ),
        Action::Solve { frequency } => solve::solve(&settings, frequency, stdout().lock()),
        Action::Init { force } => {
            // Catch a bad override before it lands on disk
            settings.enumerator()?;
            settings.save_to_path(settings_path, force)?;
            Ok(())
        }
    }
}
