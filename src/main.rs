//! PiMenu CLI - touchscreen tile launcher

use std::fs::File;
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use pimenu::tui::{self, AppState};
use pimenu::{ConfigSource, FixSuggestion, IconResolver, PiMenuError, Settings};

#[derive(Parser)]
#[command(name = "pimenu")]
#[command(about = "Touchscreen tile launcher for kiosk terminals")]
#[command(version)]
struct Cli {
    /// Display mode (`fs` for fullscreen)
    #[arg(value_enum)]
    mode: Option<DisplayMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayMode {
    /// Use the whole terminal
    Fs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let fullscreen = cli.mode == Some(DisplayMode::Fs);

    let settings = match Settings::from_current_exe(fullscreen) {
        Ok(settings) => settings,
        Err(e) => exit_with(&PiMenuError::Io(e)),
    };
    init_tracing(&settings);

    let mut state = AppState::new(
        ConfigSource::new(settings.config_path()),
        IconResolver::new(settings.icon_dir()),
    );

    if let Err(e) = state.load() {
        // Without a terminal there is nobody to show the dialog to
        if !io::stdout().is_terminal() {
            exit_with(&e);
        }
        state.fail(e);
    }

    match tui::run(state, settings).await {
        Ok(None) => {}
        Ok(Some(fatal)) => exit_with(&fatal),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Log to a file next to the executable; the terminal belongs to the UI
fn init_tracing(settings: &Settings) {
    let Ok(file) = File::create(settings.log_path()) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn exit_with(err: &PiMenuError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    if let Some(suggestion) = err.fix_suggestion() {
        eprintln!("  {} {}", "Fix:".yellow(), suggestion);
    }
    std::process::exit(1);
}
