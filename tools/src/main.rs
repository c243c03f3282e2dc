mod cdp;
mod commands;
mod console_log;
mod dom;
mod port_config;
mod report;
mod resources;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "testing-app-tools")]
#[command(about = "Browser automation for the testing web application")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// App URL (default: port from MoonZoon.toml)
    #[arg(long, global = true)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the end-to-end suite against a running app
    Test {
        /// Only run this case number (repeatable)
        #[arg(short, long = "case")]
        cases: Vec<u32>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Where case screenshots are saved
        #[arg(long, default_value = "screenshots")]
        screenshots_dir: PathBuf,

        /// Where the run log is written
        #[arg(long, default_value = "logs")]
        logs_dir: PathBuf,
    },

    /// Capture screenshot of the app
    Screenshot {
        /// Output PNG file path
        #[arg(short, long)]
        output: String,

        /// Viewport width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Viewport height
        #[arg(long, default_value = "800")]
        height: u32,
    },

    /// Monitor browser console output
    Console {
        /// How long to wait for messages (seconds)
        #[arg(short, long, default_value = "3")]
        wait: u64,

        /// Only show errors
        #[arg(long)]
        errors_only: bool,
    },

    /// Print the page state as JSON
    Snapshot,

    /// Run the suite as a child process and record resource usage as CSV
    Perf {
        /// Browser modes to measure (repeatable, default: both)
        #[arg(long = "mode", value_enum)]
        modes: Vec<commands::perf::BrowserMode>,

        /// Only run this case number (repeatable)
        #[arg(short, long = "case")]
        cases: Vec<u32>,

        /// Where the CSV files are written
        #[arg(long, default_value = "performance_logs")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Configure logging - filter out harmless chromiumoxide deserialization warnings
    env_logger::Builder::from_default_env()
        .filter_module("chromiumoxide::conn", log::LevelFilter::Warn)
        .filter_module("chromiumoxide::handler", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let url = cli.url.unwrap_or_else(|| {
        let ports = port_config::detect_ports();
        match &ports.source {
            port_config::PortSource::MoonZoonToml(path) => {
                log::info!("Using port {} from {}", ports.app_port, path.display())
            }
            port_config::PortSource::Default => {
                log::info!("No MoonZoon.toml found, using port {}", ports.app_port)
            }
        }
        ports.app_url()
    });

    match cli.command {
        Commands::Test {
            cases,
            headed,
            screenshots_dir,
            logs_dir,
        } => {
            commands::e2e::run(commands::e2e::E2eOptions {
                url,
                cases,
                headed,
                screenshots_dir,
                logs_dir,
            })?;
        }

        Commands::Screenshot {
            output,
            width,
            height,
        } => {
            commands::screenshot::run(&url, &output, width, height)?;
        }

        Commands::Console { wait, errors_only } => {
            commands::console::run(&url, wait, errors_only)?;
        }

        Commands::Snapshot => {
            commands::snapshot::run(&url)?;
        }

        Commands::Perf {
            mut modes,
            cases,
            out_dir,
        } => {
            if modes.is_empty() {
                modes = vec![
                    commands::perf::BrowserMode::Headless,
                    commands::perf::BrowserMode::Headed,
                ];
            }
            commands::perf::run(commands::perf::PerfOptions {
                url,
                modes,
                cases,
                out_dir,
            })?;
        }
    }

    Ok(())
}
