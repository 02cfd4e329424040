use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use navkit::core::config::{CliOverrides, NavkitConfig, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "navkit", about = "Responsive navigation bar for the terminal")]
struct Args {
    /// Config file to read instead of ~/.navkit/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable every non-essential animation
    #[arg(long)]
    reduced_motion: bool,

    /// Width (in columns) at or below which the menu toggle replaces the links
    #[arg(short, long)]
    breakpoint: Option<u16>,

    /// Log level written to navkit.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to navkit.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("navkit.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("navkit: {e}; falling back to defaults");
            log::warn!("Config load failed: {e}");
            NavkitConfig::default()
        }
    };
    let config = resolve(
        &file_config,
        &CliOverrides {
            reduced_motion: args.reduced_motion,
            breakpoint: args.breakpoint,
        },
    );

    log::info!(
        "navkit starting up at {} (breakpoint {}, reduced motion {:?})",
        config.initial_path,
        config.navigation.breakpoint,
        config.reduced_motion
    );

    navkit::tui::run(config)
}
