use checklist::config::AppConfig;
use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checklist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hardware health checklist for HPE, Fujitsu and Dell servers over Redfish", long_about = None)]
struct Args {
    /// INI configuration file
    #[arg(short, long, default_value = "config.ini")]
    config: PathBuf,

    /// Device inventory (TOML), overrides [INVENTORY] file
    #[arg(short, long)]
    inventory: Option<String>,

    /// Report file, overrides [REPORT] output
    #[arg(short, long)]
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first (without logging)
    let mut config = AppConfig::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        // Fall back to default configuration
        AppConfig::default()
    });
    if let Some(inventory) = args.inventory {
        config.inventory.file = inventory;
    }
    if let Some(output) = args.output {
        config.report.output = output;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    // Initialise logger with a configured log level
    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    if let Err(e) = checklist::run(config).await {
        error!("Application error: {}", e);
        return Err(e);
    }
    Ok(())
}
