use airmon::config::AppConfig;
use env_logger::{Builder, WriteStyle};
use log::error;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.ini".to_string());

    // Load configuration first (without logging)
    let config = AppConfig::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        // Fall back to default configuration
        AppConfig::default()
    });

    // Initialise logger with a configured log level
    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    // The only place a fatal error is reported.
    if let Err(e) = airmon::run(config).await {
        error!("Application error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
