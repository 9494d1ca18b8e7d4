use anyhow::{bail, Context, Result};
use config::{Config, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD: u32 = 9600;

#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_baud")]
    pub baud: u32,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_device() -> String {
    DEFAULT_DEVICE.to_string()
}

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

fn default_read_timeout_ms() -> u64 {
    1000
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_height")]
    pub height: u16,
    #[serde(default = "default_file")]
    pub file: String,
    #[serde(default = "default_save_to_file")]
    pub save_to_file: bool,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_width() -> u16 {
    500
}

fn default_height() -> u16 {
    400
}

fn default_file() -> String {
    "dashboard.png".to_string()
}

fn default_save_to_file() -> bool {
    true
}

fn default_font() -> String {
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string()
}

fn default_frame_interval_ms() -> u64 {
    100
}

impl DashboardConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            baud: default_baud(),
            read_timeout_ms: default_read_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            file: default_file(),
            save_to_file: default_save_to_file(),
            font: default_font(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(config::FileFormat::Ini))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject settings that would stall the loop or render nothing.
    pub fn validate(&self) -> Result<()> {
        if self.serial.poll_interval_ms == 0 {
            bail!("serial.poll_interval_ms must be greater than zero");
        }
        if self.serial.read_timeout_ms == 0 {
            bail!("serial.read_timeout_ms must be greater than zero");
        }
        if self.dashboard.frame_interval_ms == 0 {
            bail!("dashboard.frame_interval_ms must be greater than zero");
        }
        if self.dashboard.width == 0 || self.dashboard.height == 0 {
            bail!(
                "dashboard size {}x{} is empty",
                self.dashboard.width,
                self.dashboard.height
            );
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!(
            "[serial]\ndevice = {}\nbaud = {}\nread_timeout_ms = {}\npoll_interval_ms = {}\n\n",
            self.serial.device,
            self.serial.baud,
            self.serial.read_timeout_ms,
            self.serial.poll_interval_ms
        ));

        config_str.push_str(&format!(
            "[dashboard]\nwidth = {}\nheight = {}\nfile = {}\nsave_to_file = {}\nfont = {}\nframe_interval_ms = {}\n\n",
            self.dashboard.width,
            self.dashboard.height,
            self.dashboard.file,
            self.dashboard.save_to_file,
            self.dashboard.font,
            self.dashboard.frame_interval_ms
        ));

        config_str.push_str(&format!("[logging]\nlevel = {}\n", self.logging.level));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}
