use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::{LogDestination, LogSettings, DEFAULT_LOG_FILE};
use log::LevelFilter;

/// Command-line arguments for recdash
#[derive(Parser, Debug)]
#[command(name = "recdash")]
#[command(about = "Terminal dashboard for the product recommendation backend")]
#[command(version)]
pub struct Args {
    /// Origin of the recommendation backend; endpoint paths are appended to it
    #[arg(long, env = "RECDASH_API_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Maximum log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log file used by `--log file` and `--log both`
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Args {
    pub fn log_settings(&self) -> LogSettings {
        let destination = match self.log {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        };
        LogSettings {
            destination,
            level: self.log_level.into(),
            file_path: self.log_file.clone(),
        }
    }
}
