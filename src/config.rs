// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Runtime settings from command-line flags and environment variables.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};
use tracing::level_filters::LevelFilter;

const APP_DIR_NAME: &str = "postpad";

/// Command-line arguments for the Postpad binary.
#[derive(Debug, Parser)]
#[command(name = "postpad", version, about = "Write, edit, and sort blog posts stored locally")]
pub struct CliArgs {
    /// Directory holding the persisted posts and preferences.
    #[arg(long, env = "POSTPAD_DATA_DIR", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Default log level (RUST_LOG directives take precedence).
    #[arg(long, env = "POSTPAD_LOG", value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Log output format.
    #[arg(long, env = "POSTPAD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Output format for log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

/// Resolved application settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse the process arguments and resolve defaults.
    pub fn load() -> Self {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(|| {
            default_data_dir(
                std::env::var_os("XDG_DATA_HOME"),
                std::env::var_os("HOME"),
            )
        });
        Self {
            data_dir,
            logging: LoggingSettings {
                level: args.log_level,
                format: args.log_format,
            },
        }
    }
}

/// `$XDG_DATA_HOME/postpad`, else `$HOME/.local/share/postpad`, else `./.postpad`.
fn default_data_dir(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME);
    }
    PathBuf::from(format!(".{APP_DIR_NAME}"))
}
