use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
}

/// Terminal features
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Capture the mouse so option rows and buttons can be clicked
    pub mouse: bool,
    /// Receive pasted text as a whole instead of as key presses
    pub paste: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            paste: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    /// Load the config, from lowest to highest priority: defaults, the config file in
    /// `config_dir` (or [`get_config_dir`]), then the CLI.
    pub fn new(
        config_dir: Option<PathBuf>,
        cli_source: Option<crate::cli::ClapSource>,
    ) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_dir = config_dir.unwrap_or_else(get_config_dir);
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("tui.mouse", true)?
            .set_default("tui.paste", true)?;

        // the format is picked from the extension of whichever file exists
        builder = builder.add_source(
            config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        );

        // Add CLI source last (highest priority)
        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

fn dir_from_env(suffix: &str) -> Option<PathBuf> {
    env::var(format!("{}_{}", PROJECT_NAME.clone(), suffix))
        .ok()
        .map(PathBuf::from)
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = dir_from_env("DATA") {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = dir_from_env("CONFIG") {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "yyang", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    fn empty_config_dir() -> tempfile::TempDir {
        tempdir().unwrap()
    }

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir().unwrap();
        let config_dir = empty_config_dir();

        temp_env::with_vars(
            [(
                format!("{}_DATA", PROJECT_NAME.clone()).as_str(),
                Some(temp_data.path().to_str().unwrap()),
            )],
            || {
                let config = Config::new(Some(config_dir.path().to_path_buf()), None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
            },
        );
    }

    #[test]
    fn config_dir_from_env() {
        let temp_config = tempdir().unwrap();
        temp_env::with_var(
            format!("{}_CONFIG", PROJECT_NAME.clone()),
            Some(temp_config.path()),
            || {
                assert_eq!(get_config_dir(), temp_config.path());
            },
        );
    }

    #[test]
    fn data_dir_from_cli() {
        let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
        let config = Config::new(
            Some(empty_config_dir().path().to_path_buf()),
            Some(ClapSource::new(&args)),
        )
        .expect("Failed to load config");

        assert_eq!(config.config.data_dir, PathBuf::from(".cli-data"));
    }

    #[test]
    fn tui_defaults() {
        let config =
            Config::new(Some(empty_config_dir().path().to_path_buf()), None).unwrap();
        assert!(config.tui.mouse);
        assert!(config.tui.paste);
    }

    #[test]
    fn no_mouse_from_cli() {
        let args = Cli::parse_from(["test-config", "--no-mouse"]);
        let config = Config::new(
            Some(empty_config_dir().path().to_path_buf()),
            Some(ClapSource::new(&args)),
        )
        .unwrap();
        assert!(!config.tui.mouse);
        assert!(config.tui.paste);
    }

    #[test]
    fn config_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "data_dir = \"/tmp/from-file\"\n\n[tui]\npaste = false\n",
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.config.data_dir, PathBuf::from("/tmp/from-file"));
        assert!(!config.tui.paste);
        assert!(config.tui.mouse);

        // the CLI wins over the file
        let args = Cli::parse_from(["test-config", "--data-dir", "cli"]);
        let config = Config::new(Some(dir.path().to_path_buf()), Some(ClapSource::new(&args)))
            .unwrap();
        assert_eq!(config.config.data_dir, PathBuf::from("cli"));
    }
}
