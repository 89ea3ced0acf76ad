use std::path::PathBuf;

use clap::Parser;
use config::Source;

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0, value_parser = positive_rate)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0, value_parser = positive_rate)]
    pub frame_rate: f64,

    /// Path to the data directory, where the log file is written
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Path to the directory holding the config file
    #[arg(long, value_name = "PATH")]
    pub config_dir: Option<PathBuf>,

    /// Do not capture the mouse, leaving text selection to the terminal
    #[arg(long)]
    pub no_mouse: bool,
}

/// Rates are turned into intervals, so they have to be finite and above zero
fn positive_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("`{s}` is not a positive rate"))
    }
}

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"));

pub fn version() -> String {
    let author = clap::crate_authors!();

    let data_dir_path = get_data_dir().display().to_string();
    let config_dir_path = get_config_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Data directory: {data_dir_path}
Config directory: {config_dir_path}"
    )
}

/// Settings given on the command line, merged over every other config source
#[derive(Debug, Clone)]
pub(crate) struct ClapSource {
    pub data_dir: Option<String>,
    pub no_mouse: bool,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            no_mouse: cli.no_mouse,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        if self.data_dir.is_some() {
            map.insert(
                "data_dir".to_string(),
                config::Value::new(None, self.data_dir.clone()),
            );
        }
        if self.no_mouse {
            let mut tui = config::Map::new();
            tui.insert("mouse".to_string(), config::Value::new(None, false));
            map.insert("tui".to_string(), config::Value::new(None, tui));
        }
        Ok(map)
    }
}
