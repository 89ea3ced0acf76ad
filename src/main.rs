mod actions;
mod app;
mod cli;
mod component;
mod config;
mod libs;
mod page;
mod tui;
mod utils;

use app::{App, RootState};
use clap::Parser;
use cli::{ClapSource, Cli};
use color_eyre::eyre::{Context, Result};
use crate::config::Config;
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run(args: Cli, config: Config) -> Result<()> {
    let tui = tui::Tui::new(args.tick_rate, args.frame_rate, config.tui)?;
    let mut app = App::new(RootState::new(), tui.into());
    app.run().await
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;

    let args = Cli::parse();
    let config = Config::new(args.config_dir.clone(), Some(ClapSource::new(&args)))
        .context("Error when loading config")?;

    utils::logging::init(&config.config.data_dir)?;
    let config = trace_dbg!(config);

    run(args, config).await
}
