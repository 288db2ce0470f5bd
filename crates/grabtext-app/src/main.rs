use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use grabtext_config::Config;
use grabtext_types::ScreenRect;
use tokio::signal;

mod cli;
mod controller;
mod events;
mod io;
mod logging;
mod oneshot;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::controller::AppController;
use self::state::AppState;
use self::ui::StdoutPresenter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.log_json)?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new()?,
    };
    config.validate().context("Invalid configuration")?;

    let state = Arc::new(AppState::new(config)?);

    match cli.command.unwrap_or_default() {
        Command::Listen => listen(state).await,
        Command::Region {
            x,
            y,
            width,
            height,
        } => {
            let rect = ScreenRect::new(x, y, width, height);
            oneshot::convert_region(&state, rect, StdoutPresenter).await
        }
        Command::File { path } => oneshot::convert_file(&state, &path, StdoutPresenter).await,
    }
}

async fn listen(state: Arc<AppState>) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("Task exited"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}
