pub mod app;
pub mod config;
pub mod git;
pub mod input;
pub mod logging;
pub mod setup;
pub mod types;
pub mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{TerminalOptions, Viewport};
use std::process::ExitCode;
use std::sync::Arc;
use app::App;
use config::load_config;
use git::GitCli;
use setup::name_suggester::suggest_name;

/// Create a new project from a starter template
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let _args = Args::parse();
    let config = load_config()?;
    logging::init(&config.log);

    let workdir = std::env::current_dir().context("failed to read the current directory")?;
    // Computed once so redraws keep showing the same suggestion
    let placeholder = suggest_name(&workdir);
    tracing::debug!(placeholder = %placeholder, workdir = %workdir.display(), "starting wizard");

    let toolchain = Arc::new(GitCli::new(&config.git.program));
    let app = App::new(config, workdir, placeholder, toolchain);

    let terminal = ratatui::init_with_options(TerminalOptions {
        viewport: Viewport::Inline(ui::wizard_ui::VIEWPORT_HEIGHT),
    });

    let app_result = app.run(terminal).await;

    ratatui::restore();

    Ok(app_result?.exit_code())
}
