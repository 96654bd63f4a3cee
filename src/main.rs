use std::sync::Arc;

use clap::Parser;
use log::*;

use auto_release_notes::{
    cli,
    forge::{github::Github, manager::ForgeManager},
    result::Result,
    server::{self, AppState},
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("auto_release_notes")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let secrets = cli_args.secret_provider();
    let file_config = cli_args.file_config()?;
    let config = cli_args.build_config(file_config, secrets.as_ref())?;
    let token = secrets.secret(&cli_args.token_var)?;

    let github = Github::new(config.repo.clone(), token)?;
    let forge =
        ForgeManager::new(Box::new(github), config.forge_timeout, config.dry_run);

    if forge.dry_run() {
        warn!("dry_run: releases will not be modified");
    }

    let state = Arc::new(AppState::new(config, forge));
    server::serve(&cli_args.listen, state).await?;

    Ok(())
}
