use anyhow::Result;
use shared::Config;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};
use tracing_subscriber::EnvFilter;

mod commands;
mod services;
mod state;

use crate::commands::{
    handle_analyze, handle_best_opportunity, handle_help, handle_invalid,
    handle_test_connectivity, handle_version, Command,
};
use crate::state::AppState;

fn schema() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(handle_help))
        .branch(case![Command::Start].endpoint(handle_help))
        .branch(case![Command::Version].endpoint(handle_version))
        .branch(case![Command::Analyze(input)].endpoint(handle_analyze))
        .branch(case![Command::BestOpportunity].endpoint(handle_best_opportunity))
        .branch(case![Command::TestConnectivity].endpoint(handle_test_connectivity));

    Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(handle_invalid))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting trend signal bot...");

    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded: channel {}, {} symbols",
        config.channel_id,
        config.symbol_universe.len()
    );

    let bot = Bot::new(&config.bot_token);
    let app_state = Arc::new(AppState::new(&config, bot.clone())?);
    tracing::info!("AppState initialized");

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![app_state])
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot is running and waiting for updates...");
    dispatcher.dispatch().await;

    Ok(())
}
