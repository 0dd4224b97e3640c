use chrono::{TimeZone, Utc};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::state::{AppState, HandlerResult};

/// Epoch seconds from the build script as a readable timestamp
fn build_time() -> String {
    let raw = option_env!("BUILD_TIME").unwrap_or("unknown");
    raw.parse::<i64>()
        .ok()
        .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Handler for the /version command.
pub async fn handle_version(bot: Bot, msg: Message, state: Arc<AppState>) -> HandlerResult {
    tracing::info!("Handling /version in chat {}", msg.chat.id);

    let version_info = format!(
        "🤖 <b>{}</b> v{}\n\
        <b>Branch:</b> <code>{}</code>\n\
        <b>Commit:</b> <code>{}</code>\n\
        <b>Build Time:</b> <code>{}</code>\n\
        <b>OS:</b> <code>{}</code>",
        teloxide::utils::html::escape(&state.bot_name),
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_BRANCH").unwrap_or("unknown"),
        option_env!("GIT_HASH").unwrap_or("unknown"),
        build_time(),
        option_env!("BUILD_TARGET_OS").unwrap_or("unknown")
    );

    bot.send_message(msg.chat.id, version_info)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
