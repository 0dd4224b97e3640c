use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{info, warn};
use trend_rs::prelude::Symbol;

use crate::services::report::render_trend;
use crate::state::{AppState, HandlerResult};

/// Handler for /analyze [symbol]: scores one pair and publishes the report
/// to the signal channel.
pub async fn handle_analyze(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    input: String,
) -> HandlerResult {
    let symbol = Symbol::parse(&input);
    info!("Handling /analyze {} in chat {}", symbol, msg.chat.id);

    let processing = bot
        .send_message(msg.chat.id, format!("⏳ Analyzing {}...", symbol))
        .await?;

    let Some(result) = state.analyzer.analyze(&symbol).await else {
        warn!("No market data for {}", symbol);
        bot.edit_message_text(
            msg.chat.id,
            processing.id,
            format!("❌ No market data available for {} from any provider.", symbol),
        )
        .await?;
        return Ok(());
    };

    let report = render_trend(&result, None);
    let status = match state.delivery.publish(&report).await {
        Ok(()) => format!(
            "✅ {} signal ({}) published to the channel.",
            symbol,
            result.direction()
        ),
        Err(e) => format!(
            "⚠️ {} analyzed but delivery failed: {}\n\n{}",
            symbol,
            teloxide::utils::html::escape(&e.to_string()),
            report
        ),
    };

    bot.edit_message_text(msg.chat.id, processing.id, status)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
