use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::info;

use crate::services::report::render_opportunity;
use crate::state::{AppState, HandlerResult};

/// Handler for /best_opportunity: scans the watchlist and publishes the
/// strongest scored pair.
pub async fn handle_best_opportunity(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> HandlerResult {
    info!(
        "Handling /best_opportunity over {} symbols in chat {}",
        state.universe.len(),
        msg.chat.id
    );

    let processing = bot
        .send_message(
            msg.chat.id,
            format!("⏳ Scanning {} pairs...", state.universe.len()),
        )
        .await?;

    let Some(opportunity) = state.analyzer.best_opportunity(&state.universe).await else {
        bot.edit_message_text(
            msg.chat.id,
            processing.id,
            "🤷 No opportunities found: no pair had usable market data.",
        )
        .await?;
        return Ok(());
    };

    let report = render_opportunity(&opportunity);
    let symbol = opportunity.result.symbol.to_string();
    let status = match state.delivery.publish(&report).await {
        Ok(()) => format!("✅ Best opportunity ({}) published to the channel.", symbol),
        Err(e) => format!(
            "⚠️ Found {} but delivery failed: {}\n\n{}",
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
