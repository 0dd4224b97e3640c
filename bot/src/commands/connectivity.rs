use chrono::Utc;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::services::report::render_status;
use crate::state::{AppState, HandlerResult};

/// Handler for /test_connectivity: sends a probe to the signal channel and
/// reports the outcome together with the data source status.
pub async fn handle_test_connectivity(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> HandlerResult {
    tracing::info!("Handling /test_connectivity in chat {}", msg.chat.id);

    let probe = format!(
        "🔌 Connectivity test from <b>{}</b> at {}",
        teloxide::utils::html::escape(&state.bot_name),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let outcome = match state.delivery.publish(&probe).await {
        Ok(()) => format!("✅ Channel {} reachable.", state.delivery.channel()),
        Err(e) => format!(
            "❌ Channel {} unreachable: {}",
            state.delivery.channel(),
            teloxide::utils::html::escape(&e.to_string())
        ),
    };
    let status = render_status(
        &state.analyzer.provider_statuses(),
        state.sentiment_configured,
    );

    bot.send_message(msg.chat.id, format!("{}\n\n{}", outcome, status))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
