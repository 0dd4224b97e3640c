use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};
use teloxide::utils::command::BotCommands;

use crate::state::{AppState, HandlerResult};

pub mod admin;
pub mod analyze;
pub mod connectivity;
pub mod opportunity;

pub use admin::handle_version;
pub use analyze::handle_analyze;
pub use connectivity::handle_test_connectivity;
pub use opportunity::handle_best_opportunity;

/// 📊 <b>TrendSignal</b>: available commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case")]
pub enum Command {
    /// Show this help
    Help,
    /// Start using the bot
    Start,
    /// Analyze a pair, e.g. /analyze eth (defaults to BTC)
    Analyze(String),
    /// Scan the watchlist and publish the strongest signal
    BestOpportunity,
    /// Send a test message to the signal channel
    TestConnectivity,
    /// Show build information
    Version,
}

pub async fn handle_help(bot: Bot, msg: Message, state: Arc<AppState>) -> HandlerResult {
    tracing::info!("Handling /help in chat {}", msg.chat.id);

    let text = format!(
        "🤖 <b>{}</b>\n\n\
        /analyze [symbol] - trend signal for one pair (default BTC)\n\
        /best_opportunity - strongest signal across {}\n\
        /test_connectivity - check delivery to the signal channel\n\
        /version - build information\n\n\
        Signals blend EMA 12/26, RSI 14, MACD 12/26/9 and Reddit sentiment, \
        dampened by ATR volatility. Advisory only.",
        teloxide::utils::html::escape(&state.bot_name),
        state
            .universe
            .iter()
            .map(|s| s.base())
            .collect::<Vec<_>>()
            .join(", ")
    );

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_invalid(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        format!("❓ Unknown command.\n\n{}", Command::descriptions()),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("/analyze eth", "trend_bot").unwrap(),
            Command::Analyze("eth".to_string())
        );
        assert_eq!(
            Command::parse("/analyze", "trend_bot").unwrap(),
            Command::Analyze(String::new())
        );
        assert_eq!(
            Command::parse("/best_opportunity", "trend_bot").unwrap(),
            Command::BestOpportunity
        );
        assert_eq!(
            Command::parse("/test_connectivity@trend_bot", "trend_bot").unwrap(),
            Command::TestConnectivity
        );
        assert!(Command::parse("/trade btc", "trend_bot").is_err());
    }
}
