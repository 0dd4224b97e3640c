//! Telegram HTML rendering of trend results

use teloxide::utils::html::escape;
use trend_rs::prelude::{Direction, Opportunity, ProviderStatus, SentimentReading, TrendResult};

/// Price with precision scaled to its magnitude
pub fn fmt_price(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1000.0 {
        format!("{:.2}", value)
    } else if abs >= 1.0 {
        format!("{:.4}", value)
    } else {
        format!("{:.8}", value)
    }
}

fn fmt_pct(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn fmt_sentiment(reading: &SentimentReading) -> String {
    format!(
        "{} (avg {:.4}, {} posts)",
        reading.sentiment, reading.average, reading.posts
    )
}

fn header(result: &TrendResult) -> String {
    let icon = match result.direction() {
        Direction::Long => "📈",
        Direction::Short => "📉",
        Direction::Hold => "⏸",
    };
    format!(
        "{} <b>{}</b> · {}",
        icon,
        escape(&result.symbol.to_string()),
        result.direction()
    )
}

/// Full report for one result, using `sentiment` when given and the
/// result's own reading otherwise
pub fn render_trend(result: &TrendResult, sentiment: Option<&SentimentReading>) -> String {
    let Some(snapshot) = result.indicators else {
        return format!(
            "{}\nNot enough price history to score this pair (need at least {} hourly candles).",
            header(result),
            trend_rs::indicators::MIN_CANDLES
        );
    };

    let mut text = header(result);
    text.push_str(&format!("\nPrice: <code>{}</code>", fmt_price(snapshot.price)));
    text.push_str(&format!(
        "\nLong score: <b>{}</b> | Short score: <b>{}</b>",
        fmt_pct(result.long_score),
        fmt_pct(result.short_score)
    ));
    if let (Some(stop_loss), Some(take_profit)) = (result.stop_loss, result.take_profit) {
        text.push_str(&format!("\n🛑 Stop-loss: <code>{}</code>", fmt_price(stop_loss)));
        text.push_str(&format!("\n🎯 Take-profit: <code>{}</code>", fmt_price(take_profit)));
    }
    text.push_str(&format!("\nATR(14): <code>{}</code>", fmt_price(result.atr)));

    text.push_str("\n\n<b>Indicators</b>");
    text.push_str(&format!(
        "\nEMA 12 / 26: {} / {}",
        fmt_price(snapshot.ema_fast),
        fmt_price(snapshot.ema_slow)
    ));
    text.push_str(&format!("\nRSI 14: {:.2}", snapshot.rsi));
    let signal = snapshot
        .macd_signal
        .map(|s| format!("{:.4}", s))
        .unwrap_or_else(|| "n/a".to_string());
    text.push_str(&format!("\nMACD: {:.4} (signal {})", snapshot.macd, signal));

    if let Some(reading) = sentiment.or(result.sentiment.as_ref()) {
        text.push_str(&format!("\nSentiment: {}", fmt_sentiment(reading)));
    }

    text.push_str("\n\n<i>Advisory only, not financial advice.</i>");
    text
}

pub fn render_opportunity(opportunity: &Opportunity) -> String {
    format!(
        "🏆 <b>Best opportunity</b>\n\n{}",
        render_trend(&opportunity.result, Some(&opportunity.sentiment))
    )
}

/// Provider and sentiment configuration summary
pub fn render_status(providers: &[ProviderStatus], sentiment_configured: bool) -> String {
    let mut text = String::from("<b>Data sources</b>");
    for (i, provider) in providers.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. {} {}",
            i + 1,
            escape(&provider.name),
            if provider.enabled { "✅" } else { "⚪ (no API key)" }
        ));
    }
    text.push_str(&format!(
        "\nSentiment: {}",
        if sentiment_configured { "✅ reddit" } else { "⚪ not configured (always NEUTRAL)" }
    ));
    text
}
