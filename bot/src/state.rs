use shared::Config;
use std::sync::Arc;
use teloxide::Bot;
use trend_rs::prelude::*;

use crate::services::delivery::Delivery;

pub type HandlerResult = Result<(), anyhow::Error>;

#[derive(Clone)]
pub struct AppState {
    pub bot_name: String,
    pub analyzer: Arc<TrendAnalyzer>,
    pub delivery: Delivery,
    pub universe: Vec<Symbol>,
    pub sentiment_configured: bool,
}

impl AppState {
    pub fn new(config: &Config, bot: Bot) -> Result<Self, anyhow::Error> {
        let retry = RetryPolicy {
            backoff: config.retry_backoff,
            ..RetryPolicy::default()
        };
        let chain = ProviderChain::standard(config.cryptocompare_api_key.clone(), config.http_timeout, retry)?;

        let credentials = config.reddit.as_ref().map(|r| RedditCredentials {
            client_id: r.client_id.clone(),
            client_secret: r.client_secret.clone(),
            username: r.username.clone(),
            password: r.password.clone(),
        });
        let sentiment_configured = credentials.is_some();
        let reddit = RedditSource::new(
            credentials,
            config.sentiment_subreddit.clone(),
            config.reddit_user_agent.clone(),
            config.http_timeout,
        )?;
        let sentiment = SentimentEngine::with_lexicon(Box::new(reddit));

        tracing::info!(
            "Providers: {:?}; sentiment configured: {}",
            chain.statuses().iter().map(|p| (p.name.as_str(), p.enabled)).collect::<Vec<_>>(),
            sentiment_configured
        );

        Ok(AppState {
            bot_name: config.bot_name.clone(),
            analyzer: Arc::new(TrendAnalyzer::new(chain, sentiment, config.candle_limit)),
            delivery: Delivery::new(bot, config.channel_id),
            universe: universe(&config.symbol_universe),
            sentiment_configured,
        })
    }
}
