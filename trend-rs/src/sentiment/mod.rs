//! Social sentiment
//!
//! Recent posts mentioning an asset are scored with a [`PolarityScorer`],
//! averaged and bucketed. Every failure degrades to [`Sentiment::Neutral`].

pub mod lexicon;
pub mod reddit;

pub use lexicon::*;
pub use reddit::*;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Posts requested per assessment
pub const POST_LIMIT: usize = 50;

/// Averages beyond +/- this value leave the neutral bucket
pub const NEUTRAL_BAND: f64 = 0.05;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("sentiment source credentials are not configured")]
    MissingCredentials,
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("sentiment source returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected payload: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Bucket an average comparative score
    pub fn from_average(average: f64) -> Self {
        if average > NEUTRAL_BAND {
            Sentiment::Positive
        } else if average < -NEUTRAL_BAND {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentReading {
    pub sentiment: Sentiment,
    pub average: f64,
    pub posts: usize,
}

impl SentimentReading {
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            average: 0.0,
            posts: 0,
        }
    }
}

/// Source of recent social posts
#[async_trait]
pub trait SentimentSource: Send + Sync {
    fn name(&self) -> &str;

    /// Up to `limit` recent post texts matching `query`
    async fn recent_posts(&self, query: &str, limit: usize) -> Result<Vec<String>, SentimentError>;
}

/// Average of per-post comparative scores; 0 for no posts
pub fn average_polarity<S: AsRef<str>>(scorer: &dyn PolarityScorer, posts: &[S]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    let total: f64 = posts.iter().map(|p| scorer.comparative(p.as_ref())).sum();
    total / posts.len() as f64
}

pub struct SentimentEngine {
    source: Box<dyn SentimentSource>,
    scorer: Box<dyn PolarityScorer>,
}

impl SentimentEngine {
    pub fn new(source: Box<dyn SentimentSource>, scorer: Box<dyn PolarityScorer>) -> Self {
        Self { source, scorer }
    }

    /// Engine with the built-in lexicon scorer
    pub fn with_lexicon(source: Box<dyn SentimentSource>) -> Self {
        Self::new(source, Box::new(LexiconScorer::new()))
    }

    /// Bucketed sentiment for an asset name; never fails
    pub async fn assess(&self, asset_name: &str) -> Sentiment {
        self.measure(asset_name).await.sentiment
    }

    /// Like [`assess`](Self::assess) but also returns the average and post count
    pub async fn measure(&self, asset_name: &str) -> SentimentReading {
        let posts = match self.source.recent_posts(asset_name, POST_LIMIT).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Sentiment for '{}' degraded to NEUTRAL ({}): {}", asset_name, self.source.name(), e);
                return SentimentReading::neutral();
            }
        };

        let average = average_polarity(self.scorer.as_ref(), &posts);
        let reading = SentimentReading {
            sentiment: Sentiment::from_average(average),
            average,
            posts: posts.len(),
        };
        info!(
            "Sentiment for '{}': {} (avg {:.4} over {} posts)",
            asset_name, reading.sentiment, reading.average, reading.posts
        );
        reading
    }
}
