//! Best-candidate selection across a symbol universe

use crate::sentiment::SentimentReading;
use crate::strategy::TrendResult;
use serde::Serialize;

/// Selected result plus a fresh sentiment reading for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub result: TrendResult,
    pub sentiment: SentimentReading,
}

/// Result with the highest `max(long, short)`; the first one seen wins ties.
pub fn select_best<I>(results: I) -> Option<TrendResult>
where
    I: IntoIterator<Item = TrendResult>,
{
    results.into_iter().fold(None, |best, candidate| match best {
        Some(best) if best.best_score() >= candidate.best_score() => Some(best),
        _ => Some(candidate),
    })
}
