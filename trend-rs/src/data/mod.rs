//! Data management module
//!
//! Candle model, pair identifiers and the in-memory candle cache.

pub mod cache;
pub mod candle;
pub mod symbol;

pub use cache::*;
pub use candle::*;
pub use symbol::*;
