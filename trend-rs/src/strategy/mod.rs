//! Signal scoring module
//!
//! Decision engine (indicators + sentiment into long/short scores with
//! ATR-based exits) and best-opportunity selection.

pub mod decision;
pub mod selector;
pub mod signal;

pub use decision::*;
pub use selector::*;
pub use signal::*;
