pub mod delivery;
pub mod report;
