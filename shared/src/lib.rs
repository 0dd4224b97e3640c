pub mod config;

pub use config::{parse_channel_id, Config, ConfigError, RedditConfig};
