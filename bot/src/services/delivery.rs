//! Outbound messages to the configured channel

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::RequestError;
use tracing::{error, info};

#[derive(Clone)]
pub struct Delivery {
    bot: Bot,
    channel: ChatId,
}

impl Delivery {
    pub fn new(bot: Bot, channel_id: i64) -> Self {
        Self {
            bot,
            channel: ChatId(channel_id),
        }
    }

    pub fn channel(&self) -> ChatId {
        self.channel
    }

    /// Send an HTML message to the channel. Not retried.
    pub async fn publish(&self, text: &str) -> Result<(), RequestError> {
        match self
            .bot
            .send_message(self.channel, text)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(_) => {
                info!("Delivered message to channel {}", self.channel);
                Ok(())
            }
            Err(e) => {
                error!("Delivery to channel {} failed: {}", self.channel, e);
                Err(e)
            }
        }
    }
}
