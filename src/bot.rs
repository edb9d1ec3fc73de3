use crate::config::Config;
use crate::messaging::{ChatRef, InboundMessage, MessageSource, Replier};
use crate::router;
use crate::weather::OpenWeatherClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{ChatId, UpdateKind};
use tracing::{info, warn};

const POLL_TIMEOUT_SECS: u32 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

pub async fn start_bot(bot: Bot, config: Config) -> Result<()> {
    info!("Bot is starting...");

    // The username lets the router ignore commands addressed to other bots.
    let me = match bot.get_me().await {
        Ok(me) => {
            info!("Authorized as @{}", me.username());
            Some(me)
        }
        Err(err) => {
            warn!("Failed to fetch bot identity: {} (accepting any mention)", err);
            None
        }
    };

    let weather = OpenWeatherClient::new(
        config.weather_base_url.clone(),
        config.weather_api_key.clone(),
    );
    let mut source = TelegramSource::new(bot.clone());
    let replier = TelegramReplier::new(bot);

    router::run(
        &mut source,
        &replier,
        &weather,
        me.as_ref().map(|me| me.username()),
    )
    .await
}

/// Long-polls `getUpdates`, handing out text messages one at a time.
/// Transport errors are not fatal: the source waits and polls again.
pub struct TelegramSource {
    bot: Bot,
    offset: i32,
    pending: VecDeque<InboundMessage>,
}

impl TelegramSource {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            offset: 0,
            pending: VecDeque::new(),
        }
    }
}

#[async_trait]
impl MessageSource for TelegramSource {
    async fn next_message(&mut self) -> Result<Option<InboundMessage>> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Ok(Some(message));
            }

            let updates = self
                .bot
                .get_updates()
                .offset(self.offset)
                .timeout(POLL_TIMEOUT_SECS)
                .await;

            match updates {
                Ok(updates) => {
                    for update in updates {
                        self.offset = self.offset.max(update.id + 1);
                        if let UpdateKind::Message(message) = update.kind {
                            if let Some(text) = message.text() {
                                self.pending.push_back(InboundMessage {
                                    chat: ChatRef(message.chat.id.0),
                                    text: text.to_string(),
                                });
                            }
                        }
                    }
                }
                Err(err) => {
                    warn!(
                        "Failed to poll for updates: {} (retrying in {}s)",
                        err,
                        RETRY_DELAY.as_secs()
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
}

pub struct TelegramReplier {
    bot: Bot,
}

impl TelegramReplier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Replier for TelegramReplier {
    async fn reply(&self, chat: ChatRef, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.0), text)
            .await
            .context("Failed to send message to Telegram")?;
        Ok(())
    }
}
