use async_trait::async_trait;
use teloxide::Bot;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, MessageId};
use teloxide::types::ParseMode::Html;
use crate::domain::{ChannelId, NoticeMessageId};
use crate::gateway::{Gateway, TransportError};
use crate::metrics;
use crate::notice::NoticeCard;

#[derive(Clone, Debug)]
pub struct TelegramGateway {
    bot: Bot,
    silent: bool,
}

impl TelegramGateway {
    /// `silent` notices are delivered without a notification sound.
    pub fn new(bot: Bot, silent: bool) -> Self {
        Self { bot, silent }
    }
}

#[async_trait]
impl Gateway for TelegramGateway {
    async fn send_notice(&self, channel_id: ChannelId, card: &NoticeCard) -> Result<NoticeMessageId, TransportError> {
        self.bot.send_message(ChatId::from(channel_id), card.html())
            .parse_mode(Html)
            .disable_notification(self.silent)
            .await
            .map(|msg| msg.id.into())
            .map_err(|e| {
                metrics::GATEWAY_FAILURES.send.inc();
                e.into()
            })
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: NoticeMessageId) -> Result<(), TransportError> {
        self.bot.delete_message(ChatId::from(channel_id), MessageId::from(message_id))
            .await
            .map(|_| ())
            .map_err(|e| {
                metrics::GATEWAY_FAILURES.delete.inc();
                e.into()
            })
    }
}
