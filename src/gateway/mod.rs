mod telegram;

use async_trait::async_trait;
use derive_more::{Display, Error};
use crate::domain::{ChannelId, NoticeMessageId};
use crate::notice::NoticeCard;

pub use telegram::TelegramGateway;

#[derive(Debug, Display, Error)]
#[display("TransportError({message})")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl ToString) -> Self {
        Self { message: message.to_string() }
    }
}

impl From<teloxide::RequestError> for TransportError {
    fn from(value: teloxide::RequestError) -> Self {
        Self::new(value)
    }
}

/// Outbound half of the chat transport.
#[async_trait]
pub trait Gateway : Clone + Send + Sync + 'static {
    async fn send_notice(&self, channel_id: ChannelId, card: &NoticeCard) -> Result<NoticeMessageId, TransportError>;

    /// Fails if the message is already gone or the bot is not allowed to delete it.
    async fn delete_message(&self, channel_id: ChannelId, message_id: NoticeMessageId) -> Result<(), TransportError>;
}
