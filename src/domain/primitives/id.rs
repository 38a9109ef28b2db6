use teloxide::types::{ChatId, MessageId};

macro_rules! id {
    ($name:ident, $value_type:ty) => {
        #[derive(
            Copy, Clone,
            Debug, derive_more::Display,
            Hash, PartialEq, Eq, PartialOrd, Ord,
            derive_more::Constructor, derive_more::From
        )]
        pub struct $name(pub $value_type);
    };
}

id!(ChannelId, i64);
id!(NoticeMessageId, i32);

impl From<ChatId> for ChannelId {
    fn from(chat_id: ChatId) -> Self {
        Self(chat_id.0)
    }
}

impl From<ChannelId> for ChatId {
    fn from(channel_id: ChannelId) -> Self {
        ChatId(channel_id.0)
    }
}

impl From<MessageId> for NoticeMessageId {
    fn from(message_id: MessageId) -> Self {
        Self(message_id.0)
    }
}

impl From<NoticeMessageId> for MessageId {
    fn from(message_id: NoticeMessageId) -> Self {
        MessageId(message_id.0)
    }
}
