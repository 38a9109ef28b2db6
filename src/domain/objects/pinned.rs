use crate::domain::{Announcement, ChannelId, NoticeMessageId};

/// The live binding between a chat and the message currently displaying its notice.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Constructor)]
pub struct PinnedRecord {
    pub channel_id: ChannelId,
    pub message_id: NoticeMessageId,
    pub announcement: Announcement,
}

impl PinnedRecord {
    /// The same content reposted as another message.
    pub fn relocated(self, message_id: NoticeMessageId) -> Self {
        Self { message_id, ..self }
    }
}
