use teloxide::types::Chat;
use crate::domain::ChannelId;

/// A chat as the relocation engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Constructor)]
pub struct Channel {
    pub id: ChannelId,
    pub text_capable: bool,
    pub display_name: String,
}

impl From<&Chat> for Channel {
    fn from(chat: &Chat) -> Self {
        let display_name = chat.title()
            .map(ToOwned::to_owned)
            .or_else(|| chat.username().map(|username| format!("@{username}")))
            .unwrap_or_else(|| chat.id.to_string());
        Self {
            id: chat.id.into(),
            // notices make sense only where other members can post below them
            text_capable: chat.is_group() || chat.is_supergroup(),
            display_name,
        }
    }
}
