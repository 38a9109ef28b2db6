//! The protocol which keeps a notice at the bottom of a chat.
//!
//! A chat cannot be reordered, so a notice is "moved" by deleting the message that
//! displays it and sending the same content again. Every transition that would leave
//! the engine tracking a message which may not exist ends without a record instead.

#[cfg(test)]
mod test;

use derive_more::{Constructor, Display, Error};
use crate::domain::{Announcement, Channel, ChannelId, NoticeMessageId, PinnedRecord};
use crate::gateway::{Gateway, TransportError};
use crate::notice::NoticeStyle;
use crate::repo::PinnedRecords;

#[derive(Debug, Display, Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeError {
    /// The chat cannot carry a notice.
    InvalidTarget,
    /// There is nothing to clear. A normal negative result rather than a failure.
    NothingPinned,
    #[display("SendFailed({_0})")]
    SendFailed(TransportError),
    #[display("DeleteFailed({_0})")]
    DeleteFailed(TransportError),
}

/// An inbound "new message in a chat" event, tagged at the transport boundary.
#[derive(Debug, Clone, Copy, Constructor)]
pub struct MessagePosted {
    pub channel_id: ChannelId,
    pub authored_by_system: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationOutcome {
    SelfAuthored,
    NothingPinned,
    Relocated {
        previous: NoticeMessageId,
        current: NoticeMessageId,
    },
    /// The notice couldn't be reposted and is not tracked anymore.
    Dropped,
}

#[derive(Clone, Debug, Constructor)]
pub struct RelocationEngine<G: Gateway, R: PinnedRecords> {
    gateway: G,
    records: R,
    style: NoticeStyle,
}

impl <G: Gateway, R: PinnedRecords> RelocationEngine<G, R> {

    /// Posts the announcement as the newest message of the chat, replacing the previous notice.
    /// Returns the display name of the chat.
    #[tracing::instrument(skip(self))]
    pub async fn set_announcement(&self, channel: &Channel, announcement: Announcement) -> Result<String, NoticeError> {
        if !channel.text_capable {
            return Err(NoticeError::InvalidTarget)
        }

        if let Some(existing) = self.records.get(channel.id) {
            self.delete_or_log(channel.id, existing.message_id).await;
        }

        match self.send(channel.id, &announcement).await {
            Ok(message_id) => {
                log::info!("a notice was set in {} as message {message_id}", channel.id);
                self.records.put(channel.id, PinnedRecord::new(channel.id, message_id, announcement));
                Ok(channel.display_name.clone())
            }
            Err(e) => {
                self.records.remove(channel.id);
                Err(NoticeError::SendFailed(e))
            }
        }
    }

    /// Removes the notice of the chat. The record is forgotten even if the message
    /// couldn't be deleted.
    #[tracing::instrument(skip(self))]
    pub async fn clear_announcement(&self, channel: &Channel) -> Result<String, NoticeError> {
        if !channel.text_capable {
            return Err(NoticeError::InvalidTarget)
        }

        let existing = self.records.get(channel.id)
            .ok_or(NoticeError::NothingPinned)?;
        let delete_result = self.gateway.delete_message(channel.id, existing.message_id).await;
        self.records.remove(channel.id);
        match delete_result {
            Ok(()) => {
                log::info!("the notice of {} was cleared", channel.id);
                Ok(channel.display_name.clone())
            }
            Err(e) => {
                log::error!("couldn't delete the notice {} in {}: {e}", existing.message_id, channel.id);
                Err(NoticeError::DeleteFailed(e))
            }
        }
    }

    /// Moves the notice of the chat below the new message, if there is a notice.
    #[tracing::instrument(skip(self))]
    pub async fn on_channel_message(&self, event: MessagePosted) -> RelocationOutcome {
        if event.authored_by_system {
            return RelocationOutcome::SelfAuthored
        }
        let existing = match self.records.get(event.channel_id) {
            Some(record) => record,
            None => return RelocationOutcome::NothingPinned
        };

        let previous = existing.message_id;
        self.delete_or_log(event.channel_id, previous).await;

        match self.send(event.channel_id, &existing.announcement).await {
            Ok(current) => {
                log::debug!("the notice of {} was relocated: {previous} -> {current}", event.channel_id);
                self.records.put(event.channel_id, existing.relocated(current));
                RelocationOutcome::Relocated { previous, current }
            }
            Err(_) => {
                log::warn!("the notice of {} is not tracked anymore", event.channel_id);
                self.records.remove(event.channel_id);
                RelocationOutcome::Dropped
            }
        }
    }

    async fn send(&self, channel_id: ChannelId, announcement: &Announcement) -> Result<NoticeMessageId, TransportError> {
        let card = self.style.render(announcement);
        self.gateway.send_notice(channel_id, &card)
            .await
            .inspect_err(|e| log::error!("couldn't send a notice to {channel_id}: {e}"))
    }

    async fn delete_or_log(&self, channel_id: ChannelId, message_id: NoticeMessageId) {
        if let Err(e) = self.gateway.delete_message(channel_id, message_id).await {
            log::error!("couldn't delete the previous notice {message_id} in {channel_id}: {e}");
        }
    }
}
