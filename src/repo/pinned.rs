use std::fmt::Debug;
use std::sync::Arc;
use flurry::HashMap;
use crate::domain::{ChannelId, PinnedRecord};

/// Authoritative mapping from a chat to its currently pinned notice.
/// Implementations never fail and never touch the transport.
pub trait PinnedRecords : Debug + Clone + Send + Sync + 'static {
    fn get(&self, channel_id: ChannelId) -> Option<PinnedRecord>;

    /// Overwrites any existing record of the chat.
    fn put(&self, channel_id: ChannelId, record: PinnedRecord);

    fn remove(&self, channel_id: ChannelId);
}

/// Keeps records in memory only; they're gone after a restart.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPinnedRecords {
    inner_map: Arc<HashMap<ChannelId, PinnedRecord>>
}

impl PinnedRecords for InMemoryPinnedRecords {

    #[tracing::instrument]
    fn get(&self, channel_id: ChannelId) -> Option<PinnedRecord> {
        self.inner_map.get(&channel_id, &self.inner_map.guard()).cloned()
    }

    #[tracing::instrument]
    fn put(&self, channel_id: ChannelId, record: PinnedRecord) {
        log::debug!("pinned record of {channel_id} now points to message {}", record.message_id);
        self.inner_map.insert(channel_id, record, &self.inner_map.guard());
    }

    #[tracing::instrument]
    fn remove(&self, channel_id: ChannelId) {
        if self.inner_map.remove(&channel_id, &self.inner_map.guard()).is_some() {
            log::debug!("pinned record of {channel_id} was removed");
        }
    }
}
