use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use crate::domain::{Announcement, Channel, ChannelId, NoticeMessageId};
use crate::gateway::{Gateway, TransportError};
use crate::notice::{NoticeCard, NoticeStyle};
use crate::relocation::{MessagePosted, NoticeError, RelocationEngine, RelocationOutcome};
use crate::repo::{InMemoryPinnedRecords, PinnedRecords};

const CHANNEL_ID: ChannelId = ChannelId(-1001);
const OTHER_CHANNEL_ID: ChannelId = ChannelId(-1002);
const CHANNEL_NAME: &str = "chan-1";

#[derive(Debug, Clone, PartialEq, Eq)]
enum GatewayCall {
    Send(ChannelId, String),
    Delete(ChannelId, NoticeMessageId),
}

#[derive(Debug, Default)]
struct FakeGatewayState {
    last_message_id: i32,
    calls: Vec<GatewayCall>,
    fail_sends: bool,
    fail_deletes: bool,
}

/// Records every call and issues increasing message ids.
#[derive(Debug, Clone, Default)]
struct FakeGateway {
    state: Arc<Mutex<FakeGatewayState>>
}

impl FakeGateway {
    fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().expect("poisoned").calls.clone()
    }

    fn fail_sends(&self, value: bool) {
        self.state.lock().expect("poisoned").fail_sends = value
    }

    fn fail_deletes(&self, value: bool) {
        self.state.lock().expect("poisoned").fail_deletes = value
    }

    fn forget_calls(&self) {
        self.state.lock().expect("poisoned").calls.clear()
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn send_notice(&self, channel_id: ChannelId, card: &NoticeCard) -> Result<NoticeMessageId, TransportError> {
        let mut state = self.state.lock().expect("poisoned");
        state.calls.push(GatewayCall::Send(channel_id, card.html().to_owned()));
        if state.fail_sends {
            return Err(TransportError::new("Forbidden: bot was kicked from the supergroup chat"))
        }
        state.last_message_id += 1;
        Ok(NoticeMessageId::new(state.last_message_id))
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: NoticeMessageId) -> Result<(), TransportError> {
        let mut state = self.state.lock().expect("poisoned");
        state.calls.push(GatewayCall::Delete(channel_id, message_id));
        if state.fail_deletes {
            return Err(TransportError::new("Bad Request: message to delete not found"))
        }
        Ok(())
    }
}

type TestEngine = RelocationEngine<FakeGateway, InMemoryPinnedRecords>;

fn engine() -> (TestEngine, FakeGateway, InMemoryPinnedRecords) {
    let gateway = FakeGateway::default();
    let records = InMemoryPinnedRecords::default();
    let engine = RelocationEngine::new(gateway.clone(), records.clone(), NoticeStyle::default());
    (engine, gateway, records)
}

fn channel(id: ChannelId) -> Channel {
    Channel::new(id, true, CHANNEL_NAME.to_owned())
}

fn rules() -> Announcement {
    Announcement::new("Rules", "Be kind").expect("valid announcement")
}

fn rendered(announcement: &Announcement) -> String {
    NoticeStyle::default().render(announcement).html().to_owned()
}

fn human_message(channel_id: ChannelId) -> MessagePosted {
    MessagePosted::new(channel_id, false)
}

#[tokio::test]
async fn test_set() {
    let (engine, gateway, records) = engine();

    let name = engine.set_announcement(&channel(CHANNEL_ID), rules())
        .await.expect("couldn't set an announcement");
    assert_eq!(name, CHANNEL_NAME);

    let record = records.get(CHANNEL_ID).expect("record must be stored");
    assert_eq!(record.channel_id, CHANNEL_ID);
    assert_eq!(record.announcement, rules());
    assert_eq!(gateway.calls(), vec![GatewayCall::Send(CHANNEL_ID, rendered(&rules()))]);
}

#[tokio::test]
async fn test_set_replaces_previous() {
    let (engine, gateway, records) = engine();
    let chan = channel(CHANNEL_ID);

    engine.set_announcement(&chan, rules())
        .await.expect("couldn't set the first announcement");
    let first = records.get(CHANNEL_ID).expect("first record").message_id;

    let news = Announcement::new("News", "Release on Friday").unwrap();
    engine.set_announcement(&chan, news.clone())
        .await.expect("couldn't set the second announcement");
    let second = records.get(CHANNEL_ID).expect("second record");

    assert_ne!(second.message_id, first);
    assert_eq!(second.announcement, news);
    assert_eq!(gateway.calls()[1..], [
        GatewayCall::Delete(CHANNEL_ID, first),
        GatewayCall::Send(CHANNEL_ID, rendered(&news)),
    ]);
}

#[tokio::test]
async fn test_set_ignores_failed_deletion() {
    let (engine, gateway, records) = engine();
    let chan = channel(CHANNEL_ID);

    engine.set_announcement(&chan, rules())
        .await.expect("couldn't set the first announcement");
    gateway.fail_deletes(true);
    engine.set_announcement(&chan, rules())
        .await.expect("a failed deletion must not abort the operation");

    assert_eq!(records.get(CHANNEL_ID).map(|r| r.message_id), Some(NoticeMessageId::new(2)));
}

#[tokio::test]
async fn test_set_invalid_target() {
    let (engine, gateway, records) = engine();
    let private_chat = Channel::new(ChannelId(42), false, "John".to_owned());

    let result = engine.set_announcement(&private_chat, rules()).await;
    assert!(matches!(result, Err(NoticeError::InvalidTarget)));
    assert!(records.get(private_chat.id).is_none());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_set_send_failed() {
    let (engine, gateway, records) = engine();
    let chan = channel(CHANNEL_ID);

    engine.set_announcement(&chan, rules())
        .await.expect("couldn't set the first announcement");
    let previous = records.get(CHANNEL_ID).expect("first record").message_id;

    gateway.fail_sends(true);
    let result = engine.set_announcement(&chan, rules()).await;

    assert!(matches!(result, Err(NoticeError::SendFailed(_))));
    assert!(records.get(CHANNEL_ID).is_none());
    // the prior notice had already been deleted before the failed send
    assert_eq!(gateway.calls()[1], GatewayCall::Delete(CHANNEL_ID, previous));
}

#[tokio::test]
async fn test_clear_nothing_pinned() {
    let (engine, gateway, _) = engine();

    let result = engine.clear_announcement(&channel(CHANNEL_ID)).await;
    assert!(matches!(result, Err(NoticeError::NothingPinned)));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_clear_invalid_target() {
    let (engine, gateway, _) = engine();
    let private_chat = Channel::new(ChannelId(42), false, "John".to_owned());

    let result = engine.clear_announcement(&private_chat).await;
    assert!(matches!(result, Err(NoticeError::InvalidTarget)));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_clear_delete_failed() {
    let (engine, gateway, records) = engine();
    let chan = channel(CHANNEL_ID);

    engine.set_announcement(&chan, rules())
        .await.expect("couldn't set an announcement");
    gateway.fail_deletes(true);

    let result = engine.clear_announcement(&chan).await;
    assert!(matches!(result, Err(NoticeError::DeleteFailed(_))));
    assert!(records.get(CHANNEL_ID).is_none(), "the record must be forgotten regardless");

    let result = engine.clear_announcement(&chan).await;
    assert!(matches!(result, Err(NoticeError::NothingPinned)));
}

#[tokio::test]
async fn test_message_without_notice_is_noop() {
    let (engine, gateway, records) = engine();
    engine.set_announcement(&channel(OTHER_CHANNEL_ID), rules())
        .await.expect("couldn't set an announcement");
    gateway.forget_calls();

    let outcome = engine.on_channel_message(human_message(CHANNEL_ID)).await;
    assert_eq!(outcome, RelocationOutcome::NothingPinned);
    assert!(gateway.calls().is_empty());
    assert!(records.get(CHANNEL_ID).is_none());
}

#[tokio::test]
async fn test_relocation() {
    let (engine, gateway, records) = engine();
    engine.set_announcement(&channel(CHANNEL_ID), rules())
        .await.expect("couldn't set an announcement");
    let before = records.get(CHANNEL_ID).expect("record before");
    gateway.forget_calls();

    let outcome = engine.on_channel_message(human_message(CHANNEL_ID)).await;
    let after = records.get(CHANNEL_ID).expect("record after");

    assert_eq!(outcome, RelocationOutcome::Relocated { previous: before.message_id, current: after.message_id });
    assert_ne!(after.message_id, before.message_id);
    assert_eq!(after.announcement, before.announcement);
    assert_eq!(gateway.calls(), vec![
        GatewayCall::Delete(CHANNEL_ID, before.message_id),
        GatewayCall::Send(CHANNEL_ID, rendered(&rules())),
    ]);
}

#[tokio::test]
async fn test_self_authored_messages_never_relocate() {
    let (engine, gateway, records) = engine();
    engine.set_announcement(&channel(CHANNEL_ID), rules())
        .await.expect("couldn't set an announcement");
    let before = records.get(CHANNEL_ID).expect("record before");
    gateway.forget_calls();

    for _ in 0..10 {
        let outcome = engine.on_channel_message(MessagePosted::new(CHANNEL_ID, true)).await;
        assert_eq!(outcome, RelocationOutcome::SelfAuthored);
    }
    assert!(gateway.calls().is_empty());
    assert_eq!(records.get(CHANNEL_ID), Some(before));
}

#[tokio::test]
async fn test_relocation_ignores_failed_deletion() {
    let (engine, gateway, records) = engine();
    engine.set_announcement(&channel(CHANNEL_ID), rules())
        .await.expect("couldn't set an announcement");
    gateway.fail_deletes(true);

    let outcome = engine.on_channel_message(human_message(CHANNEL_ID)).await;
    assert!(matches!(outcome, RelocationOutcome::Relocated { .. }));
    assert_eq!(records.get(CHANNEL_ID).map(|r| r.message_id), Some(NoticeMessageId::new(2)));
}

#[tokio::test]
async fn test_relocation_send_failed_drops_record() {
    let (engine, gateway, records) = engine();
    engine.set_announcement(&channel(CHANNEL_ID), rules())
        .await.expect("couldn't set an announcement");
    gateway.fail_sends(true);

    let outcome = engine.on_channel_message(human_message(CHANNEL_ID)).await;
    assert_eq!(outcome, RelocationOutcome::Dropped);
    assert!(records.get(CHANNEL_ID).is_none());

    gateway.forget_calls();
    let outcome = engine.on_channel_message(human_message(CHANNEL_ID)).await;
    assert_eq!(outcome, RelocationOutcome::NothingPinned);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_channels_are_independent() {
    let (engine, _, records) = engine();
    let news = Announcement::new("News", "Release on Friday").unwrap();
    engine.set_announcement(&channel(CHANNEL_ID), rules())
        .await.expect("couldn't set the first announcement");
    engine.set_announcement(&channel(OTHER_CHANNEL_ID), news.clone())
        .await.expect("couldn't set the second announcement");
    let other_before = records.get(OTHER_CHANNEL_ID).expect("other record");

    engine.on_channel_message(human_message(CHANNEL_ID)).await;
    engine.clear_announcement(&channel(CHANNEL_ID))
        .await.expect("couldn't clear the first announcement");

    assert!(records.get(CHANNEL_ID).is_none());
    assert_eq!(records.get(OTHER_CHANNEL_ID), Some(other_before));
}

#[tokio::test]
async fn test_full_lifecycle() {
    let (engine, gateway, records) = engine();
    let chan = channel(CHANNEL_ID);

    engine.set_announcement(&chan, rules())
        .await.expect("couldn't set an announcement");
    let msg_a = records.get(CHANNEL_ID).expect("record after set");
    assert_eq!(msg_a.announcement, rules());

    engine.on_channel_message(human_message(CHANNEL_ID)).await;
    let msg_b = records.get(CHANNEL_ID).expect("record after relocation");
    assert_ne!(msg_b.message_id, msg_a.message_id);
    assert_eq!(msg_b.announcement, rules());

    let name = engine.clear_announcement(&chan)
        .await.expect("couldn't clear the announcement");
    assert_eq!(name, CHANNEL_NAME);
    assert!(records.get(CHANNEL_ID).is_none());

    assert_eq!(gateway.calls(), vec![
        GatewayCall::Send(CHANNEL_ID, rendered(&rules())),
        GatewayCall::Delete(CHANNEL_ID, msg_a.message_id),
        GatewayCall::Send(CHANNEL_ID, rendered(&rules())),
        GatewayCall::Delete(CHANNEL_ID, msg_b.message_id),
    ]);
}
