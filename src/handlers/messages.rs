use teloxide::types::{Me, Message, User};
use crate::config::{AppConfig, FeatureToggles};
use crate::handlers::{HandlerResult, NoticeEngine};
use crate::handlers::utils::boundary::contained;
use crate::metrics;
use crate::relocation::{MessagePosted, RelocationOutcome};

pub async fn message_posted_handler(msg: Message, me: Me, engine: NoticeEngine, config: AppConfig) -> HandlerResult {
    contained("relocation", async move {
        let authored_by_system = is_authored_by_system(msg.from.as_ref(), msg.sender_chat.is_some(), &me, config.features);
        let event = MessagePosted::new(msg.chat.id.into(), authored_by_system);
        match engine.on_channel_message(event).await {
            RelocationOutcome::Relocated { .. } => metrics::RELOCATIONS.relocated.inc(),
            RelocationOutcome::Dropped => metrics::RELOCATIONS.dropped.inc(),
            RelocationOutcome::SelfAuthored | RelocationOutcome::NothingPinned => {}
        }
        Ok(())
    }).await
}

/// Messages sent on behalf of a chat (anonymous administrators, linked channels) are
/// carried by service bot accounts but written by people.
fn is_authored_by_system(from: Option<&User>, has_sender_chat: bool, me: &User, features: FeatureToggles) -> bool {
    match from {
        _ if has_sender_chat => false,
        Some(user) if user.id == me.id => true,
        Some(user) => features.ignore_other_bots && user.is_bot,
        None => false
    }
}
