use rust_i18n::t;
use teloxide::Bot;
use teloxide::macros::BotCommands;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, Message, Recipient};
use crate::domain::{Announcement, Channel, LanguageCode};
use crate::handlers::{acknowledge, Acknowledgment, HandlerResult, NoticeEngine};
use crate::handlers::utils::boundary::contained;
use crate::relocation::{MessagePosted, NoticeError};
use crate::{config, metrics};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum NoticeCommands {
    #[command(description = "setnotice")]
    SetNotice(String),
    #[command(description = "clearnotice")]
    ClearNotice(String),
}

/// The chat a command is applied to: the one it was sent to or another one,
/// given as the first argument (`@username` or a numeric id of a group).
#[derive(Debug, Clone, PartialEq, Eq)]
enum NoticeTarget {
    CurrentChat,
    Other(Recipient),
}

#[derive(strum_macros::Display)]
#[strum(serialize_all="snake_case")]
enum BeforeNoticeCheckErrors {
    TargetNotFound,
    NotAdmin,
    AdminCheckFailed,
}

pub async fn notice_cmd_handler(bot: Bot, msg: Message, cmd: NoticeCommands,
                                engine: NoticeEngine, config: config::AppConfig) -> HandlerResult {
    contained("notice command", async move {
        let lang_code = LanguageCode::from_maybe_user(msg.from.as_ref());
        let locale = lang_code.locale();
        let args = match &cmd {
            NoticeCommands::SetNotice(args) | NoticeCommands::ClearNotice(args) => args.as_str(),
        };
        let (target, rest) = split_target(args);
        let answer = match resolve_and_check(&bot, &msg, target).await {
            Ok(channel) => notice_cmd_impl(&engine, &channel, &cmd, rest, &locale).await,
            Err(e) => t!(&format!("errors.{e}"), locale = &locale),
        };

        let source = Channel::from(&msg.chat);
        if config.features.delete_command_messages && source.text_capable {
            if let Err(e) = bot.delete_message(msg.chat.id, msg.id).await {
                log::warn!("couldn't delete the command message {} in {}: {e}", msg.id.0, msg.chat.id);
            }
        }

        if acknowledge(&bot, &msg, answer).await? == Acknowledgment::InChat && source.text_capable {
            // the answer now lies below the notice of the chat it was sent to
            engine.on_channel_message(MessagePosted::new(source.id, false)).await;
        }
        Ok(())
    }).await
}

async fn notice_cmd_impl(engine: &NoticeEngine, channel: &Channel, cmd: &NoticeCommands, args: &str, locale: &str) -> String {
    match cmd {
        NoticeCommands::SetNotice(_) => {
            metrics::CMD_SET_NOTICE.invoked();
            let announcement = match Announcement::parse(args) {
                Ok(announcement) => announcement,
                Err(e) => {
                    log::debug!("invalid arguments of /setnotice: {e}");
                    return t!("commands.setnotice.usage", locale = locale)
                }
            };
            match engine.set_announcement(channel, announcement).await {
                Ok(name) => {
                    metrics::CMD_SET_NOTICE.finished();
                    t!("commands.setnotice.result", locale = locale,
                        chat = teloxide::utils::html::escape(&name))
                }
                Err(e) => error_answer(e, locale)
            }
        }
        NoticeCommands::ClearNotice(_) if !args.trim().is_empty() => {
            log::debug!("unexpected arguments of /clearnotice: {args}");
            t!("commands.clearnotice.usage", locale = locale)
        }
        NoticeCommands::ClearNotice(_) => {
            metrics::CMD_CLEAR_NOTICE.invoked();
            match engine.clear_announcement(channel).await {
                Ok(name) => {
                    metrics::CMD_CLEAR_NOTICE.finished();
                    t!("commands.clearnotice.result", locale = locale,
                        chat = teloxide::utils::html::escape(&name))
                }
                Err(e) => error_answer(e, locale)
            }
        }
    }
}

fn error_answer(err: NoticeError, locale: &str) -> String {
    match &err {
        NoticeError::NothingPinned | NoticeError::InvalidTarget => log::debug!("{err}"),
        NoticeError::SendFailed(_) | NoticeError::DeleteFailed(_) => log::error!("a notice command failed: {err}"),
    }
    let key: &'static str = (&err).into();
    t!(&format!("errors.{key}"), locale = locale)
}

/// Separates an explicit target from the rest of the arguments. Only `@username`
/// and negative ids are recognized, so an ordinary title is never taken for a chat.
fn split_target(args: &str) -> (NoticeTarget, &str) {
    let args = args.trim_start();
    let (first, rest) = args.split_once(char::is_whitespace)
        .unwrap_or((args, ""));
    let recipient = if first.len() > 1 && first.starts_with('@') {
        Some(Recipient::ChannelUsername(first.to_owned()))
    } else {
        first.parse::<i64>().ok()
            .filter(|id| id.is_negative())
            .map(|id| Recipient::Id(ChatId(id)))
    };
    match recipient {
        Some(recipient) => (NoticeTarget::Other(recipient), rest),
        None => (NoticeTarget::CurrentChat, args)
    }
}

async fn resolve_and_check(bot: &Bot, msg: &Message, target: NoticeTarget) -> Result<Channel, BeforeNoticeCheckErrors> {
    let channel = match target {
        NoticeTarget::CurrentChat => Channel::from(&msg.chat),
        NoticeTarget::Other(recipient) => {
            let chat = bot.get_chat(recipient.clone())
                .await
                .map_err(|e| {
                    log::info!("couldn't resolve the target chat {recipient:?}: {e}");
                    BeforeNoticeCheckErrors::TargetNotFound
                })?;
            Channel::from(&chat)
        }
    };

    match is_operator(bot, msg, &channel).await {
        Ok(true) => Ok(channel),
        Ok(false) => {
            log::info!("a notice command for {} from a non-administrator: {:?}", channel.id, msg.from.as_ref().map(|u| u.id));
            Err(BeforeNoticeCheckErrors::NotAdmin)
        }
        Err(e) => {
            log::error!("couldn't get administrators of {}: {e}", channel.id);
            Err(BeforeNoticeCheckErrors::AdminCheckFailed)
        }
    }
}

/// Administrators of the target group, including anonymous ones posting on behalf of it.
/// Chats that cannot carry a notice are not checked; the engine rejects them anyway.
async fn is_operator(bot: &Bot, msg: &Message, channel: &Channel) -> Result<bool, teloxide::RequestError> {
    if !channel.text_capable {
        return Ok(true)
    }
    if msg.sender_chat.as_ref().is_some_and(|chat| ChatId::from(channel.id) == chat.id) {
        return Ok(true)
    }
    let from_id = match msg.from.as_ref() {
        Some(user) => user.id,
        None => return Ok(false)
    };
    let invoked_by_admin = bot.get_chat_administrators(ChatId::from(channel.id))
        .await?
        .into_iter()
        .any(|member| member.user.id == from_id);
    Ok(invoked_by_admin)
}
