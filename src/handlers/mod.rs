mod help;
mod notice;
mod messages;
pub mod utils;

use teloxide::Bot;
use teloxide::payloads::{SendMessage, SendMessageSetters};
use teloxide::requests::{JsonRequest, Requester};
use teloxide::types::{ChatId, Message, ReplyParameters};
use teloxide::types::ParseMode::Html;

pub use help::*;
pub use notice::*;
pub use messages::*;
use crate::gateway::TelegramGateway;
use crate::relocation::RelocationEngine;
use crate::repo::InMemoryPinnedRecords;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub type NoticeEngine = RelocationEngine<TelegramGateway, InMemoryPinnedRecords>;

pub fn reply_html<T: Into<String>>(bot: Bot, msg: &Message, answer: T) -> JsonRequest<SendMessage> {
    let mut answer = bot.send_message(msg.chat.id, answer);
    answer.parse_mode = Some(Html);
    if msg.chat.is_group() || msg.chat.is_supergroup() {
        answer.reply_parameters.replace(ReplyParameters::new(msg.id));
    }
    answer
}

/// Where the answer to a command has been delivered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Acknowledgment {
    Private,
    InChat,
}

/// Answers the requester in a private chat. If the bot cannot write to the user
/// (they have never started it), the answer is sent to the chat of the command.
pub async fn acknowledge(bot: &Bot, msg: &Message, answer: String) -> Result<Acknowledgment, teloxide::RequestError> {
    if msg.chat.is_private() {
        reply_html(bot.clone(), msg, answer).await?;
        return Ok(Acknowledgment::Private)
    }

    // anonymous administrators are represented by a service bot account
    if let Some(user) = msg.from.as_ref().filter(|u| !u.is_bot) {
        let resp = bot.send_message(ChatId::from(user.id), answer.clone())
            .parse_mode(Html)
            .await;
        match resp {
            Ok(_) => return Ok(Acknowledgment::Private),
            Err(e) => log::info!("couldn't acknowledge {} privately, answering in the chat {}: {e}", user.id, msg.chat.id)
        }
    }

    bot.send_message(msg.chat.id, answer)
        .parse_mode(Html)
        .await?;
    Ok(Acknowledgment::InChat)
}

pub mod checks {
    use teloxide::types::Message;
    use crate::domain::Channel;

    /// Chats where a notice can be kept.
    pub fn is_group_chat(msg: Message) -> bool {
        Channel::from(&msg.chat).text_capable
    }

    pub fn is_private_chat(msg: Message) -> bool {
        msg.chat.is_private()
    }
}
