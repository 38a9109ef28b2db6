use teloxide::Bot;
use teloxide::macros::BotCommands;
use teloxide::types::Message;
use crate::domain::LanguageCode;
use crate::handlers::{HandlerResult, reply_html};
use crate::handlers::utils::boundary::contained;
use crate::help::HelpContainer;
use crate::metrics;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum HelpCommands {
    Start,
    #[command(description = "help")]
    Help,
}

pub async fn help_cmd_handler(bot: Bot, msg: Message, cmd: HelpCommands, help: HelpContainer) -> HandlerResult {
    contained("help command", async move {
        let lang_code = LanguageCode::from_maybe_user(msg.from.as_ref());
        let answer = match (cmd, msg.from.as_ref()) {
            (HelpCommands::Start, Some(user)) => {
                metrics::CMD_START_COUNTER.inc();
                help.get_start_message(&user.first_name, &lang_code)
            }
            (HelpCommands::Start, None) => {
                log::warn!("The /start command was invoked without a FROM field for message: {:?}", msg);
                help.get_help_message(&lang_code)
            }
            (HelpCommands::Help, _) => {
                metrics::CMD_HELP_COUNTER.inc();
                help.get_help_message(&lang_code)
            }
        };
        reply_html(bot, &msg, answer).await?;
        Ok(())
    }).await
}
