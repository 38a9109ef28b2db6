use teloxide::types::Me;
use crate::help;

pub fn build_context_for_help_messages(me: &Me) -> help::Context {
    help::Context {
        bot_name: me.username().to_owned(),
    }
}
