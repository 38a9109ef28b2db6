use reqwest::Url;
use crate::config::env::*;
use crate::config::toggles::*;
use crate::notice::NoticeStyle;

#[derive(Clone)]
pub struct AppConfig {
    pub features: FeatureToggles,
    pub notice_style: NoticeStyle,
    pub http_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = FeatureToggles::default();
        let delete_command_messages = get_env_value_or_default("DELETE_COMMAND_MESSAGES", defaults.delete_command_messages);
        let ignore_other_bots = get_env_value_or_default("IGNORE_OTHER_BOTS", defaults.ignore_other_bots);
        let silent_notices = get_env_value_or_default("NOTICE_SILENT", defaults.silent_notices);
        // an empty icon is a valid choice, so it's not read as an optional value
        let icon = std::env::var("NOTICE_ICON")
            .unwrap_or_else(|_| NoticeStyle::default().icon);
        let http_port = get_env_value_or_default("HTTP_PORT", 8080);
        Self {
            features: FeatureToggles {
                delete_command_messages,
                ignore_other_bots,
                silent_notices,
            },
            notice_style: NoticeStyle { icon },
            http_port,
        }
    }
}

/// `None` means the polling mode. A value that isn't a valid URL is an error.
pub fn webhook_url_from_env() -> anyhow::Result<Option<Url>> {
    match get_optional_env_value::<String>("WEBHOOK_URL") {
        Some(url) => Ok(Some(url.parse()?)),
        None => Ok(None)
    }
}
