use rust_i18n::t;
use serde::Serialize;
use tinytemplate::TinyTemplate;
use crate::domain::SupportedLanguage::{EN, KO};
use crate::domain::LanguageCode;

static EN_HELP: &str = include_str!("en.html");
static KO_HELP: &str = include_str!("ko.html");

#[derive(Clone)]
pub struct HelpContainer {
    en: String,
    ko: String,
}

impl HelpContainer {
    pub fn get_start_message(&self, name: &str, lang_code: &LanguageCode) -> String {
        let greeting = t!("titles.greeting", locale = &lang_code.locale());
        format!("{}, <b>{}</b>!\n\n{}", greeting, teloxide::utils::html::escape(name), self.get_help_message(lang_code))
    }

    pub fn get_help_message(&self, lang_code: &LanguageCode) -> String {
        match lang_code.to_supported_language() {
            KO => self.ko.clone(),
            EN => self.en.clone()
        }
    }
}

#[derive(Serialize, Clone)]
pub struct Context {
    pub bot_name: String,
}

pub fn render_help_messages(context: Context) -> Result<HelpContainer, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.add_template("en", EN_HELP)?;
    tt.add_template("ko", KO_HELP)?;
    Ok(HelpContainer {
        en: tt.render("en", &context)?,
        ko: tt.render("ko", &context)?,
    })
}
