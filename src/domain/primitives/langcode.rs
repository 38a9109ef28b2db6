use std::borrow::ToOwned;
use once_cell::sync::Lazy;
use teloxide::types::User;

static DEFAULT: Lazy<LanguageCode> = Lazy::new(|| LanguageCode("en".to_string()));
static KO_SPEAKING_LOCALES: [&str; 1] = ["ko"];

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub struct LanguageCode(String);

#[derive(Hash, Copy, Clone, Eq, PartialEq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(test, derive(Debug))]
pub enum SupportedLanguage {
    EN,
    KO,
}

impl LanguageCode {

    pub fn from_maybe_user(maybe_user: Option<&User>) -> Self {
        let maybe_code = maybe_user.and_then(Self::get_language_code_or_log_if_missing);
        Self::from_maybe_string(maybe_code)
    }

    pub fn to_supported_language(&self) -> SupportedLanguage {
        let code = self.0.to_ascii_lowercase();
        match code.get(..2) {
            Some(prefix) if KO_SPEAKING_LOCALES.contains(&prefix) => SupportedLanguage::KO,
            _ => SupportedLanguage::EN
        }
    }

    /// Locale name suitable for the `t!` macro.
    pub fn locale(&self) -> String {
        self.to_supported_language().to_string()
    }

    fn get_language_code_or_log_if_missing(user: &User) -> Option<&String> {
        user.language_code.as_ref()
            .or_else(|| {
                log::debug!("no language_code for {}, using the default", user.id);
                None
            })
    }

    fn from_maybe_string(maybe_string: Option<&String>) -> Self {
        maybe_string
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .map(Self)
            .unwrap_or_else(|| DEFAULT.clone())
    }
}
