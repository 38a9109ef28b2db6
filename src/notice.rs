use teloxide::utils::html;
use crate::domain::Announcement;

/// The fixed visual style every notice is rendered with.
#[derive(Clone, Debug)]
pub struct NoticeStyle {
    pub icon: String,
}

impl Default for NoticeStyle {
    fn default() -> Self {
        Self { icon: "📌".to_owned() }
    }
}

/// An announcement rendered as an HTML message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeCard(String);

impl NoticeCard {
    pub fn html(&self) -> &str {
        &self.0
    }
}

impl NoticeStyle {
    pub fn render(&self, announcement: &Announcement) -> NoticeCard {
        let title = html::bold(&html::escape(&announcement.title));
        let body = html::escape(&announcement.body);
        let header = if self.icon.is_empty() {
            title
        } else {
            format!("{} {}", html::escape(&self.icon), title)
        };
        NoticeCard(format!("{header}\n\n{body}"))
    }
}
