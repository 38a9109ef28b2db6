use crate::domain::{DomainAssertionError, NonEmptyText};

const INLINE_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub title: NonEmptyText,
    pub body: NonEmptyText,
}

impl Announcement {
    pub fn new(title: impl AsRef<str>, body: impl AsRef<str>) -> Result<Self, DomainAssertionError> {
        Ok(Self {
            title: NonEmptyText::new(title)?,
            body: NonEmptyText::new(body)?,
        })
    }

    /// Parses the argument of a command. The title is the first line and the body is
    /// everything after it; a single line may be split by a vertical bar instead.
    pub fn parse(text: &str) -> Result<Self, DomainAssertionError> {
        let text = text.trim();
        let (title, body) = text.split_once('\n')
            .or_else(|| text.split_once(INLINE_SEPARATOR))
            .ok_or_else(|| DomainAssertionError::new(text.to_owned(), "no body after the title"))?;
        Self::new(title, body)
    }
}

#[cfg(test)]
mod test {
    use super::Announcement;

    #[test]
    fn test_parse_multiline() {
        let announcement = Announcement::parse("Rules\nBe kind\nNo spam")
            .expect("must be parsed");
        assert_eq!(announcement.title.as_str(), "Rules");
        assert_eq!(announcement.body.as_str(), "Be kind\nNo spam");
    }

    #[test]
    fn test_parse_inline() {
        let announcement = Announcement::parse(" Rules | Be kind ")
            .expect("must be parsed");
        assert_eq!(announcement, Announcement::new("Rules", "Be kind").unwrap());
    }

    #[test]
    fn test_newline_takes_precedence_over_bar() {
        let announcement = Announcement::parse("A | B\nC")
            .expect("must be parsed");
        assert_eq!(announcement.title.as_str(), "A | B");
        assert_eq!(announcement.body.as_str(), "C");
    }

    #[test]
    fn test_parse_invalid() {
        for case in ["", "Rules", "Rules\n  ", "| Be kind", "\n\n"] {
            assert!(Announcement::parse(case).is_err(), "Case: {case:?}")
        }
    }
}
