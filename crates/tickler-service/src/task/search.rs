use chrono::NaiveDate;
use tickler_core::constants::SEARCH_DATE_FORMAT;

/// What a task listing is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    /// Tasks scheduled on one day, from a `DD.MM.YYYY` search.
    OnDate(NaiveDate),
    /// Substring of the title or comment.
    Text(String),
}

impl TaskFilter {
    /// ## Summary
    /// Interprets the search box: empty lists everything, a real `DD.MM.YYYY` date
    /// selects that day, anything else is free text.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        if search.is_empty() {
            return Self::All;
        }
        NaiveDate::parse_from_str(search, SEARCH_DATE_FORMAT)
            .map_or_else(|_err| Self::Text(search.to_string()), Self::OnDate)
    }
}
