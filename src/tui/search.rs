use crate::users::models::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which list a non-empty query is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Always filter the full base list, so deleting characters brings
    /// matches back.
    #[default]
    Full,
    /// Filter whatever is currently visible. Backspacing never restores rows
    /// excluded by an earlier, longer query.
    Narrowing,
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "narrowing" => Ok(Self::Narrowing),
            other => Err(format!(
                "unknown filter mode '{}' (expected 'full' or 'narrowing')",
                other
            )),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Narrowing => write!(f, "narrowing"),
        }
    }
}

/// Derives the visible list for `query`. An empty query is a full reset to
/// `base` in either mode. Order always follows `base`.
pub fn filter(base: &[Record], visible: &[Record], query: &str, mode: FilterMode) -> Vec<Record> {
    if query.is_empty() {
        return base.to_vec();
    }

    let needle = query.to_lowercase();
    let source = match mode {
        FilterMode::Full => base,
        FilterMode::Narrowing => visible,
    };

    source
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

/// The text in the search box. Edits produce the next raw value; storing it
/// and filtering are left to the caller.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_char(&self, c: char) -> String {
        let mut next = self.query.clone();
        next.push(c);
        next
    }

    pub fn without_last_char(&self) -> String {
        let mut next = self.query.clone();
        next.pop();
        next
    }

    pub fn set(&mut self, raw: String) {
        self.query = raw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_records() -> Vec<Record> {
        vec![
            Record::new(1, "Bret", "Sincere@april.biz"),
            Record::new(2, "Antonette", "Shanna@melissa.tv"),
            Record::new(3, "Samantha", "Nathan@yesenia.net"),
            Record::new(4, "Karianne", "Julianne.OConner@kory.org"),
        ]
    }

    fn ids(records: &[Record]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_query_returns_base() {
        let base = create_test_records();
        let visible = base[..1].to_vec();

        for mode in [FilterMode::Full, FilterMode::Narrowing] {
            assert_eq!(filter(&base, &visible, "", mode), base);
        }
    }

    #[test]
    fn test_matches_username_and_email() {
        let base = create_test_records();

        // "an" hits Antonette, Samantha, Karianne by username and Shanna/Nathan/Julianne by email
        assert_eq!(ids(&filter(&base, &base, "an", FilterMode::Full)), vec![2, 3, 4]);
        assert_eq!(ids(&filter(&base, &base, "APRIL", FilterMode::Full)), vec![1]);
        assert!(filter(&base, &base, "zzz", FilterMode::Full).is_empty());
    }

    #[test]
    fn test_single_letter_query() {
        let base = vec![Record::new(1, "a", "a@x"), Record::new(2, "b", "b@x")];

        assert_eq!(ids(&filter(&base, &base, "a", FilterMode::Full)), vec![1]);
        assert_eq!(ids(&filter(&base, &base, "a", FilterMode::Narrowing)), vec![1]);
    }

    #[test]
    fn test_full_mode_restores_on_backspace() {
        let base = create_test_records();

        let narrow = filter(&base, &base, "ann", FilterMode::Full);
        assert_eq!(ids(&narrow), vec![2, 4]);

        let wider = filter(&base, &narrow, "an", FilterMode::Full);
        assert_eq!(ids(&wider), vec![2, 3, 4]);
    }

    #[test]
    fn test_narrowing_mode_does_not_restore_on_backspace() {
        let base = create_test_records();

        let narrow = filter(&base, &base, "ann", FilterMode::Narrowing);
        assert_eq!(ids(&narrow), vec![2, 4]);

        let wider = filter(&base, &narrow, "an", FilterMode::Narrowing);
        assert_eq!(ids(&wider), vec![2, 4]);

        let reset = filter(&base, &wider, "", FilterMode::Narrowing);
        assert_eq!(reset, base);
    }

    #[test]
    fn test_filter_mode_parse_and_display() {
        assert_eq!("full".parse::<FilterMode>().unwrap(), FilterMode::Full);
        assert_eq!("narrowing".parse::<FilterMode>().unwrap(), FilterMode::Narrowing);
        assert!("fuzzy".parse::<FilterMode>().is_err());
        assert_eq!(FilterMode::Narrowing.to_string(), "narrowing");
    }

    #[test]
    fn test_search_state_edits() {
        let mut search = SearchState::new();

        let next = search.with_char('a');
        assert_eq!(next, "a");
        assert!(search.query.is_empty());

        search.set(next);
        search.set(search.with_char('b'));
        assert_eq!(search.query, "ab");

        search.set(search.without_last_char());
        assert_eq!(search.query, "a");
        search.set(search.without_last_char());
        assert_eq!(search.without_last_char(), "");
    }
}
