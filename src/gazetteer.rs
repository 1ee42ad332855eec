//! Reference data used to strip non-semantic tokens from a line.
//!
//! The classifier only relies on the [`Gazetteer`] query contract; the bundled
//! [`BuiltinGazetteer`] ships a small North American city list and a
//! month/year date recognizer.

use std::collections::HashSet;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ClassifierError, Result};

const BUNDLED_CITIES: &str = include_str!("../data/cities.txt");

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?
           |Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)
        \.?,?[\x20\t]+(?:19|20)\d{2}\b
        |
        \b(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}\b
        ",
    )
    .unwrap()
});

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Lu}[\p{L}.'-]*").unwrap());

/// Lookup service for city names and date expressions.
pub trait Gazetteer: Sync {
    fn is_city(&self, token: &str) -> bool;

    /// Byte spans of every date expression in `text`.
    fn extract_dates(&self, text: &str) -> Vec<Range<usize>>;

    /// Byte spans of every city in `text`. The default asks [`Gazetteer::is_city`]
    /// about each capitalized word.
    fn extract_cities(&self, text: &str) -> Vec<Range<usize>> {
        token_city_spans(self, text)
    }
}

fn token_city_spans<G: Gazetteer + ?Sized>(gazetteer: &G, text: &str) -> Vec<Range<usize>> {
    WORD_RE
        .find_iter(text)
        .filter(|m| gazetteer.is_city(m.as_str().trim_end_matches('.')))
        .map(|m| m.range())
        .collect()
}

/// Byte spans of month-name + year and `MM/YYYY` expressions.
pub fn month_year_spans(text: &str) -> Vec<Range<usize>> {
    DATE_RE.find_iter(text).map(|m| m.range()).collect()
}

#[derive(Debug, Clone)]
pub struct BuiltinGazetteer {
    names: HashSet<String>,
    pattern: Option<Regex>,
}

impl BuiltinGazetteer {
    /// Build from a newline separated list. Blank lines and `#` comments are
    /// skipped; an entry may carry a region after a comma (`Toronto, Ontario`).
    pub fn from_list(list: &str) -> Self {
        let entries: Vec<&str> = list
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        // Bare city parts go into the alternation too: every name `is_city`
        // accepts must also be found inside a line. Longest first.
        let mut terms: Vec<&str> = entries
            .iter()
            .flat_map(|entry| {
                let bare = entry.split_once(',').map(|(city, _)| city.trim());
                std::iter::once(*entry).chain(bare)
            })
            .filter(|t| !t.is_empty())
            .collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        terms.dedup();

        let names: HashSet<String> = terms.iter().map(|t| t.to_string()).collect();

        let pattern = if terms.is_empty() {
            None
        } else {
            let alternation = terms
                .iter()
                .map(|t| regex::escape(t).replace(", ", r",\s*"))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"\b(?:{})\b", alternation))
                .map_err(|e| warn!(error = %e, "city pattern rejected, falling back to token lookup"))
                .ok()
        };

        debug!(entries = entries.len(), names = names.len(), "gazetteer built");
        BuiltinGazetteer { names, pattern }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let list = fs::read_to_string(path).map_err(|source| ClassifierError::Gazetteer {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_list(&list))
    }

    /// Every name `is_city` accepts, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for BuiltinGazetteer {
    fn default() -> Self {
        Self::from_list(BUNDLED_CITIES)
    }
}

impl Gazetteer for BuiltinGazetteer {
    fn is_city(&self, token: &str) -> bool {
        self.names.contains(token.trim())
    }

    fn extract_dates(&self, text: &str) -> Vec<Range<usize>> {
        month_year_spans(text)
    }

    fn extract_cities(&self, text: &str) -> Vec<Range<usize>> {
        match &self.pattern {
            Some(re) => re.find_iter(text).map(|m| m.range()).collect(),
            None => token_city_spans(self, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<&'a str> {
        ranges.iter().map(|r| &text[r.clone()]).collect()
    }

    #[test]
    fn month_year_dates() {
        let text = "Sep 2009 - June 2011, Sept. 2012 and 03/2015";
        let found = month_year_spans(text);
        assert_eq!(spans(text, &found), vec!["Sep 2009", "June 2011", "Sept. 2012", "03/2015"]);
    }

    #[test]
    fn bare_years_are_not_dates() {
        assert!(month_year_spans("Graduated 2008").is_empty());
        assert!(month_year_spans("Mayor of 2008").is_empty());
    }

    #[test]
    fn dates_do_not_span_lines() {
        assert!(month_year_spans("June\n2008").is_empty());
        assert!(month_year_spans("Sep\r\n2009").is_empty());
        assert_eq!(month_year_spans("Sep\t2009"), vec![0..8]);
    }

    #[test]
    fn longest_city_entry_wins() {
        let gaz = BuiltinGazetteer::default();
        let text = "line with, Toronto, Ontario Sep 2009";
        assert_eq!(spans(text, &gaz.extract_cities(text)), vec!["Toronto, Ontario"]);
    }

    #[test]
    fn is_city_accepts_bare_and_regional_names() {
        let gaz = BuiltinGazetteer::from_list("# comment\nToronto, Ontario\n\nChicago\n");
        assert!(gaz.is_city("Toronto"));
        assert!(gaz.is_city("Toronto, Ontario"));
        assert!(gaz.is_city("Chicago"));
        assert!(!gaz.is_city("Ontario"));
        assert_eq!(gaz.len(), 3);
    }

    #[test]
    fn bare_city_of_regional_entry_is_found_in_text() {
        let gaz = BuiltinGazetteer::default();
        assert!(gaz.is_city("Houston"));
        let text = "Recruiter in Houston";
        assert_eq!(spans(text, &gaz.extract_cities(text)), vec!["Houston"]);
        let text = "Houston, TX";
        assert_eq!(spans(text, &gaz.extract_cities(text)), vec!["Houston, TX"]);
    }

    #[test]
    fn every_name_is_found_in_text() {
        let gaz = BuiltinGazetteer::default();
        for name in gaz.names() {
            let text = format!("worked in {name} office");
            assert_eq!(spans(&text, &gaz.extract_cities(&text)), vec![name], "name: {name}");
        }
    }

    #[test]
    fn city_match_is_word_bounded() {
        let gaz = BuiltinGazetteer::from_list("York");
        assert!(gaz.extract_cities("Yorkshire Pudding").is_empty());
        assert_eq!(gaz.extract_cities("New York").len(), 1);
    }

    #[test]
    fn empty_list_finds_nothing() {
        let gaz = BuiltinGazetteer::from_list("");
        assert!(gaz.is_empty());
        assert!(gaz.extract_cities("Toronto").is_empty());
    }

    #[test]
    fn default_city_scan_uses_is_city() {
        struct OnlyParis;
        impl Gazetteer for OnlyParis {
            fn is_city(&self, token: &str) -> bool {
                token == "Paris"
            }
            fn extract_dates(&self, _text: &str) -> Vec<Range<usize>> {
                Vec::new()
            }
        }
        let text = "Analyst, Paris office";
        assert_eq!(spans(text, &OnlyParis.extract_cities(text)), vec!["Paris"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = BuiltinGazetteer::load("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ClassifierError::Gazetteer { .. }));
    }
}
