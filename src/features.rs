//! Per-line features computed once dates and cities are stripped.

use std::ops::Range;

use itertools::Itertools;
use serde::Serialize;

use crate::gazetteer::Gazetteer;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineFeatures {
    /// The line with every date and city removed, untrimmed.
    pub remainder: String,
    pub word_count: usize,
    pub dates: Vec<String>,
    pub cities: Vec<String>,
}

impl LineFeatures {
    pub fn extract<G: Gazetteer + ?Sized>(line: &str, gazetteer: &G) -> Self {
        let dates = gazetteer.extract_dates(line);
        let cities = gazetteer.extract_cities(line);
        let remainder = strip_spans(line, dates.iter().chain(cities.iter()).cloned());
        LineFeatures {
            word_count: remainder.split_whitespace().count(),
            dates: dates.into_iter().map(|r| line[r].to_string()).collect(),
            cities: cities.into_iter().map(|r| line[r].to_string()).collect(),
            remainder,
        }
    }
}

/// Remove every date and city from `line`, leaving the surrounding
/// punctuation and whitespace in place.
pub fn remove_dates_and_cities<G: Gazetteer + ?Sized>(line: &str, gazetteer: &G) -> String {
    let spans = gazetteer
        .extract_dates(line)
        .into_iter()
        .chain(gazetteer.extract_cities(line));
    strip_spans(line, spans)
}

/// Whitespace-delimited tokens left after dates and cities are removed.
pub fn number_of_words<G: Gazetteer + ?Sized>(line: &str, gazetteer: &G) -> usize {
    remove_dates_and_cities(line, gazetteer)
        .split_whitespace()
        .count()
}

fn strip_spans(line: &str, spans: impl Iterator<Item = Range<usize>>) -> String {
    let merged = spans
        .filter(|r| r.start < r.end && r.end <= line.len())
        .sorted_by_key(|r| (r.start, r.end))
        .coalesce(|a, b| {
            if b.start <= a.end {
                Ok(a.start..a.end.max(b.end))
            } else {
                Err((a, b))
            }
        });

    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    for span in merged {
        out.push_str(&line[cursor..span.start]);
        cursor = span.end;
    }
    out.push_str(&line[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::BuiltinGazetteer;
    use proptest::prelude::*;

    const LINE: &str = "line with, Toronto, Ontario Sep 2009";

    #[test]
    fn strips_city_and_date() {
        let gaz = BuiltinGazetteer::default();
        assert_eq!(remove_dates_and_cities(LINE, &gaz), "line with,  ");
    }

    #[test]
    fn counts_words_without_city_and_date() {
        let gaz = BuiltinGazetteer::default();
        assert_eq!(number_of_words(LINE, &gaz), 2);
    }

    #[test]
    fn strips_every_occurrence() {
        let gaz = BuiltinGazetteer::default();
        let line = "Chicago Jan 2010 to Boston, MA Feb 2012 via Chicago";
        assert_eq!(remove_dates_and_cities(line, &gaz), "  to   via ");
        assert_eq!(number_of_words(line, &gaz), 2);
    }

    #[test]
    fn no_reference_tokens_leaves_line_intact() {
        let gaz = BuiltinGazetteer::default();
        assert_eq!(remove_dates_and_cities("Account Executive", &gaz), "Account Executive");
        assert_eq!(number_of_words("Account Executive", &gaz), 2);
    }

    #[test]
    fn overlapping_spans_are_merged() {
        assert_eq!(strip_spans("abcdefgh", vec![1..4, 3..6, 7..8].into_iter()), "ag");
    }

    #[test]
    fn features_record_matched_text() {
        let gaz = BuiltinGazetteer::default();
        let features = LineFeatures::extract(LINE, &gaz);
        assert_eq!(features.remainder, "line with,  ");
        assert_eq!(features.word_count, 2);
        assert_eq!(features.dates, vec!["Sep 2009"]);
        assert_eq!(features.cities, vec!["Toronto, Ontario"]);
    }

    #[test]
    fn bare_city_of_regional_entry_is_not_counted() {
        let gaz = BuiltinGazetteer::default();
        assert_eq!(number_of_words("Recruiter in Houston", &gaz), 2);
        assert_eq!(number_of_words("Recruiter in Houston, TX", &gaz), 2);
    }

    fn bundled_names() -> Vec<String> {
        BuiltinGazetteer::default().names().map(str::to_string).sorted().collect()
    }

    proptest! {
        #[test]
        fn word_count_never_includes_a_city(
            city in proptest::sample::select(bundled_names()),
            prefix in "[a-z]{1,8}",
            suffix in "[a-z]{1,8}",
        ) {
            let gaz = BuiltinGazetteer::default();
            let line = format!("{prefix} {city} {suffix}");
            let remainder = remove_dates_and_cities(&line, &gaz);
            for token in remainder.split_whitespace() {
                prop_assert!(!gaz.is_city(token), "{} counted in {:?}", token, line);
            }
            prop_assert_eq!(number_of_words(&line, &gaz), 2);
        }
    }
}
