//! Cleanup passes over the raw extracted text, run before line splitting.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TAB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").unwrap());

// A lowercase letter glued to a month-led date: "ChicagoJune 2008".
static GLUED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\p{Ll})((?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?,?[\x20\t]+(?:19|20)\d{2}\b)",
    )
    .unwrap()
});

static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}(,,,,)?").unwrap());

pub const COLUMN_MARKER: &str = ",,,,";

/// Shape of the column-boundary marker written by [`remove_extra_spaces`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMarker {
    /// `"  ,,,,"`: two spaces kept in front of the marker. Existing consumers
    /// of the classifier output expect this shape.
    #[default]
    Padded,
    /// `",,,,"` with no padding.
    Trimmed,
}

impl ColumnMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnMarker::Padded => "  ,,,,",
            ColumnMarker::Trimmed => COLUMN_MARKER,
        }
    }
}

/// Turn tab separators, and dates glued onto the preceding word, into a
/// single comma.
pub fn separate_tabbed_words(text: &str) -> String {
    let untabbed = TAB_RE.replace_all(text, ",");
    GLUED_DATE_RE.replace_all(&untabbed, "$1,$2").into_owned()
}

/// Replace every run of two or more spaces sitting between two non-space
/// characters with the column marker. Leading, trailing and whitespace-only
/// runs are kept, so blank lines stay blank. A run that already precedes a
/// marker is left alone, so the pass can be repeated.
pub fn remove_extra_spaces(text: &str, marker: ColumnMarker) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in SPACE_RUN_RE.captures_iter(text) {
        let Some(run) = caps.get(0) else {
            continue;
        };
        if caps.get(1).is_some() || !is_interior(text, run.start(), run.end()) {
            continue;
        }
        out.push_str(&text[last..run.start()]);
        out.push_str(marker.as_str());
        last = run.end();
    }
    out.push_str(&text[last..]);
    out
}

fn is_interior(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if !b.is_whitespace() && !a.is_whitespace())
}

/// Both passes, in the order the classifier runs them.
pub fn normalize(text: &str, marker: ColumnMarker) -> String {
    remove_extra_spaces(&separate_tabbed_words(text), marker)
}
