use serde::Serialize;

use crate::error::{ClassifierError, Result};

/// Ordered, zero-indexed lines of a normalized document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Lines {
    lines: Vec<String>,
}

impl Lines {
    /// Split on newlines and drop blank lines.
    pub fn split(text: &str) -> Self {
        let mut lines = Lines {
            lines: text
                .split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect(),
        };
        lines.remove_blanks();
        lines
    }

    pub fn remove_blanks(&mut self) {
        self.lines.retain(|l| !l.trim().is_empty());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&str> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or(ClassifierError::LineOutOfRange {
                index,
                len: self.lines.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl From<Vec<String>> for Lines {
    /// Wrap already split lines as-is; blanks are kept until
    /// [`Lines::remove_blanks`] runs.
    fn from(lines: Vec<String>) -> Self {
        Lines { lines }
    }
}
