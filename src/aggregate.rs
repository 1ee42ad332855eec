use serde::Serialize;

use crate::classifier::LineContext;
use crate::error::{ClassifierError, Result};
use crate::rules::Fields;

/// Classification record for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub index: usize,
    pub text: String,
    #[serde(flatten)]
    pub fields: Fields,
    /// Most recent section header at or above this line.
    pub section: Option<String>,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<String>,
}

/// Ordered classification records, one per line, in line order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ClassifiedDocument {
    lines: Vec<ClassifiedLine>,
    #[serde(skip)]
    current_section: Option<String>,
}

impl ClassifiedDocument {
    pub fn new() -> Self {
        ClassifiedDocument::default()
    }

    /// Append the context for line `index`. Lines must arrive as 0, 1, 2, ...
    pub fn merge(&mut self, index: usize, ctx: LineContext) -> Result<()> {
        let expected = self.lines.len();
        if index != expected {
            return Err(ClassifierError::OutOfSequence { expected, got: index });
        }
        if ctx.index != index {
            return Err(ClassifierError::OutOfSequence {
                expected: index,
                got: ctx.index,
            });
        }

        if let Some(header) = &ctx.fields.section_header {
            self.current_section = Some(header.trim().trim_end_matches(':').to_string());
        }

        let features = ctx.features.unwrap_or_default();
        self.lines.push(ClassifiedLine {
            index,
            text: ctx.text,
            fields: ctx.fields,
            section: self.current_section.clone(),
            word_count: features.word_count,
            dates: features.dates,
            cities: features.cities,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassifiedLine> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedLine> + '_ {
        self.lines.iter()
    }

    pub fn lines(&self) -> &[ClassifiedLine] {
        &self.lines
    }
}
