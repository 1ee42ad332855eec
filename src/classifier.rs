//! The classification pass: normalize, split, classify every line, merge in
//! order.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::{ClassifiedDocument, ClassifiedLine};
use crate::error::{ClassifierError, Result};
use crate::features::{self, LineFeatures};
use crate::gazetteer::{BuiltinGazetteer, Gazetteer};
use crate::lines::Lines;
use crate::normalize;
use crate::rules::{Fields, RuleSet};
use crate::settings::ClassifierConfig;

/// Resume text plus who it belongs to and the handle of the object it was
/// extracted from. The handle is carried, never inspected.
#[derive(Debug, Clone)]
pub struct Document<S> {
    pub text: String,
    pub owner: String,
    pub source: S,
}

/// Working state for the line being classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    pub index: usize,
    pub text: String,
    pub features: Option<LineFeatures>,
    pub fields: Fields,
}

impl LineContext {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        LineContext {
            index,
            text: text.into(),
            features: None,
            fields: Fields::default(),
        }
    }

    /// Features for this line, extracted on first use.
    pub fn features<G: Gazetteer + ?Sized>(&mut self, gazetteer: &G) -> &LineFeatures {
        let text = &self.text;
        self.features
            .get_or_insert_with(|| LineFeatures::extract(text, gazetteer))
    }
}

pub struct ResumeClassifier<S, G = BuiltinGazetteer> {
    document: Document<S>,
    lines: Lines,
    rules: RuleSet,
    gazetteer: G,
    config: ClassifierConfig,
    classified: ClassifiedDocument,
}

impl<S> ResumeClassifier<S> {
    /// Bundled gazetteer, standard rules, default configuration. The raw text
    /// is split right away so lines can be inspected before normalization.
    pub fn new(text: impl Into<String>, owner: impl Into<String>, source: S) -> Self {
        Self::build(text.into(), owner.into(), source, BuiltinGazetteer::default(), ClassifierConfig::default())
    }

    /// Like [`ResumeClassifier::new`], with the gazetteer named by `config`.
    pub fn from_config(
        text: impl Into<String>,
        owner: impl Into<String>,
        source: S,
        config: ClassifierConfig,
    ) -> Result<Self> {
        let gazetteer = config.gazetteer()?;
        Ok(Self::build(text.into(), owner.into(), source, gazetteer, config))
    }
}

impl<S, G: Gazetteer> ResumeClassifier<S, G> {
    fn build(text: String, owner: String, source: S, gazetteer: G, config: ClassifierConfig) -> Self {
        let lines = Lines::split(&text);
        ResumeClassifier {
            document: Document { text, owner, source },
            lines,
            rules: RuleSet::standard(),
            gazetteer,
            config,
            classified: ClassifiedDocument::new(),
        }
    }

    pub fn with_gazetteer<H: Gazetteer>(self, gazetteer: H) -> ResumeClassifier<S, H> {
        ResumeClassifier {
            document: self.document,
            lines: self.lines,
            rules: self.rules,
            gazetteer,
            config: self.config,
            classified: self.classified,
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn text(&self) -> &str {
        &self.document.text
    }

    pub fn owner(&self) -> &str {
        &self.document.owner
    }

    pub fn source(&self) -> &S {
        &self.document.source
    }

    pub fn document(&self) -> &Document<S> {
        &self.document
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    pub fn number_of_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn classified(&self) -> &ClassifiedDocument {
        &self.classified
    }

    pub fn classified_line(&self, index: usize) -> Result<&ClassifiedLine> {
        self.classified
            .get(index)
            .ok_or(ClassifierError::LineOutOfRange {
                index,
                len: self.classified.len(),
            })
    }

    pub fn separate_tabbed_words(&mut self) {
        let before = self.document.text.len();
        self.document.text = normalize::separate_tabbed_words(&self.document.text);
        record_pass("separate_tabbed_words", before, self.document.text.len());
    }

    pub fn remove_extra_spaces(&mut self) {
        let before = self.document.text.len();
        self.document.text = normalize::remove_extra_spaces(&self.document.text, self.config.column_marker);
        record_pass("remove_extra_spaces", before, self.document.text.len());
    }

    /// Re-split the current text into non-blank lines.
    pub fn split_text(&mut self) {
        self.lines = Lines::split(&self.document.text);
        debug!(lines = self.lines.len(), "split text");
    }

    pub fn remove_blanks(&mut self) {
        self.lines.remove_blanks();
    }

    /// Fresh context for line `index`.
    pub fn line_context(&self, index: usize) -> Result<LineContext> {
        Ok(LineContext::new(index, self.lines.get(index)?))
    }

    pub fn remove_dates_and_cities(&self, line: &str) -> String {
        features::remove_dates_and_cities(line, &self.gazetteer)
    }

    pub fn number_of_words(&self, line: &str) -> usize {
        features::number_of_words(line, &self.gazetteer)
    }

    pub fn check_classifications(&self, ctx: &mut LineContext) {
        classify_line(ctx, &self.rules, &self.gazetteer);
    }

    pub fn merge(&mut self, index: usize, ctx: LineContext) -> Result<()> {
        self.classified.merge(index, ctx)
    }

    /// Run the whole pass and return the result. Any earlier result is
    /// discarded.
    pub fn classify(&mut self) -> Result<&ClassifiedDocument> {
        self.separate_tabbed_words();
        self.remove_extra_spaces();
        self.split_text();

        let contexts = map_lines(&self.lines, &self.rules, &self.gazetteer, self.config.parallel);

        self.classified = ClassifiedDocument::new();
        for ctx in contexts {
            let index = ctx.index;
            self.classified.merge(index, ctx)?;
        }

        let assigned = self.classified.iter().filter(|l| !l.fields.is_empty()).count();
        info!(
            owner = %self.document.owner,
            lines = self.classified.len(),
            assigned,
            "classified resume"
        );
        Ok(&self.classified)
    }
}

fn record_pass(pass: &str, before: usize, after: usize) {
    debug!(pass, before, after, "normalization pass");
}

fn classify_line<G: Gazetteer + ?Sized>(ctx: &mut LineContext, rules: &RuleSet, gazetteer: &G) {
    ctx.features(gazetteer);
    rules.apply(ctx);
}

fn context_for<G: Gazetteer + ?Sized>(index: usize, line: &str, rules: &RuleSet, gazetteer: &G) -> LineContext {
    let mut ctx = LineContext::new(index, line);
    classify_line(&mut ctx, rules, gazetteer);
    ctx
}

#[cfg(feature = "rayon")]
fn map_lines<G: Gazetteer>(lines: &Lines, rules: &RuleSet, gazetteer: &G, parallel: bool) -> Vec<LineContext> {
    if parallel {
        lines
            .as_slice()
            .par_iter()
            .enumerate()
            .map(|(i, line)| context_for(i, line, rules, gazetteer))
            .collect()
    } else {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| context_for(i, line, rules, gazetteer))
            .collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn map_lines<G: Gazetteer>(lines: &Lines, rules: &RuleSet, gazetteer: &G, _parallel: bool) -> Vec<LineContext> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| context_for(i, line, rules, gazetteer))
        .collect()
}
