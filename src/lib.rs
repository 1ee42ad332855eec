//! Line-level resume classifier.
//!
//! Raw resume text is normalized, split into lines, and every line is run
//! through a set of whole-line pattern rules (profession, phone, email, skill,
//! section header, bullet). Dates and cities are stripped with a [`Gazetteer`]
//! before words are counted. The result is a [`ClassifiedDocument`] with one
//! [`ClassifiedLine`] per input line.
//!
//! ```
//! use resume_classifier::ResumeClassifier;
//!
//! let mut classifier = ResumeClassifier::new("Account Executive\n555-555-5555", "Sample Person", ());
//! let doc = classifier.classify().unwrap();
//! assert_eq!(doc.get(0).unwrap().fields.profession.as_deref(), Some("Account Executive"));
//! assert_eq!(doc.get(1).unwrap().fields.phone.as_deref(), Some("555-555-5555"));
//! ```

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod features;
pub mod gazetteer;
pub mod lines;
pub mod normalize;
pub mod rules;
pub mod settings;

pub use aggregate::{ClassifiedDocument, ClassifiedLine};
pub use classifier::{Document, LineContext, ResumeClassifier};
pub use error::{ClassifierError, Result};
pub use features::LineFeatures;
pub use gazetteer::{BuiltinGazetteer, Gazetteer};
pub use lines::Lines;
pub use normalize::ColumnMarker;
pub use rules::{Category, Fields, Rule, RuleSet};
pub use settings::ClassifierConfig;
