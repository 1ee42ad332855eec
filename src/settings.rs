use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gazetteer::BuiltinGazetteer;
use crate::normalize::ColumnMarker;

pub const DEFAULT_CONFIG_FILE: &str = "resume_classifier";
pub const ENV_PREFIX: &str = "RESUME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// City list replacing the bundled one.
    pub gazetteer_path: Option<PathBuf>,
    pub column_marker: ColumnMarker,
    /// Classify lines on the rayon pool (needs the `rayon` feature).
    pub parallel: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            gazetteer_path: None,
            column_marker: ColumnMarker::Padded,
            parallel: true,
        }
    }
}

impl ClassifierConfig {
    /// `resume_classifier.{toml,json,yaml}` if present, then `RESUME_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(file: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn gazetteer(&self) -> Result<BuiltinGazetteer> {
        match &self.gazetteer_path {
            Some(path) => BuiltinGazetteer::load(path),
            None => Ok(BuiltinGazetteer::default()),
        }
    }
}
