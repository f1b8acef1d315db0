pub mod batch;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod report;

pub use checker::tally::{update_counts, ErrorTable};
pub use checker::SpellChecker;
pub use config::Config;
pub use error::CheckError;
pub use model::{FuzzyModel, Suggest};

use serde::{Deserialize, Serialize};

/// A token together with the correction the model proposed for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Typo {
    pub wrong: String,
    pub correct: String,
}

impl Typo {
    pub fn new(wrong: impl Into<String>, correct: impl Into<String>) -> Self {
        Self {
            wrong: wrong.into(),
            correct: correct.into(),
        }
    }
}

/// One line of a report: a typo and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCount {
    #[serde(flatten)]
    pub typo: Typo,
    #[serde(rename = "counts")]
    pub count: usize,
}

impl ErrorCount {
    pub fn new(typo: Typo, count: usize) -> Self {
        Self { typo, count }
    }
}
