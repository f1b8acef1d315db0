pub mod tally;
pub mod tokenizer;

use crate::error::CheckError;
use crate::model::Suggest;
use crate::{Config, Typo};
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::Path;
use tally::ErrorTable;
use tokenizer::Tokenization;

pub struct SpellChecker<M> {
    model: M,
    tokenization: Tokenization,
    ignore_patterns: Vec<Regex>,
}

impl<M: Suggest> SpellChecker<M> {
    pub fn new(model: M, config: &Config) -> Self {
        // Compile ignore patterns
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => warn!("Invalid regex pattern '{}': {}", pattern, e),
            }
        }

        Self {
            model,
            tokenization: config.tokenization,
            ignore_patterns,
        }
    }

    /// Checker with default tokenization and no ignore patterns.
    pub fn with_model(model: M) -> Self {
        Self {
            model,
            tokenization: Tokenization::default(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Tally every token of `text` whose suggested correction differs from
    /// it, ignoring case.
    pub fn check_text(&self, text: &str) -> ErrorTable {
        let mut errors = ErrorTable::new();

        for token in self.tokenization.tokens(text) {
            if self.should_ignore(&token) {
                continue;
            }

            let Some(candidate) = self.model.suggest(&token) else {
                continue;
            };

            if token.to_lowercase() != candidate.to_lowercase() {
                errors.record(Typo::new(token.into_owned(), candidate));
            }
        }

        errors
    }

    pub fn check_file(&self, file_path: &Path) -> Result<ErrorTable, CheckError> {
        let content =
            fs::read_to_string(file_path).map_err(|e| CheckError::read(file_path, e))?;

        let errors = self.check_text(&content);
        debug!(
            "{}: {} typos ({} distinct)",
            file_path.display(),
            errors.total(),
            errors.len()
        );

        Ok(errors)
    }

    fn should_ignore(&self, token: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p.is_match(token))
    }
}
