pub mod fuzzy;

pub use fuzzy::{FuzzyModel, TrainOptions};

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that can propose a correction for a single token.
///
/// The checker only ever talks to this trait, so a trained [`FuzzyModel`], an
/// adapter wrapping one, or a canned map in a test are interchangeable.
pub trait Suggest {
    /// Best correction candidate for `word`, or `None` when the model has
    /// nothing to offer.
    fn suggest(&self, word: &str) -> Option<String>;
}

impl<T: Suggest + ?Sized> Suggest for &T {
    fn suggest(&self, word: &str) -> Option<String> {
        (**self).suggest(word)
    }
}

impl<T: Suggest + ?Sized> Suggest for Box<T> {
    fn suggest(&self, word: &str) -> Option<String> {
        (**self).suggest(word)
    }
}

/// Fixed token -> correction table.
impl Suggest for HashMap<String, String> {
    fn suggest(&self, word: &str) -> Option<String> {
        self.get(word).cloned()
    }
}

/// Adapter for models that append a stray trailing byte to their candidates.
///
/// Candidates longer than two characters lose their last character; shorter
/// ones pass through untouched.
pub struct TrailingByteQuirk<M> {
    inner: M,
}

impl<M: Suggest> TrailingByteQuirk<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: Suggest> Suggest for TrailingByteQuirk<M> {
    fn suggest(&self, word: &str) -> Option<String> {
        let mut candidate = self.inner.suggest(word)?;
        if candidate.chars().count() > 2 {
            candidate.pop();
        }
        Some(candidate)
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("model file {} is malformed: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model file {} has format version {found}, expected {expected}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}
