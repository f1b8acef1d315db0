use crate::checker::tally::ErrorTable;
use crate::checker::SpellChecker;
use crate::error::CheckError;
use crate::model::Suggest;
use ignore::overrides::OverrideBuilder;
use indicatif::ProgressBar;
use log::{debug, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// A file from the batch that could not be checked.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: CheckError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Counts merged across every file that was read successfully.
    pub errors: ErrorTable,
    pub checked: usize,
    pub failures: Vec<FileFailure>,
}

/// Expand `pattern` into the files it names, sorted by path.
///
/// A pattern without glob metacharacters is taken literally: a file names
/// itself and a directory names the files directly inside it. Only regular
/// files are returned. An empty expansion is an error.
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>, CheckError> {
    let path = Path::new(pattern);

    let mut files = if pattern.contains(GLOB_META) {
        expand_glob(path, pattern)?
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        list_dir(path)?
    } else {
        Vec::new()
    };

    if files.is_empty() {
        return Err(CheckError::PathNotFound(pattern.to_string()));
    }

    files.sort();
    Ok(files)
}

fn expand_glob(path: &Path, pattern: &str) -> Result<Vec<PathBuf>, CheckError> {
    // Split into the literal directory prefix and the part holding wildcards
    let mut root = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in path.components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !text.contains(GLOB_META) {
            root.push(component);
        } else if let Component::Normal(_) = component {
            rest.push(text.into_owned());
        } else {
            return Err(CheckError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "wildcards must not be followed by '.' or '..'".to_string(),
            });
        }
    }
    if root.as_os_str().is_empty() {
        root.push(".");
    }
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let recursive = rest.iter().any(|c| c == "**");
    let depth = rest.len();

    let invalid = |e: ignore::Error| CheckError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    };
    let mut builder = OverrideBuilder::new(&root);
    builder.add(&format!("/{}", rest.join("/"))).map_err(invalid)?;
    let matcher = builder.build().map_err(invalid)?;

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { depth });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path while expanding '{}': {}", pattern, e);
                continue;
            }
        };
        if !recursive && entry.depth() != depth {
            continue;
        }
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        if matcher.matched(entry_path, false).is_whitelist() {
            files.push(entry_path.to_path_buf());
        }
    }

    Ok(files)
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, CheckError> {
    let entries = fs::read_dir(dir).map_err(|e| CheckError::read(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CheckError::read(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Check every file in order and merge the results. A file that cannot be
/// read is recorded in [`BatchOutcome::failures`] and the run carries on.
pub fn run_batch<M: Suggest>(
    checker: &SpellChecker<M>,
    files: &[PathBuf],
    progress: &ProgressBar,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for file in files {
        match checker.check_file(file) {
            Ok(errors) => {
                outcome.errors.merge(errors);
                outcome.checked += 1;
            }
            Err(error) => {
                warn!("{}", error);
                outcome.failures.push(FileFailure {
                    path: file.clone(),
                    error,
                });
            }
        }
        progress.inc(1);
    }

    debug!(
        "batch finished: {} checked, {} failed",
        outcome.checked,
        outcome.failures.len()
    );
    outcome
}
