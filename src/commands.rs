//! Entry points for the three modes of the `check` binary.

use crate::batch::{self, BatchOutcome};
use crate::checker::tally::ErrorTable;
use crate::checker::SpellChecker;
use crate::cli::output::{self, OutputOptions, PhaseTimer};
use crate::error::CheckError;
use crate::model::{FuzzyModel, Suggest, TrailingByteQuirk};
use crate::report;
use crate::{Config, ErrorCount};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Train a model from `dictionary` and persist it at `output`.
pub fn train(
    dictionary: &Path,
    output: &Path,
    config: &Config,
    out: OutputOptions,
) -> Result<FuzzyModel> {
    let _timer = PhaseTimer::start("trainModel");

    output::print_status(
        &format!("Training model using dictionary file {}...", dictionary.display()),
        out,
    );
    output::print_status(&format!("Model will be saved in {}", output.display()), out);

    let model = FuzzyModel::train_from_file(dictionary, config.train)
        .with_context(|| format!("Failed to train on dictionary {}", dictionary.display()))?;
    model
        .save(output)
        .with_context(|| format!("Failed to save model to {}", output.display()))?;

    output::print_train_summary(model.len(), output, out);
    Ok(model)
}

/// Check a single file and write its report.
pub fn check_file(
    model_path: &Path,
    file: &Path,
    config: &Config,
    out: OutputOptions,
) -> Result<Vec<ErrorCount>> {
    let _timer = PhaseTimer::start("spellcheckFile");

    if !file.exists() {
        return Err(CheckError::PathNotFound(file.display().to_string()).into());
    }

    let checker = load_checker(model_path, config, out)?;
    let errors = checker.check_file(file)?;

    let records = save_results(errors, config)?;
    output::print_check_summary(&records, 1, &config.target, out);
    Ok(records)
}

/// Check every file matched by `pattern`, merge the counts and write one
/// report. Files that cannot be read are listed but do not stop the run.
pub fn check_batch(
    model_path: &Path,
    pattern: &str,
    config: &Config,
    out: OutputOptions,
) -> Result<(Vec<ErrorCount>, BatchOutcome)> {
    let _timer = PhaseTimer::start("spellcheckDir");

    let files = batch::resolve_pattern(pattern)?;
    let checker = load_checker(model_path, config, out)?;

    output::print_status(&format!("Running batch job on {} files", files.len()), out);
    let progress = output::batch_progress(files.len(), out);
    let mut outcome = batch::run_batch(&checker, &files, &progress);
    progress.finish_and_clear();

    output::print_failures(&outcome.failures, out.colored);
    output::print_status("Batch errors calculated, saving results...", out);

    let errors = std::mem::take(&mut outcome.errors);
    let records = save_results(errors, config)?;
    output::print_check_summary(&records, outcome.checked, &config.target, out);
    Ok((records, outcome))
}

fn load_checker(
    model_path: &Path,
    config: &Config,
    out: OutputOptions,
) -> Result<SpellChecker<Box<dyn Suggest>>> {
    let _timer = PhaseTimer::start("loadModel");
    output::print_status(&format!("Loading model '{}'", model_path.display()), out);

    let model = FuzzyModel::load(model_path)
        .context("Could not load a valid model. Please train a valid model and load it.")?;
    info!(
        "model has {} words (depth {}, threshold {})",
        model.len(),
        model.depth(),
        model.threshold()
    );

    let model: Box<dyn Suggest> = if config.strip_trailing_byte {
        Box::new(TrailingByteQuirk::new(model))
    } else {
        Box::new(model)
    };

    Ok(SpellChecker::new(model, config))
}

fn save_results(mut errors: ErrorTable, config: &Config) -> Result<Vec<ErrorCount>> {
    errors.retain_min_count(config.threshold);
    let records = errors.into_sorted();
    report::write_report(&records, &config.target, config.pretty)?;
    Ok(records)
}
