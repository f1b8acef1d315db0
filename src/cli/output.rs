use crate::batch::FileFailure;
use crate::ErrorCount;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::Path;
use std::time::Instant;

/// How user-facing lines are printed. `quiet` silences status and summary
/// lines on stdout; failures still go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub colored: bool,
    pub quiet: bool,
}

/// Logs how long a phase took once it goes out of scope.
pub struct PhaseTimer {
    name: &'static str,
    start: Instant,
}

impl PhaseTimer {
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        info!(
            "'{}' took {:.3}s",
            self.name,
            self.start.elapsed().as_secs_f64()
        );
    }
}

pub fn print_status(message: &str, out: OutputOptions) {
    if out.quiet {
        return;
    }
    if out.colored {
        println!("{}", message.cyan());
    } else {
        println!("{}", message);
    }
}

/// Progress bar for a batch run, drawn on stderr.
pub fn batch_progress(len: usize, out: OutputOptions) -> ProgressBar {
    if out.quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{bar:40.cyan/blue} {pos}/{len} files ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

pub fn print_failures(failures: &[FileFailure], colored: bool) {
    if failures.is_empty() {
        return;
    }

    let header = format!(
        "{} {} could not be checked:",
        failures.len(),
        if failures.len() == 1 { "file" } else { "files" }
    );
    if colored {
        eprintln!("\n{}", header.yellow().bold());
    } else {
        eprintln!("\n{}", header);
    }

    for failure in failures {
        if colored {
            eprintln!(
                "  {} {}: {}",
                "✗".red(),
                failure.path.display(),
                failure.error
            );
        } else {
            eprintln!("  ✗ {}: {}", failure.path.display(), failure.error);
        }
    }
}

pub fn print_check_summary(records: &[ErrorCount], files: usize, target: &Path, out: OutputOptions) {
    if out.quiet {
        return;
    }
    let colored = out.colored;
    println!();
    let file_word = if files == 1 { "file" } else { "files" };

    if records.is_empty() {
        if colored {
            println!(
                "{} in {} {}",
                "✓ No typos found".green().bold(),
                files,
                file_word
            );
        } else {
            println!("✓ No typos found in {} {}", files, file_word);
        }
    } else {
        let total: usize = records.iter().map(|r| r.count).sum();
        let typo_word = if total == 1 { "typo" } else { "typos" };
        if colored {
            println!(
                "{} {} {} ({} distinct) found in {} {}",
                "✗".red().bold(),
                total.to_string().red().bold(),
                typo_word,
                records.len(),
                files,
                file_word
            );
        } else {
            println!(
                "✗ {} {} ({} distinct) found in {} {}",
                total,
                typo_word,
                records.len(),
                files,
                file_word
            );
        }
    }

    let saved = format!("Results saved to {}", target.display());
    if colored {
        println!("{}", saved.dimmed());
    } else {
        println!("{}", saved);
    }
}

pub fn print_train_summary(words: usize, output: &Path, out: OutputOptions) {
    if out.quiet {
        return;
    }
    if out.colored {
        println!(
            "{} Trained on {} words, model saved to {}",
            "✓".green().bold(),
            words.to_string().yellow(),
            output.display().to_string().cyan()
        );
    } else {
        println!(
            "✓ Trained on {} words, model saved to {}",
            words,
            output.display()
        );
    }
}
