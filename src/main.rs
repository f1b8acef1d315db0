use anyhow::{Context, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use env_logger::Env;
use log::LevelFilter;
use std::io;
use std::path::PathBuf;
use typo_check::cli::output::OutputOptions;
use typo_check::commands;
use typo_check::config::{Config, Overrides};

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(version, about = "Tally spelling mistakes in text files against a trained model", long_about = None)]
struct Cli {
    /// File to check
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(flatten)]
    check: CheckArgs,

    /// Config file to use instead of ./.typocheck.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress status lines and lower log verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to an existing model
    #[arg(long, value_name = "MODEL", env = "TYPO_CHECK_MODEL")]
    model_path: Option<PathBuf>,

    /// Where to write the JSON results [default: results.json]
    #[arg(long, value_name = "TARGET")]
    target: Option<PathBuf>,

    /// Minimum count of error occurrences to be reported [default: 1]
    #[arg(long, value_name = "THRESHOLD")]
    threshold: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every file matched by a glob pattern and merge the results
    Batch {
        /// Glob pattern (or directory) selecting the files to check
        #[arg(value_name = "DIRECTORY")]
        directory: String,

        #[command(flatten)]
        check: CheckArgs,
    },
    /// Train a model from a newline-delimited word list
    Train {
        /// Path to the word list to train on
        #[arg(long, value_name = "DICTIONARY")]
        dictionary: PathBuf,

        /// Path to write the model to
        #[arg(long, value_name = "MODELOUTPUT", default_value = "wordlist.txt")]
        model_output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "check", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);
    let out = OutputOptions {
        colored: !cli.no_color,
        quiet: cli.quiet > 0,
    };
    if !out.colored {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Train {
            dictionary,
            model_output,
        }) => {
            let config = load_config(cli.config, None)?;
            commands::train(&dictionary, &model_output, &config, out)?;
        }
        Some(Commands::Batch { directory, check }) => {
            let model_path = require_model(check.model_path.clone())?;
            let config = load_config(cli.config, Some(check))?;
            commands::check_batch(&model_path, &directory, &config, out)?;
        }
        None => {
            let file = cli
                .file
                .context("No file specified. Use --help for usage information.")?;
            let model_path = require_model(cli.check.model_path.clone())?;
            let config = load_config(cli.config, Some(cli.check))?;
            commands::check_file(&model_path, &file, &config, out)?;
        }
    }

    Ok(())
}

fn require_model(model_path: Option<PathBuf>) -> Result<PathBuf> {
    model_path.context("No model specified. Pass --model-path or set TYPO_CHECK_MODEL.")
}

fn load_config(config_file: Option<PathBuf>, check: Option<CheckArgs>) -> Result<Config> {
    let mut overrides = Overrides {
        config_file,
        ..Default::default()
    };
    if let Some(check) = check {
        overrides.target = check.target;
        overrides.threshold = check.threshold;
    }
    Config::load(overrides)
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = if quiet > 0 {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);
    if verbose > 0 || quiet > 0 {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}
