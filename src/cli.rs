//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::config::{ExerciseConfig, DEFAULT_FLYWEIGHT_FRAMES, DEFAULT_LOG_FILE};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::patterns::state::remove_comments;

/// patternbook - a runnable catalogue of design pattern exercises.
#[derive(Parser, Debug)]
#[command(name = "patternbook")]
#[command(
    author,
    version,
    about,
    long_about = r#"patternbook runs small, self-contained design pattern exercises and prints
what each one does.

Every exercise produces a report: its output lines plus an optional error.
Reports are printed in the selected format (default: text).

Output formats:
- text: console output, one "<Name> Exercise" block per exercise
- jsonl: one JSON object per line
- json: a single JSON array
- md: human-friendly Markdown

Examples:
    patternbook
    patternbook run state visitor
    patternbook --format jsonl run flyweight --seed 7
    patternbook strip src/main.c
    patternbook list
"#
)]
pub struct Cli {
    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        value_parser = OutputFormat::from_str,
        long_help = "Select the output format for exercise reports.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)"
    )]
    pub format: OutputFormat,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on text/md formats."
    )]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable ANSI styling of exercise headers and error lines. This is useful when\n\
piping to files or when your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (repeat for more detail).
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        long_help = "Enable diagnostics on stderr. -v logs at debug level, -vv at trace level\n\
(including every transition of the comment-stripping state machine).\n\n\
RUST_LOG, when set, takes precedence."
    )]
    pub verbose: u8,

    /// Seed for the Flyweight random number generator.
    #[arg(
        long,
        global = true,
        env = "PATTERNBOOK_SEED",
        value_name = "N",
        long_help = "Seed for the Flyweight random number generator. With a seed the animation\n\
is the same on every run; without one the generator is seeded from entropy."
    )]
    pub seed: Option<u64>,

    /// Number of Flyweight animation steps.
    #[arg(long, global = true, default_value_t = DEFAULT_FLYWEIGHT_FRAMES, value_name = "N")]
    pub frames: usize,

    /// File written by the Bridge file logger.
    #[arg(
        long,
        global = true,
        env = "PATTERNBOOK_LOG_FILE",
        default_value = DEFAULT_LOG_FILE,
        value_name = "PATH"
    )]
    pub log_file: PathBuf,

    /// Also show a real directory tree in the Composite exercise.
    #[arg(long, global = true, value_name = "DIR")]
    pub composite_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run exercises (all of them when no name is given).
    #[command(
        long_about = r#"Run the named exercises and print one report per exercise.

Names are matched ignoring case. Exercises always run in catalogue order and
each one runs at most once, however often it is named. The process exits
with a non-zero status when any exercise fails.

Examples:
    patternbook run
    patternbook run Adapter handlerchain
"#
    )]
    Run {
        /// Exercise names.
        #[arg(value_name = "NAME", num_args = 0..)]
        names: Vec<String>,
    },

    /// List the available exercises.
    List,

    /// Remove C/C++ comments from a file and print the result.
    #[command(
        long_about = "Remove // and /* */ comments from C/C++ source text, leaving string and\n\
character literals intact. Reads PATH, or standard input when PATH is omitted or \"-\".\n\n\
Examples:\n\
  patternbook strip main.c\n\
  cat main.c | patternbook strip\n"
    )]
    Strip {
        /// Source file ("-" for standard input).
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// Exercise settings taken from the command line
    pub fn exercise_config(&self) -> ExerciseConfig {
        ExerciseConfig {
            seed: self.seed,
            flyweight_frames: self.frames,
            log_file: self.log_file.clone(),
            composite_root: self.composite_root.clone(),
        }
    }

    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Run the strip command
pub fn run_strip(path: Option<&Path>) -> Result<()> {
    let text = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            text
        }
    };

    let stripped = remove_comments(&text).context("Failed to strip comments")?;
    print!("{}", stripped);
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level());

    if cli.no_color {
        colored::control::set_override(false);
    }

    let render_config = RenderConfig::with_pretty(cli.format, cli.pretty);
    let config = cli.exercise_config();

    match &cli.command {
        None => crate::runner::run_exercises(&[], &config, render_config),
        Some(Commands::Run { names }) => crate::runner::run_exercises(names, &config, render_config),
        Some(Commands::List) => crate::runner::run_list(),
        Some(Commands::Strip { path }) => run_strip(path.as_deref()),
    }
}
