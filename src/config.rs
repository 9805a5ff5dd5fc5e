//! Command line options and the immutable run configuration built from them.
//!
//! [`Cli`] is only the parsing surface. It is turned into a [`Config`] once,
//! and that value is what the rest of the program reads.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::warn;

/// Solve and generate Boggle puzzles
#[derive(Parser, Debug)]
#[command(name = "boggler", version, about, long_about = None)]
pub struct Cli {
    /// Load a dictionary file and use it to solve the board ("-" for stdin)
    #[arg(short = 'd', long = "solution-dictionary-file", value_name = "FILE")]
    pub solution_dictionary_file: Option<InputSource>,

    /// Load a puzzle board from disk ("-" for stdin)
    #[arg(short = 'p', long = "puzzle-file", value_name = "FILE")]
    pub puzzle_file: Option<InputSource>,

    /// Load a list of words to leave out of the solution ("-" for stdin)
    #[arg(short = 'i', long = "ignore-file", value_name = "FILE")]
    pub ignore_file: Option<InputSource>,

    /// Generate a puzzle board randomly
    #[arg(short = 'g', long)]
    pub generate: bool,

    /// Write the puzzle board in use to standard output
    #[arg(short = 'w', long)]
    pub write_puzzle: bool,

    /// Size of the generated puzzle board
    #[arg(short = 'S', long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub size: u16,

    /// Height of the generated board, if it should differ from its width
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: Option<u16>,

    /// Seed for the random number generator
    #[arg(short = 'r', long = "random-seed", value_parser = clap::value_parser!(u64).range(1..))]
    pub random_seed: Option<u64>,

    /// How the solution is written
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Store the effective dictionary as a compiled snapshot
    #[arg(long, value_name = "FILE")]
    pub save_dictionary: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where an input object is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl FromStr for InputSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "-" {
            InputSource::Stdin
        } else {
            InputSource::Path(PathBuf::from(s))
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "standard input"),
            InputSource::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{word word }`
    Text,
    /// A JSON array of words
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleSource {
    Generate { width: usize, height: usize },
    File(InputSource),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dictionary: Option<InputSource>,
    pub ignore: Option<InputSource>,
    pub puzzle: PuzzleSource,
    pub write_puzzle: bool,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub save_dictionary: Option<PathBuf>,
    pub verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let puzzle = match (cli.generate, cli.puzzle_file) {
            (true, file) => {
                if let Some(file) = file {
                    warn!("The puzzle file {} will be ignored", file);
                }
                let width = usize::from(cli.size);
                PuzzleSource::Generate {
                    width,
                    height: cli.height.map_or(width, usize::from),
                }
            }
            (false, Some(file)) => PuzzleSource::File(file),
            (false, None) => PuzzleSource::Missing,
        };
        Self {
            dictionary: cli.solution_dictionary_file,
            ignore: cli.ignore_file,
            puzzle,
            write_puzzle: cli.write_puzzle,
            seed: cli.random_seed,
            format: cli.format,
            save_dictionary: cli.save_dictionary,
            verbose: cli.verbose,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Config::from)
    }
}
