use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boggle::{Board, LetterCubes, PrefixDictionary};
use crate::config::{Config, OutputFormat, PuzzleSource};
use crate::input::InputLoader;
use crate::utils::serialization;

/// Executes the operations requested by `config`, writing the puzzle and the
/// solution to `out`.
///
/// Inputs given as `-` are taken from standard input in the order
/// dictionary, puzzle, ignore list.
pub fn run<W: Write>(config: &Config, loader: &mut InputLoader, out: &mut W) -> Result<()> {
    let dictionary = match &config.dictionary {
        Some(source) => Some(loader.load_dictionary(source)?),
        None => None,
    };

    let board = match &config.puzzle {
        PuzzleSource::Generate { width, height } => Some(generate(*width, *height, config.seed)?),
        PuzzleSource::File(source) => Some(loader.load_board(source)?),
        PuzzleSource::Missing => {
            warn!("No valid puzzle specified");
            None
        }
    };

    if config.write_puzzle {
        if let Some(board) = &board {
            writeln!(out, "{}", board)?;
        }
    }

    let Some(mut dictionary) = dictionary else {
        return Ok(());
    };
    if let Some(source) = &config.ignore {
        let ignored = loader.load_dictionary(source)?;
        dictionary
            .remove_all(&ignored)
            .with_context(|| format!("Error applying ignore list {}", source))?;
        debug!("Ignoring {} words", ignored.len());
    }
    if let Some(path) = &config.save_dictionary {
        serialization::save_to_disk(&dictionary, path)
            .with_context(|| format!("Error writing snapshot {}", path.display()))?;
        info!("Saved dictionary snapshot to {}", path.display());
    }

    let Some(mut board) = board else {
        return Ok(());
    };
    let found = board.find_words(&dictionary);
    write_solution(&found, config.format, out)
}

fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<Board> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut board = Board::new(width, height)?;
    board.randomize(&LetterCubes::classic(), &mut rng);
    Ok(board)
}

fn write_solution<W: Write>(found: &PrefixDictionary, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", found)?,
        OutputFormat::Json => {
            let words: Vec<String> = found.all_words().collect();
            serde_json::to_writer(&mut *out, &words)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
