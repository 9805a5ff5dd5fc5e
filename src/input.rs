use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::boggle::format::{read_word_source, TextReader};
use crate::boggle::{Board, PrefixDictionary};
use crate::config::InputSource;
use crate::errors::ParseError;
use crate::utils::serialization;

/// File extension of compiled dictionary snapshots.
pub const SNAPSHOT_EXTENSION: &str = "bin";

/// Reads boards and dictionaries from files or standard input.
///
/// Standard input is read once and consumed object by object, so several
/// sources given as `-` are taken from the same stream in the order they are
/// requested.
#[derive(Debug, Default)]
pub struct InputLoader {
    stdin: Option<String>,
    consumed: usize,
}

impl InputLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader whose standard input is the given text.
    pub fn with_stdin(text: impl Into<String>) -> Self {
        Self {
            stdin: Some(text.into()),
            consumed: 0,
        }
    }

    pub fn load_dictionary(&mut self, source: &InputSource) -> Result<PrefixDictionary> {
        let dict = match source {
            InputSource::Stdin => self.read_stdin(|r| r.read_dictionary())?,
            InputSource::Path(path) if is_snapshot(path) => {
                serialization::load_from_disk(path)
                    .with_context(|| format!("Error reading snapshot {}", path.display()))?
            }
            InputSource::Path(path) => {
                let text = read_file(path)?;
                read_word_source(&text)
                    .with_context(|| format!("Error reading word list {}", path.display()))?
            }
        };
        log::debug!("Loaded dictionary from {}", source);
        Ok(dict)
    }

    pub fn load_board(&mut self, source: &InputSource) -> Result<Board> {
        match source {
            InputSource::Stdin => self.read_stdin(|r| r.read_board()),
            InputSource::Path(path) => read_file(path)?
                .parse::<Board>()
                .with_context(|| format!("Error reading puzzle {}", path.display())),
        }
    }

    fn read_stdin<T>(
        &mut self,
        read: impl FnOnce(&mut TextReader<'_>) -> Result<T, ParseError>,
    ) -> Result<T> {
        if self.stdin.is_none() {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Error reading standard input")?;
            self.stdin = Some(text);
        }
        let text = self.stdin.as_deref().unwrap_or_default();
        let mut reader = TextReader::new(&text[self.consumed..]);
        let value = read(&mut reader).with_context(|| {
            format!(
                "Error reading standard input after byte {}",
                self.consumed
            )
        })?;
        self.consumed += reader.offset();
        Ok(value)
    }
}

fn is_snapshot(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == SNAPSHOT_EXTENSION)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading file {}", path.display()))
}
