//! Error types shared by the puzzle core.
//!
//! Parse failures are recoverable and carry the byte offset where the input
//! stopped matching the grammar. Board and dictionary errors signal a caller
//! that broke the contract of the structure (bad coordinates, or removing a
//! word the dictionary never held a path for).

use thiserror::Error;

/// Failure while reading the board or word-list text formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed input at byte {offset}: expected {expected}, found {found}")]
    MalformedInput {
        offset: usize,
        expected: &'static str,
        found: String,
    },
    #[error("invalid board size {width}x{height} at byte {offset}")]
    InvalidSize {
        offset: usize,
        width: usize,
        height: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(offset: usize, expected: &'static str, found: Option<char>) -> Self {
        ParseError::MalformedInput {
            offset,
            expected,
            found: match found {
                Some(c) => format!("{c:?}"),
                None => "end of input".to_string(),
            },
        }
    }
}

/// Misuse of a [`Board`](crate::boggle::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside a {width}x{height} board and its border")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("cell ({x}, {y}) is part of the border and stays marked")]
    PermanentBorder { x: usize, y: usize },
    #[error("row {row} has {found} letters, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("a board needs at least one row and one column")]
    EmptyBoard,
    #[error("a {width}x{height} board does not fit in memory")]
    TooLarge { width: usize, height: usize },
    #[error("letter grid of shape {found:?} does not fit a {width}x{height} board")]
    ShapeMismatch {
        width: usize,
        height: usize,
        found: (usize, usize),
    },
}

/// Misuse of a [`PrefixDictionary`](crate::boggle::dictionary::PrefixDictionary).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("cannot remove {word:?}: its prefix path does not exist in the dictionary")]
    MalformedOperation { word: String },
    #[error("node under {prefix:?} holds {found:?} in the slot for {expected:?}")]
    CorruptNode {
        prefix: String,
        expected: char,
        found: char,
    },
}

/// Failure while saving or loading a compiled dictionary.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}
