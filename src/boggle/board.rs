use std::mem;

use log::debug;
use ndarray::{s, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cubes::LetterCubes;
use super::dictionary::PrefixDictionary;
use super::search;
use super::util::{Position, SENTINEL};
use crate::errors::BoardError;

/// Rectangular letter grid surrounded by a one cell border.
///
/// Cells are addressed with `x` in `0..=width + 1` and `y` in `0..=height + 1`.
/// The border rows and columns hold [`SENTINEL`] and are marked for the whole
/// lifetime of the board, so a walk that steps onto them stops without any
/// bounds checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    width: usize,
    height: usize,
    /// Letters indexed `[x, y]`, border included
    letters: Array2<char>,
    /// Cells on the path currently being searched, plus the border
    marks: Array2<bool>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let shape = grid_shape(width, height)?;
        let letters = Array2::from_elem(shape, SENTINEL);
        let mut marks = Array2::from_elem(shape, true);
        marks.slice_mut(s![1..=width, 1..=height]).fill(false);
        Ok(Self {
            width,
            height,
            letters,
            marks,
        })
    }

    /// Builds a board from rows of letters, `rows[y - 1]` holding row `y`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut board = Self::new(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != width {
                return Err(BoardError::RaggedRows {
                    row: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, c) in row.as_ref().chars().enumerate() {
                board.letters[[x + 1, y + 1]] = c;
            }
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, BoardError> {
        self.check(x, y)?;
        Ok(self.letters[[x, y]])
    }

    pub fn set(&mut self, x: usize, y: usize, letter: char) -> Result<(), BoardError> {
        self.check(x, y)?;
        self.letters[[x, y]] = letter;
        Ok(())
    }

    pub fn is_marked(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        self.check(x, y)?;
        Ok(self.marks[[x, y]])
    }

    pub fn mark(&mut self, x: usize, y: usize) -> Result<(), BoardError> {
        self.check(x, y)?;
        self.marks[[x, y]] = true;
        Ok(())
    }

    /// Clears the path flag of an interior cell. Border cells stay marked.
    pub fn unmark(&mut self, x: usize, y: usize) -> Result<(), BoardError> {
        self.check(x, y)?;
        if self.is_border(x, y) {
            return Err(BoardError::PermanentBorder { x, y });
        }
        self.marks[[x, y]] = false;
        Ok(())
    }

    /// Interior positions, column by column.
    pub fn interior(&self) -> impl Iterator<Item = Position> {
        let height = self.height;
        (1..=self.width).flat_map(move |x| (1..=height).map(move |y| Position::new(x, y)))
    }

    /// Fills the interior with random letters. Boards with no more cells than
    /// there are cubes roll each cube at most once; larger boards draw every
    /// letter uniformly from `a..=z`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, cubes: &LetterCubes, rng: &mut R) {
        let (mode, letters) = cubes.fill(self.width, self.height, rng);
        debug!(
            "Filled {}x{} board using {:?} sampling",
            self.width, self.height, mode
        );
        self.letters
            .slice_mut(s![1..=self.width, 1..=self.height])
            .assign(&letters);
    }

    /// Every word of `dictionary` that can be traced on the board.
    pub fn find_words(&mut self, dictionary: &PrefixDictionary) -> PrefixDictionary {
        search::find_words(dictionary, self)
    }

    pub(crate) fn is_marked_at(&self, pos: Position) -> bool {
        self.marks[[pos.x, pos.y]]
    }

    pub(crate) fn set_mark(&mut self, pos: Position, marked: bool) {
        debug_assert!(marked || !self.is_border(pos.x, pos.y));
        self.marks[[pos.x, pos.y]] = marked;
    }

    fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width + 1 || y == self.height + 1
    }

    fn check(&self, x: usize, y: usize) -> Result<(), BoardError> {
        if x <= self.width + 1 && y <= self.height + 1 {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Dimensions of the letter grid including the border, if it can be
/// allocated.
fn grid_shape(width: usize, height: usize) -> Result<(usize, usize), BoardError> {
    let too_large = || BoardError::TooLarge { width, height };
    let cols = width.checked_add(2).ok_or_else(too_large)?;
    let rows = height.checked_add(2).ok_or_else(too_large)?;
    let bytes = cols
        .checked_mul(rows)
        .and_then(|cells| cells.checked_mul(mem::size_of::<char>()))
        .ok_or_else(too_large)?;
    if bytes > isize::MAX as usize {
        return Err(too_large());
    }
    Ok((cols, rows))
}

/// Deserialized form of a [`Board`]. Only the interior letters are kept; the
/// border and the marks are rebuilt.
#[derive(Deserialize)]
struct BoardSnapshot {
    width: usize,
    height: usize,
    letters: Array2<char>,
    marks: Array2<bool>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let (width, height) = (snapshot.width, snapshot.height);
        let shape = grid_shape(width, height)?;
        for found in [snapshot.letters.dim(), snapshot.marks.dim()] {
            if found != shape {
                return Err(BoardError::ShapeMismatch {
                    width,
                    height,
                    found,
                });
            }
        }
        let mut board = Board::new(width, height)?;
        board
            .letters
            .slice_mut(s![1..=width, 1..=height])
            .assign(&snapshot.letters.slice(s![1..=width, 1..=height]));
        Ok(board)
    }
}

impl std::ops::Index<Position> for Board {
    type Output = char;

    fn index(&self, index: Position) -> &Self::Output {
        &self.letters[[index.x, index.y]]
    }
}
