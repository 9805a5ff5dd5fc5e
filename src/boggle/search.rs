use std::ops::{Deref, DerefMut};

use log::debug;

use super::board::Board;
use super::dictionary::{Cursor, PrefixDictionary};
use super::util::Position;

/*
    Backtracking search that walks the board and the dictionary together.

    Each step consumes one unmarked cell and one trie level, so a path is
    abandoned as soon as its letters stop being a prefix of some word. The
    board's border is permanently marked, which stops every walk at the edge
    without explicit bounds checks.
*/

/// Marks a cell as part of the current path for as long as it is alive.
struct PathGuard<'b> {
    board: &'b mut Board,
    pos: Position,
}

impl<'b> PathGuard<'b> {
    fn acquire(board: &'b mut Board, pos: Position) -> Self {
        board.set_mark(pos, true);
        Self { board, pos }
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.board.set_mark(self.pos, false);
    }
}

impl Deref for PathGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for PathGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

struct WordFinder {
    found: PrefixDictionary,
    /// Number of cells stepped onto, border included
    visits: usize,
}

impl WordFinder {
    fn walk(&mut self, board: &mut Board, pos: Position, cursor: &Cursor<'_>) {
        self.visits += 1;
        if cursor.is_word() {
            self.found.insert(cursor.prefix());
        }
        if board.is_marked_at(pos) {
            return;
        }
        let Some(next) = cursor.extend(board[pos]) else {
            return;
        };

        let mut path = PathGuard::acquire(board, pos);
        for neighbour in pos.adjacent() {
            self.walk(&mut path, neighbour, &next);
        }
    }
}

/// Collects every word of `dictionary` that can be spelled by a path of
/// distinct, 8-way adjacent cells of `board`.
///
/// The board's marks are only borrowed for the duration of the search; every
/// interior cell is unmarked again when this returns.
pub fn find_words(dictionary: &PrefixDictionary, board: &mut Board) -> PrefixDictionary {
    let mut finder = WordFinder {
        found: PrefixDictionary::new(),
        visits: 0,
    };
    let root = dictionary.root_cursor();
    for pos in board.interior() {
        finder.walk(board, pos, &root);
    }
    debug!(
        "Searched {}x{} board: {} cell visits, {} words found",
        board.width(),
        board.height(),
        finder.visits,
        finder.found.len()
    );
    finder.found
}
