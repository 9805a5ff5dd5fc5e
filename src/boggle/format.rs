//! Brace-delimited text formats for boards and word lists.
//!
//! A board is written as `{{W H}{c c c}{c c c}}`: the size pair followed by
//! `W` groups, one per column `x`, each holding the `H` letters of that column
//! from top to bottom. A word list is written as `{word word }`. Whitespace
//! between tokens is insignificant when reading.
//!
//! Several objects can be read back to back from one text with
//! [`TextReader`], which is how a single standard input carries a
//! dictionary, a puzzle and an ignore list in that order.

use std::fmt;
use std::str::FromStr;

use super::board::Board;
use super::dictionary::PrefixDictionary;
use crate::errors::ParseError;

/// Cursor over text holding one or more serialized objects.
pub struct TextReader<'s> {
    text: &'s str,
    offset: usize,
}

impl<'s> TextReader<'s> {
    pub fn new(text: &'s str) -> Self {
        Self { text, offset: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True once only whitespace is left.
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_whitespace();
        self.peek().is_none()
    }

    /// Reads one board. Nothing outside the returned value is modified, so a
    /// failed read never leaves a half-filled board behind.
    pub fn read_board(&mut self) -> Result<Board, ParseError> {
        self.expect('{', "'{' opening the board")?;
        self.expect('{', "'{' opening the board size")?;
        let size_offset = self.offset;
        let width = self.number()?;
        let height = self.number()?;
        self.expect('}', "'}' closing the board size")?;

        let invalid_size = || ParseError::InvalidSize {
            offset: size_offset,
            width,
            height,
        };
        // Every cell needs at least one more character of input.
        let remaining = self.text.len() - self.offset;
        if width.checked_mul(height).map_or(true, |cells| cells > remaining) {
            return Err(invalid_size());
        }
        let mut board = Board::new(width, height).map_err(|_| invalid_size())?;
        for x in 1..=width {
            self.expect('{', "'{' opening a column")?;
            for y in 1..=height {
                self.skip_whitespace();
                let at = self.offset;
                let letter = self
                    .bump()
                    .ok_or_else(|| ParseError::malformed(at, "a board letter", None))?;
                board
                    .set(x, y, letter)
                    .map_err(|_| ParseError::malformed(at, "a board letter", Some(letter)))?;
            }
            self.expect('}', "'}' closing a column")?;
        }
        self.expect('}', "'}' closing the board")?;
        Ok(board)
    }

    /// Reads one `{ word word ... }` list into a new dictionary.
    pub fn read_dictionary(&mut self) -> Result<PrefixDictionary, ParseError> {
        let mut dict = PrefixDictionary::new();
        self.expect('{', "'{' opening the word list")?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(dict);
                }
                Some('{') | None => {
                    return Err(ParseError::malformed(
                        self.offset,
                        "a word or '}'",
                        self.peek(),
                    ))
                }
                Some(_) => {
                    let word = self.token();
                    dict.insert(word);
                }
            }
        }
    }

    fn token(&mut self) -> &'s str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '{' || c == '}' {
                break;
            }
            self.bump();
        }
        &self.text[start..self.offset]
    }

    fn number(&mut self) -> Result<usize, ParseError> {
        self.skip_whitespace();
        let start = self.offset;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.bump();
        }
        self.text[start..self.offset]
            .parse()
            .map_err(|_| ParseError::malformed(start, "a board dimension", self.peek()))
    }

    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), ParseError> {
        self.skip_whitespace();
        let at = self.offset;
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            found => Err(ParseError::malformed(at, what, found)),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }
}

/// Reads a plain word list with one word per line. Blank lines are skipped.
pub fn read_word_lines(text: &str) -> PrefixDictionary {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Reads a dictionary in either the braced format or as one word per line,
/// depending on whether the text starts with `{`.
pub fn read_word_source(text: &str) -> Result<PrefixDictionary, ParseError> {
    if text.trim_start().starts_with('{') {
        text.parse()
    } else {
        Ok(read_word_lines(text))
    }
}

fn parse_whole<'s, T>(
    text: &'s str,
    read: impl FnOnce(&mut TextReader<'s>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let mut reader = TextReader::new(text);
    let value = read(&mut reader)?;
    if reader.is_exhausted() {
        Ok(value)
    } else {
        Err(ParseError::malformed(
            reader.offset(),
            "end of input",
            reader.peek(),
        ))
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_whole(s, TextReader::read_board)
    }
}

impl FromStr for PrefixDictionary {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_whole(s, TextReader::read_dictionary)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{{{} {}}}", self.width(), self.height())?;
        for x in 1..=self.width() {
            write!(f, "{{")?;
            for y in 1..=self.height() {
                if y > 1 {
                    write!(f, " ")?;
                }
                let letter = self.get(x, y).map_err(|_| fmt::Error)?;
                write!(f, "{}", letter)?;
            }
            write!(f, "}}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for PrefixDictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for word in self.all_words() {
            write!(f, "{} ", word)?;
        }
        write!(f, "}}")
    }
}
