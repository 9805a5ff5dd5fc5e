use std::fmt;

use serde::{Deserialize, Serialize};

use super::util::{letter_index, ALPHABET_SIZE, SENTINEL};
use crate::errors::DictionaryError;

/// Prefix tree node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    letter: char,
    next: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    terminal: bool,
}

impl TrieNode {
    fn new(letter: char) -> Self {
        Self {
            letter,
            ..Default::default()
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn next_node(&self, c: char) -> Option<&TrieNode> {
        letter_index(c).and_then(|i| self.next[i].as_deref())
    }

    fn children(&self) -> impl DoubleEndedIterator<Item = &TrieNode> {
        self.next.iter().filter_map(|n| n.as_deref())
    }

    /// Checks that every child sits in the slot of its own letter.
    fn check(&self, prefix: &mut String) -> Result<(), DictionaryError> {
        for (i, slot) in self.next.iter().enumerate() {
            let Some(child) = slot else {
                continue;
            };
            let expected = char::from(b'a' + i as u8);
            if child.letter != expected {
                return Err(DictionaryError::CorruptNode {
                    prefix: prefix.clone(),
                    expected,
                    found: child.letter,
                });
            }
            prefix.push(expected);
            child.check(prefix)?;
            prefix.pop();
        }
        Ok(())
    }
}

/// One line per node: its address, `*` if terminal, then each child's letter
/// and address.
struct Dump<'a>(&'a TrieNode);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let node = self.0;
        let flag = if node.terminal { '*' } else { ' ' };
        write!(f, "{:p} {}(", node, flag)?;
        for child in node.children() {
            write!(f, "{}, {:p}; ", child.letter, child)?;
        }
        writeln!(f, ")")?;
        for child in node.children() {
            write!(f, "{}", Dump(child))?;
        }
        Ok(())
    }
}

/// Set of words stored as a prefix tree over the letters `a..=z`.
///
/// Removal only clears the terminal flag of the final node, so a word that is
/// removed and inserted again reuses the same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DictionarySnapshot")]
pub struct PrefixDictionary {
    root: TrieNode,
}

/// Deserialized form of a [`PrefixDictionary`], checked before use.
#[derive(Deserialize)]
struct DictionarySnapshot {
    root: TrieNode,
}

impl TryFrom<DictionarySnapshot> for PrefixDictionary {
    type Error = DictionaryError;

    fn try_from(snapshot: DictionarySnapshot) -> Result<Self, Self::Error> {
        let mut root = snapshot.root;
        root.check(&mut String::new())?;
        root.letter = SENTINEL;
        Ok(Self { root })
    }
}

impl Default for PrefixDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixDictionary {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(SENTINEL),
        }
    }

    /// Adds a word, skipping every character outside `a..=z`.
    ///
    /// Returns `true` if the word was not already present. A word without a
    /// single storable letter is ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        let mut depth = 0;
        for c in word.chars() {
            if let Some(i) = letter_index(c) {
                node = node.next[i]
                    .get_or_insert_with(|| Box::new(TrieNode::new(c)))
                    .as_mut();
                depth += 1;
            }
        }
        if depth == 0 {
            return false;
        }
        let added = !node.terminal;
        node.terminal = true;
        added
    }

    /// Clears the terminal flag at the end of `word`'s path. No node is freed.
    pub fn remove(&mut self, word: &str) -> Result<(), DictionaryError> {
        let node = self
            .find_mut(word)
            .ok_or_else(|| DictionaryError::MalformedOperation {
                word: word.to_string(),
            })?;
        node.terminal = false;
        Ok(())
    }

    /// Removes every word of `other` from `self`.
    ///
    /// All paths are checked before anything is cleared, so on error `self`
    /// is left untouched.
    pub fn remove_all(&mut self, other: &PrefixDictionary) -> Result<(), DictionaryError> {
        if let Some(word) = other.all_words().find(|w| self.find(w).is_none()) {
            return Err(DictionaryError::MalformedOperation { word });
        }
        for word in other.all_words() {
            self.remove(&word)?;
        }
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).map_or(false, |n| n.terminal)
    }

    pub fn contains_prefix(&self, cursor: &Cursor<'_>, letter: char) -> bool {
        cursor.has_next(letter)
    }

    pub fn is_word(&self, cursor: &Cursor<'_>) -> bool {
        cursor.is_word()
    }

    pub fn root_cursor(&self) -> Cursor<'_> {
        Cursor {
            node: &self.root,
            prefix: String::new(),
        }
    }

    pub fn extend<'a>(&self, cursor: &Cursor<'a>, letter: char) -> Option<Cursor<'a>> {
        cursor.extend(letter)
    }

    /// Every stored word in ascending alphabetical order.
    pub fn all_words(&self) -> Words<'_> {
        Words {
            stack: vec![(&self.root, 0)],
            prefix: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.all_words().count()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words().next().is_none()
    }

    /// Structural trace of the tree: one line per node with its address, a
    /// `*` for terminal nodes and the address of each present child.
    pub fn dump(&self) -> String {
        Dump(&self.root).to_string()
    }

    fn find(&self, word: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for c in word.chars().filter(|&c| letter_index(c).is_some()) {
            node = node.next_node(c)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, word: &str) -> Option<&mut TrieNode> {
        let mut node = &mut self.root;
        for i in word.chars().filter_map(letter_index) {
            node = node.next[i].as_deref_mut()?;
        }
        Some(node)
    }
}

/// Read-only position in a [`PrefixDictionary`] together with the prefix that
/// leads to it.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    node: &'a TrieNode,
    prefix: String,
}

impl<'a> Cursor<'a> {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn depth(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_word(&self) -> bool {
        self.node.terminal
    }

    pub fn has_next(&self, letter: char) -> bool {
        self.node.next_node(letter).is_some()
    }

    /// A cursor one letter deeper, if the dictionary continues with `letter`.
    pub fn extend(&self, letter: char) -> Option<Cursor<'a>> {
        let node = self.node.next_node(letter)?;
        let mut prefix = String::with_capacity(self.prefix.len() + 1);
        prefix.push_str(&self.prefix);
        prefix.push(letter);
        Some(Cursor { node, prefix })
    }
}

/// Pre-order walk over the terminal nodes, children visited `a` to `z`.
pub struct Words<'a> {
    stack: Vec<(&'a TrieNode, usize)>,
    prefix: String,
}

impl<'a> Iterator for Words<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            // Only a-z are stored, so byte length equals depth.
            if depth > 0 {
                self.prefix.truncate(depth - 1);
                self.prefix.push(node.letter);
            }
            self.stack
                .extend(node.children().rev().map(|child| (child, depth + 1)));
            if node.terminal {
                return Some(self.prefix.clone());
            }
        }
        None
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixDictionary {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixDictionary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut dict = Self::new();
        Extend::extend(&mut dict, iter);
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> PrefixDictionary {
        ["cat", "dog", "mouse", "moose", "laptop", "do"]
            .iter()
            .collect()
    }

    #[test]
    fn test_insert_and_lookup() {
        let dict = vocab();
        for w in ["cat", "dog", "mouse", "moose", "laptop", "do"] {
            assert!(dict.contains(w), "{} should be present", w);
        }
        assert!(!dict.contains("mo"));
        assert!(!dict.contains("cats"));
        assert_eq!(dict.len(), 6);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut dict = PrefixDictionary::new();
        assert!(dict.insert("tree"));
        let snapshot = dict.clone();
        assert!(!dict.insert("tree"));
        assert_eq!(dict, snapshot);
    }

    #[test]
    fn test_insert_skips_non_letters() {
        let mut dict = PrefixDictionary::new();
        dict.insert("don't");
        dict.insert("Apple");
        assert!(dict.contains("dont"));
        assert!(dict.contains("pple"));
        assert_eq!(dict.all_words().collect::<Vec<_>>(), vec!["dont", "pple"]);

        assert!(!dict.insert("123"));
        assert!(!dict.insert(""));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_all_words_sorted() {
        let words: Vec<String> = vocab().all_words().collect();
        assert_eq!(words, vec!["cat", "do", "dog", "laptop", "moose", "mouse"]);
    }

    #[test]
    fn test_all_words_restartable() {
        let dict = vocab();
        let first: Vec<String> = dict.all_words().collect();
        let second: Vec<String> = dict.all_words().collect();
        assert_eq!(first, second);
        assert!(PrefixDictionary::new().all_words().next().is_none());
    }

    #[test]
    fn test_remove_is_tombstone() {
        let mut dict = vocab();
        dict.remove("do").unwrap();
        assert!(!dict.contains("do"));
        assert!(dict.contains("dog"));

        // The path survives so the prefix is still walkable
        let root = dict.root_cursor();
        let d = dict.extend(&root, 'd').unwrap();
        let o = dict.extend(&d, 'o').unwrap();
        assert!(!dict.is_word(&o));
        assert!(dict.contains_prefix(&o, 'g'));
    }

    #[test]
    fn test_remove_twice() {
        let mut dict = vocab();
        dict.remove("cat").unwrap();
        let after_first = dict.clone();
        dict.remove("cat").unwrap();
        assert_eq!(dict, after_first);

        let mut other = vocab();
        let first = other.remove("cattle");
        let second = other.remove("cattle");
        assert!(first.is_err());
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_missing_path() {
        let mut dict = vocab();
        let err = dict.remove("zebra").unwrap_err();
        assert_eq!(
            err,
            DictionaryError::MalformedOperation {
                word: "zebra".into()
            }
        );
    }

    #[test]
    fn test_remove_all() {
        let mut dict = vocab();
        let ignored: PrefixDictionary = ["dog", "laptop"].iter().collect();
        dict.remove_all(&ignored).unwrap();
        assert_eq!(
            dict.all_words().collect::<Vec<_>>(),
            vec!["cat", "do", "moose", "mouse"]
        );
    }

    #[test]
    fn test_remove_all_failure_leaves_dictionary_intact() {
        let mut dict = vocab();
        let before = dict.clone();
        let ignored: PrefixDictionary = ["cat", "zebra"].iter().collect();
        assert!(dict.remove_all(&ignored).is_err());
        assert_eq!(dict, before);
    }

    #[test]
    fn test_cursor_walk() {
        let dict = vocab();
        let mut cursor = dict.root_cursor();
        assert_eq!(cursor.prefix(), "");
        for c in "mou".chars() {
            assert!(dict.contains_prefix(&cursor, c));
            cursor = dict.extend(&cursor, c).unwrap();
        }
        assert_eq!(cursor.prefix(), "mou");
        assert_eq!(cursor.depth(), 3);
        assert!(!cursor.is_word());
        assert!(!cursor.has_next('x'));
        assert!(cursor.extend('x').is_none());
        assert!(!cursor.has_next('*'));

        let word = cursor.extend('s').and_then(|c| c.extend('e')).unwrap();
        assert!(word.is_word());
        // Extending never changes the cursor it came from
        assert_eq!(cursor.prefix(), "mou");
    }

    #[test]
    fn test_long_words_are_not_truncated() {
        let long = "pneumonoultramicroscopicsilicovolcanoconiosis";
        let mut dict = PrefixDictionary::new();
        dict.insert(long);
        let mut cursor = dict.root_cursor();
        for c in long.chars() {
            cursor = cursor.extend(c).unwrap();
        }
        assert!(cursor.is_word());
        assert_eq!(cursor.prefix(), long);
        assert_eq!(dict.all_words().next().as_deref(), Some(long));
    }

    #[test]
    fn test_dump() {
        let dict: PrefixDictionary = ["ab", "b"].iter().collect();
        let dump = dict.dump();
        let lines: Vec<&str> = dump.lines().collect();
        // root, a, ab, b
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("a, ") && lines[0].contains("b, "));
        assert!(lines[2].contains('*'));
    }

    #[test]
    fn test_snapshot_with_misplaced_letter() {
        let dict: PrefixDictionary = ["ab", "b"].iter().collect();
        let mut value = serde_json::to_value(&dict).unwrap();
        assert_eq!(
            serde_json::from_value::<PrefixDictionary>(value.clone()).unwrap(),
            dict
        );

        value["root"]["next"][0]["next"][1]["letter"] = serde_json::json!("é");
        let err = serde_json::from_value::<PrefixDictionary>(value).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("under \"a\""), "{}", message);
        assert!(message.contains("slot for 'b'"), "{}", message);
    }
}
