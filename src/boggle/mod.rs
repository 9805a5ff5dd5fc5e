pub mod board;
pub mod cubes;
pub mod dictionary;
pub mod format;
pub mod search;
pub mod util;

pub use self::board::Board;
pub use self::cubes::LetterCubes;
pub use self::dictionary::{Cursor, PrefixDictionary};
pub use self::search::find_words;
