use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use boggler::app;
use boggler::boggle::util::Position;
use boggler::boggle::{find_words, Board, LetterCubes, PrefixDictionary};
use boggler::config::Config;
use boggler::input::InputLoader;

fn random_board(rng: &mut StdRng, width: usize, height: usize, alphabet: &[u8]) -> Board {
    let rows: Vec<String> = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| *alphabet.choose(rng).unwrap() as char)
                .collect()
        })
        .collect();
    Board::from_rows(&rows).unwrap()
}

/// Every string spelled by a simple path of at most `max_len` cells.
fn path_strings(board: &Board, max_len: usize) -> BTreeSet<String> {
    fn walk(
        board: &Board,
        pos: Position,
        used: &mut Vec<Position>,
        word: &mut String,
        max_len: usize,
        out: &mut BTreeSet<String>,
    ) {
        used.push(pos);
        word.push(board[pos]);
        out.insert(word.clone());
        if used.len() < max_len {
            for next in board.interior() {
                if pos.is_adjacent(&next) && !used.contains(&next) {
                    walk(board, next, used, word, max_len, out);
                }
            }
        }
        word.pop();
        used.pop();
    }

    let mut out = BTreeSet::new();
    for start in board.interior() {
        walk(board, start, &mut Vec::new(), &mut String::new(), max_len, &mut out);
    }
    out
}

fn random_word(rng: &mut StdRng, alphabet: &[u8]) -> String {
    let len = rng.gen_range(1..=6);
    (0..len)
        .map(|_| *alphabet.choose(rng).unwrap() as char)
        .collect()
}

fn check_against_brute_force(seed: u64, width: usize, height: usize, max_len: usize) {
    let alphabet = b"abcde";
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = random_board(&mut rng, width, height, alphabet);
    let reachable = path_strings(&board, max_len);

    let mut words: Vec<String> = reachable
        .iter()
        .filter(|_| rng.gen_bool(0.3))
        .cloned()
        .collect();
    words.extend((0..200).map(|_| random_word(&mut rng, alphabet)));
    words.retain(|w| w.len() <= max_len);
    let dictionary: PrefixDictionary = words.iter().collect();

    let found: BTreeSet<String> = board.find_words(&dictionary).all_words().collect();
    let expected: BTreeSet<String> = dictionary
        .all_words()
        .filter(|w| reachable.contains(w))
        .collect();
    assert_eq!(found, expected, "seed {} on\n{}", seed, board);

    for pos in board.interior() {
        assert!(!board.is_marked(pos.x, pos.y).unwrap());
    }
}

#[test]
fn test_example_board() {
    let mut board: Board = "{{2 2}{ac}{bd}}".parse().unwrap();
    let dictionary: PrefixDictionary = "{ab ba ad cb xy}".parse().unwrap();
    let found = find_words(&dictionary, &mut board);
    assert_eq!(found.to_string(), "{ab ad ba cb }");

    let dictionary: PrefixDictionary = "{abc dcba abdc}".parse().unwrap();
    let found = board.find_words(&dictionary);
    assert_eq!(
        found.all_words().collect::<Vec<_>>(),
        vec!["abc", "abdc", "dcba"]
    );
}

#[test]
fn test_small_boards_match_brute_force() {
    for seed in 0..20 {
        let width = 1 + (seed as usize % 3);
        let height = 1 + (seed as usize / 3 % 3);
        check_against_brute_force(seed, width, height, 9);
    }
}

#[test]
fn test_four_by_four_matches_brute_force() {
    for seed in 100..105 {
        check_against_brute_force(seed, 4, 4, 5);
    }
}

#[test]
fn test_generated_board_is_solvable() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new(5, 5).unwrap();
    board.randomize(&LetterCubes::classic(), &mut rng);
    let mut words: Vec<String> = path_strings(&board, 4).into_iter().collect();
    words.truncate(50);
    let dictionary: PrefixDictionary = words.iter().collect();
    let found = board.find_words(&dictionary);
    assert_eq!(found, dictionary);
}

#[test]
fn test_pipeline_from_stdin() {
    let config = Config::from_args(["boggler", "-d", "-", "-p", "-", "-i", "-", "-w"]).unwrap();
    let mut loader = InputLoader::with_stdin(
        "{ ab ba ad cb dc }\n{{2 2}{a c}{b d}}\n{ cb dc }\n",
    );
    let mut out = Vec::new();
    app::run(&config, &mut loader, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{{2 2}{a c}{b d}}\n{ab ad ba }\n"
    );
}

#[test]
fn test_pipeline_json_generated() {
    let config = Config::from_args([
        "boggler", "-d", "-", "-g", "-S", "3", "-r", "5", "--format", "json",
    ])
    .unwrap();
    let mut loader = InputLoader::with_stdin("{ }");
    let mut out = Vec::new();
    app::run(&config, &mut loader, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
}
