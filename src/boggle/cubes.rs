use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::prelude::SliceRandom;
use rand::Rng;

pub const FACES: usize = 6;

/// Faces of the classic set of 25 letter cubes.
const CLASSIC_CUBES: [&[u8; FACES]; 25] = [
    b"hdtnho", b"tnuwoo", b"nssseu", b"aemeee", b"asarfi", b"swctnc", b"mteott", b"qbzjkx",
    b"namgne", b"aafars", b"noldhr", b"tetiii", b"londdr", b"fsyria", b"tilcei", b"pieclt",
    b"piecls", b"myrrpi", b"dnanne", b"aeeaee", b"mgaeeu", b"toutoo", b"spriyf", b"rlhhod",
    b"gworru",
];

/// How a board was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Every cell shows one face of a distinct cube
    Dice,
    /// Every cell is an independent uniform draw over `a..=z`
    Uniform,
}

/// One cube placed on the board and the face it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieRoll {
    pub cube: usize,
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterCubes {
    /// Letters on the faces of each cube
    cubes: Vec<[char; FACES]>,
}

impl Default for LetterCubes {
    fn default() -> Self {
        Self::classic()
    }
}

impl LetterCubes {
    pub fn classic() -> Self {
        Self {
            cubes: CLASSIC_CUBES
                .iter()
                .map(|&&faces| faces.map(|b| b as char))
                .collect(),
        }
    }

    /// Builds a cube set from strings of exactly six letters each. Returns
    /// `None` if any cube has a different number of faces.
    pub fn new<'a>(faces: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let cubes = faces
            .into_iter()
            .map(|f| f.chars().collect::<Vec<_>>().try_into().ok())
            .collect::<Option<Vec<[char; FACES]>>>()?;
        Some(Self { cubes })
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn faces(&self, cube: usize) -> Option<&[char; FACES]> {
        self.cubes.get(cube)
    }

    /// Draws `n` distinct cubes in random order and rolls each one. Returns
    /// `None` when there are fewer than `n` cubes.
    pub fn roll<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Option<Vec<DieRoll>> {
        if n > self.cubes.len() {
            return None;
        }
        let mut order: Vec<usize> = (0..self.cubes.len()).collect();
        order.shuffle(rng);
        let rolls = order
            .into_iter()
            .take(n)
            .map(|cube| DieRoll {
                cube,
                letter: self.cubes[cube][rng.gen_range(0..FACES)],
            })
            .collect();
        Some(rolls)
    }

    /// Letters for a `width x height` interior, indexed `[x - 1, y - 1]`.
    pub fn fill<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> (FillMode, Array2<char>) {
        match self.roll(width * height, rng) {
            Some(rolls) => {
                let grid = Array2::from_shape_fn((width, height), |(x, y)| {
                    rolls[x * height + y].letter
                });
                (FillMode::Dice, grid)
            }
            None => (FillMode::Uniform, uniform_letters(width, height, rng)),
        }
    }
}

/// Independent uniform draws over `a..=z`.
pub fn uniform_letters<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Array2<char> {
    Array2::<u8>::random_using((width, height), Uniform::new_inclusive(b'a', b'z'), rng)
        .mapv(|b| b as char)
}
