//! Scrabble-style word building.
//!
//! Given a rack of scored letters and a dictionary, find the dictionary
//! word with the highest total letter score that can be spelled from the
//! rack, each rack letter used at most once. Maximized by the GA.

use std::collections::{HashMap, HashSet};

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::direction::Direction;
use crate::error::{MetaheurError, Result};
use crate::ga::{GaConfig, GaMode, GaProblem, Selection};
use crate::operators::column_shuffle_crossover;

/// Probability that `mutate` touches a word at all.
const MUTATION_RATE: f64 = 0.2;
/// Given a mutation, probability of growing and shuffling the word rather
/// than editing one position.
const SHUFFLE_RATE: f64 = 0.9;
/// Given a single-position edit, probability of overwriting rather than
/// inserting.
const OVERWRITE_RATE: f64 = 0.3;

/// Parses a rack line such as `"a 1"`.
pub fn parse_letter(line: &str) -> Result<(char, u32)> {
    let mut parts = line.split_whitespace();
    let (Some(letter), Some(score), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MetaheurError::InvalidInput(format!(
            "expected '<letter> <score>', got '{line}'"
        )));
    };
    let mut chars = letter.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(MetaheurError::InvalidInput(format!(
            "'{letter}' is not a single letter"
        )));
    };
    let score = score
        .parse()
        .map_err(|err| MetaheurError::InvalidInput(format!("bad score '{score}': {err}")))?;
    Ok((c, score))
}

/// Highest-scoring word search over a letter rack.
#[derive(Debug, Clone)]
pub struct WordsProblem {
    dictionary: HashSet<String>,
    scores: HashMap<char, u32>,
    rack: HashMap<char, usize>,
    alphabet: Vec<char>,
}

impl WordsProblem {
    /// Builds the problem from the rack and the dictionary words.
    ///
    /// A letter listed several times is available that many times; its
    /// score is the last one given.
    pub fn new<I, S>(letters: &[(char, u32)], dictionary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scores = HashMap::new();
        let mut rack = HashMap::new();
        for &(c, score) in letters {
            scores.insert(c, score);
            *rack.entry(c).or_insert(0) += 1;
        }
        let mut alphabet: Vec<char> = rack.keys().copied().collect();
        alphabet.sort_unstable();

        Self {
            dictionary: dictionary
                .into_iter()
                .map(|w| w.as_ref().trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
            scores,
            rack,
            alphabet,
        }
    }

    /// Letter score of `word`, or 0 if it is not in the dictionary or needs
    /// letters the rack does not hold.
    pub fn score(&self, word: &str) -> u32 {
        if !self.dictionary.contains(word) {
            return 0;
        }
        let mut left = self.rack.clone();
        let mut total = 0;
        for c in word.chars() {
            match left.get_mut(&c) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    total += self.scores[&c];
                }
                _ => return 0,
            }
        }
        total
    }

    /// Elitist, maximizing GA preset: 10 words, 4 elites, tournaments of 4,
    /// stopping after `ln(timeout)` seconds without improvement.
    pub fn ga_config(timeout_secs: f64) -> GaConfig {
        GaConfig::default()
            .with_population_size(10)
            .with_elite_size(4)
            .with_selection(Selection::Tournament(4))
            .with_mode(GaMode::Elitist)
            .with_direction(Direction::Maximize)
            .with_timeout_secs(timeout_secs)
            .with_log_stagnation_window()
    }
}

impl GaProblem for WordsProblem {
    type Individual = String;

    fn fitness(&self, word: &String) -> f64 {
        f64::from(self.score(word))
    }

    fn crossover<R: Rng>(&self, [a, b]: [String; 2], rng: &mut R) -> [String; 2] {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let (c, d) = column_shuffle_crossover(&a, &b, rng);
        [c.into_iter().collect(), d.into_iter().collect()]
    }

    /// Leaves most words alone. Otherwise either appends up to two distinct
    /// rack letters and shuffles, or writes one rack letter at a random
    /// position (overwriting or inserting).
    fn mutate<R: Rng>(&self, word: String, rng: &mut R) -> String {
        if self.alphabet.is_empty() || !rng.random_bool(MUTATION_RATE) {
            return word;
        }
        let mut chars: Vec<char> = word.chars().collect();

        if rng.random_bool(SHUFFLE_RATE) {
            let extra = rng.random_range(0..=2usize);
            chars.extend(self.alphabet.choose_multiple(rng, extra).copied());
            chars.shuffle(rng);
        } else {
            let letter = self.alphabet[rng.random_range(0..self.alphabet.len())];
            let index = rng.random_range(0..=chars.len());
            if rng.random_bool(OVERWRITE_RATE) && index < chars.len() {
                chars[index] = letter;
            } else {
                chars.insert(index, letter);
            }
        }
        chars.into_iter().collect()
    }
}
