use hashbrown::HashSet;
use rand::Rng;
use squirrel_rng::SquirrelRng;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, Result, WordSource};

/// Incorrect guesses allowed before a round (and with it, the game) is lost.
pub const MAX_MISSES: usize = 6;

const PLACEHOLDER: &str = "_";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// `reset` has not been called yet.
    AwaitingReset,
    InRound,
    /// Every letter of the current word has been guessed.
    RoundOver,
    /// The player ran out of misses or the source ran out of words.
    GameOver,
}

/// A game of hangman spanning as many rounds as its word source has words.
///
/// Letters are grapheme clusters rather than bytes or chars, so `ł` or an `e` followed by a
/// combining accent each count as a single letter, both as a guess and in the masked word.
#[derive(Debug)]
pub struct Game<R = SquirrelRng> {
    source: WordSource<R>,
    word: Option<String>,
    guessed: HashSet<String>,
    misses: usize,
    words_solved: usize,
    started: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(WordSource::new())
    }
}

impl<R: Rng> Game<R> {
    pub fn new(source: WordSource<R>) -> Self {
        Self {
            source,
            word: None,
            guessed: HashSet::new(),
            misses: 0,
            words_solved: 0,
            started: false,
        }
    }

    /// Start the next round with a fresh word. If the source has nothing left to give, the game
    /// is over instead.
    pub fn reset(&mut self) {
        self.started = true;
        self.word = self.source.draw();
        self.guessed.clear();
        self.misses = 0;

        match &self.word {
            Some(word) => log::info!(
                "new round: {} letters, {} words remaining",
                word.graphemes(true).count(),
                self.source.len()
            ),
            None => log::info!("no words remaining, {} solved", self.words_solved),
        }

        // A word without letters has nothing left to guess.
        if self.is_round_over() {
            self.words_solved += 1;
            log::info!("empty word solved, {} words solved", self.words_solved);
        }
    }

    /// Guess a single letter, returning whether the current word contains it.
    ///
    /// Anything other than exactly one grapheme cluster is rejected with
    /// [`Error::InvalidGuess`] and leaves the game untouched. A valid guess made while no round
    /// is in progress is ignored and reported as incorrect.
    pub fn try_letter(&mut self, guess: &str) -> Result<bool> {
        validate(guess)?;

        let word = match (self.phase(), self.word.as_deref()) {
            (Phase::InRound, Some(word)) => word,
            (phase, _) => {
                log::warn!("ignoring guess {guess:?} in phase {phase:?}");
                return Ok(false);
            }
        };

        let correct = word.contains(guess);
        self.guessed.insert(guess.to_owned());
        if !correct {
            self.misses += 1;
        }
        log::debug!("guess {guess:?}: correct={correct} misses={}", self.misses);

        if self.is_round_over() {
            self.words_solved += 1;
            log::info!("round solved, {} words solved", self.words_solved);
        } else if self.misses == MAX_MISSES {
            log::info!("out of misses, game over");
        }

        Ok(correct)
    }

    /// Add words to the bound source. Only later rounds are affected.
    pub fn add_words<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.source.add_words(words);
    }
}

impl<R> Game<R> {
    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::AwaitingReset
        } else if self.is_game_over() {
            Phase::GameOver
        } else if self.is_round_over() {
            Phase::RoundOver
        } else {
            Phase::InRound
        }
    }

    /// The current word with every letter not yet guessed replaced by `_`.
    pub fn masked_word(&self) -> String {
        let Some(word) = self.word.as_deref() else {
            return String::new();
        };

        word.graphemes(true)
            .map(|letter| {
                if self.guessed.contains(letter) {
                    letter
                } else {
                    PLACEHOLDER
                }
            })
            .collect()
    }

    pub fn is_round_over(&self) -> bool {
        self.word
            .as_deref()
            .map_or(false, |word| word.graphemes(true).all(|letter| self.guessed.contains(letter)))
    }

    pub fn is_game_over(&self) -> bool {
        self.misses == MAX_MISSES || self.word.is_none()
    }

    /// True once every word ever added to the source has been solved.
    pub fn did_win(&self) -> bool {
        self.source.is_empty() && self.words_solved == self.source.total_added()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn misses_remaining(&self) -> usize {
        MAX_MISSES - self.misses
    }

    pub fn words_solved(&self) -> usize {
        self.words_solved
    }

    pub fn words_remaining(&self) -> usize {
        self.source.len()
    }

    pub fn has_guessed(&self, letter: &str) -> bool {
        self.guessed.contains(letter)
    }

    pub fn guessed_letters(&self) -> impl Iterator<Item = &str> {
        self.guessed.iter().map(String::as_str)
    }

    pub fn source(&self) -> &WordSource<R> {
        &self.source
    }
}

fn validate(guess: &str) -> Result<()> {
    let mut letters = guess.graphemes(true);
    match (letters.next(), letters.next()) {
        (Some(_), None) => Ok(()),
        _ => Err(Error::InvalidGuess(guess.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use squirrel_rng::SquirrelRng;

    use super::{Game, Phase, MAX_MISSES};
    use crate::{Error, WordSource};

    fn game_with(words: &[&str]) -> Game {
        let mut source = WordSource::empty_with_rng(SquirrelRng::with_seed(3408509824));
        source.add_words(words.iter().copied());
        let mut game = Game::new(source);
        game.reset();
        game
    }

    #[test]
    fn awaiting_reset_until_first_draw() {
        let game = Game::default();
        assert_eq!(game.phase(), Phase::AwaitingReset);
        assert_eq!(game.current_word(), None);
        assert_eq!(game.masked_word(), "");
    }

    #[test]
    fn mask_has_one_placeholder_per_letter() {
        let game = game_with(&["słońce"]);
        assert_eq!(game.phase(), Phase::InRound);
        assert_eq!(game.masked_word(), "______");
    }

    #[test]
    fn correct_guess_reveals_every_occurrence() {
        let mut game = game_with(&["drzewo"]);
        assert_eq!(game.try_letter("d"), Ok(true));
        assert_eq!(game.masked_word(), "d_____");

        let mut game = game_with(&["koło"]);
        assert_eq!(game.try_letter("o"), Ok(true));
        assert_eq!(game.try_letter("ł"), Ok(true));
        assert_eq!(game.masked_word(), "_oło");
        assert_eq!(game.misses(), 0);
    }

    #[test]
    fn rejects_anything_but_one_letter() {
        let mut game = game_with(&["pole"]);

        for guess in ["", "long", "pl", "ó ", "\u{301}\u{301}o"] {
            assert_eq!(
                game.try_letter(guess),
                Err(Error::InvalidGuess(guess.to_owned()))
            );
        }

        assert_eq!(game.misses(), 0);
        assert_eq!(game.guessed_letters().count(), 0);
        assert_eq!(game.words_solved(), 0);
    }

    #[test]
    fn accepts_multi_code_point_letters() {
        let mut game = game_with(&["cafe\u{301}"]);
        assert_eq!(game.try_letter("e\u{301}"), Ok(true));
        assert_eq!(game.masked_word(), "___e\u{301}");
        assert_eq!(game.try_letter("ń"), Ok(false));
    }

    #[test]
    fn substring_of_a_letter_counts_as_correct_but_reveals_nothing() {
        let mut game = game_with(&["e\u{301}"]);
        assert_eq!(game.try_letter("e"), Ok(true));
        assert_eq!(game.masked_word(), "_");
        assert!(!game.is_round_over());
        assert_eq!(game.misses(), 0);
    }

    #[test]
    fn every_wrong_guess_costs_a_miss() {
        let mut game = game_with(&["pole"]);
        assert_eq!(game.try_letter("x"), Ok(false));
        assert_eq!(game.try_letter("x"), Ok(false));
        assert_eq!(game.misses(), 2);
        assert_eq!(game.misses_remaining(), MAX_MISSES - 2);
        assert!(game.has_guessed("x"));

        game.reset();
        assert_eq!(game.misses(), 0);
        assert!(!game.has_guessed("x"));
    }

    #[test]
    fn running_out_of_misses_ends_the_game() {
        let mut game = game_with(&["pole", "koło"]);
        for guess in ["a", "b", "c", "d", "f", "g"] {
            assert_eq!(game.try_letter(guess), Ok(false));
        }

        assert!(game.is_game_over());
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.misses(), MAX_MISSES);
        assert!(!game.did_win());

        // Further guesses leave the lost round alone.
        assert_eq!(game.try_letter("h"), Ok(false));
        assert_eq!(game.misses(), MAX_MISSES);
    }

    #[test]
    fn solving_every_word_wins() {
        let mut game = game_with(&["ab"]);
        assert_eq!(game.try_letter("a"), Ok(true));
        assert!(!game.is_round_over());
        assert_eq!(game.try_letter("b"), Ok(true));

        assert!(game.is_round_over());
        assert_eq!(game.phase(), Phase::RoundOver);
        assert_eq!(game.masked_word(), "ab");
        assert_eq!(game.words_solved(), 1);

        // Guessing again after the round is solved does not count it twice.
        assert_eq!(game.try_letter("a"), Ok(false));
        assert_eq!(game.words_solved(), 1);

        game.reset();
        assert_eq!(game.current_word(), None);
        assert!(game.is_game_over());
        assert!(game.did_win());
    }

    #[test]
    fn skipped_words_make_winning_impossible() {
        let mut game = game_with(&["ab", "cd"]);
        game.reset();
        let word = game.current_word().unwrap_or_default().to_owned();
        for letter in word.chars() {
            assert_eq!(game.try_letter(&letter.to_string()), Ok(true));
        }
        assert!(game.is_round_over());

        game.reset();
        assert!(game.is_game_over());
        assert_eq!(game.words_solved(), 1);
        assert!(!game.did_win());
    }

    #[test]
    fn empty_word_counts_as_solved() {
        let mut game = game_with(&["ab"]);
        game.add_words([""]);
        assert_eq!(game.try_letter("a"), Ok(true));
        assert_eq!(game.try_letter("b"), Ok(true));

        game.reset();
        assert_eq!(game.current_word(), Some(""));
        assert_eq!(game.phase(), Phase::RoundOver);
        assert_eq!(game.words_solved(), 2);
        assert_eq!(game.try_letter("x"), Ok(false));
        assert_eq!(game.words_solved(), 2);

        game.reset();
        assert!(game.is_game_over());
        assert!(game.did_win());
    }

    #[test]
    fn words_added_mid_round_wait_for_later_rounds() {
        let mut game = game_with(&["ab"]);
        assert_eq!(game.words_remaining(), 0);

        game.add_words(["cd"]);
        assert_eq!(game.current_word(), Some("ab"));
        assert_eq!(game.words_remaining(), 1);
        assert_eq!(game.source().total_added(), 2);

        game.reset();
        assert_eq!(game.current_word(), Some("cd"));
    }
}
