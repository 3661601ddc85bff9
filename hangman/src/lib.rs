use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod game;
mod word_source;
mod words;

pub use game::{Game, Phase, MAX_MISSES};
pub use word_source::{WordSource, DEFAULT_WORDS};
pub use words::parse_words;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("guesses must consist of a single letter - {0:?} is not valid")]
    InvalidGuess(String),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateGameResponse {
    pub id: Uuid,
    pub word: String,
    pub misses: usize,
    pub words_remaining: usize,
}

impl CreateGameResponse {
    pub fn new<R>(id: Uuid, game: &Game<R>) -> Self {
        Self {
            id,
            word: game.masked_word(),
            misses: game.misses(),
            words_remaining: game.words_remaining(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameResponse {
    pub word: String,
    pub misses: usize,
    pub words_solved: usize,
    pub words_remaining: usize,
    /// Whether the guess that produced this response was correct, if there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl GameResponse {
    pub fn new<R>(game: &Game<R>) -> Self {
        Self {
            word: game.masked_word(),
            misses: game.misses(),
            words_solved: game.words_solved(),
            words_remaining: game.words_remaining(),
            correct: None,
        }
    }

    fn with_guess<R>(game: &Game<R>, correct: bool) -> Self {
        Self {
            correct: Some(correct),
            ..Self::new(game)
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpdateGameRequest {
    pub letter: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AddWordsRequest {
    pub words: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UpdateGameResponse {
    Finalize {
        victory: bool,
        word: String,
    },
    /// The previous word was solved and `next` describes the round that followed it.
    RoundWon {
        word: String,
        next: GameResponse,
    },
    Update(GameResponse),
}

impl UpdateGameResponse {
    pub fn update<R>(game: &Game<R>) -> Self {
        UpdateGameResponse::Update(GameResponse::new(game))
    }

    pub fn guess<R>(game: &Game<R>, correct: bool) -> Self {
        UpdateGameResponse::Update(GameResponse::with_guess(game, correct))
    }

    pub fn round_won<R>(word: impl Into<String>, game: &Game<R>) -> Self {
        UpdateGameResponse::RoundWon {
            word: word.into(),
            next: GameResponse::new(game),
        }
    }

    pub fn finalize(word: impl Into<String>, victory: bool) -> Self {
        UpdateGameResponse::Finalize {
            victory,
            word: word.into(),
        }
    }
}
