use thiserror::Error;

use crate::round::RoundTicket;

/// Rejected engine transitions and invalid settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("the game is over, restart to play again")]
    GameOver,
    #[error("no attempt is being listened for")]
    NotListening,
    #[error("result for round {got} arrived after round {current} started")]
    StaleRound { current: RoundTicket, got: RoundTicket },
    #[error("accuracy level {0}% is not supported (expected 80, 90 or 95)")]
    UnsupportedAccuracy(u32),
    #[error("accuracy level {0:?} is not a number")]
    UnparsableAccuracy(String),
    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

/// Failures of the word supplier. Never fatal: the session falls back to
/// [`crate::config::FALLBACK_WORD`].
#[derive(Error, Debug)]
pub enum SupplyError {
    #[error("word request failed: {0}")]
    Network(String),
    #[error("word response was not a JSON list of strings")]
    Decode(#[from] serde_json::Error),
    #[error("word list was empty")]
    Empty,
}

/// Error code reported by the speech recognizer (e.g. `no-speech`, `not-allowed`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}")]
pub struct RecognitionError {
    pub code: String,
}

impl RecognitionError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
