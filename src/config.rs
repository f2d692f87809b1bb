//! Game settings: word difficulty tiers, judging accuracy levels and the
//! deserializable [`GameConfig`] handed in from JS.

use std::fmt;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::RoundError;

/// Locale used for both recognition and synthesis.
pub const LOCALE: &str = "en-US";
/// Word used whenever the word supplier fails.
pub const FALLBACK_WORD: &str = "error";
/// Points awarded for a successful attempt.
pub const SUCCESS_REWARD: u32 = 10;
pub const WORD_API_URL: &str = "https://random-word-api.herokuapp.com/word";

/// Word supplier tier (`<select id="difficulty">`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Value of the `number` query parameter sent to the word API.
    pub fn word_count(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(RoundError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Judging strictness (`<select id="accuracy">`). The percentage is the
/// minimum similarity for a pass and also picks the starting lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Accuracy {
    Lenient,
    Normal,
    #[default]
    Strict,
}

impl Accuracy {
    pub const ALL: [Accuracy; 3] = [Accuracy::Lenient, Accuracy::Normal, Accuracy::Strict];

    pub fn threshold(self) -> u8 {
        match self {
            Accuracy::Lenient => 80,
            Accuracy::Normal => 90,
            Accuracy::Strict => 95,
        }
    }

    pub fn starting_lives(self) -> u32 {
        match self {
            Accuracy::Lenient => 7,
            Accuracy::Normal => 5,
            Accuracy::Strict => 3,
        }
    }
}

impl TryFrom<u32> for Accuracy {
    type Error = RoundError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        Accuracy::ALL
            .into_iter()
            .find(|a| u32::from(a.threshold()) == percent)
            .ok_or(RoundError::UnsupportedAccuracy(percent))
    }
}

impl From<Accuracy> for u32 {
    fn from(a: Accuracy) -> u32 {
        u32::from(a.threshold())
    }
}

impl FromStr for Accuracy {
    type Err = RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let percent: u32 = s
            .trim()
            .parse()
            .map_err(|_| RoundError::UnparsableAccuracy(s.to_string()))?;
        Accuracy::try_from(percent)
    }
}

/// Startup configuration. Every field has a default so JS may pass a partial
/// object, e.g. `{"accuracy": 80}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub accuracy: Accuracy,
    pub locale: String,
    pub word_api_url: String,
    pub fallback_word: String,
    /// Console verbosity in the browser.
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            accuracy: Accuracy::default(),
            locale: LOCALE.to_string(),
            word_api_url: WORD_API_URL.to_string(),
            fallback_word: FALLBACK_WORD.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Full request URL for one word fetch.
    pub fn word_request_url(&self, difficulty: Difficulty) -> String {
        format!("{}?number={}", self.word_api_url, difficulty.word_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_maps_to_lives() {
        assert_eq!(Accuracy::try_from(80u32).unwrap().starting_lives(), 7);
        assert_eq!(Accuracy::try_from(90u32).unwrap().starting_lives(), 5);
        assert_eq!(Accuracy::try_from(95u32).unwrap().starting_lives(), 3);
    }

    #[test]
    fn unsupported_accuracy_is_rejected() {
        assert!(matches!(
            Accuracy::try_from(85u32),
            Err(RoundError::UnsupportedAccuracy(85))
        ));
        assert!(matches!(
            "ninety".parse::<Accuracy>(),
            Err(RoundError::UnparsableAccuracy(_))
        ));
    }

    #[test]
    fn difficulty_word_counts() {
        assert_eq!("easy".parse::<Difficulty>().unwrap().word_count(), 1);
        assert_eq!("medium".parse::<Difficulty>().unwrap().word_count(), 2);
        assert_eq!("hard".parse::<Difficulty>().unwrap().word_count(), 5);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn partial_json_config_uses_defaults() {
        let cfg = GameConfig::from_json(r#"{"accuracy": 80, "difficulty": "hard"}"#).unwrap();
        assert_eq!(cfg.accuracy, Accuracy::Lenient);
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(cfg.locale, "en-US");
        assert_eq!(cfg.fallback_word, "error");
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert_eq!(
            cfg.word_request_url(cfg.difficulty),
            "https://random-word-api.herokuapp.com/word?number=5"
        );
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let cfg = GameConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn bad_accuracy_in_json_fails() {
        assert!(GameConfig::from_json(r#"{"accuracy": 70}"#).is_err());
    }
}
