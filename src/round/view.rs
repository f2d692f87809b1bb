//! Render-ready snapshot of the engine. The presenter draws this verbatim and
//! keeps no game logic of its own.

use std::fmt;

use serde::Serialize;

/// Result line shown under the word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    #[default]
    None,
    Success { spoken: String, similarity: u8 },
    Failure { spoken: String, similarity: u8 },
    Retry,
    GameOver,
    RecognitionError { code: String },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::None => Ok(()),
            Message::Success { spoken, similarity } => write!(
                f,
                "Success! You pronounced \"{spoken}\" ({similarity}% accuracy)."
            ),
            Message::Failure { spoken, similarity } => write!(
                f,
                "Failed! You pronounced \"{spoken}\" ({similarity}% accuracy)."
            ),
            Message::Retry => f.write_str("Retry! Pronounce the word again."),
            Message::GameOver => f.write_str("Game Over! Click Restart to try again."),
            Message::RecognitionError { code } => write!(f, "Error occurred: {code}"),
        }
    }
}

/// Which controls are usable right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start: bool,
    pub restart: bool,
    /// "Listen" button: hear the target word spoken.
    pub pronounce: bool,
    pub retry: bool,
    /// The "Say!" listening indicator.
    pub say_prompt: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub word: String,
    pub lives: u32,
    pub score: u32,
    pub message: Message,
    pub controls: Controls,
}

impl View {
    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn message_text(&self) -> String {
        self.message.to_string()
    }
}
