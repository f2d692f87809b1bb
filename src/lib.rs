//! Say It! core crate.
//!
//! A pronunciation practice game: a random word is shown, the player says it,
//! and the Web Speech transcript is scored by index-aligned character matching
//! against the word. Lives and score carry across rounds until the game is
//! restarted.
//!
//! The game logic ([`round`], [`similarity`]) is plain Rust with no browser
//! dependency; [`session`] drives it through collaborator traits and [`web`]
//! provides the wasm entry points (`start_game`, `start_game_with_config`).

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod round;
pub mod session;
pub mod similarity;
pub mod web;

pub use config::{Accuracy, Difficulty, GameConfig};
pub use error::{RecognitionError, RoundError, SupplyError};
pub use round::{AttemptResult, Outcome, RoundEngine, RoundTicket, View};
pub use session::{Presenter, Recognizer, Session, Speaker, WordSource};
pub use similarity::compare_words;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Similarity of `spoken` to `target` in percent, for callers on the JS side.
#[wasm_bindgen(js_name = compareWords)]
pub fn compare_words_js(target: &str, spoken: &str) -> u8 {
    compare_words(target, spoken)
}
