//! Drives the [`RoundEngine`] from the page's asynchronous collaborators.
//!
//! The word supplier and the recognizer each complete a single future per
//! request. The session owns the engine, never keeps it borrowed across an
//! `.await`, and renders the engine's [`View`] after every transition.

use std::cell::{Ref, RefCell};

use log::{debug, info, warn};

use crate::config::{Accuracy, Difficulty, GameConfig};
use crate::error::{RecognitionError, SupplyError};
use crate::round::{Outcome, RoundEngine, RoundTicket, View};

/// Supplies one random word for a difficulty tier.
#[allow(async_fn_in_trait)]
pub trait WordSource {
    async fn fetch_word(&self, difficulty: Difficulty) -> Result<String, SupplyError>;
}

/// Speech-to-text. One call yields one final transcript or an error code.
#[allow(async_fn_in_trait)]
pub trait Recognizer {
    async fn listen(&self, locale: &str) -> Result<String, RecognitionError>;
    /// Stop any recognition in progress. Called when the game ends.
    fn stop(&self);
}

/// Text-to-speech, fire and forget.
pub trait Speaker {
    fn speak(&self, word: &str, locale: &str);
}

pub trait Presenter {
    fn render(&self, view: &View);
}

pub struct Session<W, R, S, P> {
    engine: RefCell<RoundEngine>,
    config: RefCell<GameConfig>,
    words: W,
    recognizer: R,
    speaker: S,
    presenter: P,
}

impl<W, R, S, P> Session<W, R, S, P>
where
    W: WordSource,
    R: Recognizer,
    S: Speaker,
    P: Presenter,
{
    pub fn new(config: GameConfig, words: W, recognizer: R, speaker: S, presenter: P) -> Self {
        let engine = RoundEngine::new(config.accuracy);
        Self {
            engine: RefCell::new(engine),
            config: RefCell::new(config),
            words,
            recognizer,
            speaker,
            presenter,
        }
    }

    pub fn engine(&self) -> Ref<'_, RoundEngine> {
        self.engine.borrow()
    }

    pub fn render(&self) {
        let view = self.engine.borrow().view();
        self.presenter.render(&view);
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) {
        debug!("word difficulty now {difficulty}");
        self.config.borrow_mut().difficulty = difficulty;
    }

    /// Judging follows the selector immediately, lives only on restart.
    pub fn set_accuracy(&self, accuracy: Accuracy) {
        self.config.borrow_mut().accuracy = accuracy;
        self.engine.borrow_mut().set_accuracy(accuracy);
    }

    /// Start button: new word, fresh round, listen. Ignored once the game is
    /// over or while an answer is still pending.
    pub async fn start(&self) {
        if let Some(reason) = self.busy() {
            debug!("start ignored, {reason}");
            return;
        }
        let word = self.next_word().await;
        // another handler may have started a round while the word was in flight
        if let Some(reason) = self.busy() {
            debug!("start dropped, {reason}");
            return;
        }
        let started = self.engine.borrow_mut().start_round(word);
        match started {
            Ok(ticket) => self.listen(ticket).await,
            Err(err) => debug!("round not started: {err}"),
        }
    }

    /// Restart button: new game with lives from the current accuracy.
    pub async fn restart(&self) {
        if self.engine.borrow().is_listening() {
            debug!("restart ignored, an answer is pending");
            return;
        }
        let word = self.next_word().await;
        if self.engine.borrow().is_listening() {
            debug!("restart dropped, an answer is pending");
            return;
        }
        let ticket = self.engine.borrow_mut().reset_game(word);
        info!("game restarted");
        self.listen(ticket).await;
    }

    fn busy(&self) -> Option<&'static str> {
        let engine = self.engine.borrow();
        if engine.is_game_over() {
            Some("game is over")
        } else if engine.is_listening() {
            Some("an answer is pending")
        } else {
            None
        }
    }

    /// Retry button: listen once more for the same word.
    pub async fn retry(&self) {
        let granted = self.engine.borrow_mut().retry();
        if !granted {
            debug!("retry not available");
            return;
        }
        let ticket = self.engine.borrow().ticket();
        self.listen(ticket).await;
    }

    /// Listen button: hear the current word.
    pub fn pronounce(&self) {
        let word = self.engine.borrow().current_word().to_string();
        if word.is_empty() {
            return;
        }
        let locale = self.config.borrow().locale.clone();
        self.speaker.speak(&word, &locale);
    }

    /// A word from the supplier, or the configured fallback word on any failure.
    pub async fn next_word(&self) -> String {
        let (difficulty, fallback) = {
            let config = self.config.borrow();
            (config.difficulty, config.fallback_word.clone())
        };
        match self.words.fetch_word(difficulty).await {
            Ok(word) if !word.is_empty() => word,
            Ok(_) => {
                warn!("{}, using {fallback:?}", SupplyError::Empty);
                fallback
            }
            Err(err) => {
                warn!("error fetching word: {err}, using {fallback:?}");
                fallback
            }
        }
    }

    async fn listen(&self, ticket: RoundTicket) {
        self.render();
        let locale = self.config.borrow().locale.clone();
        let heard = self.recognizer.listen(&locale).await;

        let game_over = {
            let mut engine = self.engine.borrow_mut();
            match heard {
                Ok(transcript) => {
                    let spoken = transcript.to_lowercase();
                    match engine.submit_for(ticket, &spoken) {
                        Ok(result) => result.outcome == Outcome::GameOver,
                        Err(err) => {
                            debug!("transcript {spoken:?} dropped: {err}");
                            false
                        }
                    }
                }
                Err(err) => {
                    warn!("speech recognition error: {err}");
                    if let Err(rejected) = engine.recognition_failed(ticket, &err.code) {
                        debug!("recognition error dropped: {rejected}");
                    }
                    false
                }
            }
        };

        if game_over {
            self.recognizer.stop();
        }
        self.render();
    }
}
