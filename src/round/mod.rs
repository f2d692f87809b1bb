//! Round engine: lives, score, the once-per-round retry and judging.
//!
//! The engine is a plain state object. Every handler on the page goes through
//! one of its transitions and then renders [`RoundEngine::view`]; nothing here
//! performs I/O. Listening is modelled as a window that is opened by
//! [`RoundEngine::start_round`] or a granted [`RoundEngine::retry`] and closed
//! by exactly one result (an attempt or a recognition error).

use std::fmt;

use log::{debug, info};

use crate::config::{Accuracy, SUCCESS_REWARD};
use crate::error::RoundError;
use crate::similarity::compare_words;

mod view;

pub use view::{Controls, Message, View};

/// Identifies one round. Results carrying an older ticket are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundTicket(u64);

impl RoundTicket {
    fn next(self) -> Self {
        RoundTicket(self.0 + 1)
    }
}

impl fmt::Display for RoundTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the current round stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No attempt pending (before the first round, or after a recognition error).
    #[default]
    Idle,
    Listening,
    Passed,
    Missed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptResult {
    pub outcome: Outcome,
    pub similarity: u8,
    pub lives: u32,
    pub score: u32,
    pub retry_available: bool,
}

#[derive(Clone, Debug)]
pub struct RoundEngine {
    current_word: String,
    lives: u32,
    score: u32,
    retry_used: bool,
    game_over: bool,
    accuracy: Accuracy,
    ticket: RoundTicket,
    phase: Phase,
    message: Message,
}

impl RoundEngine {
    pub fn new(accuracy: Accuracy) -> Self {
        let mut engine = Self {
            current_word: String::new(),
            lives: 0,
            score: 0,
            retry_used: false,
            game_over: false,
            accuracy,
            ticket: RoundTicket::default(),
            phase: Phase::Idle,
            message: Message::None,
        };
        engine.configure_difficulty(accuracy);
        engine
    }

    /// Select the judging threshold and set lives from it. Returns the new lives.
    pub fn configure_difficulty(&mut self, accuracy: Accuracy) -> u32 {
        self.accuracy = accuracy;
        self.lives = accuracy.starting_lives();
        info!(
            "accuracy {}% selected, lives set to {}",
            accuracy.threshold(),
            self.lives
        );
        self.lives
    }

    /// Change the judging threshold only; lives follow on the next reset.
    pub fn set_accuracy(&mut self, accuracy: Accuracy) {
        debug!("judging threshold now {}%", accuracy.threshold());
        self.accuracy = accuracy;
    }

    pub fn start_round(&mut self, word: impl Into<String>) -> Result<RoundTicket, RoundError> {
        if self.game_over {
            return Err(RoundError::GameOver);
        }
        Ok(self.begin_round(word.into()))
    }

    fn begin_round(&mut self, word: String) -> RoundTicket {
        self.ticket = self.ticket.next();
        self.current_word = word;
        self.retry_used = false;
        self.message = Message::None;
        self.phase = Phase::Listening;
        info!("round {} started with {:?}", self.ticket, self.current_word);
        self.ticket
    }

    /// Judge a (lowercased) transcript against the current word.
    pub fn submit_attempt(&mut self, spoken: &str) -> Result<AttemptResult, RoundError> {
        if self.game_over {
            return Err(RoundError::GameOver);
        }
        if self.phase != Phase::Listening {
            return Err(RoundError::NotListening);
        }

        let similarity = compare_words(&self.current_word, spoken);
        let outcome = if similarity >= self.accuracy.threshold() {
            self.score = self.score.saturating_add(SUCCESS_REWARD);
            self.phase = Phase::Passed;
            self.message = Message::Success {
                spoken: spoken.to_string(),
                similarity,
            };
            Outcome::Success
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.phase = Phase::Missed;
            self.message = Message::Failure {
                spoken: spoken.to_string(),
                similarity,
            };
            if self.lives == 0 {
                self.game_over = true;
                self.message = Message::GameOver;
                Outcome::GameOver
            } else {
                Outcome::Failure
            }
        };

        info!(
            "round {}: {:?} said {:?} ({}%), {:?}, lives {}, score {}",
            self.ticket, self.current_word, spoken, similarity, outcome, self.lives, self.score
        );
        Ok(AttemptResult {
            outcome,
            similarity,
            lives: self.lives,
            score: self.score,
            retry_available: self.retry_available(),
        })
    }

    /// [`submit_attempt`](Self::submit_attempt) guarded against results of an
    /// earlier round.
    pub fn submit_for(
        &mut self,
        ticket: RoundTicket,
        spoken: &str,
    ) -> Result<AttemptResult, RoundError> {
        self.check_ticket(ticket)?;
        self.submit_attempt(spoken)
    }

    /// Consume the round's single retry. Returns false, touching nothing, when
    /// no retry is available.
    pub fn retry(&mut self) -> bool {
        if !self.retry_available() {
            return false;
        }
        self.retry_used = true;
        self.phase = Phase::Listening;
        self.message = Message::Retry;
        debug!("round {}: retry granted", self.ticket);
        true
    }

    /// Start a fresh game with the current accuracy and immediately begin a
    /// round with `word`.
    pub fn reset_game(&mut self, word: impl Into<String>) -> RoundTicket {
        self.configure_difficulty(self.accuracy);
        self.score = 0;
        self.retry_used = false;
        self.game_over = false;
        self.message = Message::None;
        self.begin_round(word.into())
    }

    /// The recognizer gave up. The attempt counts as never made.
    pub fn recognition_failed(&mut self, ticket: RoundTicket, code: &str) -> Result<(), RoundError> {
        self.check_ticket(ticket)?;
        if self.phase != Phase::Listening {
            return Err(RoundError::NotListening);
        }
        // a failed retry keeps the earlier miss on screen
        self.phase = if self.retry_used { Phase::Missed } else { Phase::Idle };
        self.message = Message::RecognitionError {
            code: code.to_string(),
        };
        Ok(())
    }

    fn check_ticket(&self, ticket: RoundTicket) -> Result<(), RoundError> {
        if ticket != self.ticket {
            return Err(RoundError::StaleRound {
                current: self.ticket,
                got: ticket,
            });
        }
        Ok(())
    }

    pub fn retry_available(&self) -> bool {
        self.phase == Phase::Missed && !self.retry_used && self.lives > 0 && !self.game_over
    }

    pub fn view(&self) -> View {
        let pronounce = self.game_over
            || self.phase == Phase::Missed
            || (self.phase == Phase::Listening && self.retry_used);
        View {
            word: self.current_word.clone(),
            lives: self.lives,
            score: self.score,
            message: self.message.clone(),
            controls: Controls {
                start: !self.game_over && self.phase != Phase::Listening,
                restart: self.game_over,
                pronounce,
                retry: self.retry_available(),
                say_prompt: self.phase == Phase::Listening,
            },
        }
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn retry_used(&self) -> bool {
        self.retry_used
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_listening(&self) -> bool {
        self.phase == Phase::Listening
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    pub fn ticket(&self) -> RoundTicket {
        self.ticket
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new(Accuracy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(accuracy: Accuracy, word: &str) -> RoundEngine {
        let mut e = RoundEngine::new(accuracy);
        e.start_round(word).unwrap();
        e
    }

    #[test]
    fn new_engine_has_lives_from_accuracy() {
        assert_eq!(RoundEngine::new(Accuracy::Lenient).lives(), 7);
        assert_eq!(RoundEngine::new(Accuracy::Normal).lives(), 5);
        assert_eq!(RoundEngine::new(Accuracy::Strict).lives(), 3);
        assert!(!RoundEngine::default().view().controls.say_prompt);
    }

    #[test]
    fn success_adds_reward_and_ends_round() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        let r = e.submit_attempt("cat").unwrap();
        assert_eq!(r.outcome, Outcome::Success);
        assert_eq!(r.similarity, 100);
        assert_eq!((r.lives, r.score), (3, 10));
        assert!(!r.retry_available);
        assert!(!e.retry());
        assert_eq!(e.phase(), Phase::Passed);
        let v = e.view();
        assert!(!v.controls.pronounce && !v.controls.retry && !v.controls.say_prompt);
    }

    #[test]
    fn threshold_is_inclusive() {
        // 4 of 5 = 80%
        let mut e = engine_with(Accuracy::Lenient, "seven");
        assert_eq!(e.submit_attempt("sever").unwrap().outcome, Outcome::Success);
        let mut e = engine_with(Accuracy::Normal, "seven");
        assert_eq!(e.submit_attempt("sever").unwrap().outcome, Outcome::Failure);
    }

    #[test]
    fn only_one_result_per_listening_window() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        e.submit_attempt("dog").unwrap();
        assert_eq!(e.submit_attempt("cat"), Err(RoundError::NotListening));
        assert_eq!(e.lives(), 2);
    }

    #[test]
    fn submit_before_any_round_is_rejected() {
        let mut e = RoundEngine::new(Accuracy::Strict);
        assert_eq!(e.submit_attempt("cat"), Err(RoundError::NotListening));
    }

    #[test]
    fn start_round_keeps_lives_and_score() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        e.submit_attempt("cat").unwrap();
        e.start_round("dog").unwrap();
        e.submit_attempt("dig").unwrap();
        assert!(e.retry());
        let t = e.start_round("bird").unwrap();
        assert_eq!((e.lives(), e.score()), (2, 10));
        assert!(!e.retry_used());
        assert_eq!(e.current_word(), "bird");
        assert_eq!(e.message(), &Message::None);
        assert_eq!(e.ticket(), t);
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut e = RoundEngine::new(Accuracy::Strict);
        let first = e.start_round("cat").unwrap();
        let second = e.start_round("dog").unwrap();
        assert!(matches!(
            e.submit_for(first, "cat"),
            Err(RoundError::StaleRound { .. })
        ));
        assert_eq!(e.submit_for(second, "dog").unwrap().outcome, Outcome::Success);
    }

    #[test]
    fn recognition_error_leaves_lives_untouched() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        let t = e.ticket();
        e.recognition_failed(t, "no-speech").unwrap();
        assert_eq!((e.lives(), e.score()), (3, 0));
        assert_eq!(e.phase(), Phase::Idle);
        let v = e.view();
        assert_eq!(v.message_text(), "Error occurred: no-speech");
        assert!(!v.controls.say_prompt && !v.controls.retry);
        assert_eq!(e.submit_attempt("cat"), Err(RoundError::NotListening));
    }

    #[test]
    fn recognition_error_for_old_round_is_rejected() {
        let mut e = RoundEngine::new(Accuracy::Strict);
        let old = e.start_round("cat").unwrap();
        e.start_round("dog").unwrap();
        assert!(matches!(
            e.recognition_failed(old, "network"),
            Err(RoundError::StaleRound { .. })
        ));
        assert_eq!(e.lives(), 3);
        assert_eq!(e.message(), &Message::None);
        assert_eq!(e.phase(), Phase::Listening);
    }

    #[test]
    fn start_is_unavailable_while_listening() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        assert!(!e.view().controls.start);
        e.submit_attempt("cat").unwrap();
        assert!(e.view().controls.start);
    }

    #[test]
    fn score_saturates() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        e.score = u32::MAX - 1;
        e.submit_attempt("cat").unwrap();
        assert_eq!(e.score(), u32::MAX);
    }

    #[test]
    fn recognition_error_during_retry_keeps_miss() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        e.submit_attempt("dog").unwrap();
        assert!(e.retry());
        assert!(e.view().controls.pronounce);
        let t = e.ticket();
        e.recognition_failed(t, "aborted").unwrap();
        assert_eq!(e.phase(), Phase::Missed);
        assert!(!e.retry_available());
        assert!(e.view().controls.pronounce);
    }

    #[test]
    fn game_over_view() {
        let mut e = engine_with(Accuracy::Strict, "cat");
        for _ in 0..3 {
            e.submit_attempt("dog").unwrap();
            if !e.is_game_over() {
                e.start_round("cat").unwrap();
            }
        }
        let v = e.view();
        assert_eq!(v.lives, 0);
        assert_eq!(v.message_text(), "Game Over! Click Restart to try again.");
        assert_eq!(
            v.controls,
            Controls {
                start: false,
                restart: true,
                pronounce: true,
                retry: false,
                say_prompt: false,
            }
        );
    }

    #[test]
    fn set_accuracy_changes_threshold_only() {
        let mut e = engine_with(Accuracy::Strict, "seven");
        e.set_accuracy(Accuracy::Lenient);
        assert_eq!(e.lives(), 3);
        assert_eq!(e.submit_attempt("sever").unwrap().outcome, Outcome::Success);
        e.submit_attempt("x").unwrap_err();
        let t = e.reset_game("cat");
        assert_eq!(t, e.ticket());
        assert_eq!(e.lives(), 7);
    }
}
