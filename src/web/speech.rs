//! Web Speech API collaborators: recognition wrapped as a one-shot future and
//! fire-and-forget synthesis.

use std::cell::RefCell;

use js_sys::{Array, Function, Promise, Reflect};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{SpeechRecognition, SpeechRecognitionEvent, SpeechSynthesisUtterance, window};

use super::js_error_text;
use crate::error::RecognitionError;
use crate::session::{Recognizer, Speaker};

// Chrome and Safari only ship the prefixed constructor.
const RECOGNITION_CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];
/// Reported when a result event carries no alternative.
pub const NO_MATCH: &str = "no-match";

type ResultHandler = Closure<dyn FnMut(SpeechRecognitionEvent)>;
type ErrorHandler = Closure<dyn FnMut(JsValue)>;

// Kept alive while installed on the recognition object; replaced per listen.
struct Handlers {
    _on_result: ResultHandler,
    _on_error: ErrorHandler,
}

pub struct BrowserRecognizer {
    recognition: SpeechRecognition,
    handlers: RefCell<Option<Handlers>>,
}

impl BrowserRecognizer {
    pub fn new() -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let ctor = RECOGNITION_CONSTRUCTORS
            .iter()
            .filter_map(|name| Reflect::get(&win, &JsValue::from_str(name)).ok())
            .find(|value| value.is_function())
            .ok_or_else(|| JsValue::from_str("speech recognition is not supported"))?;
        let recognition = Reflect::construct(ctor.unchecked_ref::<Function>(), &Array::new())?;
        Ok(Self {
            recognition: recognition.unchecked_into(),
            handlers: RefCell::new(None),
        })
    }

    fn clear_handlers(&self) {
        self.recognition.set_onresult(None);
        self.recognition.set_onerror(None);
        self.handlers.replace(None);
    }
}

impl Recognizer for BrowserRecognizer {
    async fn listen(&self, locale: &str) -> Result<String, RecognitionError> {
        let recognition = &self.recognition;
        recognition.set_lang(locale);

        let mut installed = None;
        let settled = Promise::new(&mut |resolve, reject| {
            let reject_empty = reject.clone();
            let on_result: ResultHandler = Closure::wrap(Box::new(
                move |event: SpeechRecognitionEvent| match heard(first_transcript(&event)) {
                    Ok(transcript) => {
                        let _ = resolve.call1(&JsValue::NULL, &JsValue::from_str(&transcript));
                    }
                    Err(err) => {
                        let _ = reject_empty.call1(&JsValue::NULL, &JsValue::from_str(&err.code));
                    }
                },
            ) as Box<dyn FnMut(_)>);
            let on_error: ErrorHandler = Closure::wrap(Box::new(move |event: JsValue| {
                let code = Reflect::get(&event, &JsValue::from_str("error"))
                    .ok()
                    .and_then(|code| code.as_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(&code));
            }) as Box<dyn FnMut(_)>);
            recognition.set_onresult(Some(on_result.as_ref().unchecked_ref()));
            recognition.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            installed = Some(Handlers {
                _on_result: on_result,
                _on_error: on_error,
            });
        });
        // the previous listen's closures are no longer installed
        self.handlers.replace(installed);

        if let Err(err) = recognition.start() {
            debug!("recognition start: {}", js_error_text(&err));
            self.clear_handlers();
            return Err(RecognitionError::new(js_error_text(&err)));
        }

        match JsFuture::from(settled).await {
            Ok(transcript) => Ok(transcript.as_string().unwrap_or_default()),
            Err(code) => Err(RecognitionError::new(js_error_text(&code))),
        }
    }

    fn stop(&self) {
        self.recognition.stop();
    }
}

/// A result without any alternative is an error, not an empty attempt.
fn heard(transcript: Option<String>) -> Result<String, RecognitionError> {
    transcript.ok_or_else(|| RecognitionError::new(NO_MATCH))
}

fn first_transcript(event: &SpeechRecognitionEvent) -> Option<String> {
    let alternative = event.results()?.get(0)?.get(0)?;
    Some(alternative.transcript())
}

pub struct BrowserSpeaker;

impl Speaker for BrowserSpeaker {
    fn speak(&self, word: &str, locale: &str) {
        if let Err(err) = speak_word(word, locale) {
            warn!("speech synthesis failed: {}", js_error_text(&err));
        }
    }
}

fn speak_word(word: &str, locale: &str) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let utterance = SpeechSynthesisUtterance::new_with_text(word)?;
    utterance.set_lang(locale);
    win.speech_synthesis()?.speak(&utterance);
    Ok(())
}
