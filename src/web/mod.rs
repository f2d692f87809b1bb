//! Browser entry points. Wires the page's buttons and selectors to a
//! [`Session`] built from the Web Speech, fetch and DOM collaborators.
use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, window};

use crate::config::GameConfig;
use crate::session::Session;

mod console_log;
mod dom;
mod speech;
mod word_api;

pub use dom::{DomPresenter, Page};
pub use speech::{BrowserRecognizer, BrowserSpeaker};
pub use word_api::{HttpWordSource, first_word};

type WebSession = Session<HttpWordSource, BrowserRecognizer, BrowserSpeaker, DomPresenter>;

/// Boot the game with default settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    start_game_with_config("{}")
}

/// Boot the game from a JSON [`GameConfig`]. Selector values on the page,
/// when present, take precedence over the configured difficulty/accuracy.
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    let mut config =
        GameConfig::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    console_log::init(config.log_level);

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let page = Rc::new(Page::locate(&doc)?);
    if let Some(difficulty) = page.selected_difficulty() {
        config.difficulty = difficulty;
    }
    if let Some(accuracy) = page.selected_accuracy() {
        config.accuracy = accuracy;
    }

    let session: Rc<WebSession> = Rc::new(Session::new(
        config.clone(),
        HttpWordSource::new(config.clone()),
        BrowserRecognizer::new()?,
        BrowserSpeaker,
        DomPresenter::new(page.clone()),
    ));
    session.render();

    {
        let s = session.clone();
        on(&page.start_button, "click", move || {
            let s = s.clone();
            wasm_bindgen_futures::spawn_local(async move { s.start().await });
        })?;
    }
    {
        let s = session.clone();
        on(&page.restart_button, "click", move || {
            let s = s.clone();
            wasm_bindgen_futures::spawn_local(async move { s.restart().await });
        })?;
    }
    {
        let s = session.clone();
        on(&page.retry_button, "click", move || {
            let s = s.clone();
            wasm_bindgen_futures::spawn_local(async move { s.retry().await });
        })?;
    }
    {
        let s = session.clone();
        on(&page.listen_button, "click", move || s.pronounce())?;
    }
    if let Some(select) = &page.difficulty {
        let s = session.clone();
        let p = page.clone();
        on(select, "change", move || {
            if let Some(difficulty) = p.selected_difficulty() {
                s.set_difficulty(difficulty);
            }
        })?;
    }
    if let Some(select) = &page.accuracy {
        let s = session.clone();
        let p = page.clone();
        on(select, "change", move || {
            if let Some(accuracy) = p.selected_accuracy() {
                s.set_accuracy(accuracy);
            }
        })?;
    }

    info!(
        "game ready ({} words, {}% accuracy)",
        config.difficulty,
        config.accuracy.threshold()
    );
    Ok(())
}

fn on(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| handler()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub(crate) fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
