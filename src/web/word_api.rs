//! Random word supplier backed by the public random-word HTTP API.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use super::js_error_text;
use crate::config::{Difficulty, GameConfig};
use crate::error::SupplyError;
use crate::session::WordSource;

pub struct HttpWordSource {
    config: GameConfig,
}

impl HttpWordSource {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl WordSource for HttpWordSource {
    async fn fetch_word(&self, difficulty: Difficulty) -> Result<String, SupplyError> {
        let url = self.config.word_request_url(difficulty);
        log::debug!("fetching word from {url}");
        let body = fetch_text(&url)
            .await
            .map_err(|err| SupplyError::Network(js_error_text(&err)))?;
        first_word(&body)
    }
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// The API answers with a JSON array of words; the first one is used.
pub fn first_word(body: &str) -> Result<String, SupplyError> {
    let words: Vec<String> = serde_json::from_str(body)?;
    words.into_iter().next().ok_or(SupplyError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_word_of_list() {
        assert_eq!(first_word(r#"["apple","banana"]"#).unwrap(), "apple");
        assert_eq!(first_word(r#"["kiwi"]"#).unwrap(), "kiwi");
    }

    #[test]
    fn empty_or_malformed_body() {
        assert!(matches!(first_word("[]"), Err(SupplyError::Empty)));
        assert!(matches!(first_word("<html>"), Err(SupplyError::Decode(_))));
        assert!(matches!(first_word(r#"{"word":"x"}"#), Err(SupplyError::Decode(_))));
    }
}
