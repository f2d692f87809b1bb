//! Page elements and the DOM presenter. Element ids match index.html.

use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlSelectElement};

use crate::config::{Accuracy, Difficulty};
use crate::round::View;
use crate::session::Presenter;

pub struct Page {
    pub word_display: HtmlElement,
    pub say_message: HtmlElement,
    pub start_button: HtmlElement,
    pub restart_button: HtmlElement,
    pub listen_button: HtmlElement,
    pub retry_button: HtmlElement,
    pub result: HtmlElement,
    pub lives: HtmlElement,
    pub score: HtmlElement,
    pub difficulty: Option<HtmlSelectElement>,
    pub accuracy: Option<HtmlSelectElement>,
}

impl Page {
    pub fn locate(doc: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            word_display: element(doc, "word-display")?,
            say_message: element(doc, "say-message")?,
            start_button: element(doc, "start-button")?,
            restart_button: element(doc, "restart-button")?,
            listen_button: element(doc, "listen-button")?,
            retry_button: element(doc, "retry-button")?,
            result: element(doc, "result")?,
            lives: element(doc, "lives")?,
            score: element(doc, "score")?,
            difficulty: select(doc, "difficulty"),
            accuracy: select(doc, "accuracy"),
        })
    }

    /// Unknown tiers count as hard.
    pub fn selected_difficulty(&self) -> Option<Difficulty> {
        let value = self.difficulty.as_ref()?.value();
        Some(value.parse().unwrap_or(Difficulty::Hard))
    }

    /// None when the selector is missing or holds an unsupported level.
    pub fn selected_accuracy(&self) -> Option<Accuracy> {
        let value = self.accuracy.as_ref()?.value();
        match value.parse() {
            Ok(accuracy) => Some(accuracy),
            Err(err) => {
                warn!("ignoring accuracy selection: {err}");
                None
            }
        }
    }
}

fn element(doc: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

fn select(doc: &Document, id: &str) -> Option<HtmlSelectElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

pub struct DomPresenter {
    page: Rc<Page>,
}

impl DomPresenter {
    pub fn new(page: Rc<Page>) -> Self {
        Self { page }
    }
}

impl Presenter for DomPresenter {
    fn render(&self, view: &View) {
        let page = &self.page;
        page.word_display.set_text_content(Some(&view.word));
        page.result.set_text_content(Some(&view.message_text()));
        page.lives.set_text_content(Some(&view.lives_text()));
        page.score.set_text_content(Some(&view.score_text()));

        let c = view.controls;
        show(&page.say_message, c.say_prompt, "block");
        show(&page.listen_button, c.pronounce, "inline");
        show(&page.retry_button, c.retry, "inline");
        show(&page.restart_button, c.restart, "inline");
        let _ = page
            .start_button
            .toggle_attribute_with_force("disabled", !c.start);
    }
}

fn show(el: &HtmlElement, visible: bool, display: &str) {
    let value = if visible { display } else { "none" };
    let _ = el.style().set_property("display", value);
}
