//! Browser adapter: binds the page's elements to a [`GameController`] and forwards DOM
//! events into it.
//!
//! Page contract: `#firstNumber`, `#secondNumber` and `#answerInput` inputs, `#checkButton`
//! and `#resetButton` controls, `.star` slots, `.digit` pad keys, a `.game__levels` label,
//! a `.top__stage` top-score region and a `.game` background region. The label, top-score
//! and background regions are optional; everything else is required.

use std::cell::{Cell, RefCell};

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Feedback, GameController, Level, Presenter};
use crate::storage::LocalStorageStore;

const WIN_MESSAGE: &str = "You Win the Game!";

pub type WebGame = GameController<DomPresenter, LocalStorageStore, StdRng>;

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
    static LISTENERS_BOUND: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the live game, `None` before [`start`] succeeded.
pub fn with_game<T>(f: impl FnOnce(&mut WebGame) -> T) -> Option<T> {
    GAME.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Presenter writing straight into the page's elements.
pub struct DomPresenter {
    window: Window,
    document: Document,
    first: HtmlInputElement,
    second: HtmlInputElement,
    answer: HtmlInputElement,
    check: HtmlElement,
    stars: Vec<Element>,
    level_label: Option<Element>,
    top_stage: Option<Element>,
    game: Option<HtmlElement>,
    body: Option<HtmlElement>,
    star_image: String,
}

fn by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, GameError> {
    doc.get_element_by_id(id)
        .ok_or(GameError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| GameError::WrongElementType(id))
}

fn all(doc: &Document, selector: &str) -> Result<Vec<Element>, GameError> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

impl DomPresenter {
    pub fn bind(window: Window, config: &GameConfig) -> Result<Self, GameError> {
        let document = window.document().ok_or(GameError::NoDocument)?;
        let game = document
            .query_selector(".game")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Ok(Self {
            first: by_id(&document, "firstNumber")?,
            second: by_id(&document, "secondNumber")?,
            answer: by_id(&document, "answerInput")?,
            check: by_id(&document, "checkButton")?,
            stars: all(&document, ".star")?,
            level_label: document.query_selector(".game__levels")?,
            top_stage: document.query_selector(".top__stage")?,
            game,
            body: document.body(),
            star_image: config.star_image.clone(),
            window,
            document,
        })
    }

    /// Star slots present on the page.
    pub fn slot_count(&self) -> usize {
        self.stars.len()
    }

    fn star_img(&self) -> Result<Element, JsValue> {
        let img = self.document.create_element("img")?;
        img.set_attribute("src", &self.star_image)?;
        img.set_attribute("alt", "Star")?;
        img.set_attribute("width", "10")?;
        img.set_attribute("height", "10")?;
        img.set_attribute("style", "border-radius:20px")?;
        Ok(img)
    }

    fn style_check(&self, props: &[(&str, Option<&str>)]) {
        let style = self.check.style();
        for (name, value) in props {
            let res = match value {
                Some(v) => style.set_property(name, v),
                None => style.remove_property(name).map(|_| ()),
            };
            if res.is_err() {
                log::warn!("could not style check button `{name}`");
            }
        }
    }
}

impl Presenter for DomPresenter {
    fn show_operands(&mut self, first: u32, second: u32) {
        self.first.set_value(&first.to_string());
        self.second.set_value(&second.to_string());
    }

    fn show_answer(&mut self, answer: &str) {
        self.answer.set_value(answer);
    }

    fn show_stars(&mut self, filled: u32, slots: u32) {
        // A page with star slots fixes the star count at start.
        debug_assert!(self.stars.is_empty() || slots as usize == self.stars.len());
        for (i, slot) in self.stars.iter().enumerate() {
            if (i as u32) >= filled {
                slot.set_inner_html("");
                continue;
            }
            if slot.child_element_count() > 0 {
                continue;
            }
            if let Err(e) = self.star_img().and_then(|img| slot.append_child(&img)) {
                log::warn!("could not place star {i}: {}", crate::error::js_detail(&e));
            }
        }
    }

    fn show_background(&mut self, image: &str) {
        let Some(game) = &self.game else { return };
        let style = game.style();
        let url = format!("url('{image}')");
        let ok = style.set_property("background-image", &url).is_ok()
            && style.set_property("width", "100%").is_ok()
            && style.set_property("height", "100vh").is_ok();
        if !ok {
            log::warn!("could not set background {image}");
        }
    }

    fn show_level(&mut self, level: Level) {
        if let Some(body) = &self.body {
            body.set_class_name(&level.body_class());
        }
        if let Some(label) = &self.level_label {
            label.set_text_content(Some(&level.label()));
        }
    }

    fn show_top_score(&mut self, level: Level) {
        if let Some(top) = &self.top_stage {
            top.set_text_content(Some(&level.to_string()));
        }
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        match feedback {
            Feedback::Neutral => self.style_check(&[
                ("background", None),
                ("background-color", None),
                ("color", None),
            ]),
            Feedback::Correct => self.style_check(&[("background-color", Some("yellow"))]),
            Feedback::Wrong => {
                self.style_check(&[("background", Some("red")), ("color", Some("white"))])
            }
        }
    }

    fn announce_win(&mut self) {
        if self.window.alert_with_message(WIN_MESSAGE).is_err() {
            log::warn!("win alert failed");
        }
    }
}

/// Input controls the listeners attach to.
struct Controls {
    digits: Vec<Element>,
    answer: HtmlInputElement,
    check: HtmlElement,
    reset: HtmlElement,
}

impl Controls {
    fn find(doc: &Document) -> Result<Self, GameError> {
        Ok(Self {
            digits: all(doc, ".digit")?,
            answer: by_id(doc, "answerInput")?,
            check: by_id(doc, "checkButton")?,
            reset: by_id(doc, "resetButton")?,
        })
    }
}

/// Bind the page, restore the top score and start listening for input.
/// Every required element is resolved before anything is stored, so a failed start
/// leaves no game behind.
pub fn start(config: GameConfig) -> Result<(), GameError> {
    let window = web_sys::window().ok_or(GameError::NoWindow)?;
    let document = window.document().ok_or(GameError::NoDocument)?;
    let presenter = DomPresenter::bind(window, &config)?;
    let controls = Controls::find(&document)?;
    // The page decides how many stars a level takes.
    let config = match presenter.slot_count() {
        0 => config,
        n => config.with_stars_per_level(n as u32),
    };
    let store = LocalStorageStore::new(config.storage_key.clone());
    let mut game = GameController::new(config, presenter, store, StdRng::from_entropy())?;

    if !LISTENERS_BOUND.with(Cell::get) {
        bind_listeners(controls)?;
        LISTENERS_BOUND.with(|b| b.set(true));
    }
    game.start();
    GAME.with(|cell| cell.replace(Some(game)));
    Ok(())
}

fn bind_listeners(controls: Controls) -> Result<(), GameError> {
    let Controls { digits, answer, check, reset } = controls;

    // Digit pad
    for key in digits {
        let key_text = key.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let text = key_text.text_content().unwrap_or_default();
            with_game(|g| {
                for c in text.trim().chars() {
                    if let Some(d) = c.to_digit(10) {
                        g.press_digit(d as u8);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        key.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Answer field: digits only
    {
        let field = answer.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let raw = field.value();
            with_game(|g| {
                g.input_changed(&raw);
            });
        }) as Box<dyn FnMut(_)>);
        answer.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Check
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let typed = answer.value();
            with_game(|g| {
                // Field may have been filled without an input event (autofill).
                g.input_changed(&typed);
                let outcome = g.check_answer();
                log::debug!("check: {outcome:?}");
            });
        }) as Box<dyn FnMut(_)>);
        check.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Reset
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_game(|g| g.reset_all());
        }) as Box<dyn FnMut(_)>);
        reset.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
