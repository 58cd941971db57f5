//! Error types shared by the game core and the browser adapter.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Invalid [`GameConfig`](crate::config::GameConfig) values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a game needs at least one level")]
    NoLevels,
    #[error("stars per level must be at least 1")]
    NoStars,
    #[error("operand range width must be at least 1")]
    EmptyRange,
    #[error("{levels} levels of width {width} overflow the largest sum")]
    RangeTooWide { levels: u8, width: u32 },
    #[error("expected {expected} background images, got {got}")]
    BackgroundCount { expected: usize, got: usize },
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[cfg(feature = "serde_json")]
    #[error("malformed config json: {0}")]
    Json(String),
}

/// Levels are 1-based; 0 is never a level.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("level {0} is not a valid level")]
pub struct InvalidLevel(pub u8);

/// Failures talking to the persisted max-level entry.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("storage operation `{op}` failed: {detail}")]
    Js { op: &'static str, detail: String },
}

/// Errors surfaced while wiring the game into a page.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing page element `{0}`")]
    MissingElement(&'static str),
    #[error("page element `{0}` has an unexpected type")]
    WrongElementType(&'static str),
    #[error("game has not been started")]
    NotStarted,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(js_detail(&value))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
