//! Sum Stars core crate.
//!
//! A children's addition game: two numbers, a typed sum, a star per correct answer and six
//! levels with growing numbers. The state machine lives in [`game`] and is independent of
//! the browser; [`dom`] binds it to the page and `start_game()` is the JS entrypoint.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod error;
pub mod game;
mod logger;
pub mod storage;

pub use config::GameConfig;
pub use error::{ConfigError, GameError, InvalidLevel, StorageError};
pub use game::{AnswerOutcome, Feedback, GameController, GameState, Level, Presenter};
pub use storage::{LocalStorageStore, MaxLevelStore, MemoryStore};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    logger::init(log::LevelFilter::Info);
    dom::start(GameConfig::default())?;
    Ok(())
}

/// Start with a JSON config; omitted fields keep the classic defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    logger::init(log::LevelFilter::Info);
    let config = GameConfig::from_json(json).map_err(GameError::from)?;
    dom::start(config)?;
    Ok(())
}

/// Same as the page's reset control.
#[wasm_bindgen]
pub fn reset_progress() -> Result<(), JsValue> {
    dom::with_game(|g| g.reset_all()).ok_or(GameError::NotStarted)?;
    Ok(())
}

/// Current level, 0 before the game started.
#[wasm_bindgen]
pub fn current_level() -> u8 {
    dom::with_game(|g| g.state().level.get()).unwrap_or(0)
}

/// Highest level reached, 0 before the game started.
#[wasm_bindgen]
pub fn top_level() -> u8 {
    dom::with_game(|g| g.state().max_level_reached.get()).unwrap_or(0)
}
