//! Presentation seam between the game core and whatever draws it.

use super::level::Level;

/// Colour cue shown on the check control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Styles cleared (fresh level).
    Neutral,
    Correct,
    Wrong,
}

/// Everything the controller needs to show. Calls are idempotent refreshes of one region.
pub trait Presenter {
    fn show_operands(&mut self, first: u32, second: u32);
    fn show_answer(&mut self, answer: &str);
    /// `filled` of `slots` star slots carry a star.
    fn show_stars(&mut self, filled: u32, slots: u32);
    fn show_background(&mut self, image: &str);
    /// Level label text and the page-level state class.
    fn show_level(&mut self, level: Level);
    fn show_top_score(&mut self, level: Level);
    fn show_feedback(&mut self, feedback: Feedback);
    /// Blocking end-of-game notification.
    fn announce_win(&mut self);
}

/// Presenter that draws nothing; for headless simulations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_operands(&mut self, _first: u32, _second: u32) {}
    fn show_answer(&mut self, _answer: &str) {}
    fn show_stars(&mut self, _filled: u32, _slots: u32) {}
    fn show_background(&mut self, _image: &str) {}
    fn show_level(&mut self, _level: Level) {}
    fn show_top_score(&mut self, _level: Level) {}
    fn show_feedback(&mut self, _feedback: Feedback) {}
    fn announce_win(&mut self) {}
}
