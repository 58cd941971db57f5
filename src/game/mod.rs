//! Sum-stars game core.
//!
//! `GameController` owns the whole game state and is driven by three kinds of input: digit
//! taps / answer-field edits, the check control, and the reset control. It draws through a
//! [`Presenter`] and persists the highest reached level through a [`MaxLevelStore`], so the
//! state machine runs the same in the browser and in native tests.
//!
//! Levels 1..=N each need `stars_per_level` correct answers. Filling the last star of a
//! level moves to the next one; filling it on the top level wins, which notifies the
//! player and starts over from level 1 while keeping the stored top score.

pub mod answer;
pub mod level;
pub mod presenter;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::storage::{MaxLevelStore, parse_stored_level};

pub use answer::{parse_answer, sanitize_answer};
pub use level::{Level, draw_operands};
pub use presenter::{Feedback, NullPresenter, Presenter};

/// Mutable game data, one instance per page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    pub level: Level,
    pub first: u32,
    pub second: u32,
    /// Stars collected on the current level.
    pub correct_answers: u32,
    pub max_level_reached: Level,
}

impl GameState {
    pub fn expected_sum(&self) -> u32 {
        self.first + self.second
    }
}

/// What a submitted answer did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Operands unchanged, try again.
    Wrong,
    /// Star awarded, still on the same level.
    Star { filled: u32 },
    /// Level completed; now on `level`.
    LevelUp { level: Level },
    /// Top level completed; the game restarted at level 1.
    Won,
}

pub struct GameController<P, S, R> {
    config: GameConfig,
    state: GameState,
    answer: String,
    presenter: P,
    store: S,
    rng: R,
}

impl<P, S, R> GameController<P, S, R>
where
    P: Presenter,
    S: MaxLevelStore,
    R: Rng,
{
    /// Build a controller at level 1 with fresh operands and the stored top score.
    /// Nothing is drawn until [`start`](Self::start).
    pub fn new(config: GameConfig, presenter: P, store: S, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let stored = match store.load() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("could not read stored max level: {e}");
                None
            }
        };
        let max = Level::new(parse_stored_level(stored.as_deref(), config.levels)).unwrap_or_default();
        let (first, second) = draw_operands(Level::FIRST, config.range_width, &mut rng);
        let state = GameState {
            level: Level::FIRST,
            first,
            second,
            correct_answers: 0,
            max_level_reached: max,
        };
        Ok(Self { config, state, answer: String::new(), presenter, store, rng })
    }

    /// Initial render of every region.
    pub fn start(&mut self) {
        let level = self.state.level;
        self.presenter.show_level(level);
        self.presenter.show_background(self.config.background_for(level.get()));
        self.presenter.show_stars(0, self.config.stars_per_level);
        self.presenter.show_operands(self.state.first, self.state.second);
        self.presenter.show_answer("");
        self.presenter.show_top_score(self.state.max_level_reached);
        log::debug!("game started, top level {}", self.state.max_level_reached);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current contents of the answer field.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Redraw both operands from the current level's range.
    pub fn generate_operands(&mut self) {
        let (first, second) = draw_operands(self.state.level, self.config.range_width, &mut self.rng);
        self.state.first = first;
        self.state.second = second;
        self.presenter.show_operands(first, second);
    }

    /// Digit-pad tap. Anything but `0..=9` is ignored.
    pub fn press_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        self.answer.push(char::from(b'0' + digit));
        self.presenter.show_answer(&self.answer);
    }

    /// Answer field edited by the player; returns the digits-only value now shown.
    pub fn input_changed(&mut self, raw: &str) -> &str {
        self.answer = sanitize_answer(raw);
        self.presenter.show_answer(&self.answer);
        &self.answer
    }

    /// Check control: submit whatever the answer field holds.
    pub fn check_answer(&mut self) -> AnswerOutcome {
        let candidate = std::mem::take(&mut self.answer);
        self.submit_answer(&candidate)
    }

    pub fn submit_answer(&mut self, candidate: &str) -> AnswerOutcome {
        let correct = parse_answer(candidate) == Some(self.state.expected_sum());
        self.answer.clear();
        self.presenter.show_answer("");

        if !correct {
            log::debug!(
                "wrong answer {candidate:?} for {} + {}",
                self.state.first,
                self.state.second
            );
            self.presenter.show_feedback(Feedback::Wrong);
            return AnswerOutcome::Wrong;
        }

        self.generate_operands();
        let outcome = self.add_star();
        self.presenter.show_feedback(Feedback::Correct);
        outcome
    }

    /// Fill the next star slot and advance when the level is complete.
    pub fn add_star(&mut self) -> AnswerOutcome {
        let slots = self.config.stars_per_level;
        if self.state.correct_answers >= slots {
            return AnswerOutcome::Star { filled: self.state.correct_answers };
        }
        self.state.correct_answers += 1;
        self.presenter.show_stars(self.state.correct_answers, slots);

        if self.state.correct_answers < slots {
            return AnswerOutcome::Star { filled: self.state.correct_answers };
        }

        if self.state.level.get() < self.config.levels {
            let next = self.state.level.next();
            self.change_level(next);
            AnswerOutcome::LevelUp { level: next }
        } else {
            log::info!("all {} levels completed", self.config.levels);
            self.presenter.announce_win();
            self.change_level(Level::FIRST);
            AnswerOutcome::Won
        }
    }

    /// Enter `level` (clamped to the configured count) with a clean slate.
    pub fn change_level(&mut self, level: Level) {
        let level = Level::new(level.get().min(self.config.levels)).unwrap_or_default();
        self.state.level = level;
        self.presenter.show_level(level);
        self.save_max_level(level);
        self.reset_round();
        self.presenter.show_background(self.config.background_for(level.get()));
        log::debug!("level {level}");
    }

    /// Forget all progress, including the stored top score.
    pub fn reset_all(&mut self) {
        if let Err(e) = self.store.clear() {
            log::warn!("could not clear stored max level: {e}");
        }
        self.state.max_level_reached = Level::FIRST;
        self.presenter.show_top_score(Level::FIRST);
        log::info!("progress reset");
        self.change_level(Level::FIRST);
    }

    fn save_max_level(&mut self, level: Level) {
        if level <= self.state.max_level_reached {
            return;
        }
        self.state.max_level_reached = level;
        if let Err(e) = self.store.save(level.get()) {
            log::warn!("could not persist max level {level}: {e}");
        }
        self.presenter.show_top_score(level);
    }

    fn reset_round(&mut self) {
        self.state.correct_answers = 0;
        self.presenter.show_stars(0, self.config.stars_per_level);
        self.generate_operands();
        self.answer.clear();
        self.presenter.show_answer("");
        self.presenter.show_feedback(Feedback::Neutral);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Default)]
    struct Screen {
        operands: (u32, u32),
        answer: String,
        stars: (u32, u32),
        background: String,
        level: Option<Level>,
        top: Option<Level>,
        feedback: Option<Feedback>,
        wins: u32,
    }

    impl Presenter for Screen {
        fn show_operands(&mut self, first: u32, second: u32) {
            self.operands = (first, second);
        }
        fn show_answer(&mut self, answer: &str) {
            self.answer = answer.to_string();
        }
        fn show_stars(&mut self, filled: u32, slots: u32) {
            self.stars = (filled, slots);
        }
        fn show_background(&mut self, image: &str) {
            self.background = image.to_string();
        }
        fn show_level(&mut self, level: Level) {
            self.level = Some(level);
        }
        fn show_top_score(&mut self, level: Level) {
            self.top = Some(level);
        }
        fn show_feedback(&mut self, feedback: Feedback) {
            self.feedback = Some(feedback);
        }
        fn announce_win(&mut self) {
            self.wins += 1;
        }
    }

    type TestController = GameController<Screen, MemoryStore, StdRng>;

    fn controller(store: MemoryStore) -> TestController {
        let mut c = GameController::new(
            GameConfig::default(),
            Screen::default(),
            store,
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        c.start();
        c
    }

    fn lvl(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn answer_correctly(c: &mut TestController) -> AnswerOutcome {
        let sum = c.state().expected_sum();
        c.submit_answer(&sum.to_string())
    }

    #[test]
    fn starts_at_level_one_with_operands_in_range() {
        let c = controller(MemoryStore::new());
        let s = c.state();
        assert_eq!(s.level, Level::FIRST);
        assert_eq!(s.correct_answers, 0);
        assert!((1..=6).contains(&s.first));
        assert!((1..=6).contains(&s.second));
        assert_eq!(c.presenter().operands, (s.first, s.second));
        assert_eq!(c.presenter().background, "img/background.png");
        assert_eq!(c.presenter().top, Some(Level::FIRST));
    }

    #[test]
    fn restores_stored_top_score() {
        let c = controller(MemoryStore::with_value("4"));
        assert_eq!(c.state().max_level_reached, lvl(4));
        assert_eq!(c.presenter().top, Some(lvl(4)));
        assert_eq!(c.state().level, Level::FIRST);
    }

    #[test]
    fn correct_answer_awards_star_and_new_operands() {
        let mut c = controller(MemoryStore::new());
        c.input_changed("x");
        let outcome = answer_correctly(&mut c);
        assert_eq!(outcome, AnswerOutcome::Star { filled: 1 });
        assert_eq!(c.state().correct_answers, 1);
        assert_eq!(c.presenter().stars, (1, 5));
        assert_eq!(c.presenter().answer, "");
        assert_eq!(c.presenter().feedback, Some(Feedback::Correct));
        assert!((1..=6).contains(&c.state().first));
    }

    #[test]
    fn wrong_answer_keeps_operands() {
        let mut c = controller(MemoryStore::new());
        let before = c.state().clone();
        let wrong = before.expected_sum() + 1;
        assert_eq!(c.submit_answer(&wrong.to_string()), AnswerOutcome::Wrong);
        assert_eq!(c.submit_answer(""), AnswerOutcome::Wrong);
        assert_eq!(c.state(), &before);
        assert_eq!(c.presenter().feedback, Some(Feedback::Wrong));
        assert_eq!(c.presenter().answer, "");
    }

    #[test]
    fn digit_pad_and_sanitised_input_feed_check() {
        let mut c = controller(MemoryStore::new());
        let sum = c.state().expected_sum();
        assert_eq!(c.input_changed("a1b"), "1");
        c.input_changed("");
        for d in sum.to_string().bytes() {
            c.press_digit(d - b'0');
        }
        c.press_digit(12);
        assert_eq!(c.answer(), sum.to_string());
        assert_eq!(c.check_answer(), AnswerOutcome::Star { filled: 1 });
        assert_eq!(c.answer(), "");
    }

    #[test]
    fn filling_stars_advances_level_and_persists() {
        let mut c = controller(MemoryStore::new());
        for i in 1..5 {
            assert_eq!(answer_correctly(&mut c), AnswerOutcome::Star { filled: i });
        }
        assert_eq!(answer_correctly(&mut c), AnswerOutcome::LevelUp { level: lvl(2) });
        let s = c.state();
        assert_eq!(s.level, lvl(2));
        assert_eq!(s.correct_answers, 0);
        assert_eq!(s.max_level_reached, lvl(2));
        assert!((7..=12).contains(&s.first) && (7..=12).contains(&s.second));
        assert_eq!(c.store().value(), Some("2"));
        assert_eq!(c.presenter().stars, (0, 5));
        assert_eq!(c.presenter().background, "loly.png");
        assert_eq!(c.presenter().level, Some(lvl(2)));
    }

    #[test]
    fn level_three_completion_switches_to_unicorn() {
        let mut c = controller(MemoryStore::new());
        c.change_level(lvl(3));
        for _ in 0..5 {
            answer_correctly(&mut c);
        }
        assert_eq!(c.state().level, lvl(4));
        assert_eq!(c.presenter().background, "unicorn.png");
        assert_eq!(c.presenter().stars, (0, 5));
    }

    #[test]
    fn completing_top_level_wins_and_keeps_top_score() {
        let mut c = controller(MemoryStore::new());
        c.change_level(lvl(6));
        let mut last = AnswerOutcome::Wrong;
        for _ in 0..5 {
            last = answer_correctly(&mut c);
        }
        assert_eq!(last, AnswerOutcome::Won);
        assert_eq!(c.presenter().wins, 1);
        assert_eq!(c.state().level, Level::FIRST);
        assert_eq!(c.state().correct_answers, 0);
        assert_eq!(c.state().max_level_reached, lvl(6));
        assert_eq!(c.store().value(), Some("6"));
        assert_eq!(c.presenter().background, "img/background.png");
    }

    #[test]
    fn lower_level_never_lowers_top_score() {
        let mut c = controller(MemoryStore::with_value("5"));
        c.change_level(lvl(3));
        assert_eq!(c.state().max_level_reached, lvl(5));
        assert_eq!(c.store().value(), Some("5"));
    }

    #[test]
    fn reset_all_clears_progress() {
        let mut c = controller(MemoryStore::new());
        c.change_level(lvl(4));
        answer_correctly(&mut c);
        assert_eq!(c.state().max_level_reached, lvl(4));
        c.reset_all();
        assert_eq!(c.store().value(), None);
        assert_eq!(c.state().level, Level::FIRST);
        assert_eq!(c.state().max_level_reached, Level::FIRST);
        assert_eq!(c.state().correct_answers, 0);
        assert_eq!(c.presenter().top, Some(Level::FIRST));
        assert_eq!(c.presenter().feedback, Some(Feedback::Neutral));
        assert_eq!(c.presenter().background, "img/background.png");
    }

    #[test]
    fn change_level_clamps_past_last_level() {
        let mut c = controller(MemoryStore::new());
        c.change_level(lvl(9));
        assert_eq!(c.state().level, lvl(6));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GameConfig::default().with_stars_per_level(0);
        let res = GameController::new(cfg, Screen::default(), MemoryStore::new(), StdRng::seed_from_u64(0));
        assert!(matches!(res, Err(ConfigError::NoStars)));
    }

    #[test]
    fn overflowing_range_width_is_rejected_before_play() {
        let mut cfg = GameConfig::default();
        cfg.range_width = 3_000_000_000;
        let res = GameController::new(cfg, Screen::default(), MemoryStore::new(), StdRng::seed_from_u64(0));
        assert!(matches!(res, Err(ConfigError::RangeTooWide { .. })));
    }
}
