use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{rngs::StdRng, Rng};

use crate::clock::{Clock, MonotonicClock};
use crate::controller::Controller;
use crate::corpus::{Corpus, Difficulty};
use crate::metrics::TestResult;
use crate::surface::{ElementId, Panel, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end: maps key presses onto controller handlers the way a
/// page maps clicks and input events.
#[derive(Debug)]
pub struct App<R: Rng = StdRng, C: Clock = MonotonicClock> {
    pub controller: Controller<Panel, R, C>,
    pub last_result: Option<TestResult>,
}

impl App {
    pub fn new(difficulty: Difficulty, corpus: Corpus, seed: Option<u64>) -> Self {
        let panel = Panel::new(difficulty);
        let controller = match seed {
            Some(seed) => Controller::seeded(panel, corpus, seed),
            None => Controller::new(panel, corpus),
        };
        Self::with_controller(controller)
    }
}

impl<R: Rng, C: Clock> App<R, C> {
    pub fn with_controller(mut controller: Controller<Panel, R, C>) -> Self {
        controller.init();
        Self {
            controller,
            last_result: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        self.controller.surface()
    }

    /// Selected difficulty, easy when the selector holds something unknown
    pub fn difficulty(&self) -> Difficulty {
        self.panel()
            .selection()
            .map(|s| Difficulty::from_value_or_default(&s.value))
            .unwrap_or_default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('s') if ctrl => self.press(ElementId::StartButton),
            KeyCode::Char('x') if ctrl => self.press(ElementId::StopButton),
            KeyCode::Enter => self.press(ElementId::StopButton),
            KeyCode::Char('r') if ctrl => self.press(ElementId::RetryButton),
            KeyCode::Tab => self.cycle_difficulty(true),
            KeyCode::BackTab => self.cycle_difficulty(false),
            KeyCode::Backspace => {
                if self.controller.surface_mut().erase_char() {
                    self.controller.refresh_feedback();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if self.controller.surface_mut().type_char(c) {
                    self.controller.refresh_feedback();
                }
            }
            _ => {}
        }

        Flow::Continue
    }

    /// Disabled or missing buttons ignore presses. Retry has no
    /// enablement and only needs to exist.
    fn press(&mut self, button: ElementId) {
        let panel = self.controller.surface();
        let active = match button {
            ElementId::RetryButton => panel.has(button),
            _ => panel.is_enabled(button) == Some(true),
        };
        if !active {
            return;
        }

        match button {
            ElementId::StartButton => {
                self.last_result = None;
                self.controller.start();
            }
            ElementId::StopButton => self.last_result = self.controller.stop(),
            ElementId::RetryButton => {
                self.last_result = None;
                self.controller.reset();
            }
            _ => {}
        }
    }

    fn cycle_difficulty(&mut self, forward: bool) {
        let Some(selector) = self.controller.surface_mut().selector_mut() else {
            return;
        };
        if forward {
            selector.select_next();
        } else {
            selector.select_prev();
        }
        self.controller.on_difficulty_change();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::feedback::Classification;
    use rand::SeedableRng;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App<StdRng, ManualClock> {
        App::with_controller(Controller::with_parts(
            Panel::new(Difficulty::Easy),
            Corpus::builtin().unwrap(),
            StdRng::seed_from_u64(9),
            ManualClock::new(),
        ))
    }

    fn type_str(app: &mut App<StdRng, ManualClock>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_new_app_is_initialized() {
        let app = App::new(Difficulty::Medium, Corpus::builtin().unwrap(), Some(1));

        assert_eq!(app.difficulty(), Difficulty::Medium);
        assert!(!app.panel().words().is_empty());
        assert_eq!(app.panel().text(ElementId::Wpm), Some("0.00"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();

        assert_eq!(app.handle_key(key(KeyCode::Esc)), Flow::Quit);
        assert_eq!(app.handle_key(ctrl('c')), Flow::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Char('c'))), Flow::Continue);
    }

    #[test]
    fn test_typing_updates_input_and_feedback() {
        let mut app = test_app();
        app.handle_key(ctrl('s'));
        let first = app.controller.words()[0].clone();

        type_str(&mut app, &first[..1]);

        assert_eq!(app.panel().input().unwrap(), &first[..1]);
        let mark = app.panel().words()[0].mark;
        assert!(mark.current);
        assert_ne!(mark.class, Classification::Unmarked);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.panel().input().unwrap(), "");
        assert!(app.panel().words()[0].mark.is_clear());
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut app = test_app();
        app.handle_key(ctrl('s'));
        let sample = app.controller.sample().to_string();
        type_str(&mut app, "abc");

        app.handle_key(ctrl('s'));

        assert_eq!(app.controller.sample(), sample);
        assert_eq!(app.panel().input().unwrap(), "abc");
    }

    #[test]
    fn test_stop_ignored_while_idle() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Enter));

        assert!(app.last_result.is_none());
        assert_eq!(app.panel().text(ElementId::Time), Some("0.00"));
    }

    #[test]
    fn test_start_type_stop() {
        let mut app = test_app();
        app.handle_key(ctrl('s'));
        let sample = app.controller.sample().to_string();
        type_str(&mut app, &sample);
        type_str(&mut app, " ");
        app.controller.clock().advance(Duration::from_secs(6));

        app.handle_key(key(KeyCode::Enter));

        let result = app.last_result.clone().unwrap();
        let words = app.controller.words().len();
        assert_eq!(result.wpm, words as f64 * 10.0);
        assert_eq!(app.panel().text(ElementId::Time), Some("6.00"));
        assert!(!app.controller.is_running());
    }

    #[test]
    fn test_ctrl_x_stops() {
        let mut app = test_app();
        app.handle_key(ctrl('s'));
        app.controller.clock().advance(Duration::from_secs(1));

        app.handle_key(ctrl('x'));

        assert!(!app.controller.is_running());
        assert!(app.last_result.is_some());
    }

    #[test]
    fn test_retry_resets() {
        let mut app = test_app();
        app.handle_key(ctrl('s'));
        type_str(&mut app, "The ");
        app.controller.clock().advance(Duration::from_secs(2));
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(ctrl('r'));

        assert!(app.last_result.is_none());
        assert_eq!(app.panel().text(ElementId::Time), Some("0.00"));
        assert_eq!(app.panel().text(ElementId::Wpm), Some("0.00"));
        assert!(app.panel().words().iter().all(|w| w.mark.is_clear()));
    }

    #[test]
    fn test_tab_cycles_difficulty() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.difficulty(), Difficulty::Medium);
        assert!(app
            .controller
            .corpus()
            .sentences(Difficulty::Medium)
            .iter()
            .any(|s| s == app.controller.sample()));

        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = test_app();
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;

        app.handle_key(release);

        assert_eq!(app.panel().input().unwrap(), "");
    }
}
