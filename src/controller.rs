use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

use crate::clock::{Clock, MonotonicClock};
use crate::corpus::{Corpus, Difficulty};
use crate::feedback::{classify, neutralize, tokenize};
use crate::metrics::{format_metric, TestResult};
use crate::surface::{ElementId, Surface};

/// Drives one typing test against a presentation surface.
///
/// Idle until `start`, running until `stop` or `reset`. The start instant
/// is `Some` exactly while running. Handlers never fail: when an element
/// they depend on is missing they stop early and leave state alone.
#[derive(Debug)]
pub struct Controller<S: Surface, R: Rng = StdRng, C: Clock = MonotonicClock> {
    surface: S,
    corpus: Corpus,
    rng: R,
    clock: C,
    sample: String,
    words: Vec<String>,
    started_at: Option<Instant>,
    level: Difficulty,
}

impl<S: Surface> Controller<S> {
    pub fn new(surface: S, corpus: Corpus) -> Self {
        Self::with_parts(surface, corpus, StdRng::from_entropy(), MonotonicClock)
    }

    pub fn seeded(surface: S, corpus: Corpus, seed: u64) -> Self {
        Self::with_parts(surface, corpus, StdRng::seed_from_u64(seed), MonotonicClock)
    }
}

impl<S: Surface, R: Rng, C: Clock> Controller<S, R, C> {
    pub fn with_parts(surface: S, corpus: Corpus, rng: R, clock: C) -> Self {
        Self {
            surface,
            corpus,
            rng,
            clock,
            sample: String::new(),
            words: Vec::new(),
            started_at: None,
            level: Difficulty::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The sample currently on display
    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time since start, `None` while idle
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at
            .map(|start| self.clock.now().saturating_duration_since(start))
    }

    pub fn pick_sample(&mut self, difficulty: &str) -> String {
        self.corpus.pick_sample(difficulty, &mut self.rng).to_string()
    }

    /// Tokenize `text` and show one display unit per word.
    pub fn render_sample(&mut self, text: &str) {
        if !self.surface.has(ElementId::SampleText) {
            return;
        }

        self.words = tokenize(text);
        self.sample = text.to_string();
        self.surface
            .show_words(self.words.iter().map(|w| neutralize(w)).collect());
    }

    /// Reclassify every sample word against the typed text
    pub fn refresh_feedback(&mut self) {
        if !self.surface.has(ElementId::SampleText) {
            return;
        }
        let Some(typed) = self.surface.input() else {
            return;
        };

        let marks = classify(&self.words, &typed);
        self.surface.mark_words(&marks);
    }

    /// First render once the surface is available
    pub fn init(&mut self) {
        let Some(selection) = self.surface.selection() else {
            return;
        };

        let sample = self.pick_sample(&selection.value);
        self.render_sample(&sample);
        self.show_time(0.0);
        self.show_wpm(0.0);
        self.show_running(false);
    }

    /// New sample for the newly selected difficulty, timing untouched
    pub fn on_difficulty_change(&mut self) {
        let Some(selection) = self.surface.selection() else {
            return;
        };

        log::debug!("difficulty changed to {}", selection.value);
        let sample = self.pick_sample(&selection.value);
        self.render_sample(&sample);
    }

    pub fn start(&mut self) {
        let Some(selection) = self.surface.selection() else {
            return;
        };

        let sample = self.pick_sample(&selection.value);
        self.render_sample(&sample);

        if self.surface.has(ElementId::UserInput) {
            self.surface.set_input("");
            self.surface.focus_input();
            self.refresh_feedback();
        }

        self.started_at = Some(self.clock.now());
        self.level = Difficulty::from_value_or_default(&selection.value);
        self.surface.set_text(ElementId::Level, &selection.label);
        self.show_running(true);

        log::debug!(
            "test started: level={} words={}",
            selection.value,
            self.words.len()
        );
    }

    /// Finish a running test and publish its time and speed.
    /// Returns `None` when no test was running.
    pub fn stop(&mut self) -> Option<TestResult> {
        let started_at = self.started_at?;
        let elapsed_secs = self
            .clock
            .now()
            .saturating_duration_since(started_at)
            .as_secs_f64();
        self.show_time(elapsed_secs);

        let typed = self.surface.input().unwrap_or_default();
        let result = TestResult::new(self.level.to_string(), &typed, elapsed_secs);
        self.show_wpm(result.wpm);

        self.started_at = None;
        self.show_running(false);
        self.refresh_feedback();

        log::info!(
            "test finished: level={} time={:.2}s wpm={:.2} words={}",
            result.difficulty,
            result.elapsed_secs,
            result.wpm,
            result.words_typed
        );
        Some(result)
    }

    /// Back to idle with fresh content and zeroed readouts
    pub fn reset(&mut self) {
        let Some(selection) = self.surface.selection() else {
            return;
        };

        let sample = self.pick_sample(&selection.value);
        self.render_sample(&sample);

        if self.surface.has(ElementId::UserInput) {
            self.surface.set_input("");
            self.surface.focus_input();
        }

        if self.started_at.take().is_some() {
            log::debug!("running test abandoned by reset");
        }
        self.show_time(0.0);
        self.show_wpm(0.0);
        self.show_running(false);
        self.surface.mark_words(&[]);
    }

    fn show_time(&mut self, seconds: f64) {
        self.surface.set_text(ElementId::Time, &format_metric(seconds));
    }

    fn show_wpm(&mut self, wpm: f64) {
        self.surface.set_text(ElementId::Wpm, &format_metric(wpm));
    }

    fn show_running(&mut self, running: bool) {
        self.surface.set_enabled(ElementId::StartButton, !running);
        self.surface.set_enabled(ElementId::StopButton, running);
    }
}
