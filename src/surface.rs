use crate::corpus::Difficulty;
use crate::feedback::WordMark;

/// Addressable display elements the controller drives
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ElementId {
    #[strum(serialize = "difficulty")]
    Difficulty,
    #[strum(serialize = "sample-text")]
    SampleText,
    #[strum(serialize = "user-input")]
    UserInput,
    #[strum(serialize = "start-btn")]
    StartButton,
    #[strum(serialize = "stop-btn")]
    StopButton,
    #[strum(serialize = "retry-btn")]
    RetryButton,
    #[strum(serialize = "time")]
    Time,
    #[strum(serialize = "wpm")]
    Wpm,
    #[strum(serialize = "level")]
    Level,
}

impl ElementId {
    pub const ALL: [ElementId; 9] = [
        ElementId::Difficulty,
        ElementId::SampleText,
        ElementId::UserInput,
        ElementId::StartButton,
        ElementId::StopButton,
        ElementId::RetryButton,
        ElementId::Time,
        ElementId::Wpm,
        ElementId::Level,
    ];
}

/// Current value of the difficulty selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub value: String,
    pub label: String,
}

/// Presentation surface the controller renders into.
///
/// Every element may be absent. Setters on an absent element do nothing,
/// getters return `None`.
pub trait Surface {
    fn has(&self, id: ElementId) -> bool;

    fn selection(&self) -> Option<Selection>;

    /// Replace the sample with display units, one per word
    fn show_words(&mut self, words: Vec<String>);

    /// Apply marks by word index. Words past the end of `marks` are cleared.
    fn mark_words(&mut self, marks: &[WordMark]);

    fn input(&self) -> Option<String>;

    fn set_input(&mut self, text: &str);

    fn focus_input(&mut self);

    /// Text of an output element (`time`, `wpm`, `level`)
    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_enabled(&mut self, id: ElementId, enabled: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Selector {
    pub options: Vec<SelectOption>,
    pub selected: usize,
}

impl Selector {
    pub fn difficulties(initial: Difficulty) -> Self {
        let options = Difficulty::ALL
            .iter()
            .map(|d| SelectOption {
                value: d.value().to_string(),
                label: d.label().to_string(),
            })
            .collect();
        let selected = Difficulty::ALL
            .iter()
            .position(|d| *d == initial)
            .unwrap_or(0);

        Self { options, selected }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.options.get(self.selected).map(|o| Selection {
            value: o.value.clone(),
            // an option without display text shows its value
            label: if o.label.is_empty() {
                o.value.clone()
            } else {
                o.label.clone()
            },
        })
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordView {
    pub text: String,
    pub mark: WordMark,
}

#[derive(Debug, Clone, Default)]
pub struct InputBox {
    pub text: String,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub enabled: bool,
}

/// In-memory surface. The terminal UI renders it and tests inspect it.
#[derive(Debug, Clone)]
pub struct Panel {
    selector: Option<Selector>,
    sample: Option<Vec<WordView>>,
    input: Option<InputBox>,
    start: Option<Button>,
    stop: Option<Button>,
    retry: Option<Button>,
    time: Option<String>,
    wpm: Option<String>,
    level: Option<String>,
}

impl Panel {
    /// A panel with every element present
    pub fn new(initial: Difficulty) -> Self {
        Self {
            selector: Some(Selector::difficulties(initial)),
            sample: Some(Vec::new()),
            input: Some(InputBox::default()),
            start: Some(Button { enabled: true }),
            stop: Some(Button { enabled: false }),
            retry: Some(Button { enabled: true }),
            time: Some(String::new()),
            wpm: Some(String::new()),
            level: Some(String::new()),
        }
    }

    /// Drop an element, as if the host never provided it
    pub fn without(mut self, id: ElementId) -> Self {
        match id {
            ElementId::Difficulty => self.selector = None,
            ElementId::SampleText => self.sample = None,
            ElementId::UserInput => self.input = None,
            ElementId::StartButton => self.start = None,
            ElementId::StopButton => self.stop = None,
            ElementId::RetryButton => self.retry = None,
            ElementId::Time => self.time = None,
            ElementId::Wpm => self.wpm = None,
            ElementId::Level => self.level = None,
        }
        self
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    pub fn selector_mut(&mut self) -> Option<&mut Selector> {
        self.selector.as_mut()
    }

    pub fn words(&self) -> &[WordView] {
        self.sample.as_deref().unwrap_or_default()
    }

    /// Rendered sample, words joined by single spaces
    pub fn sample_text(&self) -> String {
        use itertools::Itertools;
        self.words().iter().map(|w| w.text.as_str()).join(" ")
    }

    pub fn input_box(&self) -> Option<&InputBox> {
        self.input.as_ref()
    }

    /// Append to the input text. Returns false when there is no input.
    pub fn type_char(&mut self, c: char) -> bool {
        match self.input.as_mut() {
            Some(input) => {
                input.text.push(c);
                true
            }
            None => false,
        }
    }

    /// Remove the last input character. Returns false when nothing changed.
    pub fn erase_char(&mut self) -> bool {
        self.input
            .as_mut()
            .and_then(|input| input.text.pop())
            .is_some()
    }

    /// Enablement of a button, `None` when it is absent or not a button
    pub fn is_enabled(&self, id: ElementId) -> Option<bool> {
        self.button(id).map(|b| b.enabled)
    }

    /// Text of an output element
    pub fn text(&self, id: ElementId) -> Option<&str> {
        match id {
            ElementId::Time => self.time.as_deref(),
            ElementId::Wpm => self.wpm.as_deref(),
            ElementId::Level => self.level.as_deref(),
            _ => None,
        }
    }

    fn button(&self, id: ElementId) -> Option<&Button> {
        match id {
            ElementId::StartButton => self.start.as_ref(),
            ElementId::StopButton => self.stop.as_ref(),
            ElementId::RetryButton => self.retry.as_ref(),
            _ => None,
        }
    }

    fn button_mut(&mut self, id: ElementId) -> Option<&mut Button> {
        match id {
            ElementId::StartButton => self.start.as_mut(),
            ElementId::StopButton => self.stop.as_mut(),
            ElementId::RetryButton => self.retry.as_mut(),
            _ => None,
        }
    }
}

impl Surface for Panel {
    fn has(&self, id: ElementId) -> bool {
        match id {
            ElementId::Difficulty => self.selector.is_some(),
            ElementId::SampleText => self.sample.is_some(),
            ElementId::UserInput => self.input.is_some(),
            ElementId::StartButton | ElementId::StopButton | ElementId::RetryButton => {
                self.button(id).is_some()
            }
            ElementId::Time | ElementId::Wpm | ElementId::Level => self.text(id).is_some(),
        }
    }

    fn selection(&self) -> Option<Selection> {
        self.selector.as_ref().and_then(Selector::selection)
    }

    fn show_words(&mut self, words: Vec<String>) {
        if let Some(sample) = self.sample.as_mut() {
            *sample = words
                .into_iter()
                .map(|text| WordView {
                    text,
                    mark: WordMark::CLEAR,
                })
                .collect();
        }
    }

    fn mark_words(&mut self, marks: &[WordMark]) {
        if let Some(sample) = self.sample.as_mut() {
            for (idx, word) in sample.iter_mut().enumerate() {
                word.mark = marks.get(idx).copied().unwrap_or(WordMark::CLEAR);
            }
        }
    }

    fn input(&self) -> Option<String> {
        self.input.as_ref().map(|i| i.text.clone())
    }

    fn set_input(&mut self, text: &str) {
        if let Some(input) = self.input.as_mut() {
            input.text = text.to_string();
        }
    }

    fn focus_input(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.focused = true;
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        let slot = match id {
            ElementId::Time => self.time.as_mut(),
            ElementId::Wpm => self.wpm.as_mut(),
            ElementId::Level => self.level.as_mut(),
            _ => None,
        };
        if let Some(slot) = slot {
            *slot = text.to_string();
        }
    }

    fn set_enabled(&mut self, id: ElementId, enabled: bool) {
        if let Some(button) = self.button_mut(id) {
            button.enabled = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Classification;

    #[test]
    fn test_element_ids() {
        let ids: Vec<String> = ElementId::ALL.iter().map(|e| e.to_string()).collect();

        assert_eq!(
            ids,
            vec![
                "difficulty",
                "sample-text",
                "user-input",
                "start-btn",
                "stop-btn",
                "retry-btn",
                "time",
                "wpm",
                "level"
            ]
        );
    }

    #[test]
    fn test_new_panel_has_every_element() {
        let panel = Panel::new(Difficulty::Medium);

        for id in ElementId::ALL {
            assert!(panel.has(id), "{id} should be present");
        }
        assert_eq!(panel.selection().unwrap().value, "medium");
        assert_eq!(panel.is_enabled(ElementId::StartButton), Some(true));
        assert_eq!(panel.is_enabled(ElementId::StopButton), Some(false));
    }

    #[test]
    fn test_absent_elements_ignore_writes() {
        let mut panel = Panel::new(Difficulty::Easy)
            .without(ElementId::Time)
            .without(ElementId::UserInput)
            .without(ElementId::StopButton);

        panel.set_text(ElementId::Time, "1.00");
        panel.set_input("abc");
        panel.set_enabled(ElementId::StopButton, true);

        assert!(!panel.has(ElementId::Time));
        assert_eq!(panel.text(ElementId::Time), None);
        assert_eq!(panel.input(), None);
        assert!(!panel.type_char('x'));
        assert_eq!(panel.is_enabled(ElementId::StopButton), None);
    }

    #[test]
    fn test_show_and_mark_words() {
        let mut panel = Panel::new(Difficulty::Easy);
        panel.show_words(vec!["a".into(), "b".into(), "c".into()]);

        panel.mark_words(&[WordMark {
            class: Classification::Correct,
            current: false,
        }]);

        assert_eq!(panel.sample_text(), "a b c");
        assert_eq!(panel.words()[0].mark.class, Classification::Correct);
        assert!(panel.words()[1].mark.is_clear());
        assert!(panel.words()[2].mark.is_clear());
    }

    #[test]
    fn test_selector_cycles() {
        let mut selector = Selector::difficulties(Difficulty::Hard);

        selector.select_next();
        assert_eq!(selector.selection().unwrap().value, "easy");
        selector.select_prev();
        assert_eq!(selector.selection().unwrap().label, "Hard");
    }

    #[test]
    fn test_selector_label_falls_back_to_value() {
        let selector = Selector {
            options: vec![SelectOption {
                value: "custom".into(),
                label: String::new(),
            }],
            selected: 0,
        };

        assert_eq!(selector.selection().unwrap().label, "custom");
    }

    #[test]
    fn test_erase_char() {
        let mut panel = Panel::new(Difficulty::Easy);

        assert!(!panel.erase_char());
        panel.type_char('h');
        panel.type_char('é');
        assert!(panel.erase_char());
        assert_eq!(panel.input().unwrap(), "h");
    }
}
