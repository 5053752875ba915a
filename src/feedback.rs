/// Outcome of comparing one typed word against its sample word
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Classification {
    #[default]
    Unmarked,
    Correct,
    Incorrect,
    /// typed so far is a valid prefix of the sample word
    Partial,
}

/// Display state of one sample word. `current` is independent of the
/// classification, a partially typed word is both partial and current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordMark {
    pub class: Classification,
    pub current: bool,
}

impl WordMark {
    pub const CLEAR: WordMark = WordMark {
        class: Classification::Unmarked,
        current: false,
    };

    pub fn is_clear(&self) -> bool {
        *self == Self::CLEAR
    }
}

/// Split on any run of whitespace, dropping empty tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// A word is committed once a separator follows it
pub fn ends_with_separator(typed: &str) -> bool {
    typed.ends_with(char::is_whitespace)
}

/// Replace control characters so sample text cannot smuggle terminal
/// escape sequences onto the screen.
pub fn neutralize(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

/// Index of the word being typed, or the next one after a separator.
/// None when that index is past the end of the sample.
pub fn current_index(typed: &str, word_count: usize) -> Option<usize> {
    let typed_count = typed.split_whitespace().count();
    let idx = if ends_with_separator(typed) {
        typed_count
    } else {
        typed_count.checked_sub(1)?
    };

    (idx < word_count).then_some(idx)
}

pub fn classify_word(sample: &str, typed: &str, committed: bool) -> Classification {
    if typed == sample {
        Classification::Correct
    } else if committed {
        Classification::Incorrect
    } else if sample.starts_with(typed) {
        Classification::Partial
    } else {
        // longer than the sample word is never a prefix
        Classification::Incorrect
    }
}

/// Classify every sample word against the typed text.
///
/// Only the last typed word counts as committed, and only when the input
/// ends with a separator. Earlier words are compared with the same prefix
/// rule as the word under the cursor.
pub fn classify(words: &[String], typed: &str) -> Vec<WordMark> {
    let typed_tokens: Vec<&str> = typed.split_whitespace().collect();
    let trailing = ends_with_separator(typed);
    let last_typed = typed_tokens.len().checked_sub(1);

    let mut marks: Vec<WordMark> = words
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let class = match typed_tokens.get(i) {
                None => Classification::Unmarked,
                Some(t) => classify_word(sample, t, trailing && Some(i) == last_typed),
            };
            WordMark {
                class,
                current: false,
            }
        })
        .collect();

    if let Some(idx) = current_index(typed, words.len()) {
        marks[idx].current = true;
    }

    marks
}
