use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{Error, Result};

static CORPUS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus");

const BUILTIN_FILE: &str = "builtin.json";

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Selector value, also the corpus key
    pub fn value(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Human readable name shown in the level label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Exact match on the selector value. Keys are case sensitive.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == value)
    }

    /// Unknown or malformed values use the easy set.
    pub fn from_value_or_default(value: &str) -> Self {
        Self::from_value(value).unwrap_or_default()
    }
}

/// Fixed sample sentences grouped by difficulty. Every level is non-empty.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Corpus {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl Corpus {
    /// The sentences compiled into the binary
    pub fn builtin() -> Result<Self> {
        let file = CORPUS_DIR
            .get_file(BUILTIN_FILE)
            .ok_or_else(|| Error::MissingBuiltin(BUILTIN_FILE.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::MissingBuiltin(BUILTIN_FILE.to_string()))?;

        Self::from_json(contents)
    }

    /// Load a user supplied corpus with the same shape as the built-in one
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let corpus: Corpus = serde_json::from_str(json)?;
        corpus.validated()
    }

    fn validated(mut self) -> Result<Self> {
        for difficulty in Difficulty::ALL {
            let list = self.list_mut(difficulty);
            list.retain(|s| !s.trim().is_empty());
            if list.is_empty() {
                return Err(Error::EmptyLevel(difficulty.to_string()));
            }
        }
        Ok(self)
    }

    fn list_mut(&mut self, difficulty: Difficulty) -> &mut Vec<String> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn sentences(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Pick one sentence uniformly at random for the given selector value,
    /// falling back to the easy list when the value has no entry.
    pub fn pick_sample<R: Rng + ?Sized>(&self, difficulty: &str, rng: &mut R) -> &str {
        let list = self.sentences(Difficulty::from_value_or_default(difficulty));
        &list[rng.gen_range(0..list.len())]
    }
}
