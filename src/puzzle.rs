use crate::answer::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One puzzle unit: display text plus the answer that unlocks the next clue.
///
/// In TOML:
///
/// ```toml
/// [[clues]]
/// text = "What has to be broken before you can use it?"
/// answer = "egg"
/// hint = "Breakfast staple"
/// image = "egg.png"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clue {
    pub text: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Opaque reference to supplementary visual content. Never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Clue {
    pub fn new(text: &str, answer: &str) -> Self {
        Self {
            text: text.to_string(),
            answer: answer.to_string(),
            hint: None,
            image: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PuzzleError {
    Empty,
    /// The answer normalizes to nothing, so no submission could ever match it.
    BlankAnswer { index: usize },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Empty => write!(f, "puzzle set has no clues"),
            PuzzleError::BlankAnswer { index } => {
                write!(f, "clue {} has a blank answer", index + 1)
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

/// The ordered, immutable list of clues. Clue `i` must be solved before
/// clue `i + 1` is shown.
#[derive(Debug, Clone)]
pub struct PuzzleSet {
    clues: Vec<Clue>,
}

impl PuzzleSet {
    pub fn new(clues: Vec<Clue>) -> Result<Self, PuzzleError> {
        if clues.is_empty() {
            return Err(PuzzleError::Empty);
        }
        if let Some(index) = clues.iter().position(|c| normalize(&c.answer).is_empty()) {
            return Err(PuzzleError::BlankAnswer { index });
        }
        Ok(Self { clues })
    }

    pub fn len(&self) -> usize {
        self.clues.len()
    }

    pub fn get(&self, index: usize) -> Option<&Clue> {
        self.clues.get(index)
    }
}

impl Default for PuzzleSet {
    fn default() -> Self {
        Self {
            clues: default_clues(),
        }
    }
}

/// The riddles used when the settings file doesn't list any clues.
pub fn default_clues() -> Vec<Clue> {
    vec![
        Clue::new(
            "I speak without a mouth and hear without ears. I have nobody, \
             but I come alive with wind. What am I?",
            "echo",
        )
        .with_hint("A repeating sound"),
        Clue::new(
            "The more of this there is, the less you see. What is it?",
            "darkness",
        )
        .with_hint("Opposite of light"),
        Clue::new("What has to be broken before you can use it?", "egg")
            .with_hint("Breakfast staple"),
    ]
}
