//! Binary answers and the index-aligned answer set

use crate::catalog::QuestionCatalog;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Label rendered for a slot nobody answered
pub const UNANSWERED_LABEL: &str = "Not Answered";

/// The two-valued answer domain of every question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    #[serde(alias = "yes")]
    Yes,
    #[serde(alias = "no")]
    No,
}

impl Answer {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            _ => Err(ParseAnswerError(s.to_string())),
        }
    }
}

/// Input was neither yes nor no
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected yes or no, got {0:?}")]
pub struct ParseAnswerError(pub String);

/// One slot per catalog question, `None` until answered
///
/// # Invariants
/// - Length is fixed at construction and matches the catalog
/// - A slot only ever moves from unanswered to an answer, or between answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    slots: Vec<Option<Answer>>,
}

impl AnswerSet {
    /// All-unanswered set of `len` slots
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// All-unanswered set aligned with `catalog`
    #[must_use]
    pub fn for_catalog(catalog: &QuestionCatalog) -> Self {
        Self::new(catalog.len())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Answer in slot `index`; `None` if unanswered or out of range
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Answer> {
        self.slots.get(index).copied().flatten()
    }

    /// Text rendered for slot `index`
    #[must_use]
    pub fn label(&self, index: usize) -> &'static str {
        self.get(index).map_or(UNANSWERED_LABEL, Answer::as_str)
    }

    /// Record an answer for one slot, leaving all others untouched
    ///
    /// # Errors
    /// `QuestionOutOfRange` if `index` is past the end
    pub fn set(&mut self, index: usize, answer: Answer) -> Result<(), ValidationError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ValidationError::QuestionOutOfRange { index, len })?;
        *slot = Some(answer);
        Ok(())
    }

    /// Every slot answered
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Indices still unanswered, ascending
    #[must_use]
    pub fn unanswered(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Answer>> + '_ {
        self.slots.iter().copied()
    }
}
