//! Question catalog
//!
//! A fixed, ordered list of yes/no prompts. Built once at startup and never
//! mutated; every answer set is index-aligned with it.

use crate::error::CatalogError;
use serde::Serialize;

/// Heading shown above the assessment form
pub const DEFAULT_TITLE: &str = "Team Accounting & Finance Maturity Assessment";

/// The eight reference questions
pub const REFERENCE_QUESTIONS: [&str; 8] = [
    "Do we close our books on a consistent schedule and produce timely, accurate financial statements that meet both internal and external requirements?",
    "Do we maintain well-documented policies and procedures for essential accounting activities (e.g., accounts payable, accounts receivable, payroll), and are they consistently followed?",
    "Are we leveraging modern accounting software, automation tools, and AI to streamline repetitive tasks, reduce manual errors, and focus on higher-level analysis?",
    "Does our finance team provide insightful analysis - beyond basic reporting - that supports strategic decision-making, forecasting, and planning?",
    "Are robust internal controls in place to safeguard assets, ensure compliance, and reduce fraud risk, with regular reviews to keep them effective?",
    "Does the accounting function effectively collaborate with other departments (sales, operations, HR) to ensure integrated decision-making and reliable information flows?",
    "Are we proactively staying informed about changing regulatory requirements (e.g., tax laws, GAAP/IFRS updates) and adjusting processes accordingly?",
    "Do we continuously invest in upskilling our team - through professional education, certifications, and learning opportunities - to support growth and innovation?",
];

/// A single prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    index: usize,
    text: String,
}

impl Question {
    /// 0-based position in the catalog
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based number shown to the respondent
    #[inline]
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, immutable question list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCatalog {
    title: String,
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog from prompt texts
    ///
    /// Leading and trailing whitespace is trimmed from each text, so
    /// indented TOML strings print the same as plain ones. Inner whitespace
    /// is kept as given.
    ///
    /// # Errors
    /// - `CatalogError::Empty` if no texts are given
    /// - `CatalogError::BlankQuestion` if a text is blank
    pub fn new<I, S>(title: impl Into<String>, texts: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let text = text.into().trim().to_string();
                if text.is_empty() {
                    Err(CatalogError::BlankQuestion { index })
                } else {
                    Ok(Question { index, text })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    /// The reference accounting and finance catalog
    #[must_use]
    pub fn reference() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            questions: REFERENCE_QUESTIONS
                .iter()
                .enumerate()
                .map(|(index, text)| Question {
                    index,
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of questions (always at least one)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl<'a> IntoIterator for &'a QuestionCatalog {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
