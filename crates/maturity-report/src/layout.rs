//! Fixed report layout
//!
//! Units are millimetres from the top-left corner of an A4 page. Defaults
//! reproduce the reference report exactly; there is no overflow handling, so
//! a long catalog simply runs past the bottom edge.

use maturity_core::SubmissionRecord;
use serde::{Deserialize, Serialize};

/// Title line of the report
pub const REPORT_TITLE: &str = "Accounting & Finance Maturity Assessment Report";

/// Fixed filename the report is delivered under
pub const REPORT_FILENAME: &str = "Accounting-Finance-Maturity-Report.pdf";

/// One positioned line of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

impl TextLine {
    #[inline]
    pub fn new(content: impl Into<String>, x: f64, y: f64, font_size: f64) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            font_size,
        }
    }
}

/// `[report]` section: every constant of the page layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub title: String,
    pub filename: String,
    /// Left edge of title, identity and question lines
    pub margin_x: f64,
    /// Left edge of answer lines
    pub answer_x: f64,
    pub title_y: f64,
    pub name_y: f64,
    pub email_y: f64,
    /// Offset of the first question line
    pub base_offset: f64,
    /// Distance between consecutive question lines
    pub line_spacing: f64,
    /// Distance from a question line to its answer line
    pub answer_offset: f64,
    pub title_font_size: f64,
    pub body_font_size: f64,
    pub page_width: f64,
    pub page_height: f64,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            filename: REPORT_FILENAME.to_string(),
            margin_x: 20.0,
            answer_x: 25.0,
            title_y: 20.0,
            name_y: 30.0,
            email_y: 38.0,
            base_offset: 50.0,
            line_spacing: 10.0,
            answer_offset: 6.0,
            title_font_size: 16.0,
            body_font_size: 12.0,
            page_width: 210.0,
            page_height: 297.0,
        }
    }
}

impl ReportLayout {
    /// With report filename
    #[inline]
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Vertical offset of question `index`
    #[inline]
    #[must_use]
    pub fn question_y(&self, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let i = index as f64;
        self.base_offset + i * self.line_spacing
    }

    /// Lay out a submission: title, identity block, then one question line
    /// and one answer line per catalog entry, in catalog order
    #[must_use]
    pub fn compose(&self, record: &SubmissionRecord<'_>) -> Vec<TextLine> {
        let body = self.body_font_size;
        let mut lines = Vec::with_capacity(3 + 2 * record.catalog.len());

        lines.push(TextLine::new(
            self.title.clone(),
            self.margin_x,
            self.title_y,
            self.title_font_size,
        ));
        lines.push(TextLine::new(
            format!("Name: {}", record.profile.name),
            self.margin_x,
            self.name_y,
            body,
        ));
        lines.push(TextLine::new(
            format!("Email: {}", record.profile.email),
            self.margin_x,
            self.email_y,
            body,
        ));

        for (question, _) in record.entries() {
            let y = self.question_y(question.index());
            lines.push(TextLine::new(
                format!("{}. {}", question.number(), question.text()),
                self.margin_x,
                y,
                body,
            ));
            lines.push(TextLine::new(
                format!("Answer: {}", record.answers.label(question.index())),
                self.answer_x,
                y + self.answer_offset,
                body,
            ));
        }
        lines
    }

    /// Number of lines placed below the bottom edge
    #[must_use]
    pub fn overflow_count(&self, lines: &[TextLine]) -> usize {
        lines.iter().filter(|l| l.y > self.page_height).count()
    }
}
