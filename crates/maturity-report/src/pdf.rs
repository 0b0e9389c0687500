//! Minimal single-page PDF writer
//!
//! Emits a PDF 1.4 file with one page and the standard Helvetica font in
//! WinAnsi encoding. No creation date or random ID is written, so equal
//! input produces byte-identical output.

use crate::backend::{DocumentBackend, DocumentSurface};
use maturity_core::RenderError;

const MM_TO_PT: f64 = 72.0 / 25.4;

/// PDF backend with a fixed page size in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfBackend {
    page_width: f64,
    page_height: f64,
}

impl PdfBackend {
    #[inline]
    #[must_use]
    pub const fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
        }
    }

    /// 210 x 297 mm
    #[inline]
    #[must_use]
    pub const fn a4() -> Self {
        Self::new(210.0, 297.0)
    }
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self::a4()
    }
}

impl DocumentBackend for PdfBackend {
    type Surface = PdfPage;

    fn create_document(&self) -> Result<PdfPage, RenderError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.page_width) || !valid(self.page_height) {
            return Err(RenderError::BackendUnavailable(format!(
                "invalid page size {}x{} mm",
                self.page_width, self.page_height
            )));
        }
        Ok(PdfPage {
            width: self.page_width * MM_TO_PT,
            height: self.page_height * MM_TO_PT,
            content: Vec::new(),
        })
    }

    fn unsupported_char(&self, text: &str) -> Option<char> {
        first_unencodable(text)
    }
}

/// A page being written; coordinates are stored in points
#[derive(Debug, Clone)]
pub struct PdfPage {
    width: f64,
    height: f64,
    content: Vec<u8>,
}

impl DocumentSurface for PdfPage {
    fn write_text(
        &mut self,
        content: &str,
        x: f64,
        y: f64,
        font_size: f64,
    ) -> Result<(), RenderError> {
        if !(x.is_finite() && y.is_finite() && font_size.is_finite() && font_size > 0.0) {
            return Err(RenderError::Encoding(format!(
                "invalid placement for {content:?}: x={x} y={y} size={font_size}"
            )));
        }
        let encoded = encode_text(content)?;

        // PDF origin is bottom-left
        let x_pt = x * MM_TO_PT;
        let y_pt = self.height - y * MM_TO_PT;
        self.content.extend_from_slice(
            format!("BT /F1 {font_size:.2} Tf {x_pt:.2} {y_pt:.2} Td (").as_bytes(),
        );
        self.content.extend_from_slice(&encoded);
        self.content.extend_from_slice(b") Tj ET\n");
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        Ok(assemble(self.width, self.height, &self.content))
    }
}

/// Encode a string as the body of a PDF literal string in WinAnsi
fn encode_text(text: &str) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            '\t' => out.push(b' '),
            _ => {
                let byte = win_ansi_byte(c).ok_or_else(|| {
                    RenderError::Encoding(format!(
                        "character {c:?} (U+{:04X}) is not representable in WinAnsi",
                        c as u32
                    ))
                })?;
                out.extend_from_slice(format!("\\{byte:03o}").as_bytes());
            }
        }
    }
    Ok(out)
}

/// Code points of WinAnsi 0x80..=0x9F; the five unassigned slots are absent
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80), // €
    ('\u{201A}', 0x82), // ‚
    ('\u{0192}', 0x83), // ƒ
    ('\u{201E}', 0x84), // „
    ('\u{2026}', 0x85), // …
    ('\u{2020}', 0x86), // †
    ('\u{2021}', 0x87), // ‡
    ('\u{02C6}', 0x88), // ˆ
    ('\u{2030}', 0x89), // ‰
    ('\u{0160}', 0x8A), // Š
    ('\u{2039}', 0x8B), // ‹
    ('\u{0152}', 0x8C), // Œ
    ('\u{017D}', 0x8E), // Ž
    ('\u{2018}', 0x91), // ‘
    ('\u{2019}', 0x92), // ’
    ('\u{201C}', 0x93), // “
    ('\u{201D}', 0x94), // ”
    ('\u{2022}', 0x95), // •
    ('\u{2013}', 0x96), // en dash
    ('\u{2014}', 0x97), // em dash
    ('\u{02DC}', 0x98), // ˜
    ('\u{2122}', 0x99), // ™
    ('\u{0161}', 0x9A), // š
    ('\u{203A}', 0x9B), // ›
    ('\u{0153}', 0x9C), // œ
    ('\u{017E}', 0x9E), // ž
    ('\u{0178}', 0x9F), // Ÿ
];

/// First character of `text` the WinAnsi encoder cannot write
fn first_unencodable(text: &str) -> Option<char> {
    text.chars().find(|&c| {
        !matches!(c, ' '..='~' | '\t') && win_ansi_byte(c).is_none()
    })
}

fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(c)).ok(),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(mapped, _)| *mapped == c)
            .map(|&(_, byte)| byte),
    }
}

fn assemble(width: f64, height: f64, content: &[u8]) -> Vec<u8> {
    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(content);
    stream.extend_from_slice(b"\nendstream");

    let objects: [Vec<u8>; 6] = [
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width:.2} {height:.2}] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
        )
        .into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        stream,
        format!("<< /Producer (maturity-report {}) >>", crate::VERSION).into_bytes(),
    ];

    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref = out.len();
    let size = objects.len() + 1;
    out.extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!("trailer\n<< /Size {size} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{xref}\n%%EOF\n")
            .as_bytes(),
    );
    out
}
