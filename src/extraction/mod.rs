//! Text Extraction
//!
//! Turns uploaded bytes into plaintext. A file is classified against
//! [`FORMAT_TABLE`] and handed to the matching extractor:
//! - plain text and CSV are decoded as UTF-8 verbatim
//! - PDF goes through `lopdf`
//! - Word documents go through `docx-rs`
//! - spreadsheets go through `calamine`, one CSV block per sheet
//!
//! Extraction never fails outward. Parse errors and unsupported formats are
//! replaced with placeholder text so a single bad file cannot sink a batch.

pub mod pdf;
pub mod spreadsheet;
pub mod word;

use tracing::warn;

pub const PDF_FAILED: &str = "[PDF extraction failed]";
pub const PDF_NO_TEXT: &str = "[PDF extraction produced no text]";
pub const WORD_FAILED: &str = "[Word document extraction failed]";
pub const SPREADSHEET_FAILED: &str = "[Spreadsheet extraction failed]";
pub const SPREADSHEET_EMPTY: &str = "[Empty spreadsheet]";

const WORD_MEDIA_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
const SPREADSHEET_MEDIA_TYPES: &[&str] =
    &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    PlainText,
    Csv,
    Pdf,
    Word,
    Spreadsheet,
    Unsupported,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::PlainText => write!(f, "text"),
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::Pdf => write!(f, "pdf"),
            FileFormat::Word => write!(f, "word"),
            FileFormat::Spreadsheet => write!(f, "spreadsheet"),
            FileFormat::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One row of the classification table
pub struct FormatRule {
    pub format: FileFormat,
    pub media_types: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

/// Classification rows in priority order
pub const FORMAT_TABLE: &[FormatRule] = &[
    FormatRule {
        format: FileFormat::PlainText,
        media_types: &["text/plain"],
        extensions: &["txt"],
    },
    FormatRule {
        format: FileFormat::Csv,
        media_types: &["text/csv"],
        extensions: &["csv"],
    },
    FormatRule {
        format: FileFormat::Pdf,
        media_types: &["application/pdf"],
        extensions: &["pdf"],
    },
    FormatRule {
        format: FileFormat::Word,
        media_types: WORD_MEDIA_TYPES,
        extensions: &["doc", "docx"],
    },
    FormatRule {
        format: FileFormat::Spreadsheet,
        media_types: SPREADSHEET_MEDIA_TYPES,
        extensions: &["xlsx"],
    },
];

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Word document parse error: {0}")]
    Word(String),

    #[error("Spreadsheet parse error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV rendering error: {0}")]
    Csv(String),
}

/// Pick a format for a file. The declared media type is consulted across the
/// whole table first; the filename extension is only used when no row claims
/// the media type.
pub fn classify(media_type: &str, filename: &str) -> FileFormat {
    let essence = media_type_essence(media_type);
    if let Some(rule) = FORMAT_TABLE
        .iter()
        .find(|rule| rule.media_types.contains(&essence.as_str()))
    {
        return rule.format;
    }

    let extension = extension_of(filename);
    FORMAT_TABLE
        .iter()
        .find(|rule| {
            extension
                .as_deref()
                .is_some_and(|ext| rule.extensions.contains(&ext))
        })
        .map(|rule| rule.format)
        .unwrap_or(FileFormat::Unsupported)
}

/// Extract plaintext from `data`, falling back to placeholder text on failure
pub fn extract_text(format: FileFormat, filename: &str, media_type: &str, data: &[u8]) -> String {
    match format {
        FileFormat::PlainText | FileFormat::Csv => decode_utf8(data),
        FileFormat::Pdf => match pdf::extract(data) {
            Ok(text) if text.is_empty() => PDF_NO_TEXT.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!(file = %filename, error = %e, "PDF extraction failed");
                PDF_FAILED.to_string()
            }
        },
        FileFormat::Word => match word::extract(data) {
            Ok(text) if text.trim().is_empty() => {
                warn!(file = %filename, "Word document contained no text");
                WORD_FAILED.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                warn!(file = %filename, error = %e, "Word document extraction failed");
                WORD_FAILED.to_string()
            }
        },
        FileFormat::Spreadsheet => match spreadsheet::extract(data) {
            Ok(text) if text.is_empty() => SPREADSHEET_EMPTY.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!(file = %filename, error = %e, "Spreadsheet extraction failed");
                SPREADSHEET_FAILED.to_string()
            }
        },
        FileFormat::Unsupported => unsupported_placeholder(media_type, filename),
    }
}

/// Lossy UTF-8 decode with a leading byte-order mark dropped
pub fn decode_utf8(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text.into_owned(),
    }
}

pub fn unsupported_placeholder(media_type: &str, filename: &str) -> String {
    let media_type = if media_type.is_empty() { "unknown" } else { media_type };
    format!("[{}] File: {}", media_type, filename)
}

/// `Text/Plain; charset=utf-8` -> `text/plain`
fn media_type_essence(media_type: &str) -> String {
    match media_type.parse::<mime::Mime>() {
        Ok(parsed) => parsed.essence_str().to_ascii_lowercase(),
        Err(_) => media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
    }
}

fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
