//! Device field extraction
//!
//! Turns a detail page into a [`DeviceRecord`]:
//! - Brand and model name from the page title
//! - Model code from the first successful strategy of the cascade in
//!   [`model_code`]

pub mod model_code;
mod title;

pub use model_code::{find_model_code, CascadeInput};
pub use title::{parse_title, split_title, TitleParts};

use crate::crawler::parse_lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a model code came from, strongest signal first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodeSource {
    /// The structured `models` specification cell
    SpecField,
    /// The cell next to an "Also known as" label
    AlsoKnownAs,
    /// A code-shaped token in the page text
    TextPattern,
    /// Synthesized from the page id in the URL
    UrlInference,
}

impl CodeSource {
    /// All sources in cascade order
    pub const ALL: [CodeSource; 4] = [
        CodeSource::SpecField,
        CodeSource::AlsoKnownAs,
        CodeSource::TextPattern,
        CodeSource::UrlInference,
    ];
}

impl fmt::Display for CodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CodeSource::SpecField => "spec field",
            CodeSource::AlsoKnownAs => "also known as",
            CodeSource::TextPattern => "text pattern",
            CodeSource::UrlInference => "url inference",
        };
        f.write_str(label)
    }
}

/// One device, as extracted from its detail page
///
/// Fields that could not be found are empty strings, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Absolute URL of the detail page
    #[serde(rename = "url")]
    pub source_url: String,

    pub brand: String,

    #[serde(rename = "model")]
    pub model_name: String,

    /// Manufacturer model code found by the cascade
    #[serde(rename = "serial_code")]
    pub model_code: String,

    /// Copy of the model code, set only when it came from the spec field
    #[serde(rename = "misc_model")]
    pub misc_model_code: String,

    #[serde(skip)]
    pub code_source: Option<CodeSource>,
}

impl DeviceRecord {
    /// Creates an empty record for the given page
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }
}

/// Extracts all device fields from a detail page
///
/// # Arguments
///
/// * `html` - The detail page HTML
/// * `source_url` - The URL the page was fetched from
/// * `code_prefix` - Literal prepended to the page id when the model code
///   has to be inferred from the URL
///
/// # Example
///
/// ```
/// use gsmarena_scraper::extract::{extract_device, CodeSource};
///
/// let html = r#"<html><head><title>Samsung Galaxy S21 - Full phone specifications</title></head>
///     <body><table><tr><td data-spec="models">SM-G991B, SM-G991U</td></tr></table></body></html>"#;
/// let record = extract_device(html, "https://m.gsmarena.com/samsung_galaxy_s21-10625.php", "GSM-");
///
/// assert_eq!(record.brand, "Samsung");
/// assert_eq!(record.model_name, "Galaxy S21");
/// assert_eq!(record.model_code, "SM-G991B");
/// assert_eq!(record.misc_model_code, "SM-G991B");
/// assert_eq!(record.code_source, Some(CodeSource::SpecField));
/// ```
pub fn extract_device(html: &str, source_url: &str, code_prefix: &str) -> DeviceRecord {
    let document = parse_lenient(html);
    let mut record = DeviceRecord::new(source_url);

    let title = parse_title(&document);
    record.brand = title.brand;
    record.model_name = title.model_name;

    let input = CascadeInput {
        document: &document,
        source_url,
        code_prefix,
    };

    if let Some((source, code)) = find_model_code(&input) {
        if source == CodeSource::SpecField {
            record.misc_model_code = code.clone();
        }
        record.model_code = code;
        record.code_source = Some(source);
    }

    record
}
