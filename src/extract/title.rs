//! Page title parsing: brand and model name

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    static ref SPECS_SUFFIX: Regex = Regex::new(r"(?i) - Full phone specifications.*$").unwrap();
    static ref SITE_SUFFIX: Regex = Regex::new(r"(?i) - GSMArena\.com.*$").unwrap();
}

/// Brand and model name parsed from a detail page title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleParts {
    pub brand: String,
    pub model_name: String,
}

/// Reads the `<title>` of the document and splits it into brand and model
///
/// A page without a title yields empty parts.
pub fn parse_title(document: &Html) -> TitleParts {
    let Ok(title_selector) = Selector::parse("title") else {
        return TitleParts::default();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| split_title(&element.text().collect::<String>()))
        .unwrap_or_default()
}

/// Strips the site suffixes from a title and splits off the brand
///
/// The brand is the text before the first whitespace run; the model name is
/// everything after it. A single-word title is all model name.
///
/// # Examples
///
/// ```
/// use gsmarena_scraper::extract::split_title;
///
/// let parts = split_title("Samsung Galaxy S21 - Full phone specifications - GSMArena.com");
/// assert_eq!(parts.brand, "Samsung");
/// assert_eq!(parts.model_name, "Galaxy S21");
/// ```
pub fn split_title(raw: &str) -> TitleParts {
    let text = raw.trim();
    let text = SPECS_SUFFIX.replace(text, "");
    let text = SITE_SUFFIX.replace(&text, "");

    match text.split_once(char::is_whitespace) {
        Some((brand, rest)) => TitleParts {
            brand: brand.to_string(),
            model_name: rest.trim_start().to_string(),
        },
        None => TitleParts {
            brand: String::new(),
            model_name: text.to_string(),
        },
    }
}
