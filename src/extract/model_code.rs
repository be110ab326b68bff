//! Model code cascade
//!
//! Each strategy looks for the manufacturer model code in a different place,
//! from the strongest signal to the weakest. The first strategy that yields a
//! usable value wins and the rest are skipped.

use crate::extract::CodeSource;
use crate::url::detail_page_id;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    /// `SM-G991B`, `XT-2451` style codes, or `A2342` style codes
    static ref FREEFORM_CODE: Regex =
        Regex::new(r"\b([A-Z]{2,3}-[A-Z0-9]{3,6}|[A-Z][0-9]{4}[A-Z]?)\b").unwrap();
}

/// Marker the site uses for an empty specification cell
const PLACEHOLDER: &str = "-";

const ALSO_KNOWN_AS: &str = "Also known as";

/// Everything a strategy may look at
pub struct CascadeInput<'a> {
    pub document: &'a Html,
    pub source_url: &'a str,
    pub code_prefix: &'a str,
}

type Strategy = fn(&CascadeInput<'_>) -> Option<String>;

/// Strategies in the order they are tried
const STRATEGIES: &[(CodeSource, Strategy)] = &[
    (CodeSource::SpecField, from_spec_field),
    (CodeSource::AlsoKnownAs, from_also_known_as),
    (CodeSource::TextPattern, from_text_pattern),
    (CodeSource::UrlInference, from_url),
];

/// Runs the cascade and returns the first model code found with its source
pub fn find_model_code(input: &CascadeInput<'_>) -> Option<(CodeSource, String)> {
    STRATEGIES.iter().find_map(|(source, strategy)| {
        let code = strategy(input)?;
        tracing::trace!("Model code {} found via {}", code, source);
        Some((*source, code))
    })
}

/// Accepts a candidate only if it carries data
fn usable(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == PLACEHOLDER {
        None
    } else {
        Some(value.to_string())
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// `<td data-spec="models">SM-G991B, SM-G991U</td>`: first listed code
fn from_spec_field(input: &CascadeInput<'_>) -> Option<String> {
    let selector = Selector::parse(r#"td[data-spec="models"]"#).ok()?;
    let cell = input.document.select(&selector).next()?;

    let text = usable(&text_of(cell))?;
    text.split(',').next().and_then(usable)
}

/// `<td>Also known as</td><td>...</td>`: the cell after the first label
/// that has one
fn from_also_known_as(input: &CascadeInput<'_>) -> Option<String> {
    let selector = Selector::parse("td").ok()?;

    let value = input
        .document
        .select(&selector)
        .filter(|td| {
            td.children()
                .filter_map(|node| node.value().as_text())
                .any(|text| text.contains(ALSO_KNOWN_AS))
        })
        .find_map(|label| {
            label
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "td")
        })?;

    usable(&text_of(value))
}

/// First code-shaped token anywhere in the page text
fn from_text_pattern(input: &CascadeInput<'_>) -> Option<String> {
    let content = text_of(input.document.root_element());
    FREEFORM_CODE
        .captures(&content)
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str().to_string())
}

/// Synthesized from the numeric page id in the source URL
fn from_url(input: &CascadeInput<'_>) -> Option<String> {
    detail_page_id(input.source_url).map(|id| format!("{}{}", input.code_prefix, id))
}
