//! HTML parsing and device link extraction
//!
//! Listing and detail pages are third-party markup. Parsing goes through
//! html5ever's tree builder, which recovers from any malformed input; the
//! recovered errors are logged and otherwise ignored.

use crate::url::{absolutize_href, is_detail_href};
use scraper::{Html, Selector};

/// Parses an HTML document without ever failing
///
/// Parse errors are reported at `trace` level only.
pub fn parse_lenient(html: &str) -> Html {
    let document = Html::parse_document(html);

    if !document.errors.is_empty() {
        tracing::trace!(
            "Recovered from {} HTML parse errors: {:?}",
            document.errors.len(),
            document.errors.iter().take(5).collect::<Vec<_>>()
        );
    }

    document
}

/// Extracts device detail-page URLs from a listing page
///
/// # Link Extraction Rules
///
/// - Only `<a href="...">` tags whose href contains `.php`
/// - The href must look like `brand_model-1234.php`
/// - Each match becomes `base_url` + href with leading slashes stripped
/// - Duplicates are dropped by exact string match, first-seen order kept
///
/// # Arguments
///
/// * `html` - The listing page HTML
/// * `base_url` - The site base URL, ending with `/`
///
/// # Returns
///
/// The ordered, deduplicated absolute URLs; empty if nothing matched
///
/// # Example
///
/// ```
/// use gsmarena_scraper::crawler::extract_device_links;
///
/// let html = r#"<a href="/samsung_galaxy_s21-10625.php">S21</a><a href="/news.php3">News</a>"#;
/// let links = extract_device_links(html, "https://m.gsmarena.com/");
/// assert_eq!(links, vec!["https://m.gsmarena.com/samsung_galaxy_s21-10625.php"]);
/// ```
pub fn extract_device_links(html: &str, base_url: &str) -> Vec<String> {
    let document = parse_lenient(html);
    let mut links: Vec<String> = Vec::new();

    let Ok(a_selector) = Selector::parse(r#"a[href*=".php"]"#) else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_detail_href(href) {
            continue;
        }

        let absolute_url = absolutize_href(base_url, href);
        if !links.contains(&absolute_url) {
            links.push(absolute_url);
        }
    }

    tracing::debug!("Extracted {} device links", links.len());
    links
}
