use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `brand_model-1234.php`: a slug with at least one underscore, a dash,
    /// the numeric page id and the page extension
    static ref DETAIL_PAGE: Regex =
        Regex::new(r"([a-zA-Z]+)_([a-zA-Z0-9_]+)-(\d+)\.php").unwrap();
}

/// Returns true if the href points at a device detail page
///
/// Category and navigation pages (`samsung-phones-9.php`, `results.php3`)
/// lack the underscore-joined slug and are rejected.
///
/// # Examples
///
/// ```
/// use gsmarena_scraper::url::is_detail_href;
///
/// assert!(is_detail_href("samsung_galaxy_s21-10625.php"));
/// assert!(!is_detail_href("samsung-phones-9.php"));
/// ```
pub fn is_detail_href(href: &str) -> bool {
    DETAIL_PAGE.is_match(href)
}

/// Extracts the numeric page id from a detail-page URL
///
/// # Examples
///
/// ```
/// use gsmarena_scraper::url::detail_page_id;
///
/// assert_eq!(
///     detail_page_id("https://m.gsmarena.com/samsung_galaxy_s21-10625.php"),
///     Some("10625")
/// );
/// assert_eq!(detail_page_id("https://m.gsmarena.com/news.php3"), None);
/// ```
pub fn detail_page_id(url: &str) -> Option<&str> {
    DETAIL_PAGE
        .captures(url)
        .and_then(|caps| caps.get(3))
        .map(|id| id.as_str())
}

/// Joins a site-relative href onto the base URL
///
/// All leading slashes are stripped from the href before appending, so
/// `/apple_iphone_16-13317.php` and `apple_iphone_16-13317.php` produce
/// the same absolute URL. The base is expected to end with `/`.
pub fn absolutize_href(base_url: &str, href: &str) -> String {
    format!("{}{}", base_url, href.trim_start_matches('/'))
}
