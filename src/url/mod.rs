//! URL handling module
//!
//! Detail-page recognition and href absolutization. The same detail-page
//! pattern drives link discovery on the listing page and the last-resort
//! model code inference in the field extractor.

mod detail;

pub use detail::{absolutize_href, detail_page_id, is_detail_href};
