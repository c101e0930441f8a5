//! HTML page parsing.
//!
//! Runkeeper has no official API; activity discovery and activity-type
//! classification read rendered pages. Everything that depends on the
//! site's undocumented markup lives behind this module's two operations,
//! so a markup change touches nothing but the selectors here:
//!
//! - [`extract_trip_ids`] — activity ids embedded in profile-page element
//!   ids
//! - [`first_keyword`] — priority-ordered keyword scan over a fragment's
//!   text
//!
//! Both take already-fetched HTML strings; this module never touches the
//! network.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Element-id prefix marking an embedded activity id on a profile page.
pub const TRIP_ID_PREFIX: &str = "trip";

static TRIP_ID_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!(r#"[id^="{TRIP_ID_PREFIX}"]"#)).expect("valid trip id selector")
});

/// Activity ids embedded in a profile page.
///
/// Returns the id portion of every element whose `id` attribute starts
/// with [`TRIP_ID_PREFIX`], prefix stripped, in document order. Duplicates
/// are preserved; a page without matches yields an empty vec.
pub fn extract_trip_ids(profile_html: &str) -> Vec<String> {
    let document = Html::parse_document(profile_html);

    document
        .select(&TRIP_ID_SELECTOR)
        .filter_map(|element| element.value().id())
        .filter_map(|id| id.strip_prefix(TRIP_ID_PREFIX))
        .map(str::to_owned)
        .collect()
}

/// First of `keywords` contained in the text of an HTML fragment.
///
/// Keywords are tried in the order given; the value paired with the first
/// one found is returned. Only rendered text is searched — a keyword that
/// appears solely in markup attributes does not match.
pub fn first_keyword<T: Copy>(fragment_html: &str, keywords: &[(&str, T)]) -> Option<T> {
    let fragment = Html::parse_fragment(fragment_html);
    let text: String = fragment.root_element().text().collect();

    keywords
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, value)| *value)
}
