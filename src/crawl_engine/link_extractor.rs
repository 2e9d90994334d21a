//! Hyperlink discovery from fetched HTML.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::{Origin, Url};

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

static BASE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("base[href]").expect("base selector is valid"));

/// Extract every hyperlink target from a page, resolved against the page's
/// effective base URL (a `<base href>` element when present, otherwise the
/// page URL itself). Unresolvable hrefs are dropped.
#[must_use]
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let base = document
        .select(&BASE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| page_url.join(href).ok())
        .unwrap_or_else(|| page_url.clone());

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .collect()
}

/// Whether a resolved link belongs to the crawl: same scheme, host, and
/// port as the seed. Non-http(s) schemes (mailto:, javascript:) fail the
/// origin comparison and are excluded with no special casing.
#[must_use]
pub fn is_same_origin(url: &Url, seed_origin: &Origin) -> bool {
    url.origin() == *seed_origin
}
