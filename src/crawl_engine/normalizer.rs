//! URL canonicalization for the post-crawl sitemap pass.
//!
//! Pure string transforms, no network or concurrency. The crawl records URLs
//! exactly as discovered; this module collapses them into the canonical,
//! sorted form written back to the sitemap file.

use std::collections::BTreeSet;

/// Canonicalize a single URL string.
///
/// Applied transforms: trim surrounding whitespace, lowercase, strip the
/// `http://`/`https://` scheme, drop everything from the first `?` onward,
/// drop trailing slashes. The sitemap is a host-relative inventory, so the
/// scheme is stripped deliberately.
///
/// Guaranteed idempotent for arbitrary input:
/// `normalize_url(normalize_url(u)) == normalize_url(u)`. The stripping
/// loops exist for that guarantee — dropping a scheme or a query can expose
/// another scheme prefix or more trailing noise, which a single pass would
/// leave for a second call to find.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let mut s = url.trim().to_lowercase();

    loop {
        let t = s.trim_start();
        if let Some(rest) = t
            .strip_prefix("https://")
            .or_else(|| t.strip_prefix("http://"))
        {
            s = rest.to_string();
        } else {
            if t.len() != s.len() {
                s = t.to_string();
            }
            break;
        }
    }

    if let Some(idx) = s.find('?') {
        s.truncate(idx);
    }

    loop {
        let len = s.len();
        s.truncate(s.trim_end().len());
        while s.ends_with('/') {
            s.pop();
        }
        if s.len() == len {
            break;
        }
    }

    s
}

/// Normalize, deduplicate, and sort a sequence of discovered URLs.
///
/// Empty lines (and URLs that normalize to the empty string) are dropped.
/// The output order is plain lexicographic string order.
#[must_use]
pub fn normalize_and_sort<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: BTreeSet<String> = urls
        .into_iter()
        .map(|u| normalize_url(u.as_ref()))
        .filter(|u| !u.is_empty())
        .collect();

    set.into_iter().collect()
}
