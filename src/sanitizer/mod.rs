//! HTML reduction for extraction prompts.
//!
//! Streaming rewrite via lol_html. The standard pass strips noise
//! (scripts, styles, comments) and *marks* likely-non-product regions
//! instead of deleting them — marked regions sometimes still carry usable
//! product attributes, such as breadcrumb category names. The aggressive
//! pass removes header/footer/nav subtrees outright and exists solely as
//! the fallback when the marked document is rejected as too large.

use anyhow::Result;
use lol_html::{HtmlRewriter, Settings, doc_comments, element};
use once_cell::sync::Lazy;
use regex::Regex;

/// Attribute used to mark likely-non-product regions.
pub const NON_PRODUCT_ATTR: &str = "data-section";

/// Marker value written into [`NON_PRODUCT_ATTR`].
pub const NON_PRODUCT_VALUE: &str = "non-product";

/// Explanatory comment prepended to sanitized output. The extraction
/// service reads this text verbatim at the top of the prompt HTML.
pub const ANNOTATION_NOTE: &str = "<!-- Sections marked with data-section='non-product' are likely not part of the main product information -->\n";

/// Class/id fragments that suggest chrome rather than product content.
static NON_PRODUCT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)menu|sidebar|ad|comment|footer|header|navigation")
        .expect("non-product pattern is valid")
});

fn mark_if_chrome_like(
    el: &mut lol_html::html_content::Element<'_, '_>,
    attr: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(value) = el.get_attribute(attr)
        && NON_PRODUCT_PATTERN.is_match(&value)
    {
        el.set_attribute(NON_PRODUCT_ATTR, NON_PRODUCT_VALUE)?;
    }
    Ok(())
}

/// Standard sanitization: drop scripts, styles, and comments; mark
/// header/footer/nav elements and anything whose class or id matches the
/// chrome pattern; prepend the annotation note.
pub fn sanitize_html(html: &str) -> Result<String> {
    let mut output = Vec::with_capacity(html.len() / 2 + ANNOTATION_NOTE.len());
    output.extend_from_slice(ANNOTATION_NOTE.as_bytes());

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("header, footer, nav", |el| {
                    el.set_attribute(NON_PRODUCT_ATTR, NON_PRODUCT_VALUE)?;
                    Ok(())
                }),
                element!("*[class]", |el| mark_if_chrome_like(el, "class")),
                element!("*[id]", |el| mark_if_chrome_like(el, "id")),
            ],
            document_content_handlers: vec![doc_comments!(|c| {
                c.remove();
                Ok(())
            })],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter.write(html.as_bytes())?;
    rewriter.end()?;

    Ok(String::from_utf8(output)?)
}

/// Aggressive reduction: the standard noise stripping plus physical
/// removal of header/footer/nav subtrees. No annotation note — nothing
/// is marked, and the reduced prompt template explains the removal.
pub fn reduce_html(html: &str) -> Result<String> {
    let mut output = Vec::with_capacity(html.len() / 2);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("header, footer, nav", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            document_content_handlers: vec![doc_comments!(|c| {
                c.remove();
                Ok(())
            })],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter.write(html.as_bytes())?;
    rewriter.end()?;

    Ok(String::from_utf8(output)?)
}
