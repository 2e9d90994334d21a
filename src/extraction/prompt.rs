//! Prompt templates for the extraction service and response cleanup.

/// System message sent with every extraction request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that extracts and cleans product information from HTML content.";

/// Prompt for the standard, annotated sanitizer output.
#[must_use]
pub fn build_prompt(sanitized_html: &str) -> String {
    format!(
        "This is the HTML content of an e-commerce product page. Some sections are marked \
with data-section='non-product' to indicate they might not be part of the main product \
information. Please extract and present the product information in JSON format, focusing \
on the unmarked sections but also considering marked sections if they contain relevant \
product details. Include core product attributes like product name, description, price, \
and any other available attributes. Preserve the original wording and details as provided \
by the brand. Make it detailed and comprehensive. Respond with just your polished cleaned \
JSON version. Here is the HTML content:\n\n{sanitized_html}"
    )
}

/// Prompt for the aggressive fallback, used when the standard prompt was
/// rejected as too large.
#[must_use]
pub fn build_reduced_prompt(reduced_html: &str) -> String {
    format!(
        "This is the reduced HTML content of an e-commerce product page with header and \
footer removed. Please extract and present the product information in JSON format. Include \
core product attributes like product name, description, price, and any other available \
attributes. Preserve the original wording and details as provided by the brand. Make it \
detailed and comprehensive. Respond with just your polished cleaned JSON version. Here is \
the reduced HTML content:\n\n{reduced_html}"
    )
}

/// Strip a Markdown code fence wrapping, if present, and trim the result.
///
/// Handles a leading ```` ```json ```` (or bare ```` ``` ````) tag and a
/// trailing ```` ``` ```` marker; anything else is returned trimmed.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let mut t = text.trim();

    if let Some(rest) = t.strip_prefix("```json") {
        t = rest;
    } else if let Some(rest) = t.strip_prefix("```") {
        t = rest;
    }

    if let Some(rest) = t.strip_suffix("```") {
        t = rest;
    }

    t.trim()
}
