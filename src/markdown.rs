//! Markdown and HTML helpers for the text that ends up on the index page.

use pulldown_cmark::{escape::escape_html, html, Options, Parser};

/// Renders a Markdown snippet (e.g., a post description) to HTML.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

/// Escapes plain text so it can be dropped into HTML verbatim. Templates
/// don't escape their input, so every plain-text field goes through here.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a `String` can't fail.
    let _ = escape_html(&mut out, text);
    out
}
