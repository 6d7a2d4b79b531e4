//! Extracts a document's title from its first level-1 heading.

/// The marker that opens a level-1 heading.
const HEADING_MARKER: char = '#';

/// Returns the text of the first level-1 heading in `document`, i.e. the
/// first line made of a single `#`, whitespace, and some text. The marker
/// and surrounding whitespace are stripped and the result borrows from
/// `document`. Deeper headings (`##`, `###`, ...) and lines like `#tag` are
/// ignored, as are markers with no text after them. Returns [`None`] when the
/// document has no such line; what to fall back to is up to the caller.
///
/// ```
/// use tempo::title::extract_title;
///
/// assert_eq!(Some("Hello World"), extract_title("\n\n# Hello World\nbody"));
/// assert_eq!(None, extract_title("## Only a subheading"));
/// ```
pub fn extract_title(document: &str) -> Option<&str> {
    document.lines().find_map(heading_text)
}

fn heading_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(HEADING_MARKER)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    match rest.trim() {
        "" => None,
        title => Some(title),
    }
}
