use std::borrow::Cow;

/// Shorten matched text for log output, respecting UTF-8 boundaries.
///
/// Line breaks are flattened so a multi-line match stays on one log line.
pub(crate) fn truncate_snippet(text: &str, max_bytes: usize) -> Cow<'_, str> {
    let cut = if text.len() > max_bytes {
        let end = text.floor_char_boundary(max_bytes.saturating_sub(3));
        Cow::Owned(format!("{}...", &text[..end]))
    } else {
        Cow::Borrowed(text)
    };

    if cut.contains(['\n', '\r']) {
        Cow::Owned(cut.replace(['\n', '\r'], " "))
    } else {
        cut
    }
}

/// 1-based line number of a byte offset
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    let end = text.floor_char_boundary(offset.min(text.len()));
    text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}
