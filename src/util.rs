//! Length limits and helpers shared by the parser and the serializer.

/// Maximum rendered tag section a client may send, including the leading `@`
/// and the trailing space.
pub const MAX_TAG_SECTION_FROM_CLIENT: usize = 4096;

/// Maximum length for client-only tag data on a server-composed line.
pub const MAX_CLIENT_TAG_DATA: usize = 4094;

/// Maximum length for server tag data on a server-composed line.
pub const MAX_SERVER_TAG_DATA: usize = 4094;

/// Truncates a string to at most `max_bytes` bytes without breaking
/// a multi-byte UTF-8 codepoint at the end.
///
/// # Examples
///
/// ```
/// use slirc_line::util::truncate_utf8_safe;
///
/// assert_eq!(truncate_utf8_safe("hello world", 5), "hello");
///
/// // Multi-byte chars are not split
/// assert_eq!(truncate_utf8_safe("Hello 👋 World", 8), "Hello ");
///
/// assert_eq!(truncate_utf8_safe("hi", 10), "hi");
/// ```
#[inline]
pub fn truncate_utf8_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}
