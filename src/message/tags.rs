//! IRCv3 message tag escaping utilities.
//!
//! Tag values travel on the wire with `\`, `;`, space, CR and LF replaced by
//! two-character escape sequences. Escaping is a single left-to-right pass,
//! so an emitted `\\` is never re-escaped.

use std::borrow::Cow;
use std::fmt::{Result as FmtResult, Write};

/// Wire form of a character that must be escaped in a tag value.
#[inline]
const fn escape_sequence(c: char) -> Option<&'static str> {
    match c {
        '\\' => Some("\\\\"),
        ';' => Some("\\:"),
        ' ' => Some("\\s"),
        '\r' => Some("\\r"),
        '\n' => Some("\\n"),
        _ => None,
    }
}

/// Decoded form of the character following a backslash.
///
/// Unknown escapes decode to the escaped character itself, so `\\` becomes
/// `\` and `\q` becomes `q`.
#[inline]
const fn unescape_char(c: char) -> char {
    match c {
        ':' => ';',
        's' => ' ',
        'r' => '\r',
        'n' => '\n',
        c => c,
    }
}

/// Escape a tag value for serialization, writing into `f`.
///
/// Escapes special characters for the IRCv3 message-tags format.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    let mut start = 0;
    for (i, c) in value.char_indices() {
        if let Some(seq) = escape_sequence(c) {
            f.write_str(&value[start..i])?;
            f.write_str(seq)?;
            start = i + c.len_utf8();
        }
    }
    f.write_str(&value[start..])
}

/// Escape a tag value, borrowing the input when nothing needs escaping.
///
/// ```
/// use slirc_line::message::tags::escaped_tag_value;
///
/// assert_eq!(escaped_tag_value("hi\nthere"), "hi\\nthere");
/// assert_eq!(escaped_tag_value("a;b c\\d"), "a\\:b\\sc\\\\d");
/// ```
pub fn escaped_tag_value(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| escape_sequence(c).is_some()) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(escaped_len(value));
    // Writing into a String cannot fail.
    let _ = escape_tag_value(&mut escaped, value);
    Cow::Owned(escaped)
}

/// Length in bytes of the escaped form of `value`, without building it.
#[inline]
pub fn escaped_len(value: &str) -> usize {
    value
        .bytes()
        .map(|b| match b {
            b'\\' | b';' | b' ' | b'\r' | b'\n' => 2,
            _ => 1,
        })
        .sum()
}

/// Unescape a tag value from wire format.
///
/// Never fails: unknown escapes decode to the escaped character and a
/// trailing lone backslash is dropped. Returns the input unchanged (borrowed)
/// when it contains no backslash.
///
/// ```
/// use slirc_line::message::tags::unescape_tag_value;
///
/// assert_eq!(unescape_tag_value("te\\n\\kst"), "te\nkst");
/// assert_eq!(unescape_tag_value("test\\"), "test");
/// ```
pub fn unescape_tag_value(value: &str) -> Cow<'_, str> {
    let Some(first) = value.find('\\') else {
        return Cow::Borrowed(value);
    };
    if first == value.len() - 1 {
        return Cow::Borrowed(&value[..first]);
    }

    let mut unescaped = String::with_capacity(value.len());
    unescaped.push_str(&value[..first]);
    let mut chars = value[first..].chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => unescaped.push(unescape_char(escaped)),
                None => break,
            }
        } else {
            unescaped.push(c);
        }
    }
    Cow::Owned(unescaped)
}
