//! Line parsing.
//!
//! Bounding and the bad-character check work on raw bytes; structure is
//! split by the nom parser once the line is decoded.

use std::borrow::Cow;
use std::str::FromStr;

use tracing::trace;

use crate::config::ParseOptions;
use crate::error::{MessageParseError, ProtocolError};

use super::nom_parser::ParsedLine;
use super::tags::unescape_tag_value;
use super::types::Message;

impl Message {
    /// Parse a raw line.
    ///
    /// `max_raw_length`, when nonzero, cuts the input to that many leading
    /// bytes before anything else happens. See [`ParseOptions`] for what
    /// `strict` adds.
    ///
    /// ```
    /// use slirc_line::Message;
    ///
    /// let msg = Message::parse_line("TESTMSG\r\n", false, 6).unwrap();
    /// assert_eq!(msg.command, "TESTMS");
    /// ```
    pub fn parse_line(
        raw: impl AsRef<[u8]>,
        strict: bool,
        max_raw_length: usize,
    ) -> Result<Message, MessageParseError> {
        let options = ParseOptions {
            strict,
            max_raw_length,
        };
        Message::parse_with(raw.as_ref(), &options)
    }

    /// Parse a raw line with explicit options.
    pub fn parse_with(raw: &[u8], options: &ParseOptions) -> Result<Message, MessageParseError> {
        let result = parse_bounded(raw, options);
        if let Err(ref err) = result {
            trace!(error = %err, len = raw.len(), strict = options.strict, "rejected IRC line");
        }
        result
    }
}

fn parse_bounded(raw: &[u8], options: &ParseOptions) -> Result<Message, MessageParseError> {
    let raw = match options.max_raw_length {
        0 => raw,
        max => &raw[..raw.len().min(max)],
    };

    if raw.contains(&b'\0') {
        return Err(MessageParseError::LineContainsBadChar);
    }

    let decoded = if options.strict {
        Cow::Borrowed(std::str::from_utf8(raw).map_err(|_| MessageParseError::InvalidUtf8)?)
    } else {
        String::from_utf8_lossy(raw)
    };
    let line = match decoded.find(['\r', '\n']) {
        Some(end) => &decoded[..end],
        None => &decoded[..],
    };

    let parsed = ParsedLine::parse(line)?;
    if options.strict {
        validate_strict(&parsed)?;
    }

    let mut message = Message::default();
    if let Some(raw_tags) = parsed.tags {
        install_tags(&mut message, raw_tags, options.strict)?;
    }
    message.prefix = parsed.prefix.unwrap_or_default().to_owned();
    message.command = parsed.command.to_ascii_uppercase();
    message.params = parsed.params.iter().map(|p| (*p).to_owned()).collect();
    Ok(message)
}

/// Split a raw tag section and install each entry, unescaping values.
///
/// An entry without `=` gets an empty value. Empty entries are skipped.
fn install_tags(
    message: &mut Message,
    raw_tags: &str,
    strict: bool,
) -> Result<(), MessageParseError> {
    for entry in raw_tags.split(';').filter(|e| !e.is_empty()) {
        let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
        if strict && !is_valid_tag_key(key) {
            return Err(MessageParseError::InvalidTagKey(key.to_owned()));
        }
        if key.is_empty() {
            continue;
        }
        message.set_tag(key, unescape_tag_value(value));
    }
    Ok(())
}

/// IRCv3 tag key: optional `+`, then letters, digits, `-`, `.` and `/`.
fn is_valid_tag_key(key: &str) -> bool {
    let name = key.strip_prefix('+').unwrap_or(key);
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '/'))
}

/// A command is a word or a three-digit numeric.
fn is_valid_command(command: &str) -> bool {
    command.chars().all(|c| c.is_ascii_alphabetic())
        || (command.len() == 3 && command.chars().all(|c| c.is_ascii_digit()))
}

fn validate_strict(parsed: &ParsedLine<'_>) -> Result<(), MessageParseError> {
    if !is_valid_command(parsed.command) {
        return Err(MessageParseError::InvalidCommand(parsed.command.to_owned()));
    }
    if let Some(prefix) = parsed.prefix {
        if prefix.chars().any(char::is_control) {
            return Err(MessageParseError::InvalidPrefix(prefix.to_owned()));
        }
    }
    Ok(())
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        Message::parse_with(s.as_bytes(), &ParseOptions::default()).map_err(|cause| {
            ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause,
            }
        })
    }
}
