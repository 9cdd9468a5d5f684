//! Line serialization.
//!
//! Encoding validates the message, checks the tag budgets, renders the line
//! and, when asked to, packs everything after the tag section into a target
//! length.

use std::io::Write;

use tracing::debug;

use crate::config::EncodeOptions;
use crate::error::{MessageEncodeError, Result};
use crate::util::{
    truncate_utf8_safe, MAX_CLIENT_TAG_DATA, MAX_SERVER_TAG_DATA, MAX_TAG_SECTION_FROM_CLIENT,
};

use super::tag_map::{TagClass, TagMap};
use super::tags::escape_tag_value;
use super::types::Message;

/// Check if a string needs colon-prefixing as a trailing IRC argument.
#[inline]
fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Whether the final parameter must be introduced by `:`.
///
/// Trailing whitespace is dropped from an unframed last parameter on parse.
#[inline]
fn needs_trailing_colon(s: &str) -> bool {
    needs_colon_prefix(s) || s.ends_with(|c: char| c.is_ascii_whitespace())
}

#[inline]
fn breaks_line(s: &str) -> bool {
    s.contains(['\0', '\r', '\n'])
}

impl Message {
    /// Encode this message as a wire line, CRLF included.
    ///
    /// `from_client` selects the tag budget: a client's server and
    /// client-only tags share one 4096-byte section, while a server may fill
    /// each class up to its own limit. A nonzero `max_line_length` packs
    /// everything after the tag section into that many bytes.
    pub fn line(
        &self,
        from_client: bool,
        max_line_length: usize,
    ) -> Result<String, MessageEncodeError> {
        self.line_with(&EncodeOptions {
            from_client,
            max_line_length,
        })
    }

    /// Encode this message as wire bytes, CRLF included.
    ///
    /// ```
    /// use slirc_line::Message;
    ///
    /// let msg = Message::new("", "TEST", &["*"]).with_tag("re", "");
    /// assert_eq!(msg.line_bytes(false, 0).unwrap(), b"@re TEST *\r\n");
    /// ```
    pub fn line_bytes(
        &self,
        from_client: bool,
        max_line_length: usize,
    ) -> Result<Vec<u8>, MessageEncodeError> {
        self.line(from_client, max_line_length)
            .map(String::into_bytes)
    }

    /// Encode this message with explicit options.
    pub fn line_with(&self, options: &EncodeOptions) -> Result<String, MessageEncodeError> {
        self.validate()?;
        check_tag_budget(self.tags(), options.from_client)?;

        let mut line = String::with_capacity(512);
        write_tags(&mut line, self.tags());
        let body_start = line.len();
        self.write_body(&mut line);

        if options.max_line_length != 0 {
            let body_len = line.len() - body_start;
            let limit = options.max_line_length.saturating_sub(2);
            if limit == 0 {
                return Err(MessageEncodeError::LineTooLong {
                    section: "line body",
                    length: body_len + 2,
                    limit: options.max_line_length,
                });
            }
            if body_len > limit {
                let kept = truncate_utf8_safe(&line[body_start..], limit).len();
                debug!(
                    command = %self.command,
                    length = body_len + 2,
                    target = options.max_line_length,
                    "packing line body"
                );
                line.truncate(body_start + kept);
            }
        }

        line.push_str("\r\n");
        Ok(line)
    }

    /// Encode this message straight into a writer.
    ///
    /// Returns the number of bytes written. Nothing is written if encoding
    /// fails.
    pub fn encode_to<W: Write>(&self, writer: &mut W, options: &EncodeOptions) -> Result<usize> {
        let line = self.line_with(options)?;
        writer.write_all(line.as_bytes())?;
        Ok(line.len())
    }

    fn validate(&self) -> Result<(), MessageEncodeError> {
        if self.command.is_empty() {
            return Err(MessageEncodeError::MissingCommand);
        }
        if self.command.starts_with([':', '@'])
            || self.command.contains(|c: char| c.is_ascii_whitespace())
            || breaks_line(&self.command)
        {
            return Err(MessageEncodeError::InvalidCommand(self.command.clone()));
        }
        if self.prefix.contains(' ') || breaks_line(&self.prefix) {
            return Err(MessageEncodeError::InvalidPrefix(self.prefix.clone()));
        }
        for (key, value) in self.tags().iter() {
            if key.is_empty() || key.contains(['=', ';', ' ', '\0', '\r', '\n']) {
                return Err(MessageEncodeError::InvalidTagKey(key.to_owned()));
            }
            // CR and LF are escaped, NUL has no escape
            if value.contains('\0') {
                return Err(MessageEncodeError::InvalidTagValue(key.to_owned()));
            }
        }

        let last = self.params.len().saturating_sub(1);
        for (index, param) in self.params.iter().enumerate() {
            if breaks_line(param) || (index != last && needs_colon_prefix(param)) {
                return Err(MessageEncodeError::InvalidParam {
                    index,
                    param: param.clone(),
                });
            }
        }
        Ok(())
    }

    fn write_body(&self, out: &mut String) {
        if !self.prefix.is_empty() {
            out.push(':');
            out.push_str(&self.prefix);
            out.push(' ');
        }

        out.push_str(&self.command);

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            out.push(' ');
            if i == last && needs_trailing_colon(param) {
                out.push(':');
            }
            out.push_str(param);
        }
    }
}

/// Check the rendered tag data against the budget for the composing side.
fn check_tag_budget(tags: &TagMap, from_client: bool) -> Result<(), MessageEncodeError> {
    let (server_count, server_len) = tags.count_and_size(TagClass::Server);
    let (client_count, client_len) = tags.count_and_size(TagClass::ClientOnly);

    let exceeded = if from_client {
        if server_count + client_count == 0 {
            return Ok(());
        }
        // '@' <server> [';'] <client> ' '
        let joiner = usize::from(server_count > 0 && client_count > 0);
        let section = 1 + server_len + joiner + client_len + 1;
        (section > MAX_TAG_SECTION_FROM_CLIENT)
            .then_some(("tag section", section, MAX_TAG_SECTION_FROM_CLIENT))
    } else if server_len > MAX_SERVER_TAG_DATA {
        Some(("server tag data", server_len, MAX_SERVER_TAG_DATA))
    } else if client_len > MAX_CLIENT_TAG_DATA {
        Some(("client tag data", client_len, MAX_CLIENT_TAG_DATA))
    } else {
        None
    };

    match exceeded {
        Some((section, length, limit)) => {
            debug!(
                section,
                length,
                limit,
                server_tags = server_count,
                client_tags = client_count,
                "tag budget exceeded"
            );
            Err(MessageEncodeError::LineTooLong {
                section,
                length,
                limit,
            })
        }
        None => Ok(()),
    }
}

/// Render `@key[=value];... ` with server tags first.
fn write_tags(out: &mut String, tags: &TagMap) {
    if tags.is_empty() {
        return;
    }

    out.push('@');
    for (i, (key, value)) in tags.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(key);
        if !value.is_empty() {
            out.push('=');
            // Writing into a String cannot fail.
            let _ = escape_tag_value(out, value);
        }
    }
    out.push(' ');
}
