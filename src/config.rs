//! Parser and serializer options.
//!
//! Both option sets are plain values. With the `serde` feature they can be
//! embedded in a host application's configuration file; missing fields take
//! their defaults.

use crate::error::{MessageEncodeError, MessageParseError};
use crate::message::Message;

/// Options for turning a raw line into a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Reject malformed input instead of passing it through.
    ///
    /// In strict mode the line must be valid UTF-8, tag keys must follow the
    /// IRCv3 key grammar, the command must be a word or a three-digit
    /// numeric, and the prefix must not contain control characters.
    pub strict: bool,
    /// Parse only this many leading bytes of the line. Zero means no limit.
    pub max_raw_length: usize,
}

impl ParseOptions {
    /// Default options: lenient, unbounded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict validation.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the raw byte bound.
    #[must_use]
    pub fn max_raw_length(mut self, max_raw_length: usize) -> Self {
        self.max_raw_length = max_raw_length;
        self
    }

    /// Parse a line with these options.
    pub fn parse(&self, raw: impl AsRef<[u8]>) -> Result<Message, MessageParseError> {
        Message::parse_with(raw.as_ref(), self)
    }
}

/// Options for turning a [`Message`] into a wire line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodeOptions {
    /// The line is sent by a client: both tag classes share one budget.
    pub from_client: bool,
    /// Pack everything after the tag section, CRLF included, into this many
    /// bytes. Zero means no limit.
    pub max_line_length: usize,
}

impl EncodeOptions {
    /// Default options: server-side budgets, no packing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the line is client-originated.
    #[must_use]
    pub fn from_client(mut self, from_client: bool) -> Self {
        self.from_client = from_client;
        self
    }

    /// Set the packing target.
    #[must_use]
    pub fn max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Encode a message with these options.
    pub fn encode(&self, message: &Message) -> Result<String, MessageEncodeError> {
        message.line_with(self)
    }
}
