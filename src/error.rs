//! Error types for the IRC line codec.
//!
//! Parsing and encoding fail with their own typed enums; [`ProtocolError`]
//! wraps both for callers that also deal with I/O.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error while writing an encoded line.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The message could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] MessageEncodeError),

    /// Failed to parse an IRC line.
    #[error("invalid message: {string:?}")]
    InvalidMessage {
        /// The raw line, lossily decoded.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors encountered when parsing an IRC line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// No command remains once the tag section and prefix are removed.
    #[error("line is empty")]
    LineIsEmpty,

    /// The line contains a NUL byte.
    #[error("line contains a forbidden character")]
    LineContainsBadChar,

    /// Strict mode: the line is not well-formed UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// Strict mode: a tag key uses characters outside the IRCv3 key grammar.
    #[error("invalid tag key: {0:?}")]
    InvalidTagKey(String),

    /// Strict mode: the command is neither a word nor a three-digit numeric.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),

    /// Strict mode: the prefix contains control characters.
    #[error("invalid prefix: {0:?}")]
    InvalidPrefix(String),
}

/// Errors encountered when encoding a message into an IRC line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageEncodeError {
    /// The command is empty.
    #[error("message has no command")]
    MissingCommand,

    /// A parameter cannot be placed on the wire at its position.
    #[error("invalid parameter {index}: {param:?}")]
    InvalidParam {
        /// Position of the parameter in the parameter list.
        index: usize,
        /// The offending parameter.
        param: String,
    },

    /// The command contains a space, a line break or NUL, or starts with `:`.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),

    /// The prefix contains a space, a line break or NUL.
    #[error("invalid prefix: {0:?}")]
    InvalidPrefix(String),

    /// A tag key is empty or contains characters that break tag framing.
    #[error("invalid tag key: {0:?}")]
    InvalidTagKey(String),

    /// A tag value contains NUL, which has no escape sequence.
    #[error("invalid value for tag {0:?}")]
    InvalidTagValue(String),

    /// A section of the line exceeds its byte budget.
    #[error("{section} too long: {length} bytes (max {limit})")]
    LineTooLong {
        /// Which budget was exceeded.
        section: &'static str,
        /// Rendered length of that section.
        length: usize,
        /// The budget it was checked against.
        limit: usize,
    },
}
