//! # slirc-line
//!
//! A codec for single IRC protocol lines, with IRCv3 message tags.
//!
//! ## Features
//!
//! - Parsing of tags, prefix, command and parameters from raw bytes
//! - Strict and lenient parsing modes
//! - Tag value escaping and unescaping
//! - Tag budget accounting for client- and server-originated lines
//! - Line packing to a target length on UTF-8 boundaries

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Parsing IRC Lines
//!
//! ```rust
//! use slirc_line::Message;
//!
//! let raw = "@time=2023-01-01T12:00:00Z :nick!user@host PRIVMSG #channel :Hello!\r\n";
//! let message = Message::parse_line(raw, true, 0).expect("valid IRC line");
//!
//! assert_eq!(message.get_tag("time"), Some("2023-01-01T12:00:00Z"));
//! assert_eq!(message.source_nickname(), Some("nick"));
//! assert_eq!(message.params, ["#channel", "Hello!"]);
//! ```
//!
//! ### Encoding IRC Lines
//!
//! ```rust
//! use slirc_line::{EncodeOptions, Message};
//!
//! let message = Message::new("nick!user@host", "PRIVMSG", &["#channel", "Hello, world!"])
//!     .with_tag("+draft/react", "wave");
//!
//! let line = EncodeOptions::new().from_client(true).encode(&message).unwrap();
//! assert_eq!(line, "@+draft/react=wave :nick!user@host PRIVMSG #channel :Hello, world!\r\n");
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod prefix;
pub mod util;

pub use self::config::{EncodeOptions, ParseOptions};
pub use self::error::{MessageEncodeError, MessageParseError, ProtocolError};
pub use self::message::{Message, TagClass, TagMap};
pub use self::prefix::PrefixRef;
