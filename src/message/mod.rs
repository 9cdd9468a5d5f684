//! IRC message types and line codec.

mod nom_parser;
mod parse;
mod serialize;
pub mod tag_map;
pub mod tags;
mod types;

pub use self::tag_map::{TagClass, TagMap};
pub use self::types::Message;
