use std::collections::BTreeMap;

use crate::prefix::PrefixRef;

use super::tag_map::{TagClass, TagMap};

/// An owned IRC message.
///
/// Holds the unescaped tags, the source prefix, the command and its
/// parameters. Only the last parameter may be empty, contain spaces or start
/// with `:`; this is checked when the message is encoded, not when it is
/// built.
///
/// # Example
///
/// ```
/// use slirc_line::Message;
///
/// let msg = Message::parse_line("@time=2848 :dan-!d@localhost LIST\r\n", true, 0).unwrap();
/// assert_eq!(msg.get_tag("time"), Some("2848"));
/// assert_eq!(msg.prefix, "dan-!d@localhost");
/// assert_eq!(msg.command, "LIST");
///
/// let msg = Message::new("", "PING", &["HiThere!"]).with_tag("+draft/test", "hi\nthere");
/// assert_eq!(msg.line(false, 0).unwrap(), "@+draft/test=hi\\nthere PING HiThere!\r\n");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    tags: TagMap,
    /// Message source (e.g. `nick!user@host`). Empty when absent.
    pub prefix: String,
    /// The command, upper-cased when parsed.
    pub command: String,
    /// Command parameters, the trailing one included.
    pub params: Vec<String>,
}

impl Message {
    /// Create a new message without tags.
    pub fn new(prefix: &str, command: &str, params: &[&str]) -> Message {
        Message::with_tags(std::iter::empty::<(String, String)>(), prefix, command, params)
    }

    /// Create a new message with tags.
    ///
    /// Each tag is routed to its origin class as by [`set_tag`](Self::set_tag).
    pub fn with_tags<I, K, V>(tags: I, prefix: &str, command: &str, params: &[&str]) -> Message
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Message {
            tags: tags.into_iter().collect(),
            prefix: prefix.to_owned(),
            command: command.to_owned(),
            params: params.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    /// Add a tag to this message.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_tag(key, value);
        self
    }

    /// Set the source prefix of this message.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a parameter to this message.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set a tag, replacing any previous value for the key.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key, value);
    }

    /// Get the value of a tag. Tags without a value yield `Some("")`.
    pub fn get_tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key)
    }

    /// Whether the message carries a tag.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Remove a tag, returning its value.
    pub fn delete_tag(&mut self, key: &str) -> Option<String> {
        self.tags.remove(key)
    }

    /// Set several tags at once.
    pub fn update_tags<I, K, V>(&mut self, tags: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags.extend(tags);
    }

    /// All tags, server and client-only, as one map.
    pub fn all_tags(&self) -> BTreeMap<String, String> {
        self.tags.to_map()
    }

    /// Only the client-only (`+`) tags.
    pub fn client_only_tags(&self) -> &BTreeMap<String, String> {
        self.tags.class(TagClass::ClientOnly)
    }

    /// The tag store.
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    /// The prefix split into its parts, if there is one.
    pub fn source(&self) -> Option<PrefixRef<'_>> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(PrefixRef::parse(&self.prefix))
        }
    }

    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.source().and_then(|p| p.nick())
    }
}
