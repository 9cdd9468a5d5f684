//! Message tag storage, partitioned by origin.
//!
//! Keys starting with `+` are client-only tags; every other key is a server
//! tag. The two classes are kept in separate maps so budget accounting can
//! measure each without re-classifying keys.

use std::collections::BTreeMap;

use super::tags::escaped_len;

/// Origin class of a message tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagClass {
    /// Tags assigned by a server (no `+` prefix).
    Server,
    /// Client-only tags (`+` prefix).
    ClientOnly,
}

impl TagClass {
    /// Classify a tag key.
    #[inline]
    pub fn of(key: &str) -> Self {
        if key.starts_with('+') {
            TagClass::ClientOnly
        } else {
            TagClass::Server
        }
    }
}

/// Tags of a message, stored unescaped.
///
/// With the `serde` feature a `TagMap` is (de)serialized as one flat map;
/// keys are routed to their class on the way in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "BTreeMap<String, String>",
        into = "BTreeMap<String, String>"
    )
)]
pub struct TagMap {
    server: BTreeMap<String, String>,
    client_only: BTreeMap<String, String>,
}

impl TagMap {
    /// Create an empty tag map.
    pub fn new() -> Self {
        Self::default()
    }

    fn class_mut(&mut self, class: TagClass) -> &mut BTreeMap<String, String> {
        match class {
            TagClass::Server => &mut self.server,
            TagClass::ClientOnly => &mut self.client_only,
        }
    }

    /// The tags of one origin class.
    pub fn class(&self, class: TagClass) -> &BTreeMap<String, String> {
        match class {
            TagClass::Server => &self.server,
            TagClass::ClientOnly => &self.client_only,
        }
    }

    /// Set a tag, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        self.class_mut(TagClass::of(&key)).insert(key, value.into())
    }

    /// Look up a tag in either class.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.class(TagClass::of(key)).get(key).map(String::as_str)
    }

    /// Whether a tag is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.class(TagClass::of(key)).contains_key(key)
    }

    /// Remove a tag, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.class_mut(TagClass::of(key)).remove(key)
    }

    /// Total number of tags across both classes.
    pub fn len(&self) -> usize {
        self.server.len() + self.client_only.len()
    }

    /// Whether there are no tags at all.
    pub fn is_empty(&self) -> bool {
        self.server.is_empty() && self.client_only.is_empty()
    }

    /// Iterate server tags, then client-only tags, each in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.server
            .iter()
            .chain(self.client_only.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Union of both classes as a single map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut all = self.server.clone();
        all.extend(
            self.client_only
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        all
    }

    /// Number of tags in `class` and the length of their rendered data.
    ///
    /// The length covers `key[=escaped value]` entries joined by `;`, without
    /// the leading `@` or the trailing space.
    pub fn count_and_size(&self, class: TagClass) -> (usize, usize) {
        let tags = self.class(class);
        let entries: usize = tags
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.len()
                } else {
                    k.len() + 1 + escaped_len(v)
                }
            })
            .sum();
        let separators = tags.len().saturating_sub(1);
        (tags.len(), entries + separators)
    }
}

impl From<BTreeMap<String, String>> for TagMap {
    fn from(tags: BTreeMap<String, String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagMap> for BTreeMap<String, String> {
    fn from(tags: TagMap) -> Self {
        let mut all = tags.server;
        all.extend(tags.client_only);
        all
    }
}

impl<K, V> FromIterator<(K, V)> for TagMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = TagMap::new();
        tags.extend(iter);
        tags
    }
}

impl<K, V> Extend<(K, V)> for TagMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
