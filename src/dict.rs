//! The top-level dictionary shape.

use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::field::Member;
use crate::key::Key;
use crate::list::absolute_index;
use crate::ser;

/// An insertion-ordered map of [`Key`]s to members.
///
/// Each member is an item or an inner list. Unlike
/// [`Parameters`](crate::Parameters), dictionary values may themselves
/// carry parameters.
///
/// Dictionaries are immutable with copy-on-write storage: every write
/// returns a new dictionary, and a write that would change nothing hands
/// back the same storage.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{Dictionary, Item};
///
/// let dict = Dictionary::new()
///     .add("a", Item::new(false))?
///     .add("b", Item::new(true))?;
///
/// assert_eq!(dict.canonical()?, "a=?0, b");
/// # Ok::<(), structured_fields::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Arc<IndexMap<Key, Member>>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from `(key, member)` pairs in order. A repeated
    /// key replaces the earlier member while keeping its original position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<Member>,
    {
        Self::new().merge_pairs([pairs])
    }

    /// Builds a dictionary from an associative source. Semantics match
    /// [`Dictionary::from_pairs`].
    pub fn from_associative<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<Member>,
    {
        Self::from_pairs(entries)
    }

    /// Parses a dictionary field value. Equivalent to
    /// [`parse_dictionary`](crate::parse_dictionary).
    pub fn from_wire(input: &str) -> Result<Self> {
        crate::parse_dictionary(input)
    }

    pub(crate) fn from_map(entries: IndexMap<Key, Member>) -> Self {
        Dictionary {
            entries: Arc::new(entries),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `key` is bound.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Looks up the member bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the key is absent.
    pub fn get(&self, key: &str) -> Result<&Member> {
        self.entries.get(key).ok_or_else(|| Error::not_found(key))
    }

    /// Returns the entry at `index`; negative counts from the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve.
    pub fn pair(&self, index: isize) -> Result<(&Key, &Member)> {
        let len = self.entries.len();
        absolute_index(index, len)
            .and_then(|at| self.entries.get_index(at))
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Iterates the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterates `(key, member)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Member)> {
        self.entries.iter()
    }

    /// Returns a dictionary with `key` bound to `member`. An existing
    /// binding is replaced in place; a new key lands at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn add(&self, key: &str, member: impl Into<Member>) -> Result<Self> {
        let key = Key::new(key)?;
        let member = member.into();
        if self.entries.get(key.as_str()) == Some(&member) {
            return Ok(self.clone());
        }
        let mut map = (*self.entries).clone();
        map.insert(key, member);
        Ok(Self::from_map(map))
    }

    /// Returns a dictionary with any existing binding for `key` removed
    /// and the new entry inserted at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn append(&self, key: &str, member: impl Into<Member>) -> Result<Self> {
        let key = Key::new(key)?;
        let member = member.into();
        if let Some((at, _, existing)) = self.entries.get_full(key.as_str()) {
            if at + 1 == self.entries.len() && *existing == member {
                return Ok(self.clone());
            }
        }
        let mut map = (*self.entries).clone();
        map.shift_remove(key.as_str());
        map.insert(key, member);
        Ok(Self::from_map(map))
    }

    /// Returns a dictionary with any existing binding for `key` removed
    /// and the new entry inserted at the head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn prepend(&self, key: &str, member: impl Into<Member>) -> Result<Self> {
        let key = Key::new(key)?;
        let member = member.into();
        if let Some((0, _, existing)) = self.entries.get_full(key.as_str()) {
            if *existing == member {
                return Ok(self.clone());
            }
        }
        let mut map = (*self.entries).clone();
        map.shift_remove(key.as_str());
        map.shift_insert(0, key, member);
        Ok(Self::from_map(map))
    }

    /// Returns a dictionary without the listed keys. Absent keys are
    /// ignored; when nothing is removed the same storage is returned.
    #[must_use]
    pub fn remove(&self, keys: &[&str]) -> Self {
        if !keys.iter().any(|key| self.entries.contains_key(*key)) {
            return self.clone();
        }
        let mut map = (*self.entries).clone();
        for key in keys {
            map.shift_remove(*key);
        }
        Self::from_map(map)
    }

    /// Applies each source of pairs in turn with later-wins semantics, as
    /// repeated [`Dictionary::add`] calls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn merge_pairs<S, K, V>(&self, sources: impl IntoIterator<Item = S>) -> Result<Self>
    where
        S: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Member>,
    {
        let mut map = (*self.entries).clone();
        for source in sources {
            for (key, member) in source {
                map.insert(Key::new(key.as_ref())?, member.into());
            }
        }
        Ok(Self::from_map(map))
    }

    /// Applies each associative source in turn with later-wins semantics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn merge_associative<S, K, V>(&self, sources: impl IntoIterator<Item = S>) -> Result<Self>
    where
        S: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Member>,
    {
        self.merge_pairs(sources)
    }

    /// Serializes to the canonical form: entries joined by `", "`, with a
    /// boolean-true item collapsing to its key and parameters. An empty
    /// dictionary serializes to the empty string.
    pub fn canonical(&self) -> Result<String> {
        let mut out = String::new();
        ser::write_dictionary(&mut out, self)?;
        Ok(out)
    }

    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

// Order matters for the canonical form, so equality is positional, unlike
// IndexMap's own.
impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Dictionary {}

impl FromStr for Dictionary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse_dictionary(s)
    }
}

impl FromIterator<(Key, Member)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Key, Member)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl IntoIterator for Dictionary {
    type Item = (Key, Member);
    type IntoIter = indexmap::map::IntoIter<Key, Member>;

    fn into_iter(self) -> Self::IntoIter {
        Arc::try_unwrap(self.entries)
            .unwrap_or_else(|shared| (*shared).clone())
            .into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Key, &'a Member);
    type IntoIter = indexmap::map::Iter<'a, Key, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
