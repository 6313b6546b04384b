//! Ordered parameter maps.
//!
//! This module provides [`Parameters`], the insertion-ordered map of
//! [`Key`]s to bare values that every item and inner list carries. It is
//! backed by [`IndexMap`] so iteration follows insertion order, which is
//! what the canonical wire form serializes.
//!
//! Parameters are immutable: every write operation returns a new map and
//! leaves the receiver untouched. The storage is shared behind an `Arc`,
//! so clones are cheap and a write that would change nothing hands back
//! the very same storage.
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::Parameters;
//!
//! let params = Parameters::new()
//!     .add("a", 1)?
//!     .add("b", true)?;
//!
//! assert_eq!(params.len(), 2);
//! assert_eq!(params.canonical()?, ";a=1;b");
//!
//! // `params` itself is unchanged by further writes.
//! let more = params.add("c", 3)?;
//! assert_eq!(params.len(), 2);
//! assert_eq!(more.len(), 3);
//! # Ok::<(), structured_fields::Error>(())
//! ```

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::item::Item;
use crate::key::Key;
use crate::list::absolute_index;
use crate::ser;
use crate::value::BareValue;

/// An insertion-ordered map of [`Key`]s to bare values.
///
/// Values are always bare: inserting an [`Item`] that carries parameters of
/// its own fails with [`Error::InvalidArgument`], which keeps "parameters
/// of parameters" unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    entries: Arc<IndexMap<Key, BareValue>>,
}

impl Parameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(key, value)` pairs in order. A repeated key
    /// replaces the earlier value while keeping its original position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key and
    /// [`Error::InvalidArgument`] for a parameterized item value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::Parameters;
    ///
    /// let params = Parameters::from_pairs([("q", 1), ("v", 2)])?;
    /// assert_eq!(params.canonical()?, ";q=1;v=2");
    /// # Ok::<(), structured_fields::Error>(())
    /// ```
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<Item>,
    {
        Self::new().merge_pairs([pairs])
    }

    /// Builds a map from an associative source such as a `HashMap` or
    /// `BTreeMap`. Semantics match [`Parameters::from_pairs`].
    pub fn from_associative<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<Item>,
    {
        Self::from_pairs(entries)
    }

    /// Parses the canonical parameter wire form, e.g. `";a=1;b"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] on any deviation from the grammar,
    /// including trailing input.
    pub fn from_wire(input: &str) -> Result<Self> {
        crate::parser::parse_parameters_wire(input)
    }

    pub(crate) fn from_map(entries: IndexMap<Key, BareValue>) -> Self {
        Parameters {
            entries: Arc::new(entries),
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `key` is bound.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Looks up the value bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the key is absent.
    pub fn get(&self, key: &str) -> Result<&BareValue> {
        self.entries.get(key).ok_or_else(|| Error::not_found(key))
    }

    /// Returns the pair at `index`. A negative index counts from the end,
    /// so `-1` is the last pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve.
    pub fn pair(&self, index: isize) -> Result<(&Key, &BareValue)> {
        let len = self.entries.len();
        absolute_index(index, len)
            .and_then(|at| self.entries.get_index(at))
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Iterates the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &BareValue)> {
        self.entries.iter()
    }

    /// Returns a map with `key` bound to `value`. An existing binding is
    /// replaced in place; a new key lands at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key and
    /// [`Error::InvalidArgument`] when `value` is a parameterized item.
    pub fn add(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        let key = Key::new(key)?;
        let value = into_bare(value)?;
        if self.entries.get(key.as_str()) == Some(&value) {
            return Ok(self.clone());
        }
        let mut map = (*self.entries).clone();
        map.insert(key, value);
        Ok(Self::from_map(map))
    }

    /// Returns a map with any existing binding for `key` removed and the
    /// new pair inserted at the tail.
    ///
    /// # Errors
    ///
    /// Same as [`Parameters::add`].
    pub fn append(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        let key = Key::new(key)?;
        let value = into_bare(value)?;
        if let Some((at, _, existing)) = self.entries.get_full(key.as_str()) {
            if at + 1 == self.entries.len() && *existing == value {
                return Ok(self.clone());
            }
        }
        let mut map = (*self.entries).clone();
        map.shift_remove(key.as_str());
        map.insert(key, value);
        Ok(Self::from_map(map))
    }

    /// Returns a map with any existing binding for `key` removed and the
    /// new pair inserted at the head.
    ///
    /// # Errors
    ///
    /// Same as [`Parameters::add`].
    pub fn prepend(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        let key = Key::new(key)?;
        let value = into_bare(value)?;
        if let Some((0, _, existing)) = self.entries.get_full(key.as_str()) {
            if *existing == value {
                return Ok(self.clone());
            }
        }
        let mut map = (*self.entries).clone();
        map.shift_remove(key.as_str());
        map.shift_insert(0, key, value);
        Ok(Self::from_map(map))
    }

    /// Returns a map without the listed keys. Absent keys are ignored;
    /// when nothing is removed the same storage is returned.
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
    /// repeated [`Parameters::add`] calls.
    ///
    /// # Errors
    ///
    /// Same as [`Parameters::add`].
    pub fn merge_pairs<S, K, V>(&self, sources: impl IntoIterator<Item = S>) -> Result<Self>
    where
        S: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Item>,
    {
        let mut map = (*self.entries).clone();
        for source in sources {
            for (key, value) in source {
                map.insert(Key::new(key.as_ref())?, into_bare(value)?);
            }
        }
        Ok(Self::from_map(map))
    }

    /// Applies each associative source in turn with later-wins semantics.
    ///
    /// # Errors
    ///
    /// Same as [`Parameters::add`].
    pub fn merge_associative<S, K, V>(&self, sources: impl IntoIterator<Item = S>) -> Result<Self>
    where
        S: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Item>,
    {
        self.merge_pairs(sources)
    }

    /// Serializes to the canonical wire form: `;key` for boolean-true
    /// values, `;key=value` otherwise, in insertion order. Empty
    /// parameters serialize to the empty string.
    pub fn canonical(&self) -> Result<String> {
        let mut out = String::new();
        ser::write_parameters(&mut out, self)?;
        Ok(out)
    }

    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

fn into_bare(value: impl Into<Item>) -> Result<BareValue> {
    let item = value.into();
    if !item.parameters().is_empty() {
        return Err(Error::InvalidArgument {
            reason: "parameters may only hold bare items",
        });
    }
    Ok(item.into_value())
}

// IndexMap's own PartialEq ignores order; canonical form does not, so
// equality here compares pairs positionally.
impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Parameters {}

impl FromIterator<(Key, BareValue)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (Key, BareValue)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl IntoIterator for Parameters {
    type Item = (Key, BareValue);
    type IntoIter = indexmap::map::IntoIter<Key, BareValue>;

    fn into_iter(self) -> Self::IntoIter {
        Arc::try_unwrap(self.entries)
            .unwrap_or_else(|shared| (*shared).clone())
            .into_iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a Key, &'a BareValue);
    type IntoIter = indexmap::map::Iter<'a, Key, BareValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_replaces_in_place() {
        let params = Parameters::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let updated = params.add("a", 9).unwrap();
        assert_eq!(updated.canonical().unwrap(), ";a=9;b=2");
        assert_eq!(params.canonical().unwrap(), ";a=1;b=2");
    }

    #[test]
    fn append_moves_to_tail() {
        let params = Parameters::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let updated = params.append("a", 1).unwrap();
        assert_eq!(updated.canonical().unwrap(), ";b=2;a=1");
    }

    #[test]
    fn prepend_moves_to_head() {
        let params = Parameters::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let updated = params.prepend("b", 2).unwrap();
        assert_eq!(updated.canonical().unwrap(), ";b=2;a=1");
    }

    #[test]
    fn remove_missing_key_is_identity() {
        let params = Parameters::from_pairs([("a", 1)]).unwrap();
        let same = params.remove(&["zz"]);
        assert!(params.shares_storage_with(&same));

        let changed = params.remove(&["a"]);
        assert!(!params.shares_storage_with(&changed));
        assert!(changed.is_empty());
    }

    #[test]
    fn add_identical_pair_is_identity() {
        let params = Parameters::from_pairs([("a", 1)]).unwrap();
        let same = params.add("a", 1).unwrap();
        assert!(params.shares_storage_with(&same));
    }

    #[test]
    fn rejects_parameterized_items() {
        let item = Item::new(true).add_parameter("x", 1).unwrap();
        let err = Parameters::new().add("a", item).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn key_validated_on_every_write() {
        let params = Parameters::new();
        assert!(matches!(
            params.add("UPPER", 1),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            params.append("9digit", 1),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            params.prepend("bad key", 1),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn pair_supports_negative_indexes() {
        let params = Parameters::from_pairs([("a", 1), ("b", 2), ("c", 3)]).unwrap();
        assert_eq!(params.pair(-1).unwrap().0.as_str(), "c");
        assert_eq!(params.pair(0).unwrap().0.as_str(), "a");
        assert!(matches!(
            params.pair(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn merge_is_later_wins() {
        let params = Parameters::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let merged = params
            .merge_pairs([vec![("b", 8), ("c", 9)], vec![("c", 10)]])
            .unwrap();
        assert_eq!(merged.canonical().unwrap(), ";a=1;b=8;c=10");
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = Parameters::from_pairs([("a", 1), ("b", 2)]).unwrap();
        let ba = Parameters::from_pairs([("b", 2), ("a", 1)]).unwrap();
        assert_ne!(ab, ba);
    }
}
