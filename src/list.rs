//! List containers: parenthesized inner lists and top-level lists.
//!
//! [`InnerList`] is an ordered sequence of [`Item`]s with parameters of its
//! own; [`List`] is the top-level list shape whose members are items or
//! inner lists. Both are immutable with copy-on-write storage: every write
//! returns a new list, zero-effect writes return the same storage.
//!
//! Indexes are signed. A non-negative index is positional; a negative index
//! counts from the end (`-1` is the last member); anything that does not
//! resolve is [`Error::IndexOutOfRange`].
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{BareValue, InnerList, Item, List};
//!
//! let inner = InnerList::new([Item::new(1), Item::new(2)])
//!     .add_parameter("lvl", 5)?;
//! let list = List::new([Item::new(BareValue::token("foo")?)])
//!     .push([inner]);
//!
//! assert_eq!(list.canonical()?, "foo, (1 2);lvl=5");
//! assert_eq!(list.get(-1)?.as_inner_list().unwrap().len(), 2);
//! # Ok::<(), structured_fields::Error>(())
//! ```

use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::Member;
use crate::item::Item;
use crate::params::Parameters;
use crate::ser;
use crate::value::BareValue;

/// Resolves a signed index against `len`; `-1` is the last position.
pub(crate) fn absolute_index(index: isize, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        let back = index.unsigned_abs();
        len.checked_sub(back)?
    } else {
        index as usize
    };
    (resolved < len).then_some(resolved)
}

/// Resolves a signed insertion position against `len`; `len` itself is
/// allowed and means "at the tail".
fn insertion_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let at = index as usize;
        (at <= len).then_some(at)
    } else {
        absolute_index(index, len)
    }
}

/// A parenthesized, parameterizable sequence of items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InnerList {
    items: Arc<Vec<Item>>,
    params: Parameters,
}

impl InnerList {
    /// Creates an inner list from items, with no parameters.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = impl Into<Item>>) -> Self {
        InnerList {
            items: Arc::new(items.into_iter().map(Into::into).collect()),
            params: Parameters::new(),
        }
    }

    /// Creates an inner list with the given parameters.
    #[must_use]
    pub fn with(items: impl IntoIterator<Item = impl Into<Item>>, parameters: Parameters) -> Self {
        InnerList {
            items: Arc::new(items.into_iter().map(Into::into).collect()),
            params: parameters,
        }
    }

    /// Creates an inner list from items and parameter `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Propagates [`Parameters::from_pairs`] failures.
    pub fn from_pair<K, V>(
        items: impl IntoIterator<Item = impl Into<Item>>,
        parameter_pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<Item>,
    {
        Ok(Self::with(items, Parameters::from_pairs(parameter_pairs)?))
    }

    /// Creates an inner list from items and an associative parameter
    /// source.
    ///
    /// # Errors
    ///
    /// Propagates [`Parameters::from_associative`] failures.
    pub fn from_associative<K, V>(
        items: impl IntoIterator<Item = impl Into<Item>>,
        parameters: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<Item>,
    {
        Ok(Self::with(items, Parameters::from_associative(parameters)?))
    }

    /// Parses the inner-list wire form, e.g. `"(1 2);lvl=5"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] on any deviation from the grammar.
    pub fn from_wire(input: &str) -> Result<Self> {
        crate::parser::parse_inner_list_wire(input)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` when `index` resolves to an item.
    #[must_use]
    pub fn has(&self, index: isize) -> bool {
        absolute_index(index, self.items.len()).is_some()
    }

    /// Returns the item at `index`; negative counts from the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve.
    pub fn get(&self, index: isize) -> Result<&Item> {
        let len = self.items.len();
        absolute_index(index, len)
            .map(|at| &self.items[at])
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// The valid non-negative indexes, `0..len`.
    #[must_use]
    pub fn keys(&self) -> std::ops::Range<usize> {
        0..self.items.len()
    }

    /// Iterates the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// The list-level parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Returns a list with `items` appended. Appending nothing returns the
    /// same storage.
    #[must_use]
    pub fn push(&self, items: impl IntoIterator<Item = impl Into<Item>>) -> Self {
        let added: Vec<Item> = items.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return self.clone();
        }
        let mut list = (*self.items).clone();
        list.extend(added);
        self.replace_items(list)
    }

    /// Returns a list with `items` prepended. Prepending nothing returns
    /// the same storage.
    #[must_use]
    pub fn unshift(&self, items: impl IntoIterator<Item = impl Into<Item>>) -> Self {
        let mut added: Vec<Item> = items.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return self.clone();
        }
        added.extend(self.items.iter().cloned());
        self.replace_items(added)
    }

    /// Returns a list with `items` inserted at `index`. `insert(len, …)`
    /// appends, `insert(0, …)` prepends; inserting nothing returns the
    /// same storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve to
    /// a position in `0..=len`.
    pub fn insert(
        &self,
        index: isize,
        items: impl IntoIterator<Item = impl Into<Item>>,
    ) -> Result<Self> {
        let len = self.items.len();
        let at = insertion_index(index, len).ok_or(Error::IndexOutOfRange { index, len })?;
        let added: Vec<Item> = items.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return Ok(self.clone());
        }
        let mut list = (*self.items).clone();
        list.splice(at..at, added);
        Ok(self.replace_items(list))
    }

    /// Returns a list with the item at `index` replaced. Replacing an item
    /// with an equal one returns the same storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve.
    pub fn replace(&self, index: isize, item: impl Into<Item>) -> Result<Self> {
        let len = self.items.len();
        let at = absolute_index(index, len).ok_or(Error::IndexOutOfRange { index, len })?;
        let item = item.into();
        if self.items[at] == item {
            return Ok(self.clone());
        }
        let mut list = (*self.items).clone();
        list[at] = item;
        Ok(self.replace_items(list))
    }

    /// Returns a list without the items at the listed indexes. Indexes
    /// that do not resolve are ignored; removing nothing returns the same
    /// storage.
    #[must_use]
    pub fn remove(&self, indexes: &[isize]) -> Self {
        let len = self.items.len();
        let mut resolved: Vec<usize> = indexes
            .iter()
            .filter_map(|&index| absolute_index(index, len))
            .collect();
        resolved.sort_unstable();
        resolved.dedup();
        if resolved.is_empty() {
            return self.clone();
        }
        let list = self
            .items
            .iter()
            .enumerate()
            .filter(|(at, _)| resolved.binary_search(at).is_err())
            .map(|(_, item)| item.clone())
            .collect();
        self.replace_items(list)
    }

    /// Looks up a list-level parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `key` is absent.
    pub fn parameter(&self, key: &str) -> Result<&BareValue> {
        self.params.get(key)
    }

    /// Returns a list with `parameters`; the same storage when unchanged.
    #[must_use]
    pub fn with_parameters(&self, parameters: Parameters) -> Self {
        if self.params == parameters {
            return self.clone();
        }
        InnerList {
            items: Arc::clone(&self.items),
            params: parameters,
        }
    }

    /// Returns a list with `key` bound, replacing in place.
    /// See [`Parameters::add`].
    pub fn add_parameter(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        Ok(self.with_parameters(self.params.add(key, value)?))
    }

    /// Returns a list with `key` re-bound at the tail.
    /// See [`Parameters::append`].
    pub fn append_parameter(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        Ok(self.with_parameters(self.params.append(key, value)?))
    }

    /// Returns a list with `key` re-bound at the head.
    /// See [`Parameters::prepend`].
    pub fn prepend_parameter(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        Ok(self.with_parameters(self.params.prepend(key, value)?))
    }

    /// Returns a list without the listed parameter keys; a no-op when none
    /// are bound.
    #[must_use]
    pub fn without_parameter(&self, keys: &[&str]) -> Self {
        self.with_parameters(self.params.remove(keys))
    }

    /// Returns a list with all parameters dropped; a no-op when there are
    /// none.
    #[must_use]
    pub fn without_any_parameter(&self) -> Self {
        self.with_parameters(Parameters::new())
    }

    /// Serializes to the canonical form `(item1 item2 …)<parameters>`.
    pub fn canonical(&self) -> Result<String> {
        let mut out = String::new();
        ser::write_inner_list(&mut out, self)?;
        Ok(out)
    }

    fn replace_items(&self, items: Vec<Item>) -> Self {
        InnerList {
            items: Arc::new(items),
            params: self.params.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl FromIterator<Item> for InnerList {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        InnerList::new(iter)
    }
}

impl<'a> IntoIterator for &'a InnerList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The top-level list shape: an ordered sequence of items and inner lists.
///
/// Unlike [`InnerList`], a top-level list carries no parameters of its own;
/// parameters belong to its members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    members: Arc<Vec<Member>>,
}

impl List {
    /// Creates a list from members.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = impl Into<Member>>) -> Self {
        List {
            members: Arc::new(members.into_iter().map(Into::into).collect()),
        }
    }

    /// Parses a list field value. Equivalent to
    /// [`parse_list`](crate::parse_list).
    pub fn from_wire(input: &str) -> Result<Self> {
        crate::parse_list(input)
    }

    pub(crate) fn from_members(members: Vec<Member>) -> Self {
        List {
            members: Arc::new(members),
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when the list has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` when `index` resolves to a member.
    #[must_use]
    pub fn has(&self, index: isize) -> bool {
        absolute_index(index, self.members.len()).is_some()
    }

    /// Returns the member at `index`; negative counts from the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve.
    pub fn get(&self, index: isize) -> Result<&Member> {
        let len = self.members.len();
        absolute_index(index, len)
            .map(|at| &self.members[at])
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// The valid non-negative indexes, `0..len`.
    #[must_use]
    pub fn keys(&self) -> std::ops::Range<usize> {
        0..self.members.len()
    }

    /// Iterates the members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    /// Returns a list with `members` appended; appending nothing returns
    /// the same storage.
    #[must_use]
    pub fn push(&self, members: impl IntoIterator<Item = impl Into<Member>>) -> Self {
        let added: Vec<Member> = members.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return self.clone();
        }
        let mut list = (*self.members).clone();
        list.extend(added);
        List::from_members(list)
    }

    /// Returns a list with `members` prepended; prepending nothing returns
    /// the same storage.
    #[must_use]
    pub fn unshift(&self, members: impl IntoIterator<Item = impl Into<Member>>) -> Self {
        let mut added: Vec<Member> = members.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return self.clone();
        }
        added.extend(self.members.iter().cloned());
        List::from_members(added)
    }

    /// Returns a list with `members` inserted at `index`; see
    /// [`InnerList::insert`] for the index rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve to
    /// a position in `0..=len`.
    pub fn insert(
        &self,
        index: isize,
        members: impl IntoIterator<Item = impl Into<Member>>,
    ) -> Result<Self> {
        let len = self.members.len();
        let at = insertion_index(index, len).ok_or(Error::IndexOutOfRange { index, len })?;
        let added: Vec<Member> = members.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return Ok(self.clone());
        }
        let mut list = (*self.members).clone();
        list.splice(at..at, added);
        Ok(List::from_members(list))
    }

    /// Returns a list with the member at `index` replaced; replacing a
    /// member with an equal one returns the same storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` does not resolve.
    pub fn replace(&self, index: isize, member: impl Into<Member>) -> Result<Self> {
        let len = self.members.len();
        let at = absolute_index(index, len).ok_or(Error::IndexOutOfRange { index, len })?;
        let member = member.into();
        if self.members[at] == member {
            return Ok(self.clone());
        }
        let mut list = (*self.members).clone();
        list[at] = member;
        Ok(List::from_members(list))
    }

    /// Returns a list without the members at the listed indexes; indexes
    /// that do not resolve are ignored, removing nothing returns the same
    /// storage.
    #[must_use]
    pub fn remove(&self, indexes: &[isize]) -> Self {
        let len = self.members.len();
        let mut resolved: Vec<usize> = indexes
            .iter()
            .filter_map(|&index| absolute_index(index, len))
            .collect();
        resolved.sort_unstable();
        resolved.dedup();
        if resolved.is_empty() {
            return self.clone();
        }
        let members = self
            .members
            .iter()
            .enumerate()
            .filter(|(at, _)| resolved.binary_search(at).is_err())
            .map(|(_, member)| member.clone())
            .collect();
        List::from_members(members)
    }

    /// Serializes to the canonical form: members joined by `", "`. An
    /// empty list serializes to the empty string.
    pub fn canonical(&self) -> Result<String> {
        let mut out = String::new();
        ser::write_list(&mut out, self)?;
        Ok(out)
    }

    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.members, &other.members)
    }
}

impl FromStr for List {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse_list(s)
    }
}

impl FromIterator<Member> for List {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        List::new(iter)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: impl IntoIterator<Item = i32>) -> InnerList {
        InnerList::new(values.into_iter().map(Item::new))
    }

    #[test]
    fn absolute_index_arithmetic() {
        assert_eq!(absolute_index(0, 3), Some(0));
        assert_eq!(absolute_index(2, 3), Some(2));
        assert_eq!(absolute_index(3, 3), None);
        assert_eq!(absolute_index(-1, 3), Some(2));
        assert_eq!(absolute_index(-3, 3), Some(0));
        assert_eq!(absolute_index(-4, 3), None);
        assert_eq!(absolute_index(0, 0), None);
        assert_eq!(absolute_index(-1, 0), None);
    }

    #[test]
    fn get_negative_equals_get_from_end() {
        let list = numbers([1, 2, 3]);
        assert_eq!(list.get(-1).unwrap(), list.get(2).unwrap());
        assert!(matches!(
            list.get(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn insert_at_len_is_push() {
        let list = numbers([1, 2]);
        let pushed = list.push([Item::new(3)]);
        let inserted = list.insert(2, [Item::new(3)]).unwrap();
        assert_eq!(pushed, inserted);

        let unshifted = list.unshift([Item::new(0)]);
        let at_zero = list.insert(0, [Item::new(0)]).unwrap();
        assert_eq!(unshifted, at_zero);

        assert!(matches!(
            list.insert(5, [Item::new(9)]),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_length_writes_are_identity() {
        let list = numbers([1, 2]);
        let items: [Item; 0] = [];
        assert!(list.shares_storage_with(&list.push(items.clone())));
        assert!(list.shares_storage_with(&list.unshift(items.clone())));
        assert!(list.shares_storage_with(&list.insert(1, items).unwrap()));
        assert!(list.shares_storage_with(&list.remove(&[9, -9])));
    }

    #[test]
    fn replace_with_equal_item_is_identity() {
        let list = numbers([1, 2]);
        assert!(list.shares_storage_with(&list.replace(0, Item::new(1)).unwrap()));
        let replaced = list.replace(-1, Item::new(9)).unwrap();
        assert_eq!(replaced.get(1).unwrap().value(), &BareValue::Integer(9));
    }

    #[test]
    fn remove_drops_unique_resolved_indexes() {
        let list = numbers([1, 2, 3, 4]);
        let removed = list.remove(&[0, -1, -4, 9]);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed.canonical().unwrap(), "(2 3)");
    }

    #[test]
    fn inner_list_canonical_with_parameters() {
        let list = numbers([1, 2]).add_parameter("lvl", 5).unwrap();
        assert_eq!(list.canonical().unwrap(), "(1 2);lvl=5");
        assert_eq!(list.keys(), 0..2);
    }

    #[test]
    fn outer_list_zero_length_writes_are_identity() {
        let list = List::new([Member::from(Item::new(1))]);
        let none: [Member; 0] = [];
        assert!(list.shares_storage_with(&list.push(none.clone())));
        assert!(list.shares_storage_with(&list.unshift(none)));
        assert!(list.shares_storage_with(&list.remove(&[5, -5])));
        assert!(list.shares_storage_with(&list.replace(0, Item::new(1)).unwrap()));
    }

    #[test]
    fn outer_list_has_no_own_parameters() {
        let list = List::new([Member::from(Item::new(1))]);
        assert_eq!(list.canonical().unwrap(), "1");
        assert!(List::new([Member::from(Item::new(1))]
            .into_iter()
            .take(0))
        .is_empty());
    }
}
