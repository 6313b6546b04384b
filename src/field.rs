//! Sum types for container members and top-level fields.

use crate::dict::Dictionary;
use crate::error::Result;
use crate::item::Item;
use crate::list::{InnerList, List};
use crate::params::Parameters;
use crate::ser;
use crate::value::{BareValue, Decimal, Token};

/// A member of a top-level list or dictionary: an item or an inner list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// A single item.
    Item(Item),
    /// A parenthesized inner list.
    InnerList(InnerList),
}

impl Member {
    /// Returns `true` if this member is an item.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Member::Item(_))
    }

    /// Returns `true` if this member is an inner list.
    #[must_use]
    pub const fn is_inner_list(&self) -> bool {
        matches!(self, Member::InnerList(_))
    }

    /// Returns the item, if any.
    #[must_use]
    pub const fn as_item(&self) -> Option<&Item> {
        match self {
            Member::Item(item) => Some(item),
            Member::InnerList(_) => None,
        }
    }

    /// Returns the inner list, if any.
    #[must_use]
    pub const fn as_inner_list(&self) -> Option<&InnerList> {
        match self {
            Member::InnerList(list) => Some(list),
            Member::Item(_) => None,
        }
    }

    /// The member's parameters: an item's own, or the inner list's
    /// list-level parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        match self {
            Member::Item(item) => item.parameters(),
            Member::InnerList(list) => list.parameters(),
        }
    }

    /// Serializes to the member's canonical form.
    pub fn canonical(&self) -> Result<String> {
        let mut out = String::new();
        ser::write_member(&mut out, self)?;
        Ok(out)
    }
}

impl From<Item> for Member {
    fn from(item: Item) -> Self {
        Member::Item(item)
    }
}

impl From<InnerList> for Member {
    fn from(list: InnerList) -> Self {
        Member::InnerList(list)
    }
}

impl From<BareValue> for Member {
    fn from(value: BareValue) -> Self {
        Member::Item(Item::new(value))
    }
}

impl From<bool> for Member {
    fn from(value: bool) -> Self {
        Member::Item(Item::new(value))
    }
}

impl From<i32> for Member {
    fn from(value: i32) -> Self {
        Member::Item(Item::new(value))
    }
}

impl From<Decimal> for Member {
    fn from(value: Decimal) -> Self {
        Member::Item(Item::new(value))
    }
}

impl From<Token> for Member {
    fn from(value: Token) -> Self {
        Member::Item(Item::new(value))
    }
}

/// A parsed or constructed top-level field of any of the three shapes.
///
/// The parser never guesses a shape; the caller picks the expected one
/// through [`parse_item`](crate::parse_item),
/// [`parse_list`](crate::parse_list), or
/// [`parse_dictionary`](crate::parse_dictionary) and can wrap the result
/// here when a uniform type is convenient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredField {
    /// An item field.
    Item(Item),
    /// A list field.
    List(List),
    /// A dictionary field.
    Dictionary(Dictionary),
}

impl StructuredField {
    /// Returns the item, if any.
    #[must_use]
    pub const fn as_item(&self) -> Option<&Item> {
        match self {
            StructuredField::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the list, if any.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            StructuredField::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the dictionary, if any.
    #[must_use]
    pub const fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            StructuredField::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Serializes to the canonical form of the wrapped shape.
    pub fn canonical(&self) -> Result<String> {
        match self {
            StructuredField::Item(item) => item.canonical(),
            StructuredField::List(list) => list.canonical(),
            StructuredField::Dictionary(dict) => dict.canonical(),
        }
    }
}

impl From<Item> for StructuredField {
    fn from(item: Item) -> Self {
        StructuredField::Item(item)
    }
}

impl From<List> for StructuredField {
    fn from(list: List) -> Self {
        StructuredField::List(list)
    }
}

impl From<Dictionary> for StructuredField {
    fn from(dict: Dictionary) -> Self {
        StructuredField::Dictionary(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_accessors() {
        let item = Member::from(Item::new(1));
        assert!(item.is_item());
        assert!(item.as_inner_list().is_none());

        let inner = Member::from(InnerList::new([Item::new(1)]));
        assert!(inner.is_inner_list());
        assert_eq!(inner.canonical().unwrap(), "(1)");
    }

    #[test]
    fn field_canonical_dispatches() {
        let field = StructuredField::from(Item::new(false));
        assert_eq!(field.canonical().unwrap(), "?0");
        assert!(field.as_item().is_some());
        assert!(field.as_list().is_none());
    }
}
