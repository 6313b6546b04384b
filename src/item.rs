//! Items: a bare value plus parameters.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::params::Parameters;
use crate::ser;
use crate::value::{BareValue, Decimal, Token};

/// A bare value together with an ordered parameter map.
///
/// An [`Item`] is the primary carrier of parameters in a structured field:
/// it appears on its own as an item field, as a list member, as an inner
/// list member, and as a dictionary value.
///
/// Items are immutable; the `with_*` and parameter methods return new
/// items.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{BareValue, Item};
///
/// let item = Item::new(BareValue::token("sugar")?)
///     .add_parameter("q", 1)?;
///
/// assert_eq!(item.canonical()?, "sugar;q=1");
/// assert_eq!(item.parameter("q")?, &BareValue::Integer(1));
/// # Ok::<(), structured_fields::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    value: BareValue,
    params: Parameters,
}

impl Item {
    /// Creates an item with no parameters.
    #[must_use]
    pub fn new(value: impl Into<BareValue>) -> Self {
        Item {
            value: value.into(),
            params: Parameters::new(),
        }
    }

    /// Creates an item with the given parameters.
    #[must_use]
    pub fn with(value: impl Into<BareValue>, parameters: Parameters) -> Self {
        Item {
            value: value.into(),
            params: parameters,
        }
    }

    /// Parses a single item field value, e.g. `"sugar;q=1"`.
    ///
    /// Equivalent to [`parse_item`](crate::parse_item).
    pub fn from_wire(input: &str) -> Result<Self> {
        crate::parse_item(input)
    }

    /// The bare value.
    #[must_use]
    pub fn value(&self) -> &BareValue {
        &self.value
    }

    /// The parameters, possibly empty.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Consumes the item, returning its bare value.
    #[must_use]
    pub fn into_value(self) -> BareValue {
        self.value
    }

    /// Returns a new item with `value` and the same parameters.
    #[must_use]
    pub fn with_value(&self, value: impl Into<BareValue>) -> Self {
        Item {
            value: value.into(),
            params: self.params.clone(),
        }
    }

    /// Returns a new item with `parameters` and the same value. When the
    /// parameter set is unchanged the existing storage is reused.
    #[must_use]
    pub fn with_parameters(&self, parameters: Parameters) -> Self {
        if self.params == parameters {
            return self.clone();
        }
        Item {
            value: self.value.clone(),
            params: parameters,
        }
    }

    /// Looks up a parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `key` is absent.
    pub fn parameter(&self, key: &str) -> Result<&BareValue> {
        self.params.get(key)
    }

    /// Returns an item with `key` bound, replacing in place.
    /// See [`Parameters::add`].
    pub fn add_parameter(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        Ok(self.with_parameters(self.params.add(key, value)?))
    }

    /// Returns an item with `key` re-bound at the tail.
    /// See [`Parameters::append`].
    pub fn append_parameter(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        Ok(self.with_parameters(self.params.append(key, value)?))
    }

    /// Returns an item with `key` re-bound at the head.
    /// See [`Parameters::prepend`].
    pub fn prepend_parameter(&self, key: &str, value: impl Into<Item>) -> Result<Self> {
        Ok(self.with_parameters(self.params.prepend(key, value)?))
    }

    /// Returns an item without the listed parameter keys; a no-op when
    /// none are bound.
    #[must_use]
    pub fn without_parameter(&self, keys: &[&str]) -> Self {
        self.with_parameters(self.params.remove(keys))
    }

    /// Returns an item with all parameters dropped; a no-op when there are
    /// none.
    #[must_use]
    pub fn without_any_parameter(&self) -> Self {
        self.with_parameters(Parameters::new())
    }

    /// Serializes to the canonical form `<value><parameters>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] only for values built by bypassing
    /// the checked constructors.
    pub fn canonical(&self) -> Result<String> {
        let mut out = String::new();
        ser::write_item(&mut out, self)?;
        Ok(out)
    }
}

impl FromStr for Item {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse_item(s)
    }
}

impl From<BareValue> for Item {
    fn from(value: BareValue) -> Self {
        Item::new(value)
    }
}

impl From<bool> for Item {
    fn from(value: bool) -> Self {
        Item::new(value)
    }
}

impl From<i32> for Item {
    fn from(value: i32) -> Self {
        Item::new(value)
    }
}

impl From<Decimal> for Item {
    fn from(value: Decimal) -> Self {
        Item::new(value)
    }
}

impl From<Token> for Item {
    fn from(value: Token) -> Self {
        Item::new(value)
    }
}

impl From<Vec<u8>> for Item {
    fn from(value: Vec<u8>) -> Self {
        Item::new(value)
    }
}

impl TryFrom<Item> for BareValue {
    type Error = Error;

    /// Extracts the bare value from an item without parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the item is parameterized.
    fn try_from(item: Item) -> Result<Self> {
        if !item.params.is_empty() {
            return Err(Error::InvalidArgument {
                reason: "item carries parameters",
            });
        }
        Ok(item.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_parameters_is_identity_when_unchanged() {
        let item = Item::new(1).add_parameter("a", 2).unwrap();
        let same = item.with_parameters(item.parameters().clone());
        assert!(item.parameters().shares_storage_with(same.parameters()));
    }

    #[test]
    fn without_parameter_is_identity_when_absent() {
        let item = Item::new(1).add_parameter("a", 2).unwrap();
        let same = item.without_parameter(&["zz"]);
        assert!(item.parameters().shares_storage_with(same.parameters()));

        let stripped = item.without_parameter(&["a"]);
        assert!(stripped.parameters().is_empty());
        assert!(!item.parameters().is_empty());
    }

    #[test]
    fn without_any_parameter_on_bare_item_is_identity() {
        let item = Item::new(1);
        let same = item.without_any_parameter();
        assert_eq!(item, same);
    }

    #[test]
    fn bare_value_extraction_requires_bare_item() {
        let bare = Item::new(42);
        assert_eq!(BareValue::try_from(bare).unwrap(), BareValue::Integer(42));

        let parameterized = Item::new(42).add_parameter("a", 1).unwrap();
        assert!(matches!(
            BareValue::try_from(parameterized),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn with_value_keeps_parameters() {
        let item = Item::new(1).add_parameter("a", 2).unwrap();
        let swapped = item.with_value(false);
        assert_eq!(swapped.canonical().unwrap(), "?0;a=2");
    }
}
