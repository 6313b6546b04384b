//! # structured-fields
//!
//! Strict parsing, building, and canonical serialization of HTTP
//! Structured Field Values as defined by
//! [RFC 8941](https://datatracker.ietf.org/doc/html/rfc8941).
//!
//! ## What is a structured field?
//!
//! A structured field is the value portion of an HTTP header or trailer
//! written in a small, strict grammar. There are three top-level shapes,
//! lists, dictionaries, and single items, built from six bare data types
//! (integers, decimals, strings, tokens, byte sequences, booleans), and
//! every element can carry key–value *parameters*:
//!
//! ```text
//! Example-Field: sugar;q=1, (tea coffee);brewed, "done"
//! ```
//!
//! ## Key Features
//!
//! - **Strict by construction**: only canonical RFC 8941 input parses;
//!   there is no error recovery and no partial result
//! - **Canonical output**: every well-formed value tree serializes to
//!   exactly one wire form
//! - **Immutable values**: every write operation returns a new value and
//!   leaves the old one untouched; storage is shared so no-op writes are
//!   free
//! - **Typed errors**: each failure class is a distinct [`Error`] variant,
//!   and parse errors carry the byte offset of the violation
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! structured-fields = "0.1"
//! ```
//!
//! ### Parsing
//!
//! The caller decides which of the three shapes to expect; nothing is
//! guessed from the input:
//!
//! ```rust
//! use structured_fields::{parse_dictionary, BareValue};
//!
//! let dict = parse_dictionary("u=2, i, d=?0")?;
//!
//! assert_eq!(dict.get("u")?.as_item().unwrap().value(), &BareValue::Integer(2));
//! assert_eq!(dict.get("i")?.as_item().unwrap().value(), &BareValue::Boolean(true));
//! assert_eq!(dict.canonical()?, "u=2, i, d=?0");
//! # Ok::<(), structured_fields::Error>(())
//! ```
//!
//! ### Building
//!
//! Values are built through checked constructors and pure write
//! operations:
//!
//! ```rust
//! use structured_fields::{BareValue, Item, List, InnerList};
//!
//! let list = List::new([Item::new(BareValue::token("sugar")?)])
//!     .push([InnerList::new([
//!         Item::new(BareValue::token("tea")?),
//!         Item::new(BareValue::token("coffee")?),
//!     ])
//!     .add_parameter("brewed", true)?]);
//!
//! assert_eq!(list.canonical()?, "sugar, (tea coffee);brewed");
//! # Ok::<(), structured_fields::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! - `date`: the proposed date extension, `@<integer>` items carrying
//!   epoch seconds, with `chrono` conversions. Without the feature, `@`
//!   is a syntax error, matching plain RFC 8941.
//! - `serde`: `Serialize`/`Deserialize` for [`Item`], [`List`], and
//!   [`Dictionary`] through their canonical wire strings.
//!
//! ## Scope
//!
//! This crate is a pure value library: no I/O, no logging, no globals.
//! Reading header lines, splitting multiple field lines, and the rest of
//! HTTP live with the caller.

pub mod format;

mod dict;
mod error;
mod field;
mod item;
mod key;
mod list;
mod params;
mod parser;
mod ser;
#[cfg(feature = "serde")]
mod serde_impl;
mod value;

pub use dict::Dictionary;
pub use error::{Error, Result};
pub use field::{Member, StructuredField};
pub use item::Item;
pub use key::Key;
pub use list::{InnerList, List};
pub use params::Parameters;
pub use value::{BareValue, Decimal, Token, MAX_INTEGER, MIN_INTEGER};

/// Parses a field value expected to be a single item.
///
/// Leading and trailing SP are discarded; anything else around the item,
/// including an empty input, fails.
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the byte offset of the first violation.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{parse_item, BareValue};
///
/// let item = parse_item("\"foo\";a=1;b=2")?;
/// assert_eq!(item.value(), &BareValue::String("foo".into()));
/// assert_eq!(item.parameters().len(), 2);
/// # Ok::<(), structured_fields::Error>(())
/// ```
pub fn parse_item(input: &str) -> Result<Item> {
    parser::parse_item_field(input)
}

/// Parses a field value expected to be a list.
///
/// An empty (or all-SP) input is an empty list.
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the byte offset of the first violation.
///
/// # Examples
///
/// ```rust
/// use structured_fields::parse_list;
///
/// let list = parse_list("token, \"string\", ?1;parameter, (42 42.0)")?;
/// assert_eq!(list.len(), 4);
/// assert!(list.get(3)?.is_inner_list());
/// # Ok::<(), structured_fields::Error>(())
/// ```
pub fn parse_list(input: &str) -> Result<List> {
    parser::parse_list_field(input)
}

/// Parses a field value expected to be a dictionary.
///
/// An empty (or all-SP) input is an empty dictionary.
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the byte offset of the first violation.
///
/// # Examples
///
/// ```rust
/// use structured_fields::parse_dictionary;
///
/// let dict = parse_dictionary("a=foobar;test=\"bar, baz\", b=toto")?;
/// assert_eq!(dict.len(), 2);
/// assert_eq!(dict.canonical()?, "a=foobar;test=\"bar, baz\", b=toto");
/// # Ok::<(), structured_fields::Error>(())
/// ```
pub fn parse_dictionary(input: &str) -> Result<Dictionary> {
    parser::parse_dictionary_field(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_round_trip() {
        let item = parse_item(" 42;a ").unwrap();
        assert_eq!(item.canonical().unwrap(), "42;a");

        let list = parse_list("a, (b c);x").unwrap();
        assert_eq!(list.canonical().unwrap(), "a, (b c);x");

        let dict = parse_dictionary("a, b=1").unwrap();
        assert_eq!(dict.canonical().unwrap(), "a, b=1");
    }

    #[test]
    fn from_str_matches_entry_points() {
        let item: Item = "42".parse().unwrap();
        assert_eq!(item, parse_item("42").unwrap());

        let list: List = "1, 2".parse().unwrap();
        assert_eq!(list, parse_list("1, 2").unwrap());

        let dict: Dictionary = "a=1".parse().unwrap();
        assert_eq!(dict, parse_dictionary("a=1").unwrap());
    }

    #[test]
    fn shapes_are_not_guessed() {
        // A dictionary-looking input is not a valid list...
        assert!(parse_list("a=1").is_err());
        // ...and a multi-member list is not a valid item.
        assert!(parse_item("1, 2").is_err());
    }
}
