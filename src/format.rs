//! Wire format reference.
//!
//! This module documents the RFC 8941 textual grammar as this library
//! accepts and emits it. It contains no code.
//!
//! # Overview
//!
//! A structured field value is a single line of printable ASCII with one of
//! three top-level shapes. Which shape a given field uses is fixed by the
//! field's definition, never inferred from the value; hence the three
//! separate parse entry points.
//!
//! | Shape | Example | Parse with |
//! |-------|---------|------------|
//! | Item | `"foo";a=1` | [`parse_item`](crate::parse_item) |
//! | List | `sugar, (tea coffee);brewed` | [`parse_list`](crate::parse_list) |
//! | Dictionary | `u=2, i, d=?0` | [`parse_dictionary`](crate::parse_dictionary) |
//!
//! # Bare types
//!
//! | Type | Wire form | Constraints |
//! |------|-----------|-------------|
//! | Integer | `42`, `-17` | at most 15 digits, i.e. ±(10^15 − 1) |
//! | Decimal | `1.5`, `-0.25` | ≤ 12 integer digits, 1–3 fractional digits |
//! | String | `"hello"` | printable ASCII; `\"` and `\\` are the only escapes |
//! | Token | `text/html`, `*foo` | `[A-Za-z*]` then tchar, `:`, `/` |
//! | Byte sequence | `:aGVsbG8=:` | standard base64, padded, between colons |
//! | Boolean | `?1`, `?0` | none |
//! | Date (`date` feature) | `@1659578233` | integer epoch seconds |
//!
//! # Parameters
//!
//! Any item or inner list may be followed by parameters: `;key` or
//! `;key=value` repeated, where keys match `[a-z*][a-z0-9.*_-]*` and
//! values are bare items. A key without `=` means boolean true, and true
//! is always written that way: `;a=?1` never appears in canonical output.
//! A repeated key keeps its first position with its last value.
//!
//! # Containers
//!
//! - **Inner list**: `(item item …)` with single spaces between items,
//!   optionally parameterized as a whole: `(1 2);lvl=5`.
//! - **List**: members (items or inner lists) joined by a comma; canonical
//!   output uses `", "`. An empty list has no wire form (senders omit the
//!   field), so the empty string parses to an empty list and serializes
//!   back to it.
//! - **Dictionary**: `key=member` entries joined like list members. An
//!   entry whose member is a boolean-true item drops the `=?1`, keeping
//!   its parameters: `a, b;foo=9, c=1`.
//!
//! # Whitespace
//!
//! Leading SP characters (0x20, not TAB) are discarded before a field
//! value and trailing SP after it. OWS (SP or TAB) is permitted around the
//! commas separating list and dictionary members, and SP may follow the
//! `;` before a parameter key. Canonical output uses `", "` after commas
//! and no other optional whitespace.
//!
//! # Strictness
//!
//! Everything else is a syntax error, including: a trailing comma, a tab
//! inside an inner list, unpadded or otherwise non-canonical base64,
//! non-ASCII bytes anywhere, an escape other than `\"`/`\\`, more digits
//! than a type allows, an uppercase letter in a key, and an empty input
//! where an item is expected. Errors report the byte offset at which the
//! violation was detected.
