//! Canonical RFC 8941 serialization.
//!
//! One well-formed value tree has exactly one wire form, produced here.
//! Every public type exposes it through its `canonical()` method; the
//! writers in this module append to a caller-owned `String`.
//!
//! Serialization re-checks the invariants that public enum variants allow
//! to be bypassed (integer range, string character set) and reports
//! [`Error::Serialization`] instead of emitting a malformed field.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::dict::Dictionary;
use crate::error::{Error, Result};
use crate::field::Member;
use crate::item::Item;
use crate::list::{InnerList, List};
use crate::params::Parameters;
use crate::value::{BareValue, MAX_INTEGER, MIN_INTEGER};

pub(crate) fn write_bare_value(out: &mut String, value: &BareValue) -> Result<()> {
    match value {
        BareValue::Integer(n) => {
            if !(MIN_INTEGER..=MAX_INTEGER).contains(n) {
                return Err(Error::Serialization {
                    reason: "integer out of range",
                });
            }
            out.push_str(&n.to_string());
        }
        BareValue::Decimal(d) => d.write_canonical(out),
        BareValue::String(s) => write_string(out, s)?,
        BareValue::Token(t) => out.push_str(t.as_str()),
        BareValue::ByteSequence(bytes) => {
            out.push(':');
            out.push_str(&BASE64.encode(bytes));
            out.push(':');
        }
        BareValue::Boolean(b) => out.push_str(if *b { "?1" } else { "?0" }),
        #[cfg(feature = "date")]
        BareValue::Date(seconds) => {
            if !(MIN_INTEGER..=MAX_INTEGER).contains(seconds) {
                return Err(Error::Serialization {
                    reason: "date out of range",
                });
            }
            out.push('@');
            out.push_str(&seconds.to_string());
        }
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) -> Result<()> {
    out.push('"');
    for &b in s.as_bytes() {
        match b {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => {
                return Err(Error::Serialization {
                    reason: "string contains a non-printable character",
                })
            }
        }
    }
    out.push('"');
    Ok(())
}

pub(crate) fn write_parameters(out: &mut String, params: &Parameters) -> Result<()> {
    for (key, value) in params.iter() {
        out.push(';');
        out.push_str(key.as_str());
        if value != &BareValue::Boolean(true) {
            out.push('=');
            write_bare_value(out, value)?;
        }
    }
    Ok(())
}

pub(crate) fn write_item(out: &mut String, item: &Item) -> Result<()> {
    write_bare_value(out, item.value())?;
    write_parameters(out, item.parameters())
}

pub(crate) fn write_inner_list(out: &mut String, list: &InnerList) -> Result<()> {
    out.push('(');
    for (at, item) in list.iter().enumerate() {
        if at > 0 {
            out.push(' ');
        }
        write_item(out, item)?;
    }
    out.push(')');
    write_parameters(out, list.parameters())
}

pub(crate) fn write_member(out: &mut String, member: &Member) -> Result<()> {
    match member {
        Member::Item(item) => write_item(out, item),
        Member::InnerList(list) => write_inner_list(out, list),
    }
}

pub(crate) fn write_list(out: &mut String, list: &List) -> Result<()> {
    for (at, member) in list.iter().enumerate() {
        if at > 0 {
            out.push_str(", ");
        }
        write_member(out, member)?;
    }
    Ok(())
}

pub(crate) fn write_dictionary(out: &mut String, dict: &Dictionary) -> Result<()> {
    for (at, (key, member)) in dict.iter().enumerate() {
        if at > 0 {
            out.push_str(", ");
        }
        out.push_str(key.as_str());
        match member {
            // A boolean-true item collapses to its key; its parameters
            // still follow.
            Member::Item(item) if item.value() == &BareValue::Boolean(true) => {
                write_parameters(out, item.parameters())?;
            }
            other => {
                out.push('=');
                write_member(out, other)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Decimal;

    #[test]
    fn bare_values() {
        let cases: &[(BareValue, &str)] = &[
            (BareValue::Integer(0), "0"),
            (BareValue::Integer(-999_999_999_999_999), "-999999999999999"),
            (
                BareValue::Decimal(Decimal::from_thousandths(-1230).unwrap()),
                "-1.23",
            ),
            (BareValue::Boolean(true), "?1"),
            (BareValue::Boolean(false), "?0"),
            (BareValue::ByteSequence(b"pretend this is binary content.".to_vec()),
             ":cHJldGVuZCB0aGlzIGlzIGJpbmFyeSBjb250ZW50Lg==:"),
            (BareValue::ByteSequence(Vec::new()), "::"),
        ];
        for (value, expected) in cases {
            assert_eq!(&value.canonical().unwrap(), expected);
        }
    }

    #[test]
    fn string_escaping() {
        let value = BareValue::string(r#"he said "ok" \ done"#).unwrap();
        assert_eq!(
            value.canonical().unwrap(),
            r#""he said \"ok\" \\ done""#
        );
    }

    #[test]
    fn invariant_bypass_is_a_serialization_error() {
        let value = BareValue::Integer(1_000_000_000_000_000);
        assert!(matches!(
            value.canonical(),
            Err(Error::Serialization { .. })
        ));

        let value = BareValue::String("newline\n".into());
        assert!(matches!(
            value.canonical(),
            Err(Error::Serialization { .. })
        ));
    }

    #[test]
    fn true_parameters_omit_value() {
        let params = Parameters::from_pairs([("a", true), ("b", false)]).unwrap();
        assert_eq!(params.canonical().unwrap(), ";a;b=?0");
    }

    #[test]
    fn empty_containers_serialize_to_nothing() {
        assert_eq!(List::default().canonical().unwrap(), "");
        assert_eq!(Dictionary::default().canonical().unwrap(), "");
        assert_eq!(Parameters::default().canonical().unwrap(), "");
    }
}
