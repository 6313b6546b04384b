//! Serde support through canonical wire strings.
//!
//! With the `serde` feature enabled, [`Item`], [`List`], and
//! [`Dictionary`] serialize as their canonical RFC 8941 strings and
//! deserialize by strict parsing, so structured field values can be
//! embedded in JSON, TOML, or any other serde format without exposing the
//! tree structure.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{Dictionary, Item, List};

macro_rules! canonical_serde {
    ($ty:ident, $parse:path, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let canonical = self.canonical().map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&canonical)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct FieldVisitor;

                impl Visitor<'_> for FieldVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        $parse(value).map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_str(FieldVisitor)
            }
        }
    };
}

canonical_serde!(Item, crate::parse_item, "an RFC 8941 item field value");
canonical_serde!(List, crate::parse_list, "an RFC 8941 list field value");
canonical_serde!(
    Dictionary,
    crate::parse_dictionary,
    "an RFC 8941 dictionary field value"
);
