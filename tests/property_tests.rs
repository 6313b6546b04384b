//! Property-based tests: every value tree built through the checked
//! constructors serializes canonically, and parsing the canonical form is
//! the identity.

use proptest::prelude::*;
use structured_fields::{
    parse_dictionary, parse_item, parse_list, BareValue, Decimal, Dictionary, InnerList, Item,
    Key, List, Member, Parameters, Token,
};

fn key_strategy() -> impl Strategy<Value = Key> {
    prop::string::string_regex("[a-z*][a-z0-9_.*-]{0,6}")
        .unwrap()
        .prop_map(|text| Key::new(text).unwrap())
}

fn token_strategy() -> impl Strategy<Value = Token> {
    prop::string::string_regex("[A-Za-z*][!#$%&'*+.^_`|~:/A-Za-z0-9-]{0,6}")
        .unwrap()
        .prop_map(|text| Token::new(text).unwrap())
}

fn bare_value_strategy() -> impl Strategy<Value = BareValue> {
    prop_oneof![
        (-999_999_999_999_999i64..=999_999_999_999_999i64).prop_map(BareValue::Integer),
        (-999_999_999_999_999i64..=999_999_999_999_999i64)
            .prop_map(|t| BareValue::Decimal(Decimal::from_thousandths(t).unwrap())),
        prop::string::string_regex("[ -~]{0,10}")
            .unwrap()
            .prop_map(|s| BareValue::string(s).unwrap()),
        token_strategy().prop_map(BareValue::Token),
        prop::collection::vec(any::<u8>(), 0..12).prop_map(BareValue::ByteSequence),
        any::<bool>().prop_map(BareValue::Boolean),
    ]
}

fn parameters_strategy() -> impl Strategy<Value = Parameters> {
    prop::collection::vec((key_strategy(), bare_value_strategy()), 0..3)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (bare_value_strategy(), parameters_strategy()).prop_map(|(value, params)| Item::with(value, params))
}

fn inner_list_strategy() -> impl Strategy<Value = InnerList> {
    (
        prop::collection::vec(item_strategy(), 0..3),
        parameters_strategy(),
    )
        .prop_map(|(items, params)| InnerList::with(items, params))
}

fn member_strategy() -> impl Strategy<Value = Member> {
    prop_oneof![
        item_strategy().prop_map(Member::from),
        inner_list_strategy().prop_map(Member::from),
    ]
}

fn list_strategy() -> impl Strategy<Value = List> {
    prop::collection::vec(member_strategy(), 0..4).prop_map(List::new)
}

fn dictionary_strategy() -> impl Strategy<Value = Dictionary> {
    prop::collection::vec((key_strategy(), member_strategy()), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn item_roundtrip(item in item_strategy()) {
        let wire = item.canonical().unwrap();
        let parsed = parse_item(&wire).unwrap();
        prop_assert_eq!(&parsed, &item);
        prop_assert_eq!(parsed.canonical().unwrap(), wire);
    }

    #[test]
    fn inner_list_roundtrip(list in inner_list_strategy()) {
        let wire = list.canonical().unwrap();
        let parsed = InnerList::from_wire(&wire).unwrap();
        prop_assert_eq!(&parsed, &list);
        prop_assert_eq!(parsed.canonical().unwrap(), wire);
    }

    #[test]
    fn list_roundtrip(list in list_strategy()) {
        let wire = list.canonical().unwrap();
        let parsed = parse_list(&wire).unwrap();
        prop_assert_eq!(&parsed, &list);
        prop_assert_eq!(parsed.canonical().unwrap(), wire);
    }

    #[test]
    fn dictionary_roundtrip(dict in dictionary_strategy()) {
        let wire = dict.canonical().unwrap();
        let parsed = parse_dictionary(&wire).unwrap();
        prop_assert_eq!(&parsed, &dict);
        prop_assert_eq!(parsed.canonical().unwrap(), wire);
    }

    #[test]
    fn parameters_roundtrip(params in parameters_strategy()) {
        let wire = params.canonical().unwrap();
        let parsed = Parameters::from_wire(&wire).unwrap();
        prop_assert_eq!(&parsed, &params);
        prop_assert_eq!(parsed.canonical().unwrap(), wire);
    }

    #[test]
    fn canonical_integers_reparse(n in -999_999_999_999_999i64..=999_999_999_999_999i64) {
        let value = BareValue::integer(n).unwrap();
        let wire = value.canonical().unwrap();
        let parsed = parse_item(&wire).unwrap();
        prop_assert_eq!(parsed.value(), &value);
    }

    #[test]
    fn out_of_range_integers_never_construct(n in prop_oneof![
        1_000_000_000_000_000i64..=i64::MAX,
        i64::MIN..=-1_000_000_000_000_000i64,
    ]) {
        prop_assert!(BareValue::integer(n).is_err());
    }

    #[test]
    fn removing_then_lookup_fails(key in key_strategy(), value in bare_value_strategy()) {
        let params = Parameters::new().add(key.as_str(), Item::new(value)).unwrap();
        let removed = params.remove(&[key.as_str()]);
        prop_assert!(removed.get(key.as_str()).is_err());
        prop_assert!(params.get(key.as_str()).is_ok());
    }
}
