//! Property-based tests for parsers and core types.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated inputs.

use proptest::prelude::*;

use revinfo::core::types::Oid;
use revinfo::git::refs::{parse_head, HeadTarget};

/// Strategy for generating valid hex object ids.
fn valid_oid_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
        ]),
        40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for branch names built from slash-separated word segments.
fn slashed_branch_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9-]{0,8}", 1..5).prop_map(|segments| segments.join("/"))
}

proptest! {
    #[test]
    fn oid_accepts_all_forty_hex_strings(hex in valid_oid_string()) {
        let oid = Oid::new(&hex).unwrap();
        prop_assert_eq!(oid.as_str(), hex.as_str());
    }

    #[test]
    fn oid_abbreviation_is_a_prefix(hex in valid_oid_string()) {
        let oid = Oid::new(&hex).unwrap();
        prop_assert!(hex.starts_with(oid.short(10)));
        prop_assert_eq!(oid.short(10).len(), 10);
    }

    #[test]
    fn oid_normalizes_case(hex in valid_oid_string()) {
        let upper = hex.to_ascii_uppercase();
        let oid = Oid::new(upper).unwrap();
        prop_assert_eq!(oid.as_str(), hex.as_str());
    }

    #[test]
    fn oid_rejects_wrong_lengths(hex in "[0-9a-f]{0,60}") {
        prop_assume!(hex.len() != 40);
        prop_assert!(Oid::new(hex).is_err());
    }

    #[test]
    fn branch_names_round_trip_through_head_parsing(name in slashed_branch_name()) {
        let line = format!("ref: refs/heads/{}\n", name);
        let parsed = parse_head(&line).unwrap();
        prop_assert_eq!(
            parsed,
            HeadTarget::Symbolic(format!("refs/heads/{}", name))
        );
    }

    #[test]
    fn raw_ids_parse_as_detached(hex in valid_oid_string()) {
        let parsed = parse_head(&hex).unwrap();
        prop_assert_eq!(parsed, HeadTarget::Detached(Oid::new(hex).unwrap()));
    }
}
