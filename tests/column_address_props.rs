use dexcel::utils::{CellReference, cell_reference, column_index, column_name};
use proptest::prelude::*;

proptest! {
    #[test]
    fn index_survives_a_round_trip(index in 0i64..i64::from(u32::MAX)) {
        let name = column_name(index).unwrap();
        prop_assert_eq!(i64::from(column_index(&name).unwrap()), index);
    }

    #[test]
    fn name_survives_a_round_trip(name in "[A-Z]{1,6}") {
        let index = column_index(&name).unwrap();
        prop_assert_eq!(column_name(i64::from(index)).unwrap(), name);
    }

    #[test]
    fn names_sort_like_their_indices(a in 0i64..1_000_000, b in 0i64..1_000_000) {
        let (name_a, name_b) = (column_name(a).unwrap(), column_name(b).unwrap());
        let key_a = (name_a.len(), name_a);
        let key_b = (name_b.len(), name_b);
        prop_assert_eq!(a.cmp(&b), key_a.cmp(&key_b));
    }

    #[test]
    fn negative_indices_are_rejected(index in i64::MIN..0) {
        let err = column_name(index).unwrap_err();
        prop_assert_eq!(err.to_string(), format!("invalid input: {index}"));
    }

    #[test]
    fn foreign_characters_are_rejected(
        prefix in "[A-Z]{0,3}",
        bad in "[^A-Z]",
        suffix in "[A-Z]{0,3}",
    ) {
        let name = format!("{prefix}{bad}{suffix}");
        let err = column_index(&name).unwrap_err();
        prop_assert_eq!(err.input(), name.as_str());
    }

    #[test]
    fn formatted_references_parse_back(row in 0u32..1_048_576, col in 0u32..16_384) {
        let text = cell_reference(row, col);
        let reference = CellReference::parse(&text).unwrap().unwrap();
        prop_assert_eq!(reference.row(), row);
        prop_assert_eq!(reference.column().unwrap(), col);
    }
}
