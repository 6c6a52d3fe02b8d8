use proptest::prelude::*;

use feed_core::{CompileContext, GROUP_ID_MODULUS, group_id, variant_offer_id};

proptest! {
    #[test]
    fn group_id_stays_in_positive_i32_range(code in "\\PC{0,40}") {
        let id = group_id(&code, &mut CompileContext::new()).get();
        prop_assert!(id >= 1);
        prop_assert!(u64::from(id) < GROUP_ID_MODULUS);
    }

    #[test]
    fn group_id_is_deterministic(code in "[A-Z0-9/-]{1,24}") {
        let first = group_id(&code, &mut CompileContext::new());
        let second = group_id(&code, &mut CompileContext::new());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn digited_codes_ignore_letters(digits in "[1-9][0-9]{0,8}", prefix in "[A-Z]{0,4}") {
        let code = format!("{prefix}-{digits}");
        let expected: u64 = digits.parse().unwrap();
        let id = group_id(&code, &mut CompileContext::new()).get();
        prop_assert_eq!(u64::from(id), expected % GROUP_ID_MODULUS);
    }

    #[test]
    fn undigited_codes_get_distinct_ids(codes in proptest::collection::hash_set("[A-Za-z]{1,8}", 1..20)) {
        let mut ctx = CompileContext::new();
        let mut seen = std::collections::HashSet::new();
        for code in &codes {
            prop_assert!(seen.insert(group_id(code, &mut ctx)));
        }
    }

    #[test]
    fn variant_ids_depend_only_on_code_and_label(code in "[A-Z0-9]{1,10}", label in "\\PC{0,20}") {
        let id = variant_offer_id(&code, &label);
        prop_assert_eq!(&id, &variant_offer_id(&code, &label));
        let prefix = format!("{code}_");
        prop_assert!(id.starts_with(&prefix));
        prop_assert_eq!(id.len(), code.len() + 1 + 8);
    }
}
