//! Property tests for remote path decomposition.

use proptest::prelude::*;

use ferry::domain::value_objects::remote_path::{ancestors, join, parent};

fn remote_dir() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z0-9._-]{1,10}").unwrap();
    (
        prop_oneof![Just(""), Just("/")],
        proptest::collection::vec(segment, 0..5),
    )
        .prop_map(|(lead, segments)| format!("{}{}", lead, segments.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: ancestors are deepest first, each the parent of the one before,
    /// and never the empty, current or root directory.
    #[test]
    fn property_ancestors_are_a_parent_chain(dir in remote_dir()) {
        let chain = ancestors(&dir);
        for dir in &chain {
            prop_assert!(!dir.is_empty() && dir != "." && dir != "/");
        }
        for pair in chain.windows(2) {
            prop_assert_eq!(parent(&pair[0]), pair[1].as_str());
        }
        if let Some(deepest) = chain.first() {
            prop_assert_eq!(deepest.as_str(), dir.trim_end_matches('/'));
        }
    }

    /// PROPERTY: joining never produces a doubled separator.
    #[test]
    fn property_join_has_single_separators(root in remote_dir(), rel in remote_dir()) {
        let joined = join(&root, &rel);
        prop_assert!(!joined.contains("//"), "{:?} + {:?} = {:?}", root, rel, joined);
    }

    /// PROPERTY: `ancestors` never panics on arbitrary input.
    #[test]
    fn property_ancestors_never_panics(s in ".{0,64}") {
        let _ = ancestors(&s);
    }
}
