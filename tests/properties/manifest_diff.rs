//! Property tests for manifest diffing.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use ferry::domain::entities::{Behavior, Manifest, ReplayMode};

fn file_set() -> impl Strategy<Value = BTreeMap<String, DateTime<Utc>>> {
    let path = proptest::string::string_regex("[a-c]{1,2}(/[a-c]{1,2}){0,2}\\.html").unwrap();
    proptest::collection::btree_map(path, 0i64..2_000_000_000, 0..12).prop_map(|files| {
        files
            .into_iter()
            .map(|(p, secs)| (p, Utc.timestamp_opt(secs, 0).unwrap()))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every path of either side appears exactly once, in lexical
    /// order, with the behavior its membership implies.
    #[test]
    fn property_diff_covers_both_sides_in_order(
        previous in file_set(),
        current in file_set(),
    ) {
        let manifest = Manifest::with_parts(3, previous.clone());
        let diff = manifest.diff_against(&current);

        let paths: Vec<&str> = diff.iter().map(|(p, _)| p).collect();
        let mut sorted = paths.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(&paths, &sorted);

        for (path, entry) in diff.iter() {
            let expected = match (previous.contains_key(path), current.contains_key(path)) {
                (false, true) => Behavior::Add,
                (true, true) => Behavior::Keep,
                (true, false) => Behavior::Remove,
                (false, false) => unreachable!("diff invented {}", path),
            };
            prop_assert_eq!(entry.behavior, expected);
        }

        let union: std::collections::BTreeSet<&String> =
            previous.keys().chain(current.keys()).collect();
        prop_assert_eq!(diff.len(), union.len());
    }

    /// PROPERTY: a full replay never deletes, whatever the previous deployment
    /// left behind.
    #[test]
    fn property_full_replay_diff_has_no_removals(
        previous in file_set(),
        current in file_set(),
        previous_count in 0u64..10,
        build_count in 0u64..10,
    ) {
        let manifest = Manifest::with_parts(previous_count, previous);
        let diff = manifest.diff_for(build_count, &current);

        if ReplayMode::for_build(build_count) == ReplayMode::Full {
            prop_assert_eq!(diff.count(Behavior::Remove), 0);
            prop_assert_eq!(diff.count(Behavior::Add), current.len());
        }
        prop_assert!(diff.len() >= current.len());
    }

    /// PROPERTY: once a build is recorded, diffing it again yields only Keeps.
    #[test]
    fn property_recorded_manifest_keeps_everything(current in file_set()) {
        let next = Manifest::with_parts(2, current.clone());
        let diff = next.diff_against(&current);
        prop_assert_eq!(diff.count(Behavior::Keep), current.len());
        prop_assert_eq!(diff.len(), current.len());
    }
}
