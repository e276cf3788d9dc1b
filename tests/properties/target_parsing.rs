//! Property tests for deploy target parsing.

use proptest::prelude::*;

use ferry::domain::value_objects::{DeployTarget, SftpOptions, TargetKind};
use ferry::error::ErrorClass;

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing is total; failures are always configuration errors.
    #[test]
    fn property_parse_never_panics_and_classifies(s in ".{0,96}") {
        match DeployTarget::parse(&s) {
            Ok(target) => prop_assert!(TargetKind::ALL.contains(&target.kind())),
            Err(err) => prop_assert_eq!(err.class(), ErrorClass::Configuration),
        }
    }

    /// PROPERTY: the same string always selects the same backend.
    #[test]
    fn property_parse_is_deterministic(s in "(git|sftp|ftp)://.{0,48}") {
        let first = DeployTarget::parse(&s).map_err(|e| e.to_string());
        let second = DeployTarget::parse(&s).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: well-formed sftp targets keep every component and default the port.
    #[test]
    fn property_sftp_components_survive(
        user in word(),
        password in word(),
        host in "[a-z][a-z0-9-]{0,15}(\\.[a-z]{2,6})?",
        dir in proptest::collection::vec(word(), 0..3),
    ) {
        let dir = dir.join("/");
        let conf = format!("sftp://{}:{}@{}/~/{}", user, password, host, dir);
        match DeployTarget::parse(&conf) {
            Ok(DeployTarget::Sftp(SftpOptions { user: u, password: p, address, directory, home_relative, })) => {
                prop_assert_eq!(u, user);
                prop_assert_eq!(p, password);
                prop_assert_eq!(address, format!("{}:22", host));
                prop_assert_eq!(directory, dir);
                prop_assert!(home_relative);
            }
            other => prop_assert!(false, "unexpected parse of {}: {:?}", conf, other),
        }
    }

    /// PROPERTY: neither `Display` nor `Debug` ever shows the password.
    #[test]
    fn property_password_never_displayed(
        user in word(),
        password in "[A-Za-z0-9]{8,16}",
        host in "[a-z]{3,10}",
    ) {
        let conf = format!("sftp://{}:{}@{}/site", user, password, host);
        let target = DeployTarget::parse(&conf).unwrap();
        let shown = format!("{} {:?}", target, target);
        prop_assume!(!user.contains(&password) && !host.contains(&password));
        prop_assert!(!shown.contains(&password), "leaked in {}", shown);
    }
}
