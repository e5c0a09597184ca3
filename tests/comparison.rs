use std::cmp::Ordering;

use nevra::*;
use proptest::prelude::*;

mod common;

use common::{epkg, pkg};

/// Version-ish strings built from the characters that matter to the comparison
fn version_string() -> impl Strategy<Value = String> {
    "[0-9a-zA-Z.~^_+-]{0,12}"
}

proptest! {
    #[test]
    fn compare_is_antisymmetric(a in version_string(), b in version_string()) {
        prop_assert_eq!(compare_version_string(&a, &b), compare_version_string(&b, &a).reverse());
    }

    #[test]
    fn compare_is_reflexive(a in version_string()) {
        prop_assert_eq!(compare_version_string(&a, &a), Ordering::Equal);
    }

    #[test]
    fn compare_is_transitive(a in version_string(), b in version_string(), c in version_string()) {
        if compare_version_string(&a, &b) != Ordering::Less
            && compare_version_string(&b, &c) != Ordering::Less
        {
            prop_assert_ne!(compare_version_string(&a, &c), Ordering::Less);
        }
    }

    #[test]
    fn leading_zeroes_are_ignored(n in 0u64..1_000_000, zeroes in 0usize..5) {
        let padded = format!("{}{}", "0".repeat(zeroes), n);
        prop_assert_eq!(compare_version_string(&padded, &n.to_string()), Ordering::Equal);
    }

    #[test]
    fn nevra_round_trips(
        name in "[a-z][a-z0-9_+-]{0,8}",
        epoch in 0u32..100,
        version in "[0-9a-z][0-9a-z.~^_+]{0,8}",
        release in "[0-9a-z][0-9a-z._+]{0,8}",
        arch in "[a-z0-9_]{1,8}",
    ) {
        let nevra = Nevra::new(name.as_str(), epoch, version.as_str(), release.as_str(), arch.as_str()).unwrap();
        let rendered = nevra.format(NevraFormat::Nevra);
        let parsed = Nevra::parse_nevra(&rendered).unwrap();
        prop_assert_eq!(parsed.values(), nevra.values());
        prop_assert_eq!(parsed.epoch(), nevra.epoch());
        prop_assert_eq!(parsed, nevra);
    }

    #[test]
    fn constructed_nevras_survive_rendering(
        name in "[a-z][a-z.-]{0,5}",
        version in "[0-9a-z.:-]{1,6}",
        release in "[0-9a-z.-]{1,6}",
        arch in "[a-z.-]{1,6}",
    ) {
        // whatever construction accepts has to come back out of the parser unchanged
        if let Ok(nevra) = Nevra::new(name.as_str(), "1", version.as_str(), release.as_str(), arch.as_str()) {
            let parsed = Nevra::parse_nevra(&nevra.nevra()).unwrap().into_owned();
            prop_assert_eq!(parsed.values(), nevra.values());

            let parsed = Nevra::parse_nvra_with(&nevra.nvra(), "1").unwrap().into_owned();
            prop_assert_eq!(parsed.values(), nevra.values());
        }
    }
}

#[test]
fn test_documented_version_properties() {
    assert_eq!(compare_version_string("009", "9"), Ordering::Equal);
    assert_eq!(compare_version_string("1.a", "1.1"), Ordering::Less);
    assert_eq!(compare_version_string("1.0~rc1", "1.0"), Ordering::Less);
    // a trailing alphabetic segment still makes for a longer, newer version
    assert_eq!(compare_version_string("2.0", "2.0a"), Ordering::Less);
}

#[test]
fn test_round_trip_with_absent_epoch() {
    let nevra = pkg("foo", "1.0", "1", "noarch");
    let rendered = nevra.format(NevraFormat::Nevra);
    assert_eq!(rendered, "foo-0:1.0-1.noarch");

    let parsed = Nevra::parse_nevra(&rendered).unwrap();
    assert_eq!(parsed, nevra);
    assert_eq!(parsed.epoch(), &Epoch::from("0"));
    assert_eq!(nevra.epoch(), &Epoch::Absent);
}

#[test]
fn test_sorting_packages() {
    let mut packages = vec![
        pkg("zsh", "5.9", "1", "x86_64"),
        pkg("bash", "5.1", "1", "x86_64"),
        pkg("bash", "5.2", "1", "i686"),
        epkg("bash", "0", "5.2", "1", "x86_64"),
        pkg("bash", "5.2~rc1", "1", "x86_64"),
        pkg("bash", "5.2", "1.fc40", "aarch64"),
    ];
    packages.sort();

    let sorted: Vec<String> = packages.iter().map(|p| p.nvra()).collect();
    pretty_assertions::assert_eq!(
        sorted,
        [
            "bash-5.1-1.x86_64",
            "bash-5.2~rc1-1.x86_64",
            "bash-5.2-1.i686",
            "bash-5.2-1.x86_64",
            "bash-5.2-1.fc40.aarch64",
            "zsh-5.9-1.x86_64",
        ]
    );

    assert_eq!(packages.iter().max().map(|p| p.name()), Some("zsh"));
}

#[test]
fn test_sorting_mixed_epochs() {
    let mut packages: Vec<Nevra<'static>> = (0..200)
        .map(|i| {
            let epoch = match i % 3 {
                0 => Epoch::Absent,
                n => Epoch::from(n as u32),
            };
            Nevra::new(
                "foo".to_owned(),
                epoch,
                ((i * 7) % 11).to_string(),
                "1".to_owned(),
                "noarch".to_owned(),
            )
            .unwrap()
        })
        .collect();

    packages.sort_by(Nevra::cmp_normalized);

    for pair in packages.windows(2) {
        assert_ne!(
            pair[0].cmp_normalized(&pair[1]),
            Ordering::Greater,
            "{} sorted before {}",
            pair[0].nevra(),
            pair[1].nevra()
        );
    }
    // absent epochs count as 0, so they come first
    assert_eq!(packages[0].epoch(), &Epoch::Absent);
    assert_eq!(packages[0].version(), "0");
    assert_eq!(packages[199].nevra(), "foo-2:10-1.noarch");
}

#[test]
fn test_relaxed_ordering_is_not_transitive() {
    let without = pkg("foo", "1.0", "1", "noarch");
    let one = epkg("foo", "1", "1.0", "1", "noarch");
    let two = epkg("foo", "2", "1.0", "1", "noarch");

    // one == without == two, yet one < two
    assert_eq!(one, without);
    assert_eq!(without, two);
    assert!(one < two);

    let mut packages = vec![two.clone(), without.clone(), one.clone()];
    packages.sort_by(Nevra::cmp_normalized);
    let sorted: Vec<String> = packages.iter().map(|p| p.nevra()).collect();
    assert_eq!(
        sorted,
        ["foo-0:1.0-1.noarch", "foo-1:1.0-1.noarch", "foo-2:1.0-1.noarch"]
    );
}

#[test]
fn test_epochs_compare_only_when_both_present() {
    let without = pkg("foo", "1.0", "1", "noarch");
    let zero = epkg("foo", "0", "1.0", "1", "noarch");
    let one = epkg("foo", "1", "1.0", "1", "noarch");

    assert_eq!(without.compare_evr(&one), Ordering::Equal);
    assert_eq!(without.compare_evr(&zero), Ordering::Equal);
    assert_eq!(zero.compare_evr(&one), Ordering::Less);
    assert!(without == one);
    assert!(zero < one);

    let older_version_newer_epoch = epkg("foo", "2", "0.9", "1", "noarch");
    assert!(older_version_newer_epoch > one);
    assert!(older_version_newer_epoch < without);
}

#[test]
fn test_equality_ignores_nothing_but_absent_epochs() {
    assert_eq!(pkg("foo", "1.0", "1", "noarch"), pkg("foo", "1.00", "01", "noarch"));
    assert_ne!(pkg("foo", "1.0", "1", "noarch"), pkg("foo", "1.0", "1", "x86_64"));
    assert_ne!(pkg("foo", "1.0", "1", "noarch"), pkg("Foo", "1.0", "1", "noarch"));
}
