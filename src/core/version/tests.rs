use super::*;

fn evr(epoch: u32, version: &str, release: &str) -> Evr {
    Evr {
        epoch,
        version: version.to_string(),
        release: release.to_string(),
    }
}

#[test]
fn test_numeric_runs_compare_as_integers() {
    assert_eq!(rpmvercmp("1.10", "1.9"), Ordering::Greater);
    assert_eq!(rpmvercmp("4.18.0", "4.19.0"), Ordering::Less);
    assert_eq!(rpmvercmp("1.01", "1.1"), Ordering::Equal);
    assert_eq!(rpmvercmp("1.0010", "1.9"), Ordering::Greater);
}

#[test]
fn test_alpha_runs_compare_lexically() {
    assert_eq!(rpmvercmp("1.0a", "1.0b"), Ordering::Less);
    assert_eq!(rpmvercmp("el7", "el8"), Ordering::Less);
    assert_eq!(rpmvercmp("fc30", "fc30"), Ordering::Equal);
}

#[test]
fn test_numeric_is_newer_than_alpha() {
    assert_eq!(rpmvercmp("1.1", "1.a"), Ordering::Greater);
    assert_eq!(rpmvercmp("1.a", "1.1"), Ordering::Less);
}

#[test]
fn test_longer_version_wins() {
    assert_eq!(rpmvercmp("1.0", "1.0.1"), Ordering::Less);
    assert_eq!(rpmvercmp("1.0a", "1.0"), Ordering::Greater);
    assert_eq!(rpmvercmp("862.el7", "862"), Ordering::Greater);
}

#[test]
fn test_separators_only_split_runs() {
    assert_eq!(rpmvercmp("1_0", "1.0"), Ordering::Equal);
    assert_eq!(rpmvercmp("1.0.", "1.0"), Ordering::Equal);
    assert_eq!(rpmvercmp("el7_9", "el7.9"), Ordering::Equal);
}

#[test]
fn test_tilde_sorts_before_release() {
    assert_eq!(rpmvercmp("1.0~rc1", "1.0"), Ordering::Less);
    assert_eq!(rpmvercmp("1.0~rc1", "1.0~rc2"), Ordering::Less);
    assert_eq!(rpmvercmp("1.0", "1.0~rc1"), Ordering::Greater);
}

#[test]
fn test_caret_sorts_after_base_before_next_run() {
    assert_eq!(rpmvercmp("1.0^git1", "1.0"), Ordering::Greater);
    assert_eq!(rpmvercmp("1.0^git1", "1.0.1"), Ordering::Less);
    assert_eq!(rpmvercmp("1.0", "1.0^"), Ordering::Less);
}

#[test]
fn test_non_ascii_does_not_panic() {
    assert_eq!(rpmvercmp("1.ä", "1.ä"), Ordering::Equal);
    assert_eq!(rpmvercmp("1.ä", "1.1"), Ordering::Less);
    let _ = rpmvercmp("日本.1", "1.日本");
    let _ = rpmvercmp("—", "~");
}

#[test]
fn test_epoch_has_highest_priority() {
    assert_eq!(
        compare_evr(&evr(1, "1.0", "1"), &evr(0, "9.9", "99")),
        Ordering::Greater
    );
    assert_eq!(
        compare_evr(&evr(0, "1.0", "2"), &evr(0, "1.0", "10")),
        Ordering::Less
    );
}

#[test]
fn test_release_compared_after_version() {
    assert_eq!(
        compare_evr(&evr(0, "5.1", "100"), &evr(0, "5.0", "200")),
        Ordering::Greater
    );
    assert_eq!(
        compare_evr(&evr(0, "3.10.0", "862.2.el7_9"), &evr(0, "3.10.0", "862.1.el7_9")),
        Ordering::Greater
    );
}

#[test]
fn test_ordering_is_antisymmetric_and_transitive() {
    let samples = [
        "1.0~rc1", "1.0", "1.0^git1", "1.0.1", "1.0a", "1.a", "1.1", "1.01", "1.10", "2",
        "2.0.el7", "2.0.el8", "el7_9", "862.1.el7", "862.2.el7", "a", "b1", "",
    ];

    for a in samples {
        for b in samples {
            assert_eq!(
                rpmvercmp(a, b),
                rpmvercmp(b, a).reverse(),
                "antisymmetry failed for {a:?} / {b:?}"
            );
            for c in samples {
                if rpmvercmp(a, b) == Ordering::Less && rpmvercmp(b, c) == Ordering::Less {
                    assert_eq!(
                        rpmvercmp(a, c),
                        Ordering::Less,
                        "transitivity failed for {a:?} < {b:?} < {c:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_evr_ord_matches_compare() {
    let mut versions = vec![
        evr(0, "5.0", "200"),
        evr(0, "4.19.0", "1"),
        evr(1, "1.0", "1"),
        evr(0, "5.0", "100"),
    ];
    versions.sort();

    let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["4.19.0-1", "5.0-100", "5.0-200", "1:1.0-1"]);
    assert_eq!(evr(0, "1.0", "1"), evr(0, "1.00", "01"));
}
