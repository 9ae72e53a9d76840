//! Scenario: re-scanning an already-confirmed code is idempotent
//!
//! # Invariant under test
//!
//! A code whose package was confirmed *before* the call classifies as
//! `AlreadyConfirmed`, and repeating the same scan yields the same outcome
//! with an identical package list. The confirmation flag is monotonic: a
//! duplicate scan never reverts or re-toggles it.

use pkd_reconcile::{reconcile_scan, ScanOutcome};
use pkd_schemas::{OrderPatch, Package, TrackingReply};

fn pkg(code: &str, confirmed: bool) -> Package {
    Package::new(code, confirmed)
}

fn accepted(packages: Vec<Package>) -> TrackingReply {
    TrackingReply {
        success: true,
        order: Some(OrderPatch { packages }),
        message: None,
    }
}

#[test]
fn duplicate_scan_classifies_as_already_confirmed() {
    let before = vec![pkg("A", true), pkg("B", false)];
    let reply = accepted(vec![pkg("A", true), pkg("B", false)]);

    let report = reconcile_scan(&before, "A", &reply).expect("well-formed reply");

    assert_eq!(report.outcome, ScanOutcome::AlreadyConfirmed);
    assert!(!report.stale_local_snapshot);
}

#[test]
fn repeating_the_duplicate_scan_is_idempotent() {
    let before = vec![pkg("A", true), pkg("B", false)];
    let reply = accepted(vec![pkg("A", true), pkg("B", false)]);

    let first = reconcile_scan(&before, "A", &reply).expect("well-formed reply");
    let second =
        reconcile_scan(&first.updated_packages, "A", &reply).expect("well-formed reply");

    assert_eq!(second.outcome, ScanOutcome::AlreadyConfirmed);
    assert_eq!(
        first.updated_packages, second.updated_packages,
        "identical replies must produce identical package lists"
    );
}

#[test]
fn prior_state_decides_new_vs_duplicate_not_the_reply() {
    // The reply looks the same either way; only the pre-call flag differs.
    let reply = accepted(vec![pkg("A", true)]);

    let fresh = reconcile_scan(&[pkg("A", false)], "A", &reply).expect("well-formed reply");
    let repeat = reconcile_scan(&[pkg("A", true)], "A", &reply).expect("well-formed reply");

    assert_eq!(fresh.outcome, ScanOutcome::Confirmed);
    assert_eq!(repeat.outcome, ScanOutcome::AlreadyConfirmed);
}
