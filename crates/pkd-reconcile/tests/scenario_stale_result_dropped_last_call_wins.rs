//! Scenario: out-of-order results are dropped, never merged
//!
//! # Invariant under test
//!
//! Each reply carries the full authoritative package list, so repeated or
//! out-of-order delivery is idempotent at the store *only* under a
//! last-call-wins discipline: the store applies the newest completed result
//! and drops everything older. `ApplySequence` enforces this with a
//! strictly-increasing issue counter and a strictly-newer acceptance check.

use pkd_reconcile::{ApplyDecision, ApplySequence};

// ---------------------------------------------------------------------------
// 1. Late result from an earlier submission is dropped with evidence
// ---------------------------------------------------------------------------

#[test]
fn late_result_is_dropped_after_newer_one_applied() {
    let mut seq = ApplySequence::new();
    let first = seq.issue();
    let second = seq.issue();

    assert!(seq.accept(second).is_applied(), "newest result applies");

    match seq.accept(first) {
        ApplyDecision::StaleDropped { last_applied, got } => {
            assert_eq!(last_applied, 2, "high-water mark evidence");
            assert_eq!(got, 1, "rejected sequence evidence");
        }
        ApplyDecision::Applied => panic!("stale result must not be applied"),
    }
}

// ---------------------------------------------------------------------------
// 2. Redelivery of the applied result is dropped (no double-apply)
// ---------------------------------------------------------------------------

#[test]
fn redelivered_result_is_dropped() {
    let mut seq = ApplySequence::new();
    let s = seq.issue();

    assert!(seq.accept(s).is_applied());
    assert!(
        !seq.accept(s).is_applied(),
        "equal sequence numbers are stale under strictly-newer acceptance"
    );
}

// ---------------------------------------------------------------------------
// 3. In-order delivery all applies
// ---------------------------------------------------------------------------

#[test]
fn in_order_results_all_apply() {
    let mut seq = ApplySequence::new();
    for _ in 0..3 {
        let s = seq.issue();
        assert!(seq.accept(s).is_applied());
    }
    assert_eq!(seq.last_applied(), Some(3));
}

// ---------------------------------------------------------------------------
// 4. Abandoned submissions are invalidated wholesale
// ---------------------------------------------------------------------------

#[test]
fn invalidation_covers_every_outstanding_submission() {
    let mut seq = ApplySequence::new();
    let a = seq.issue();
    let b = seq.issue();

    seq.invalidate_outstanding();

    assert!(!seq.accept(a).is_applied());
    assert!(!seq.accept(b).is_applied());

    let fresh = seq.issue();
    assert!(
        seq.accept(fresh).is_applied(),
        "invalidation must not wedge future submissions"
    );
}
