use pkd_schemas::{Package, TrackingReply};

use crate::{Classification, MalformedReply, ScanOutcome, ScanReport};

/// True iff `packages` is non-empty and every package is confirmed.
///
/// An empty list is never complete: an order with no packages has nothing to
/// pick up and must not trigger finalization.
pub fn is_pickup_complete(packages: &[Package]) -> bool {
    !packages.is_empty() && packages.iter().all(|p| p.confirmed)
}

/// Classify `code` against the pre-call package list.
///
/// The prior confirmation flag decides new-vs-duplicate for user messaging.
/// A code absent from the list is `UnknownLocally`: the local snapshot is
/// stale relative to the service. An absent code must never be classified
/// from another package's flag; it gets its own variant instead of a
/// sentinel index.
pub fn classify_scan(before: &[Package], code: &str) -> Classification {
    match before.iter().find(|p| p.tracking_code == code) {
        Some(p) if p.confirmed => Classification::AlreadyConfirmed,
        Some(_) => Classification::NewlyConfirmed,
        None => Classification::UnknownLocally,
    }
}

/// Fold a dispatch reply into a [`ScanReport`].
///
/// - Rejected reply (`success = false`): outcome `NotRelated`, package list
///   unchanged, never complete, service message passed through.
/// - Accepted reply: outcome from [`classify_scan`] on the *pre-call* list;
///   the reply's package list is adopted wholesale and completion is
///   recomputed from it.
/// - Accepted reply with no order payload violates the contract and is a
///   hard failure.
///
/// Pure: `before` is never mutated; all state changes live in the report.
pub fn reconcile_scan(
    before: &[Package],
    code: &str,
    reply: &TrackingReply,
) -> Result<ScanReport, MalformedReply> {
    if !reply.success {
        return Ok(ScanReport {
            outcome: ScanOutcome::NotRelated,
            updated_packages: before.to_vec(),
            pickup_complete: false,
            stale_local_snapshot: false,
            message: reply.message.clone(),
        });
    }

    let patch = match &reply.order {
        Some(patch) => patch,
        None => {
            return Err(MalformedReply {
                detail: "success reply carried no order payload".to_string(),
            })
        }
    };

    let (outcome, stale_local_snapshot) = match classify_scan(before, code) {
        Classification::NewlyConfirmed => (ScanOutcome::Confirmed, false),
        Classification::AlreadyConfirmed => (ScanOutcome::AlreadyConfirmed, false),
        // Degraded classification: trust the service, flag the staleness.
        Classification::UnknownLocally => (ScanOutcome::Confirmed, true),
    };

    let updated_packages = patch.packages.clone();
    let pickup_complete = is_pickup_complete(&updated_packages);

    Ok(ScanReport {
        outcome,
        updated_packages,
        pickup_complete,
        stale_local_snapshot,
        message: reply.message.clone(),
    })
}
