//! Scan-result application sequence.
//!
//! # Purpose
//!
//! Dispatch replies can land out of order relative to the scans that caused
//! them (a retried call, an abandoned call completing late). Because each
//! reply carries the full authoritative package list, the store must take
//! the *latest completed* result and only that — applying an older result
//! after a newer one would resurrect stale confirmation flags.
//!
//! # Invariants
//!
//! - **Issue order is strictly increasing**: every submission is stamped
//!   with a fresh sequence number before the call goes out.
//! - **Strictly-newer acceptance**: a result is applied only if its sequence
//!   number is strictly greater than the last applied one. Duplicates and
//!   late arrivals are dropped with evidence.
//! - **High-water mark advances only on acceptance** (or explicit
//!   invalidation); rejections do not move it.
//! - **Pure, no IO**: the caller decides what to do with each decision.

/// Identifier for one issued scan submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanSeq(pub u64);

/// Decision for one result offered to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyDecision {
    /// Result is the newest seen; the caller should apply it.
    Applied,

    /// A newer (or equal) result was already applied, or the sequence was
    /// invalidated. Fields carry the high-water mark and the rejected
    /// sequence number for logging.
    StaleDropped { last_applied: u64, got: u64 },
}

impl ApplyDecision {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyDecision::Applied)
    }
}

/// Issues sequence numbers for scan submissions and enforces last-call-wins
/// application of their results.
///
/// Stamp each submission with [`issue`][ApplySequence::issue] before the
/// dispatch call; offer the completed result via
/// [`accept`][ApplySequence::accept] and apply it only on
/// [`ApplyDecision::Applied`].
#[derive(Clone, Debug, Default)]
pub struct ApplySequence {
    /// Last issued sequence number. Issued numbers start at 1.
    issued: u64,
    /// Sequence number of the last applied (or invalidated) result.
    /// 0 = nothing applied yet.
    last_applied: u64,
}

impl ApplySequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the next submission. Strictly increasing.
    pub fn issue(&mut self) -> ScanSeq {
        self.issued += 1;
        ScanSeq(self.issued)
    }

    /// Check a result **without** advancing the high-water mark.
    pub fn check(&self, seq: ScanSeq) -> ApplyDecision {
        if seq.0 > self.last_applied {
            ApplyDecision::Applied
        } else {
            ApplyDecision::StaleDropped {
                last_applied: self.last_applied,
                got: seq.0,
            }
        }
    }

    /// Check a result **and advance the high-water mark** if it is the
    /// newest seen.
    pub fn accept(&mut self, seq: ScanSeq) -> ApplyDecision {
        let decision = self.check(seq);
        if decision.is_applied() {
            self.last_applied = seq.0;
        }
        decision
    }

    /// Invalidate every sequence number issued so far.
    ///
    /// Used when a call is abandoned: if its result ever lands, `accept`
    /// will drop it as stale.
    pub fn invalidate_outstanding(&mut self) {
        self.last_applied = self.issued;
    }

    /// Sequence number of the last applied result, if any.
    pub fn last_applied(&self) -> Option<u64> {
        (self.last_applied > 0).then_some(self.last_applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_is_strictly_increasing_from_one() {
        let mut seq = ApplySequence::new();
        assert_eq!(seq.issue(), ScanSeq(1));
        assert_eq!(seq.issue(), ScanSeq(2));
        assert_eq!(seq.issue(), ScanSeq(3));
    }

    #[test]
    fn newer_result_is_applied_older_is_dropped() {
        let mut seq = ApplySequence::new();
        let s1 = seq.issue();
        let s2 = seq.issue();

        assert!(seq.accept(s2).is_applied());
        assert_eq!(
            seq.accept(s1),
            ApplyDecision::StaleDropped {
                last_applied: 2,
                got: 1
            }
        );
        assert_eq!(seq.last_applied(), Some(2));
    }

    #[test]
    fn duplicate_result_is_dropped() {
        let mut seq = ApplySequence::new();
        let s1 = seq.issue();
        assert!(seq.accept(s1).is_applied());
        assert!(!seq.accept(s1).is_applied());
    }

    #[test]
    fn check_does_not_advance_high_water_mark() {
        let mut seq = ApplySequence::new();
        let s1 = seq.issue();
        assert!(seq.check(s1).is_applied());
        assert_eq!(seq.last_applied(), None);
        assert!(seq.accept(s1).is_applied());
    }

    #[test]
    fn invalidate_outstanding_drops_abandoned_results() {
        let mut seq = ApplySequence::new();
        let abandoned = seq.issue();
        seq.invalidate_outstanding();

        assert!(!seq.accept(abandoned).is_applied());

        // A fresh submission after invalidation still applies.
        let next = seq.issue();
        assert!(seq.accept(next).is_applied());
    }
}
