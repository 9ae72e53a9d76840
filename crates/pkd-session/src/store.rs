//! Order store: the single shared resource a pickup session mutates.
//!
//! The store owns the current order snapshot and applies updates only under
//! the [`ApplySequence`] last-call-wins discipline: every mutation carries
//! the sequence number of the submission that produced it, and anything
//! older than the last applied result is dropped. The partial
//! `apply_packages` / full `replace_order` split mirrors the two update
//! shapes the dispatch service produces (tracking reply patch vs finalize
//! snapshot).

use pkd_reconcile::{is_pickup_complete, ApplyDecision, ApplySequence, ScanSeq};
use pkd_schemas::{Order, Package};

#[derive(Clone, Debug)]
pub struct OrderStore {
    order: Order,
    seq: ApplySequence,
}

impl OrderStore {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            seq: ApplySequence::new(),
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Stamp the next submission. Call once per outgoing dispatch call.
    pub fn issue_seq(&mut self) -> ScanSeq {
        self.seq.issue()
    }

    /// Offer an authoritative package list produced by submission `seq`.
    /// Replaces the list wholesale when applied; drops stale results.
    pub fn apply_packages(&mut self, seq: ScanSeq, packages: Vec<Package>) -> ApplyDecision {
        let decision = self.seq.accept(seq);
        if decision.is_applied() {
            self.order.packages = packages;
        }
        decision
    }

    /// Offer a full canonical order snapshot (finalize success path).
    pub fn replace_order(&mut self, seq: ScanSeq, order: Order) -> ApplyDecision {
        let decision = self.seq.accept(seq);
        if decision.is_applied() {
            self.order = order;
        }
        decision
    }

    /// Invalidate every outstanding submission; late results will be dropped.
    pub fn invalidate_outstanding(&mut self) {
        self.seq.invalidate_outstanding();
    }

    pub fn confirmed_count(&self) -> usize {
        self.order.packages.iter().filter(|p| p.confirmed).count()
    }

    pub fn is_complete(&self) -> bool {
        is_pickup_complete(&self.order.packages)
    }
}
