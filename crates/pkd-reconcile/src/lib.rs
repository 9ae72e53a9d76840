//! pkd-reconcile
//!
//! Tracking-confirmation reconciliation engine.
//!
//! Architectural decisions:
//! - The dispatch service is the single authority for code validity and for
//!   the resulting package list; this engine never decides validity from
//!   local state alone.
//! - Service replies are folded in as plain data; the service call itself
//!   happens in pkd-session.
//! - An authoritative package list replaces the local list wholesale, never
//!   as an incremental patch.
//! - Result application is last-call-wins, enforced by ApplySequence.
//!
//! Deterministic, pure logic. No IO. No dispatch calls.

mod engine;
mod sequence;
mod types;

pub use engine::{classify_scan, is_pickup_complete, reconcile_scan};
pub use sequence::{ApplyDecision, ApplySequence, ScanSeq};
pub use types::*;
