//! pkd-session
//!
//! Pickup-session orchestration: the caller-side protocol around the pure
//! reconciliation engine.
//!
//! Architectural decisions:
//! - One in-flight scan at a time; a second submission while one is
//!   outstanding is refused, not queued.
//! - The store applies results under last-call-wins sequencing; stale
//!   results are dropped, never merged.
//! - Completion never finalizes implicitly: the caller reads
//!   `ScanReport::pickup_complete` and invokes `finalize` as an explicit
//!   second step.
//! - An abandoned call is recovered with `abandon_scan`, which also
//!   invalidates the orphaned result.

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{FinalizeReport, PickupSession};
pub use store::OrderStore;
