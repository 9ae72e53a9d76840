use pkd_schemas::Package;
use serde::{Deserialize, Serialize};

/// How a scanned code relates to the *pre-call* local package list.
///
/// This is a local classification for user-facing messaging only; the
/// dispatch service has already accepted the code by the time it is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Code matched a package whose confirmation flag was still false.
    NewlyConfirmed,
    /// Code matched a package confirmed earlier in the session.
    AlreadyConfirmed,
    /// Code accepted by the service but absent from the local snapshot
    /// (stale local state). Cannot be classified new-vs-duplicate locally.
    UnknownLocally,
}

/// User-facing outcome of one scan submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// The service confirmed a package that was not confirmed before.
    Confirmed,
    /// The code had already been scanned and confirmed this session.
    AlreadyConfirmed,
    /// The service rejected the code as not belonging to the order.
    NotRelated,
}

/// Full report for one scan submission.
///
/// `updated_packages` is the authoritative post-call list (unchanged input on
/// `NotRelated`). `stale_local_snapshot` marks the degraded classification
/// path: the service accepted a code the local snapshot did not contain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    pub updated_packages: Vec<Package>,
    pub pickup_complete: bool,
    pub stale_local_snapshot: bool,
    /// Display-ready message from the service, passed through verbatim.
    pub message: Option<String>,
}

/// A `success = true` reply that violates the consumed contract (no order
/// payload). Classified transport-grade by the caller; never silently
/// degraded to the stale local list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedReply {
    pub detail: String,
}

impl std::fmt::Display for MalformedReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed dispatch reply: {}", self.detail)
    }
}

impl std::error::Error for MalformedReply {}
