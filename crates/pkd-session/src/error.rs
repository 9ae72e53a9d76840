use pkd_dispatch::DispatchError;
use pkd_reconcile::MalformedReply;
use std::fmt;

/// Why a session operation did not produce a report.
///
/// The validation variants (`EmptyCode`, `NoPackages`, `ScanInFlight`) are
/// recovered locally — the dispatch service is never called for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The scanned code was empty or whitespace.
    EmptyCode,
    /// The session's order has no packages to confirm.
    NoPackages,
    /// A prior scan is still outstanding; re-submit after it completes or
    /// after `abandon_scan`.
    ScanInFlight,
    /// The dispatch call itself failed.
    Dispatch(DispatchError),
    /// The service replied success without the payload the contract requires.
    MalformedReply(MalformedReply),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyCode => write!(f, "scanned code is empty"),
            SessionError::NoPackages => write!(f, "order has no packages to confirm"),
            SessionError::ScanInFlight => write!(f, "a scan is already in flight"),
            SessionError::Dispatch(err) => write!(f, "dispatch failed: {err}"),
            SessionError::MalformedReply(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Dispatch(err) => Some(err),
            SessionError::MalformedReply(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DispatchError> for SessionError {
    fn from(err: DispatchError) -> Self {
        SessionError::Dispatch(err)
    }
}

impl From<MalformedReply> for SessionError {
    fn from(err: MalformedReply) -> Self {
        SessionError::MalformedReply(err)
    }
}
