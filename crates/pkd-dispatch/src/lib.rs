//! Dispatch-service boundary for the driver application.
//!
//! This crate defines **only** the consumed service contract: the two API
//! traits and the transport-class error type. No concrete transport, no
//! session logic, and no reconciliation logic belong here.
//!
//! Application-level rejection (`success = false` plus a display message)
//! travels *inside* the reply envelopes; an `Err` from these traits always
//! means the call itself failed (unreachable service, undecodable payload).

use async_trait::async_trait;
use std::fmt;

use pkd_schemas::{
    ConfirmMobileReply, FinalizeReply, ResendCodeReply, TicketReply, TicketSubmission,
    TrackingReply,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Transport-class failures a dispatch implementation may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Network or transport failure; the request may never have arrived.
    Transport(String),
    /// A response arrived but could not be decoded into its envelope.
    Decode(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Transport(msg) => write!(f, "transport error: {msg}"),
            DispatchError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {}

// ---------------------------------------------------------------------------
// Driver API
// ---------------------------------------------------------------------------

/// Driver-facing dispatch operations.
///
/// Implementations must be object-safe so callers can hold an
/// `Arc<dyn DriverApi>` without knowing the concrete type, and `Send + Sync`
/// so they can cross async task boundaries.
#[async_trait]
pub trait DriverApi: Send + Sync {
    /// Verify a scanned tracking code against an order.
    ///
    /// The service is the single source of truth for whether the code
    /// belongs to the order; on success the reply carries the post-update
    /// package list, which callers adopt wholesale.
    async fn submit_tracking_code(
        &self,
        order_id: &str,
        code: &str,
    ) -> Result<TrackingReply, DispatchError>;

    /// Mark an order's pickup complete.
    ///
    /// The service owns the completion verdict; callers pass the request
    /// through even if their local view disagrees.
    async fn finalize_pickup(&self, order_id: &str) -> Result<FinalizeReply, DispatchError>;

    /// Submit a support ticket.
    async fn submit_ticket(&self, ticket: &TicketSubmission)
        -> Result<TicketReply, DispatchError>;
}

// ---------------------------------------------------------------------------
// Auth API
// ---------------------------------------------------------------------------

/// Account/authentication operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Confirm a mobile number with the code the user received.
    /// On success the reply carries the session token to adopt.
    async fn confirm_mobile(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<ConfirmMobileReply, DispatchError>;

    /// Ask the service to send a fresh confirmation code.
    async fn resend_confirm_code(
        &self,
        email: &str,
        mobile: &str,
    ) -> Result<ResendCodeReply, DispatchError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
