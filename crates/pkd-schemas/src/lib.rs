use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trackable item within an order.
///
/// `confirmed` is the tracking-confirmation flag: it transitions false → true
/// at most once per pickup session and never reverts. The dispatch service is
/// the only party that sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "trackingCode")]
    pub tracking_code: String,
    #[serde(rename = "trackingConfirmation")]
    pub confirmed: bool,
}

impl Package {
    pub fn new(tracking_code: impl Into<String>, confirmed: bool) -> Self {
        Self {
            tracking_code: tracking_code.into(),
            confirmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// A delivery/pickup unit. Package order is registration order and is
/// significant: the confirmation UI renders the list positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub receiver: Receiver,
    pub packages: Vec<Package>,
}

/// Partial order update carried by a tracking reply: the authoritative
/// package list only. The store replaces its list wholesale with this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPatch {
    pub packages: Vec<Package>,
}

// ---------------------------------------------------------------------------
// Dispatch reply envelopes (consumed contract)
// ---------------------------------------------------------------------------

/// Reply to a tracking-code submission.
///
/// `success = false` is an application-level rejection (code not related to
/// the order), not an error; `message` is display-ready and passed through
/// verbatim. On success the service includes the post-update package list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reply to a pickup-finalization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "errorCode", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Reply to a mobile-number confirmation. `token` is the session token the
/// caller adopts on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmMobileReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendCodeReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Support-ticket submission
// ---------------------------------------------------------------------------

/// Photo metadata attached to a support ticket. Image bytes and device paths
/// stay outside this core; the service receives metadata plus an upload the
/// transport layer owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAttachment {
    #[serde(rename = "name")]
    pub file_name: String,
    #[serde(rename = "type")]
    pub mime: String,
}

/// A validated support ticket ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSubmission {
    pub category: String,
    pub details: String,
    #[serde(rename = "orderId", default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub photos: Vec<PhotoAttachment>,
    pub created_at_utc: DateTime<Utc>,
}
