//! Deterministic in-memory dispatch simulator.
//!
//! Design decisions (kept intentionally simple/deterministic):
//! - Orders are seeded explicitly with [`SimDispatch::seed_order`]; nothing
//!   is created implicitly.
//! - A known tracking code sets that package's confirmation flag (monotonic:
//!   re-scanning keeps it true) and the reply carries the full post-update
//!   package list.
//! - An unknown code is rejected with a fixed message and no state change.
//! - Finalize succeeds only when every package is confirmed; otherwise it is
//!   rejected with error code `PICKUP_INCOMPLETE`.
//! - Session tokens are stable strings derived from the user id:
//!   `"sim:token:{user_id}"`.
//! - No randomness. No timestamps. Fault injection is explicit via
//!   [`SimDispatch::fail_next_with`].
//!
//! Call counters let tests prove that validation short-circuits never reach
//! the service.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pkd_dispatch::{AuthApi, DispatchError, DriverApi};
use pkd_schemas::{
    ConfirmMobileReply, FinalizeReply, Order, OrderPatch, ResendCodeReply, TicketReply,
    TicketSubmission, TrackingReply,
};

pub const MSG_ORDER_NOT_FOUND: &str = "order not found";
pub const MSG_CODE_NOT_RELATED: &str = "code not related to this order";
pub const MSG_PICKUP_INCOMPLETE: &str = "pickup incomplete";
pub const MSG_BAD_CONFIRM_CODE: &str = "confirmation code does not match";

pub const ERR_PICKUP_INCOMPLETE: &str = "PICKUP_INCOMPLETE";

/// Per-operation call counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounters {
    pub submit_tracking_code: u64,
    pub finalize_pickup: u64,
    pub submit_ticket: u64,
    pub confirm_mobile: u64,
    pub resend_confirm_code: u64,
}

impl CallCounters {
    pub fn total(&self) -> u64 {
        self.submit_tracking_code
            + self.finalize_pickup
            + self.submit_ticket
            + self.confirm_mobile
            + self.resend_confirm_code
    }
}

#[derive(Debug, Default)]
struct SimState {
    orders: BTreeMap<String, Order>,
    finalized: BTreeMap<String, Order>,
    confirm_codes: BTreeMap<String, String>,
    tickets: Vec<TicketSubmission>,
    fail_next: Option<DispatchError>,
    calls: CallCounters,
}

/// In-memory stand-in for the remote dispatch service.
///
/// Interior mutability keeps the [`DriverApi`]/[`AuthApi`] `&self` receivers;
/// the lock is never held across an await point.
#[derive(Debug, Default)]
pub struct SimDispatch {
    state: Mutex<SimState>,
}

impl SimDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an order for pickup. Replaces any previous order with the same id.
    pub fn seed_order(&self, order: Order) {
        let mut st = self.state.lock().unwrap();
        st.orders.insert(order.id.clone(), order);
    }

    /// Register the confirmation code the service expects for a user.
    pub fn seed_confirm_code(&self, user_id: impl Into<String>, code: impl Into<String>) {
        let mut st = self.state.lock().unwrap();
        st.confirm_codes.insert(user_id.into(), code.into());
    }

    /// Make the next call (any operation) fail with `err`, once.
    pub fn fail_next_with(&self, err: DispatchError) {
        self.state.lock().unwrap().fail_next = Some(err);
    }

    pub fn counters(&self) -> CallCounters {
        self.state.lock().unwrap().calls
    }

    /// Current server-side view of an order, if seeded.
    pub fn order(&self, order_id: &str) -> Option<Order> {
        self.state.lock().unwrap().orders.get(order_id).cloned()
    }

    pub fn is_finalized(&self, order_id: &str) -> bool {
        self.state.lock().unwrap().finalized.contains_key(order_id)
    }

    /// Tickets received so far, in submission order.
    pub fn tickets(&self) -> Vec<TicketSubmission> {
        self.state.lock().unwrap().tickets.clone()
    }

    fn take_fault(st: &mut SimState) -> Option<DispatchError> {
        st.fail_next.take()
    }
}

#[async_trait]
impl DriverApi for SimDispatch {
    async fn submit_tracking_code(
        &self,
        order_id: &str,
        code: &str,
    ) -> Result<TrackingReply, DispatchError> {
        let mut st = self.state.lock().unwrap();
        if let Some(err) = Self::take_fault(&mut st) {
            return Err(err);
        }
        st.calls.submit_tracking_code += 1;

        let order = match st.orders.get_mut(order_id) {
            Some(order) => order,
            None => {
                return Ok(TrackingReply {
                    success: false,
                    order: None,
                    message: Some(MSG_ORDER_NOT_FOUND.to_string()),
                })
            }
        };

        let known = order.packages.iter_mut().find(|p| p.tracking_code == code);
        match known {
            Some(package) => {
                package.confirmed = true;
                Ok(TrackingReply {
                    success: true,
                    order: Some(OrderPatch {
                        packages: order.packages.clone(),
                    }),
                    message: None,
                })
            }
            None => Ok(TrackingReply {
                success: false,
                order: None,
                message: Some(MSG_CODE_NOT_RELATED.to_string()),
            }),
        }
    }

    async fn finalize_pickup(&self, order_id: &str) -> Result<FinalizeReply, DispatchError> {
        let mut st = self.state.lock().unwrap();
        if let Some(err) = Self::take_fault(&mut st) {
            return Err(err);
        }
        st.calls.finalize_pickup += 1;

        let order = match st.orders.get(order_id) {
            Some(order) => order.clone(),
            None => {
                return Ok(FinalizeReply {
                    success: false,
                    order: None,
                    message: Some(MSG_ORDER_NOT_FOUND.to_string()),
                    error_code: None,
                })
            }
        };

        if !order.packages.iter().all(|p| p.confirmed) {
            return Ok(FinalizeReply {
                success: false,
                order: None,
                message: Some(MSG_PICKUP_INCOMPLETE.to_string()),
                error_code: Some(ERR_PICKUP_INCOMPLETE.to_string()),
            });
        }

        st.finalized.insert(order_id.to_string(), order.clone());
        Ok(FinalizeReply {
            success: true,
            order: Some(order),
            message: None,
            error_code: None,
        })
    }

    async fn submit_ticket(
        &self,
        ticket: &TicketSubmission,
    ) -> Result<TicketReply, DispatchError> {
        let mut st = self.state.lock().unwrap();
        if let Some(err) = Self::take_fault(&mut st) {
            return Err(err);
        }
        st.calls.submit_ticket += 1;
        st.tickets.push(ticket.clone());

        Ok(TicketReply {
            success: true,
            message: Some("support ticket registered".to_string()),
        })
    }
}

#[async_trait]
impl AuthApi for SimDispatch {
    async fn confirm_mobile(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<ConfirmMobileReply, DispatchError> {
        let mut st = self.state.lock().unwrap();
        if let Some(err) = Self::take_fault(&mut st) {
            return Err(err);
        }
        st.calls.confirm_mobile += 1;

        let matches = st.confirm_codes.get(user_id).map(String::as_str) == Some(code);
        if matches {
            Ok(ConfirmMobileReply {
                success: true,
                token: Some(format!("sim:token:{user_id}")),
                message: None,
            })
        } else {
            Ok(ConfirmMobileReply {
                success: false,
                token: None,
                message: Some(MSG_BAD_CONFIRM_CODE.to_string()),
            })
        }
    }

    async fn resend_confirm_code(
        &self,
        _email: &str,
        _mobile: &str,
    ) -> Result<ResendCodeReply, DispatchError> {
        let mut st = self.state.lock().unwrap();
        if let Some(err) = Self::take_fault(&mut st) {
            return Err(err);
        }
        st.calls.resend_confirm_code += 1;

        Ok(ResendCodeReply {
            success: true,
            message: None,
        })
    }
}
