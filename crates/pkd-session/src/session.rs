//! The pickup session: validate → dispatch → reconcile → apply.
//!
//! The session is the single choke-point for the two service operations a
//! pickup performs. Both run behind the in-flight guard: the UI layer must
//! not race a second scan against an outstanding one, because both would
//! assert authoritative package lists for the same order.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use pkd_dispatch::DriverApi;
use pkd_reconcile::{reconcile_scan, ScanOutcome, ScanReport, ScanSeq};
use pkd_schemas::Order;

use crate::error::SessionError;
use crate::store::OrderStore;

/// Verdict of an explicit finalization request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinalizeReport {
    /// The service accepted completion; `order` is the canonical snapshot
    /// the store has adopted.
    Completed { order: Order },
    /// The service refused; the session stays open and nothing was marked
    /// complete locally.
    Rejected {
        message: Option<String>,
        error_code: Option<String>,
    },
}

pub struct PickupSession {
    api: Arc<dyn DriverApi>,
    store: OrderStore,
    session_id: Uuid,
    in_flight: bool,
}

impl PickupSession {
    pub fn new(api: Arc<dyn DriverApi>, order: Order) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, order_id = %order.id, packages = order.packages.len(), "pickup session opened");
        Self {
            api,
            store: OrderStore::new(order),
            session_id,
            in_flight: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn order(&self) -> &Order {
        self.store.order()
    }

    /// Confirmed-package progress for the presentation layer.
    pub fn confirmed_count(&self) -> usize {
        self.store.confirmed_count()
    }

    pub fn is_complete(&self) -> bool {
        self.store.is_complete()
    }

    /// True while a scan or finalize call is outstanding (or was abandoned
    /// without [`abandon_scan`][Self::abandon_scan]).
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submit one scanned (or manually entered) code.
    ///
    /// Validation failures and the in-flight refusal return before any
    /// dispatch call. On success the store has already adopted the
    /// authoritative package list; the caller inspects
    /// [`ScanReport::pickup_complete`] and decides whether to call
    /// [`finalize`][Self::finalize].
    pub async fn submit_scan(&mut self, code: &str) -> Result<ScanReport, SessionError> {
        if self.in_flight {
            warn!(session_id = %self.session_id, "scan refused: submission already in flight");
            return Err(SessionError::ScanInFlight);
        }
        let code = code.trim();
        if code.is_empty() {
            return Err(SessionError::EmptyCode);
        }
        if self.store.order().packages.is_empty() {
            return Err(SessionError::NoPackages);
        }

        let seq = self.store.issue_seq();
        self.in_flight = true;
        let result = self.submit_scan_inner(seq, code).await;
        self.in_flight = false;
        result
    }

    async fn submit_scan_inner(
        &mut self,
        seq: ScanSeq,
        code: &str,
    ) -> Result<ScanReport, SessionError> {
        let order_id = self.store.order().id.clone();
        let before = self.store.order().packages.clone();

        let reply = self.api.submit_tracking_code(&order_id, code).await?;
        let report = reconcile_scan(&before, code, &reply)?;

        match report.outcome {
            ScanOutcome::NotRelated => {
                info!(
                    session_id = %self.session_id,
                    order_id = %order_id,
                    "scan rejected by dispatch: code not related"
                );
            }
            _ => {
                let decision = self
                    .store
                    .apply_packages(seq, report.updated_packages.clone());
                if !decision.is_applied() {
                    warn!(
                        session_id = %self.session_id,
                        order_id = %order_id,
                        ?decision,
                        "scan result dropped as stale; store keeps the newer list"
                    );
                }
                if report.stale_local_snapshot {
                    warn!(
                        session_id = %self.session_id,
                        order_id = %order_id,
                        "dispatch accepted a code absent from the local snapshot"
                    );
                }
                info!(
                    session_id = %self.session_id,
                    order_id = %order_id,
                    outcome = ?report.outcome,
                    pickup_complete = report.pickup_complete,
                    confirmed = self.store.confirmed_count(),
                    "scan reconciled"
                );
            }
        }

        Ok(report)
    }

    /// Ask the service to mark the pickup complete.
    ///
    /// Callable before local completion — the service owns the verdict and
    /// this session passes it through. On acceptance the store adopts the
    /// canonical order snapshot; on refusal the session stays open.
    pub async fn finalize(&mut self) -> Result<FinalizeReport, SessionError> {
        if self.in_flight {
            warn!(session_id = %self.session_id, "finalize refused: submission already in flight");
            return Err(SessionError::ScanInFlight);
        }

        let seq = self.store.issue_seq();
        self.in_flight = true;
        let result = self.finalize_inner(seq).await;
        self.in_flight = false;
        result
    }

    async fn finalize_inner(&mut self, seq: ScanSeq) -> Result<FinalizeReport, SessionError> {
        let order_id = self.store.order().id.clone();

        let reply = self.api.finalize_pickup(&order_id).await?;
        if !reply.success {
            warn!(
                session_id = %self.session_id,
                order_id = %order_id,
                error_code = reply.error_code.as_deref().unwrap_or(""),
                "finalize rejected by dispatch"
            );
            return Ok(FinalizeReport::Rejected {
                message: reply.message,
                error_code: reply.error_code,
            });
        }

        let order = match reply.order {
            Some(order) => order,
            None => {
                return Err(SessionError::MalformedReply(pkd_reconcile::MalformedReply {
                    detail: "finalize success carried no order payload".to_string(),
                }))
            }
        };

        self.store.replace_order(seq, order.clone());
        info!(session_id = %self.session_id, order_id = %order_id, "pickup finalized");
        Ok(FinalizeReport::Completed { order })
    }

    /// Recover from an abandoned call (the caller dropped a `submit_scan` or
    /// `finalize` future mid-await, e.g. on navigation away).
    ///
    /// Clears the in-flight guard and invalidates every outstanding
    /// submission, so the abandoned call's result is dropped as stale if it
    /// ever lands.
    pub fn abandon_scan(&mut self) {
        if self.in_flight {
            warn!(session_id = %self.session_id, "abandoning in-flight submission");
        }
        self.in_flight = false;
        self.store.invalidate_outstanding();
    }
}
