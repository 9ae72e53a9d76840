//! Scenario: validation failures never produce a dispatch call
//!
//! # Invariant under test
//!
//! Precondition failures (empty code, whitespace code, order with no
//! packages) are recovered locally: the session returns a typed error and
//! the service sees zero calls. Proven with the simulator's call counters.

use std::sync::Arc;

use pkd_dispatch_sim::SimDispatch;
use pkd_schemas::{Order, Package, Receiver};
use pkd_session::{PickupSession, SessionError};

fn order(id: &str, packages: Vec<Package>) -> Order {
    Order {
        id: id.to_string(),
        receiver: Receiver {
            name: "Ana".to_string(),
            mobile: None,
        },
        packages,
    }
}

#[tokio::test]
async fn empty_code_is_refused_locally() {
    let sim = Arc::new(SimDispatch::new());
    let seeded = order("ord-1", vec![Package::new("A", false)]);
    sim.seed_order(seeded.clone());
    let mut session = PickupSession::new(sim.clone(), seeded);

    assert_eq!(
        session.submit_scan("").await.unwrap_err(),
        SessionError::EmptyCode
    );
    assert_eq!(
        session.submit_scan("   ").await.unwrap_err(),
        SessionError::EmptyCode,
        "whitespace-only input is an empty code"
    );
    assert_eq!(sim.counters().total(), 0, "service must never be called");
}

#[tokio::test]
async fn order_without_packages_is_refused_locally() {
    let sim = Arc::new(SimDispatch::new());
    let empty = order("ord-2", vec![]);
    sim.seed_order(empty.clone());
    let mut session = PickupSession::new(sim.clone(), empty);

    assert_eq!(
        session.submit_scan("A").await.unwrap_err(),
        SessionError::NoPackages
    );
    assert_eq!(sim.counters().total(), 0);
}

#[tokio::test]
async fn valid_scan_reaches_the_service_exactly_once() {
    let sim = Arc::new(SimDispatch::new());
    let seeded = order("ord-3", vec![Package::new("A", false)]);
    sim.seed_order(seeded.clone());
    let mut session = PickupSession::new(sim.clone(), seeded);

    session.submit_scan("A").await.expect("valid scan");
    assert_eq!(sim.counters().submit_tracking_code, 1);
    assert_eq!(sim.counters().total(), 1);
}
