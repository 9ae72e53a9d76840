//! Scenario: mobile confirmation and resend cooldown against the simulator
//!
//! # Invariant under test
//!
//! A malformed code is refused locally (zero service calls); a matching
//! code yields the session token; resend requests inside the 60-second
//! cooldown window are refused locally and allowed again once it elapses.

use chrono::{Duration, TimeZone, Utc};
use pkd_dispatch_sim::SimDispatch;
use pkd_support::mobile::{
    confirm_mobile, resend_confirm_code, ConfirmOutcome, MobileFlowError, ResendCooldown,
    ResendOutcome, RESEND_COOLDOWN_SECS,
};

#[tokio::test]
async fn malformed_code_is_refused_without_a_service_call() {
    let sim = SimDispatch::new();
    sim.seed_confirm_code("user-1", "12345");

    let err = confirm_mobile(&sim, "user-1", "12").await.unwrap_err();
    assert!(matches!(err, MobileFlowError::InvalidCode(_)));
    assert_eq!(sim.counters().confirm_mobile, 0);
}

#[tokio::test]
async fn matching_code_yields_the_session_token() {
    let sim = SimDispatch::new();
    sim.seed_confirm_code("user-1", "12345");

    let outcome = confirm_mobile(&sim, "user-1", "12345").await.unwrap();
    assert_eq!(
        outcome,
        ConfirmOutcome::Confirmed {
            token: "sim:token:user-1".to_string()
        }
    );
}

#[tokio::test]
async fn wrong_code_is_a_rejection_not_an_error() {
    let sim = SimDispatch::new();
    sim.seed_confirm_code("user-1", "12345");

    let outcome = confirm_mobile(&sim, "user-1", "54321").await.unwrap();
    assert!(matches!(outcome, ConfirmOutcome::Rejected { message: Some(_) }));
}

#[tokio::test]
async fn resend_is_refused_during_cooldown_and_allowed_after() {
    let sim = SimDispatch::new();
    let mut cooldown = ResendCooldown::new();
    let t0 = Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap();

    // First resend goes through and arms the cooldown.
    let sent = resend_confirm_code(&sim, &mut cooldown, "d@example.com", "5512345678", t0)
        .await
        .unwrap();
    assert_eq!(sent, ResendOutcome::Sent);
    assert_eq!(sim.counters().resend_confirm_code, 1);

    // Thirty seconds in: refused locally, service untouched.
    let err = resend_confirm_code(
        &sim,
        &mut cooldown,
        "d@example.com",
        "5512345678",
        t0 + Duration::seconds(30),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        MobileFlowError::CooldownActive {
            seconds_remaining: RESEND_COOLDOWN_SECS - 30
        }
    );
    assert_eq!(sim.counters().resend_confirm_code, 1);

    // Cooldown elapsed: allowed again.
    let again = resend_confirm_code(
        &sim,
        &mut cooldown,
        "d@example.com",
        "5512345678",
        t0 + Duration::seconds(RESEND_COOLDOWN_SECS),
    )
    .await
    .unwrap();
    assert_eq!(again, ResendOutcome::Sent);
    assert_eq!(sim.counters().resend_confirm_code, 2);
}
