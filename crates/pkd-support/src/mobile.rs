//! Mobile-number confirmation: code entry and resend with cooldown.
//!
//! The confirmation code is entered into a fixed five-cell field, so length
//! and digit checks happen locally; the service owns the actual match. The
//! resend cooldown is driven by explicit `now` arguments — no hidden clock
//! reads, so the arithmetic is deterministic under test.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use pkd_dispatch::{AuthApi, DispatchError};

/// Number of cells in the confirmation-code input field.
pub const CONFIRM_CODE_LEN: usize = 5;

/// Seconds a user must wait between resend requests.
pub const RESEND_COOLDOWN_SECS: i64 = 60;

/// Local validation failure for an entered confirmation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileCodeError {
    WrongLength { got: usize },
    NonDigit,
}

impl fmt::Display for MobileCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobileCodeError::WrongLength { got } => {
                write!(f, "confirmation code must be {CONFIRM_CODE_LEN} digits (got {got})")
            }
            MobileCodeError::NonDigit => write!(f, "confirmation code must be digits only"),
        }
    }
}

impl std::error::Error for MobileCodeError {}

/// Why a confirmation-flow operation did not produce an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileFlowError {
    /// The entered code failed local validation; the service was not called.
    InvalidCode(MobileCodeError),
    /// A resend was requested while the cooldown is still running; the
    /// service was not called.
    CooldownActive { seconds_remaining: i64 },
    /// The dispatch call itself failed.
    Dispatch(DispatchError),
    /// The service confirmed success but sent no session token.
    MissingToken,
}

impl fmt::Display for MobileFlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobileFlowError::InvalidCode(err) => write!(f, "{err}"),
            MobileFlowError::CooldownActive { seconds_remaining } => {
                write!(f, "resend available in {seconds_remaining}s")
            }
            MobileFlowError::Dispatch(err) => write!(f, "dispatch failed: {err}"),
            MobileFlowError::MissingToken => {
                write!(f, "malformed dispatch reply: success carried no session token")
            }
        }
    }
}

impl std::error::Error for MobileFlowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MobileFlowError::InvalidCode(err) => Some(err),
            MobileFlowError::Dispatch(err) => Some(err),
            _ => None,
        }
    }
}

/// Validate an entered confirmation code: exactly five ASCII digits.
pub fn validate_confirm_code(code: &str) -> Result<(), MobileCodeError> {
    let code = code.trim();
    let got = code.chars().count();
    if got != CONFIRM_CODE_LEN {
        return Err(MobileCodeError::WrongLength { got });
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(MobileCodeError::NonDigit);
    }
    Ok(())
}

/// Service verdict on a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The number is confirmed; `token` is the session token to adopt.
    Confirmed { token: String },
    /// The code did not match; the user re-enters or resends.
    Rejected { message: Option<String> },
}

/// Confirm a mobile number with the code the user entered.
pub async fn confirm_mobile(
    api: &dyn AuthApi,
    user_id: &str,
    code: &str,
) -> Result<ConfirmOutcome, MobileFlowError> {
    validate_confirm_code(code).map_err(MobileFlowError::InvalidCode)?;

    let reply = api
        .confirm_mobile(user_id, code.trim())
        .await
        .map_err(MobileFlowError::Dispatch)?;

    if !reply.success {
        warn!(user_id, "mobile confirmation rejected by dispatch");
        return Ok(ConfirmOutcome::Rejected {
            message: reply.message,
        });
    }

    match reply.token {
        Some(token) => {
            info!(user_id, "mobile number confirmed");
            Ok(ConfirmOutcome::Confirmed { token })
        }
        None => Err(MobileFlowError::MissingToken),
    }
}

/// Tracks when the next resend request is allowed.
///
/// Starts ready; arms for [`RESEND_COOLDOWN_SECS`] after each successful
/// send. Pass the current time in explicitly.
#[derive(Clone, Debug, Default)]
pub struct ResendCooldown {
    ready_at: Option<DateTime<Utc>>,
}

impl ResendCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole seconds until a resend is allowed; 0 when ready.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        self.ready_at
            .map(|t| (t - now).num_seconds().max(0))
            .unwrap_or(0)
    }

    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        self.seconds_remaining(now) == 0
    }

    fn arm(&mut self, now: DateTime<Utc>) {
        self.ready_at = Some(now + Duration::seconds(RESEND_COOLDOWN_SECS));
    }
}

/// Service verdict on a resend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    Sent,
    Rejected { message: Option<String> },
}

/// Request a fresh confirmation code, subject to the cooldown.
///
/// A refusal while cooling down never reaches the service. The cooldown is
/// armed only after the service accepts the send, so a transport failure
/// stays immediately retryable.
pub async fn resend_confirm_code(
    api: &dyn AuthApi,
    cooldown: &mut ResendCooldown,
    email: &str,
    mobile: &str,
    now: DateTime<Utc>,
) -> Result<ResendOutcome, MobileFlowError> {
    let seconds_remaining = cooldown.seconds_remaining(now);
    if seconds_remaining > 0 {
        return Err(MobileFlowError::CooldownActive { seconds_remaining });
    }

    let reply = api
        .resend_confirm_code(email, mobile)
        .await
        .map_err(MobileFlowError::Dispatch)?;

    if reply.success {
        cooldown.arm(now);
        info!("confirmation code resent");
        Ok(ResendOutcome::Sent)
    } else {
        Ok(ResendOutcome::Rejected {
            message: reply.message,
        })
    }
}
