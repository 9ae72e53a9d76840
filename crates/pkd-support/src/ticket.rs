//! Support-ticket drafting, validation, and submission.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use pkd_dispatch::{DispatchError, DriverApi};
use pkd_schemas::{PhotoAttachment, TicketSubmission};

/// The form accepts between zero and five photo attachments.
pub const MAX_TICKET_PHOTOS: usize = 5;

/// One failing field of a ticket draft. `Display` strings are the
/// form-level messages shown next to each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketFieldError {
    CategoryRequired,
    DetailsRequired,
    TooManyPhotos { got: usize },
}

impl fmt::Display for TicketFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketFieldError::CategoryRequired => write!(f, "Enquiry type required"),
            TicketFieldError::DetailsRequired => write!(f, "Write some details"),
            TicketFieldError::TooManyPhotos { got } => {
                write!(f, "at most {MAX_TICKET_PHOTOS} photos may be attached (got {got})")
            }
        }
    }
}

impl std::error::Error for TicketFieldError {}

/// Why a ticket submission did not produce an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// One or more fields failed validation; the service was not called.
    Invalid(Vec<TicketFieldError>),
    /// The dispatch call itself failed.
    Dispatch(DispatchError),
}

impl fmt::Display for TicketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketError::Invalid(errors) => {
                write!(f, "ticket draft invalid: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            TicketError::Dispatch(err) => write!(f, "dispatch failed: {err}"),
        }
    }
}

impl std::error::Error for TicketError {}

/// Service verdict on a submitted ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    Submitted { message: Option<String> },
    Rejected { message: Option<String> },
}

/// An in-progress support ticket as the form builds it up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub category: String,
    pub details: String,
    /// Optionally tie the ticket to one of the driver's orders.
    pub order_id: Option<String>,
    pub photos: Vec<PhotoAttachment>,
}

impl TicketDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach photo metadata. Refuses past the cap so a draft can never
    /// accumulate into an unsubmittable state.
    pub fn attach_photo(&mut self, photo: PhotoAttachment) -> Result<(), TicketFieldError> {
        if self.photos.len() >= MAX_TICKET_PHOTOS {
            return Err(TicketFieldError::TooManyPhotos {
                got: self.photos.len() + 1,
            });
        }
        self.photos.push(photo);
        Ok(())
    }

    /// Every failing field, not first-failure: the form highlights each one
    /// in a single pass.
    pub fn validate(&self) -> Vec<TicketFieldError> {
        let mut errors = Vec::new();
        if self.category.trim().is_empty() {
            errors.push(TicketFieldError::CategoryRequired);
        }
        if self.details.trim().is_empty() {
            errors.push(TicketFieldError::DetailsRequired);
        }
        if self.photos.len() > MAX_TICKET_PHOTOS {
            errors.push(TicketFieldError::TooManyPhotos {
                got: self.photos.len(),
            });
        }
        errors
    }

    /// Consume a clean draft into a submission stamped at `now`.
    pub fn into_submission(
        self,
        now: DateTime<Utc>,
    ) -> Result<TicketSubmission, TicketError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(TicketError::Invalid(errors));
        }
        Ok(TicketSubmission {
            category: self.category,
            details: self.details,
            order_id: self.order_id,
            photos: self.photos,
            created_at_utc: now,
        })
    }
}

/// Validate and submit a ticket draft.
///
/// Validation failures never reach the service. Service rejection is an
/// outcome, not an error; only a failed call is an `Err`.
pub async fn submit_ticket(
    api: &dyn DriverApi,
    draft: TicketDraft,
    now: DateTime<Utc>,
) -> Result<TicketOutcome, TicketError> {
    let submission = draft.into_submission(now)?;

    let reply = api
        .submit_ticket(&submission)
        .await
        .map_err(TicketError::Dispatch)?;

    if reply.success {
        info!(category = %submission.category, "support ticket submitted");
        Ok(TicketOutcome::Submitted {
            message: reply.message,
        })
    } else {
        warn!(category = %submission.category, "support ticket rejected by dispatch");
        Ok(TicketOutcome::Rejected {
            message: reply.message,
        })
    }
}
