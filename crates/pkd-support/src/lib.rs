//! pkd-support
//!
//! Account-side flows of the driver application: support-ticket drafting and
//! submission, mobile-number confirmation with resend cooldown, and the
//! field validators both forms share. All service interaction goes through
//! the pkd-dispatch traits; this crate owns validation and flow sequencing
//! only.

pub mod mobile;
pub mod ticket;
pub mod validate;
