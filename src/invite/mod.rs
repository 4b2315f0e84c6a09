//! Inviting channel members to the running call.
//!
//! - `controller` - Invite list, already-in reconciliation and the counter
//! - `outcome` - Notification for the result of an invite

pub mod controller;
pub mod outcome;

pub use controller::{InviteController, InviteRow, RowState};
pub use outcome::{Toast, invite_toast};
