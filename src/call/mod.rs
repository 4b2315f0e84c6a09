//! The group call collaborator consumed by the panel.
//!
//! - `GroupCall` - Operations and observable state of a live call
//! - `local` - In-memory call used by the desktop shell and tests

pub mod local;

use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use crate::state::{Channel, User, UserId};

pub use local::LocalGroupCall;

/// Microphone state of the viewer in the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteState {
    Active,
    Muted,
    ForceMuted,
}

/// Lifecycle of the call connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Creating,
    Joining,
    Connecting,
    Joined,
    HangingUp,
    Failed,
    Ended,
}

impl CallState {
    /// Whether the call has not finished connecting yet.
    pub fn is_connecting(self) -> bool {
        matches!(
            self,
            CallState::Creating | CallState::Joining | CallState::Connecting
        )
    }
}

/// Audio level reported for one participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUpdate {
    pub user: UserId,
    pub value: f32,
    pub is_self: bool,
}

/// Result of inviting users to a call.
///
/// A call that invited exactly one user reports who it was so the caller can
/// name them; otherwise it reports how many users were invited.
#[derive(Debug, Clone, PartialEq)]
pub enum InviteOutcome {
    InvitedCount(usize),
    InvitedSingleUser(User),
}

pub trait GroupCall: Send + Sync {
    fn id(&self) -> Uuid;
    fn channel(&self) -> Arc<Channel>;

    fn state(&self) -> CallState;
    fn muted(&self) -> MuteState;
    fn set_muted(&self, mute: MuteState);

    /// Mutes or unmutes another participant.
    fn toggle_mute(&self, user: UserId, mute: bool);

    fn invite_users(&self, users: &[UserId]) -> InviteOutcome;

    /// Ends the call for everyone.
    fn discard(&self);
    /// Leaves the call, keeping it running for the others.
    fn hangup(&self);

    fn muted_value(&self) -> watch::Receiver<MuteState>;
    fn state_value(&self) -> watch::Receiver<CallState>;
    fn level_updates(&self) -> broadcast::Receiver<LevelUpdate>;
}
