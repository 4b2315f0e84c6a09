//! In-memory group call.
//!
//! Keeps the channel's [`RealCall`] and the session's invited-users cache in
//! sync the way a server-backed call would, without any transport.

use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};
use uuid::Uuid;

use super::{CallState, GroupCall, InviteOutcome, LevelUpdate, MuteState};
use crate::state::{Channel, Participant, RealCall, UserId};

const LEVEL_CHANNEL_CAPACITY: usize = 64;

pub struct LocalGroupCall {
    id: Uuid,
    channel: Arc<Channel>,
    muted: watch::Sender<MuteState>,
    state: watch::Sender<CallState>,
    levels: broadcast::Sender<LevelUpdate>,
}

impl LocalGroupCall {
    /// Creates a call on `channel` with the viewer as its first participant.
    pub fn start(channel: Arc<Channel>) -> Arc<Self> {
        let id = Uuid::new_v4();
        let self_id = channel.session().self_id();

        let mut real = RealCall::new(id);
        let mut me = Participant::new(self_id);
        me.muted = true;
        real.participants.push(me);
        real.full_count = 1;
        channel.set_call(Some(real));

        info!("Created group call {} in channel {}", id, channel.id);

        let (levels, _) = broadcast::channel(LEVEL_CHANNEL_CAPACITY);
        Arc::new(Self {
            id,
            channel,
            muted: watch::Sender::new(MuteState::Muted),
            state: watch::Sender::new(CallState::Creating),
            levels,
        })
    }

    pub fn set_state(&self, state: CallState) {
        debug!("Call {} state -> {:?}", self.id, state);
        self.state.send_replace(state);
    }

    /// Force-mutes or releases the viewer, as an admin would.
    pub fn set_force_muted(&self, force: bool) {
        let next = if force {
            MuteState::ForceMuted
        } else {
            MuteState::Muted
        };
        self.muted.send_replace(next);
        self.mark_muted(self.channel.session().self_id(), true);
    }

    /// Adds `user` to the participants, as if they accepted an invite.
    pub fn join_participant(&self, user: UserId) {
        self.channel.update_call(self.id, |real| {
            if !real.participants.iter().any(|p| p.user == user) {
                real.participants.push(Participant::new(user));
                real.full_count = real.full_count.max(real.participants.len() as i32);
            }
        });
    }

    pub fn push_level(&self, user: UserId, value: f32) {
        let is_self = user == self.channel.session().self_id();
        self.channel.update_call(self.id, |real| {
            if let Some(p) = real.participants.iter_mut().find(|p| p.user == user) {
                p.speaking = value > 0.05;
            }
        });
        // No subscribers is fine: nobody is rendering levels.
        let _ = self.levels.send(LevelUpdate {
            user,
            value,
            is_self,
        });
    }

    fn mark_muted(&self, user: UserId, muted: bool) {
        self.channel.update_call(self.id, |real| {
            if let Some(p) = real.participants.iter_mut().find(|p| p.user == user) {
                p.muted = muted;
            }
        });
    }

    fn leave(&self, state: CallState) {
        self.set_state(CallState::HangingUp);
        self.set_state(state);
    }
}

impl GroupCall for LocalGroupCall {
    fn id(&self) -> Uuid {
        self.id
    }

    fn channel(&self) -> Arc<Channel> {
        self.channel.clone()
    }

    fn state(&self) -> CallState {
        *self.state.borrow()
    }

    fn muted(&self) -> MuteState {
        *self.muted.borrow()
    }

    fn set_muted(&self, mute: MuteState) {
        debug!("Call {} mute -> {:?}", self.id, mute);
        self.muted.send_replace(mute);
        self.mark_muted(self.channel.session().self_id(), mute != MuteState::Active);
    }

    fn toggle_mute(&self, user: UserId, mute: bool) {
        if !self.channel.can_manage_call() {
            debug!("Ignoring mute request for {}: not an admin", user);
            return;
        }
        self.mark_muted(user, mute);
    }

    fn invite_users(&self, users: &[UserId]) -> InviteOutcome {
        let Some(real) = self.channel.call().filter(|real| real.id == self.id) else {
            return InviteOutcome::InvitedCount(0);
        };
        let session = self.channel.session();
        let invited = session.invited_to_call_users(self.id);
        let to_invite: Vec<UserId> = users
            .iter()
            .copied()
            .filter(|user| {
                !invited.contains(user) && !real.participants.iter().any(|p| p.user == *user)
            })
            .collect();

        session.register_invited_to_call(self.id, to_invite.iter().copied());
        info!("Invited {} users to call {}", to_invite.len(), self.id);

        match to_invite.as_slice() {
            [single] => session
                .user(*single)
                .map(InviteOutcome::InvitedSingleUser)
                .unwrap_or(InviteOutcome::InvitedCount(1)),
            all => InviteOutcome::InvitedCount(all.len()),
        }
    }

    fn discard(&self) {
        info!("Discarding call {}", self.id);
        self.leave(CallState::Ended);
        if self.channel.call().is_some_and(|real| real.id == self.id) {
            self.channel.set_call(None);
        }
    }

    fn hangup(&self) {
        info!("Leaving call {}", self.id);
        let self_id = self.channel.session().self_id();
        self.channel.update_call(self.id, |real| {
            real.participants.retain(|p| p.user != self_id);
            real.full_count = (real.full_count - 1).max(0);
        });
        self.leave(CallState::Ended);
    }

    fn muted_value(&self) -> watch::Receiver<MuteState> {
        self.muted.subscribe()
    }

    fn state_value(&self) -> watch::Receiver<CallState> {
        self.state.subscribe()
    }

    fn level_updates(&self) -> broadcast::Receiver<LevelUpdate> {
        self.levels.subscribe()
    }
}
