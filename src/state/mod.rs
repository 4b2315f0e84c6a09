//! Peer and channel data shared with the call panel.
//!
//! This module contains the data types the panel reads from the session:
//!
//! - [`UserId`] / [`User`] - Directory entries
//! - [`Channel`] - The group hosting the call, with its member directory
//! - [`RealCall`] / [`Participant`] - Server view of the running call
//! - [`Session`] - The viewer's identity, user lookup and invited-users cache

use dashmap::DashMap;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Unique identifier for a user in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl User {
    pub fn new(id: u64, first_name: &str) -> Self {
        Self {
            id: UserId(id),
            first_name: first_name.to_string(),
            last_name: String::new(),
            is_bot: false,
        }
    }

    pub fn bot(id: u64, first_name: &str) -> Self {
        Self {
            is_bot: true,
            ..Self::new(id, first_name)
        }
    }

    pub fn name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// A member of the running call as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub user: UserId,
    pub muted: bool,
    pub can_self_unmute: bool,
    pub speaking: bool,
}

impl Participant {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            muted: false,
            can_self_unmute: true,
            speaking: false,
        }
    }
}

/// Server-side view of the call attached to a channel.
///
/// `full_count` may lag behind or exceed `participants.len()`: the
/// participant list is loaded in slices while the count arrives with the
/// call itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RealCall {
    pub id: Uuid,
    pub participants: Vec<Participant>,
    pub full_count: i32,
}

impl RealCall {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            participants: Vec::new(),
            full_count: 0,
        }
    }
}

/// The group hosting the call.
pub struct Channel {
    pub id: i64,
    pub title: String,
    session: Arc<Session>,
    members: Vec<UserId>,
    members_count: i32,
    can_manage_call: bool,
    call: Mutex<Option<RealCall>>,
}

impl Channel {
    pub fn new(
        id: i64,
        title: &str,
        session: Arc<Session>,
        members: Vec<UserId>,
        can_manage_call: bool,
    ) -> Self {
        let members_count = members.len() as i32;
        Self {
            id,
            title: title.to_string(),
            session,
            members,
            members_count,
            can_manage_call,
            call: Mutex::new(None),
        }
    }

    /// Overrides the server-reported member count, which may differ from the
    /// size of the loaded directory.
    pub fn with_members_count(mut self, count: i32) -> Self {
        self.members_count = count;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Loaded member directory, in server order.
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn members_count(&self) -> i32 {
        self.members_count
    }

    pub fn can_manage_call(&self) -> bool {
        self.can_manage_call
    }

    pub fn call(&self) -> Option<RealCall> {
        self.call.lock().unwrap().clone()
    }

    pub fn set_call(&self, call: Option<RealCall>) {
        *self.call.lock().unwrap() = call;
    }

    /// Applies `f` to the current call if its id matches `call_id`.
    pub fn update_call(&self, call_id: Uuid, f: impl FnOnce(&mut RealCall)) {
        if let Some(real) = self.call.lock().unwrap().as_mut()
            && real.id == call_id
        {
            f(real);
        }
    }
}

/// The viewer's session: own identity, user directory and the cache of users
/// invited to each call.
pub struct Session {
    self_id: UserId,
    users: DashMap<UserId, User>,
    invited_to_call: DashMap<Uuid, BTreeSet<UserId>>,
}

impl Session {
    pub fn new(self_user: User) -> Self {
        let users = DashMap::new();
        let self_id = self_user.id;
        users.insert(self_id, self_user);
        Self {
            self_id,
            users,
            invited_to_call: DashMap::new(),
        }
    }

    pub fn self_id(&self) -> UserId {
        self.self_id
    }

    pub fn add_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }

    pub fn invited_to_call_users(&self, call_id: Uuid) -> BTreeSet<UserId> {
        self.invited_to_call
            .get(&call_id)
            .map(|set| set.value().clone())
            .unwrap_or_default()
    }

    pub fn register_invited_to_call(&self, call_id: Uuid, users: impl IntoIterator<Item = UserId>) {
        self.invited_to_call.entry(call_id).or_default().extend(users);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invited_users_per_call() {
        let session = Session::new(User::new(1, "Me"));
        let call_a = Uuid::new_v4();
        let call_b = Uuid::new_v4();

        session.register_invited_to_call(call_a, [UserId(2), UserId(3)]);
        session.register_invited_to_call(call_a, [UserId(3)]);

        assert_eq!(session.invited_to_call_users(call_a).len(), 2);
        assert!(session.invited_to_call_users(call_b).is_empty());
    }

    #[test]
    fn test_update_call_ignores_other_ids() {
        let session = Arc::new(Session::new(User::new(1, "Me")));
        let channel = Channel::new(10, "Group", session, vec![UserId(1)], false);
        let id = Uuid::new_v4();
        channel.set_call(Some(RealCall::new(id)));

        channel.update_call(Uuid::new_v4(), |real| real.full_count = 5);
        assert_eq!(channel.call().unwrap().full_count, 0);

        channel.update_call(id, |real| real.full_count = 5);
        assert_eq!(channel.call().unwrap().full_count, 5);
    }

    #[test]
    fn test_user_name() {
        let mut user = User::new(4, "Ada");
        assert_eq!(user.name(), "Ada");
        user.last_name = "Lovelace".to_string();
        assert_eq!(user.name(), "Ada Lovelace");
    }
}
