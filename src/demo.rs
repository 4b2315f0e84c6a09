//! Demo call driven from a bundled directory.
//!
//! Loads a viewer, a channel and its member directory from JSON, starts a
//! [`LocalGroupCall`] on it and animates the call from a background thread.

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::call::{CallState, GroupCall, LocalGroupCall, MuteState};
use crate::state::{Channel, Session, User, UserId};

const DEMO_DIRECTORY: &str = include_str!("../assets/demo_directory.json");

const STEP_INTERVAL: Duration = Duration::from_millis(600);
const LEVEL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct DemoDirectory {
    viewer: User,
    channel: DemoChannel,
}

#[derive(Debug, Deserialize)]
struct DemoChannel {
    id: i64,
    title: String,
    #[serde(default)]
    can_manage_call: bool,
    members_count: Option<i32>,
    users: Vec<User>,
    #[serde(default)]
    participants: Vec<UserId>,
    #[serde(default)]
    invited: Vec<UserId>,
}

fn parse_directory(json: &str) -> Result<DemoDirectory> {
    serde_json::from_str(json).context("Failed to parse demo directory")
}

/// Builds the channel described by `json` and starts a call on it.
fn build_call(json: &str) -> Result<Arc<LocalGroupCall>> {
    let directory = parse_directory(json)?;
    let channel = directory.channel;

    let session = Arc::new(Session::new(directory.viewer));
    let members: Vec<UserId> = channel.users.iter().map(|user| user.id).collect();
    for user in channel.users {
        session.add_user(user);
    }

    let mut built = Channel::new(
        channel.id,
        &channel.title,
        session.clone(),
        members,
        channel.can_manage_call,
    );
    if let Some(count) = channel.members_count {
        built = built.with_members_count(count);
    }

    let call = LocalGroupCall::start(Arc::new(built));
    for user in channel.participants {
        call.join_participant(user);
    }
    session.register_invited_to_call(call.id(), channel.invited);

    info!(
        "Demo call {} ready in \"{}\" with {} known users",
        call.id(),
        channel.title,
        call.channel().members().len()
    );
    Ok(call)
}

/// Starts the bundled demo call and the thread animating it.
pub fn start() -> Result<Arc<LocalGroupCall>> {
    let call = build_call(DEMO_DIRECTORY)?;
    let weak = Arc::downgrade(&call);
    std::thread::Builder::new()
        .name("demo-call".into())
        .spawn(move || drive(weak))
        .context("Failed to spawn demo call thread")?;
    Ok(call)
}

/// Walks the call through connecting, then feeds random voice levels until
/// the call ends or is dropped.
fn drive(call: Weak<LocalGroupCall>) {
    for state in [CallState::Joining, CallState::Connecting, CallState::Joined] {
        std::thread::sleep(STEP_INTERVAL);
        let Some(call) = call.upgrade() else {
            return;
        };
        call.set_state(state);
    }

    let mut rng = rand::thread_rng();
    loop {
        std::thread::sleep(LEVEL_INTERVAL);
        let Some(call) = call.upgrade() else {
            debug!("Demo call dropped, stopping driver");
            return;
        };
        if call.state() == CallState::Ended {
            info!("Demo call {} ended", call.id());
            return;
        }
        let Some(real) = call.channel().call() else {
            warn!("Demo call {} lost its channel call", call.id());
            return;
        };

        let self_id = call.channel().session().self_id();
        for participant in real.participants {
            let speaking = if participant.user == self_id {
                call.muted() == MuteState::Active && rng.gen_bool(0.6)
            } else {
                !participant.muted && rng.gen_bool(0.3)
            };
            let level = if speaking { rng.gen_range(0.1..1.0) } else { 0.0 };
            call.push_level(participant.user, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_directory_parses() {
        let directory = parse_directory(DEMO_DIRECTORY).unwrap();
        assert_eq!(directory.viewer.id, UserId(1));
        assert!(directory.channel.users.iter().any(|user| user.is_bot));
    }

    #[test]
    fn test_build_call_populates_channel() {
        let call = build_call(DEMO_DIRECTORY).unwrap();
        let channel = call.channel();
        let real = channel.call().unwrap();

        assert_eq!(real.id, call.id());
        assert_eq!(real.participants.len(), 3);
        assert_eq!(channel.members_count(), 9);
        assert!(channel.can_manage_call());
        assert!(
            channel
                .session()
                .invited_to_call_users(call.id())
                .contains(&UserId(4))
        );
    }

    #[test]
    fn test_minimal_directory_defaults() {
        let json = r#"{
            "viewer": { "id": 10, "first_name": "Solo" },
            "channel": {
                "id": 5,
                "title": "Quiet",
                "users": [{ "id": 10, "first_name": "Solo" }]
            }
        }"#;
        let call = build_call(json).unwrap();
        let channel = call.channel();

        assert!(!channel.can_manage_call());
        assert_eq!(channel.members_count(), 1);
        assert_eq!(call.state(), CallState::Creating);
        assert!(channel.session().invited_to_call_users(call.id()).is_empty());
    }

    #[test]
    fn test_malformed_directory_is_an_error() {
        let Err(err) = build_call("{ \"viewer\": 3 }") else {
            panic!("malformed directory accepted");
        };
        assert!(err.to_string().contains("demo directory"));
    }
}
