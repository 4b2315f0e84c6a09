//! Mute button state derived from the call.

use crate::call::MuteState;
use crate::lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteButtonType {
    Connecting,
    Active,
    Muted,
    ForceMuted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteButtonState {
    pub text: String,
    pub kind: MuteButtonType,
}

impl MuteButtonState {
    pub fn connecting() -> Self {
        Self {
            text: lang::group_call_connecting().to_string(),
            kind: MuteButtonType::Connecting,
        }
    }
}

/// Label and look of the mute button for the current call state.
pub fn mute_button_state(mute: MuteState, connecting: bool) -> MuteButtonState {
    if connecting {
        return MuteButtonState::connecting();
    }
    let (text, kind) = match mute {
        MuteState::ForceMuted => (lang::group_call_force_muted(), MuteButtonType::ForceMuted),
        MuteState::Muted => (lang::call_unmute_audio(), MuteButtonType::Muted),
        MuteState::Active => (lang::call_mute_audio(), MuteButtonType::Active),
    };
    MuteButtonState {
        text: text.to_string(),
        kind,
    }
}

/// State a click on the mute button switches to; `None` while force-muted.
pub fn toggled_mute(current: MuteState) -> Option<MuteState> {
    match current {
        MuteState::ForceMuted => None,
        MuteState::Active => Some(MuteState::Muted),
        MuteState::Muted => Some(MuteState::Active),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connecting_wins_over_mute_state() {
        for mute in [MuteState::Active, MuteState::Muted, MuteState::ForceMuted] {
            let state = mute_button_state(mute, true);
            assert_eq!(state.kind, MuteButtonType::Connecting);
            assert_eq!(state.text, "Connecting...");
        }
    }

    #[test]
    fn test_joined_states() {
        let state = mute_button_state(MuteState::ForceMuted, false);
        assert_eq!(state.kind, MuteButtonType::ForceMuted);
        assert_eq!(state.text, "Muted by admin");

        let state = mute_button_state(MuteState::Muted, false);
        assert_eq!(state.kind, MuteButtonType::Muted);
        assert_eq!(state.text, "Unmute");

        let state = mute_button_state(MuteState::Active, false);
        assert_eq!(state.kind, MuteButtonType::Active);
        assert_eq!(state.text, "Mute");
    }

    #[test]
    fn test_toggled_mute() {
        assert_eq!(toggled_mute(MuteState::Active), Some(MuteState::Muted));
        assert_eq!(toggled_mute(MuteState::Muted), Some(MuteState::Active));
        assert_eq!(toggled_mute(MuteState::ForceMuted), None);
    }
}
