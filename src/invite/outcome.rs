//! Turning an invite result into the notification shown to the viewer.

use crate::call::InviteOutcome;
use crate::lang::{self, RichText};

/// Transient notification shown over the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: RichText,
}

/// Returns the toast for `outcome`, if any: inviting nobody is silent.
pub fn invite_toast(outcome: &InviteOutcome) -> Option<Toast> {
    match outcome {
        InviteOutcome::InvitedSingleUser(user) => Some(Toast {
            text: lang::group_call_invite_done_user(&user.first_name),
        }),
        InviteOutcome::InvitedCount(0) => None,
        InviteOutcome::InvitedCount(count) => Some(Toast {
            text: lang::group_call_invite_done_many(*count),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::User;

    #[test]
    fn test_zero_count_is_silent() {
        assert!(invite_toast(&InviteOutcome::InvitedCount(0)).is_none());
    }

    #[test]
    fn test_count_toast_is_pluralized() {
        let toast = invite_toast(&InviteOutcome::InvitedCount(4)).unwrap();
        assert_eq!(toast.text.plain(), "You invited 4 members to the voice chat.");
    }

    #[test]
    fn test_single_user_toast_names_first_name() {
        let mut user = User::new(9, "Grace");
        user.last_name = "Hopper".to_string();
        let toast = invite_toast(&InviteOutcome::InvitedSingleUser(user)).unwrap();
        assert_eq!(toast.text.plain(), "You invited Grace to the voice chat.");
        assert!(toast.text.spans.iter().any(|s| s.bold && s.text == "Grace"));
    }
}
