//! User-facing strings of the call panel.

/// A run of text, optionally bold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub bold: bool,
}

/// Text with bold ranges, rendered as spans by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    pub spans: Vec<TextSpan>,
}

impl RichText {
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn push(mut self, text: &str, bold: bool) -> Self {
        if !text.is_empty() {
            self.spans.push(TextSpan {
                text: text.to_string(),
                bold,
            });
        }
        self
    }
}

pub fn group_call_title() -> &'static str {
    "Voice Chat"
}

pub fn group_call_connecting() -> &'static str {
    "Connecting..."
}

pub fn group_call_force_muted() -> &'static str {
    "Muted by admin"
}

pub fn call_unmute_audio() -> &'static str {
    "Unmute"
}

pub fn call_mute_audio() -> &'static str {
    "Mute"
}

pub fn menu_settings() -> &'static str {
    "Settings"
}

pub fn box_leave() -> &'static str {
    "Leave"
}

pub fn cancel() -> &'static str {
    "Cancel"
}

pub fn close() -> &'static str {
    "Close"
}

pub fn group_call_leave_title() -> &'static str {
    "Leave voice chat"
}

pub fn group_call_leave_sure() -> &'static str {
    "Are you sure you want to leave this voice chat?"
}

pub fn group_call_end() -> &'static str {
    "End voice chat"
}

pub fn group_call_leave() -> &'static str {
    "Leave"
}

pub fn group_call_invite_title() -> &'static str {
    "Add Members"
}

pub fn group_call_invite_button() -> &'static str {
    "Invite"
}

pub fn group_call_add_members() -> &'static str {
    "Invite Member"
}

pub fn group_call_invite_done_user(first_name: &str) -> RichText {
    RichText::default()
        .push("You invited ", false)
        .push(first_name, true)
        .push(" to the voice chat.", false)
}

pub fn group_call_invite_done_many(count: usize) -> RichText {
    let noun = if count == 1 { "member" } else { "members" };
    RichText::default()
        .push("You invited ", false)
        .push(&format!("{} {}", count, noun), true)
        .push(" to the voice chat.", false)
}
