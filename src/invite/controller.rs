//! Checkable list of channel members that can be invited to the call.

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::call::{GroupCall, InviteOutcome};
use crate::lang;
use crate::state::{Channel, User, UserId};

/// How a row reacts to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Selectable,
    /// Already in or invited to the call: shown checked, cannot be toggled.
    DisabledChecked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InviteRow {
    pub user: User,
    pub state: RowState,
    checked: bool,
}

impl InviteRow {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn checked(&self) -> bool {
        self.checked || self.state == RowState::DisabledChecked
    }

    pub fn is_selected(&self) -> bool {
        self.checked && self.state == RowState::Selectable
    }
}

pub struct InviteController {
    channel: Arc<Channel>,
    already_in: BTreeSet<UserId>,
    full_in_count: i32,
    skipped: BTreeSet<UserId>,
    rows: Vec<InviteRow>,
    title: String,
    additional_title: String,
}

impl InviteController {
    /// `full_in_count` is the server-reported number of users in the call;
    /// it may be lower than `already_in` until the participant list syncs.
    pub fn new(channel: Arc<Channel>, already_in: BTreeSet<UserId>, full_in_count: i32) -> Self {
        let full_in_count = full_in_count.max(already_in.len() as i32);
        let mut skipped = BTreeSet::new();
        skipped.insert(channel.session().self_id());
        Self {
            channel,
            already_in,
            full_in_count,
            skipped,
            rows: Vec::new(),
            title: String::new(),
            additional_title: String::new(),
        }
    }

    /// Fills the list from the channel's member directory.
    pub fn prepare(&mut self) {
        let channel = self.channel.clone();
        let session = channel.session();
        for &id in channel.members() {
            let Some(user) = session.user(id) else {
                debug!("Skipping unknown member {}", id);
                continue;
            };
            if self.rows.iter().any(|row| row.id() == id) {
                continue;
            }
            if let Some(row) = self.create_row(&user) {
                self.rows.push(row);
            }
        }
        self.update_title();
    }

    /// Builds the row for `user`, or records them as skipped if they can
    /// never be invited.
    pub fn create_row(&mut self, user: &User) -> Option<InviteRow> {
        if user.id == self.channel.session().self_id() || user.is_bot {
            if self.skipped.insert(user.id) {
                self.update_title();
            }
            return None;
        }
        let state = if self.is_already_in(user.id) {
            RowState::DisabledChecked
        } else {
            RowState::Selectable
        };
        Some(InviteRow {
            user: user.clone(),
            state,
            checked: false,
        })
    }

    pub fn row_clicked(&mut self, user: UserId) {
        if let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.id() == user && row.state == RowState::Selectable)
        {
            row.checked = !row.checked;
        }
        self.update_title();
    }

    /// Selection removed from outside the list, e.g. from the chips above it.
    pub fn item_deselected(&mut self, user: UserId) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id() == user) {
            row.checked = false;
        }
        self.update_title();
    }

    pub fn rows(&self) -> &[InviteRow] {
        &self.rows
    }

    pub fn selected_rows(&self) -> impl Iterator<Item = &InviteRow> {
        self.rows.iter().filter(|row| row.is_selected())
    }

    pub fn selected_count(&self) -> usize {
        self.selected_rows().count()
    }

    pub fn skipped(&self) -> &BTreeSet<UserId> {
        &self.skipped
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The "in / can be invited" counter shown next to the title.
    pub fn additional_title(&self) -> &str {
        &self.additional_title
    }

    pub fn already_in_count(&self) -> i32 {
        self.full_in_count.max(self.already_in.len() as i32)
    }

    pub fn is_already_in(&self, user: UserId) -> bool {
        self.already_in.contains(&user)
    }

    fn full_count(&self) -> i32 {
        self.already_in_count() + self.selected_count() as i32
    }

    pub fn counter_text(&self) -> String {
        // The viewer is always counted as in.
        let in_or_invited = self.full_count() - 1;
        let can_be_invited = (self.rows.len() as i32)
            .max(self.channel.members_count() - self.skipped.len() as i32)
            .max(in_or_invited);
        if can_be_invited > 0 {
            format!("{} / {}", in_or_invited, can_be_invited)
        } else {
            String::new()
        }
    }

    fn update_title(&mut self) {
        self.title = lang::group_call_invite_title().to_string();
        self.additional_title = self.counter_text();
    }

    /// Invites every selected user and returns what the call reports.
    ///
    /// # Panics
    ///
    /// If the viewer is among the selected rows; rows for the viewer are
    /// never created by this controller.
    pub fn submit_invites(&self, call: &dyn GroupCall) -> InviteOutcome {
        let self_id = self.channel.session().self_id();
        let users: Vec<UserId> = self
            .selected_rows()
            .map(|row| {
                assert!(row.id() != self_id, "viewer selected in the invite list");
                row.id()
            })
            .collect();
        call.invite_users(&users)
    }
}
