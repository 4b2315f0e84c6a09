//! Group call panel controller.
//!
//! Holds everything the panel window shows, independent of how it is drawn:
//!
//! - `mute` - Mute button label and look
//! - `leave_box` - Leave / end call confirmation
//!
//! The panel keeps only a weak handle to the call. Every action upgrades it
//! first and does nothing once the call is gone.

pub mod leave_box;
pub mod mute;

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};
use uuid::Uuid;

use crate::call::{CallState, GroupCall, LevelUpdate, MuteState};
use crate::config::PanelConfig;
use crate::invite::{InviteController, Toast, invite_toast};
use crate::lang;
use crate::layout::geometry::{self, controls_geometry, members_list_top, title_controls_rect};
use crate::layout::{ControlsGeometry, HitTest, Point, Rect, Size, TitleLabel, TitleLayout};
use crate::state::{Channel, User, UserId};

pub use leave_box::{BoxContext, LeaveGroupCallBox};
pub use mute::{MuteButtonState, MuteButtonType, mute_button_state, toggled_mute};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsBox {
    pub call_id: Uuid,
    pub channel_title: String,
}

/// Box shown over the panel body.
pub enum Layer {
    Leave(LeaveGroupCallBox),
    Invite(InviteController),
    Settings(SettingsBox),
}

/// One entry of the members list.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub user: User,
    pub muted: bool,
    pub speaking: bool,
    pub is_self: bool,
    pub can_toggle_mute: bool,
}

struct CallSubscriptions {
    muted: watch::Receiver<MuteState>,
    state: watch::Receiver<CallState>,
    levels: broadcast::Receiver<LevelUpdate>,
}

pub struct GroupPanel {
    config: PanelConfig,
    call: Option<Weak<dyn GroupCall>>,
    channel: Arc<Channel>,
    subscriptions: Option<CallSubscriptions>,
    call_state: CallState,
    mute: MuteButtonState,
    mute_level: f32,
    size: Size,
    members_desired_height: i32,
    geometry: Option<ControlsGeometry>,
    title: TitleLayout,
    layer: Option<Layer>,
    toasts: Vec<Toast>,
    hidden: bool,
}

impl GroupPanel {
    pub fn new(call: &Arc<dyn GroupCall>, config: PanelConfig) -> Self {
        let text = lang::group_call_title();
        let natural_width = config.title_char_width * text.chars().count() as i32;
        let title = TitleLayout::new(text, natural_width, config.title_height);
        let mut panel = Self {
            config,
            call: None,
            channel: call.channel(),
            subscriptions: None,
            call_state: CallState::Creating,
            mute: MuteButtonState::connecting(),
            mute_level: 0.0,
            size: Size::default(),
            members_desired_height: 0,
            geometry: None,
            title,
            layer: None,
            toasts: Vec::new(),
            hidden: true,
        };
        panel.init_with_call(Some(call));
        panel.init_geometry();
        panel.show_and_activate();
        panel
    }

    fn init_geometry(&mut self) {
        self.size = geometry::minimum_size(&self.config);
        self.update_controls_geometry();
    }

    /// Marks the panel shown, also when the user brings a hidden window back.
    pub fn show_and_activate(&mut self) {
        self.hidden = false;
    }

    /// Attaches the panel to `call`, or detaches it when `None`.
    pub fn init_with_call(&mut self, call: Option<&Arc<dyn GroupCall>>) {
        self.subscriptions = None;
        self.call = call.map(Arc::downgrade);
        let Some(call) = call else {
            return;
        };
        info!("Panel attached to call {}", call.id());
        self.channel = call.channel();

        let mut subscriptions = CallSubscriptions {
            muted: call.muted_value(),
            state: call.state_value(),
            levels: call.level_updates(),
        };
        let mute = *subscriptions.muted.borrow_and_update();
        let state = *subscriptions.state.borrow_and_update();
        self.call_state = state;
        self.mute = mute_button_state(mute, state.is_connecting());
        self.subscriptions = Some(subscriptions);
        self.refresh_members_height();
    }

    pub fn call(&self) -> Option<Arc<dyn GroupCall>> {
        self.call.as_ref()?.upgrade()
    }

    /// Applies the call changes published since the last sync.
    pub fn sync(&mut self) {
        if let Some(subscriptions) = self.subscriptions.as_mut() {
            let changed = matches!(subscriptions.muted.has_changed(), Ok(true))
                || matches!(subscriptions.state.has_changed(), Ok(true));
            if changed {
                let mute = *subscriptions.muted.borrow_and_update();
                let state = *subscriptions.state.borrow_and_update();
                debug!("Mute button for {:?} / {:?}", mute, state);
                self.call_state = state;
                self.mute = mute_button_state(mute, state.is_connecting());
            }

            loop {
                match subscriptions.levels.try_recv() {
                    Ok(update) if update.is_self => self.mute_level = update.value,
                    Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
        self.refresh_members_height();
    }

    pub fn mute_clicked(&mut self, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        if let Some(call) = self.call()
            && let Some(next) = toggled_mute(call.muted())
        {
            call.set_muted(next);
        }
    }

    pub fn member_mute_requested(&mut self, user: UserId, mute: bool) {
        if let Some(call) = self.call() {
            call.toggle_mute(user, mute);
        }
    }

    pub fn add_members_requested(&mut self) {
        if self.call().is_some() {
            self.add_members();
        }
    }

    /// Opens the invite list for the call, if the channel still reports it.
    pub fn add_members(&mut self) {
        let real = self.channel.call();
        let (Some(call), Some(real)) = (self.call(), real) else {
            debug!("No call to invite members to");
            return;
        };
        if real.id != call.id() {
            debug!("Channel call {} is not the panel call {}", real.id, call.id());
            return;
        }
        let session = self.channel.session();
        let mut already_in: BTreeSet<UserId> = session.invited_to_call_users(real.id);
        already_in.extend(real.participants.iter().map(|p| p.user));
        already_in.insert(session.self_id());

        let mut controller = InviteController::new(self.channel.clone(), already_in, real.full_count);
        controller.prepare();
        self.layer = Some(Layer::Invite(controller));
    }

    pub fn invite_row_clicked(&mut self, user: UserId) {
        if let Some(Layer::Invite(controller)) = self.layer.as_mut() {
            controller.row_clicked(user);
        }
    }

    pub fn invite_item_deselected(&mut self, user: UserId) {
        if let Some(Layer::Invite(controller)) = self.layer.as_mut() {
            controller.item_deselected(user);
        }
    }

    /// Invites the selected users and closes the invite box.
    pub fn confirm_invite(&mut self) {
        if !matches!(self.layer, Some(Layer::Invite(_))) {
            return;
        }
        let Some(Layer::Invite(controller)) = self.layer.take() else {
            return;
        };
        if let Some(call) = self.call() {
            let outcome = controller.submit_invites(call.as_ref());
            if let Some(toast) = invite_toast(&outcome) {
                self.toasts.push(toast);
            }
        }
    }

    /// Shows the leave confirmation.
    pub fn hangup(&mut self, discard_call_checked: bool) {
        let Some(call) = self.call() else {
            return;
        };
        self.layer = Some(Layer::Leave(LeaveGroupCallBox::new(
            &call,
            discard_call_checked,
            BoxContext::GroupCallPanel,
        )));
    }

    pub fn set_leave_discard_checked(&mut self, checked: bool) {
        if let Some(Layer::Leave(leave)) = self.layer.as_mut() {
            leave.set_discard_checked(checked);
        }
    }

    pub fn confirm_leave(&mut self) {
        if !matches!(self.layer, Some(Layer::Leave(_))) {
            return;
        }
        if let Some(Layer::Leave(leave)) = self.layer.take() {
            leave.confirm();
        }
    }

    pub fn open_settings(&mut self) {
        if let Some(call) = self.call() {
            self.layer = Some(Layer::Settings(SettingsBox {
                call_id: call.id(),
                channel_title: self.channel.title.clone(),
            }));
        }
    }

    pub fn close_layer(&mut self) {
        self.layer = None;
    }

    /// Handles a window close request; returns `true` if it was intercepted.
    ///
    /// While the call is alive the window only hides.
    pub fn handle_close(&mut self) -> bool {
        if self.call().is_some() {
            self.hidden = true;
            return true;
        }
        false
    }

    pub fn close_before_destroy(&mut self) {
        self.hidden = true;
        self.init_with_call(None);
    }

    pub fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.update_controls_geometry();
    }

    fn refresh_members_height(&mut self) {
        // One extra row for the "add members" button.
        let rows = self.members().len() as i32 + 1;
        let desired = rows * self.config.members_row_height;
        if desired != self.members_desired_height {
            self.members_desired_height = desired;
            self.update_controls_geometry();
        }
    }

    pub fn update_controls_geometry(&mut self) {
        let Some(geometry) = controls_geometry(&self.config, self.size, self.members_desired_height)
        else {
            return;
        };
        self.geometry = Some(geometry);
        self.refresh_title();
    }

    pub fn refresh_title(&mut self) {
        let reserved = self.title_rect();
        self.title
            .refresh(reserved, self.size.width, members_list_top(&self.config));
    }

    pub fn title_controls(&self) -> Option<Rect> {
        title_controls_rect(&self.config, self.size.width)
    }

    pub fn title_rect(&self) -> Option<Rect> {
        geometry::title_rect(self.title_controls())
    }

    pub fn hit_test(&self, point: Point) -> HitTest {
        geometry::title_hit_test(point, self.size, self.title_controls(), self.geometry.as_ref())
    }

    /// Members of the panel call as the channel currently reports them.
    pub fn members(&self) -> Vec<MemberRow> {
        let Some(call) = self.call() else {
            return Vec::new();
        };
        let Some(real) = self.channel.call().filter(|real| real.id == call.id()) else {
            return Vec::new();
        };
        let session = self.channel.session();
        let can_manage = self.channel.can_manage_call();
        real.participants
            .iter()
            .filter_map(|participant| {
                let user = session.user(participant.user)?;
                let is_self = user.id == session.self_id();
                Some(MemberRow {
                    user,
                    muted: participant.muted,
                    speaking: participant.speaking,
                    is_self,
                    can_toggle_mute: can_manage && !is_self,
                })
            })
            .collect()
    }

    /// Notifications raised since the last call; each is returned once.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn geometry(&self) -> Option<&ControlsGeometry> {
        self.geometry.as_ref()
    }

    pub fn mute_button(&self) -> &MuteButtonState {
        &self.mute
    }

    pub fn mute_level(&self) -> f32 {
        self.mute_level
    }

    pub fn title_label(&self) -> Option<&TitleLabel> {
        self.title.label()
    }

    pub fn native_title(&self) -> &str {
        self.title.native_title()
    }

    pub fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the call the panel was opened for has ended.
    pub fn call_ended(&self) -> bool {
        self.call_state == CallState::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::LocalGroupCall;
    use crate::config::TitleStyle;
    use crate::state::Session;

    struct Fixture {
        session: Arc<Session>,
        channel: Arc<Channel>,
        local: Arc<LocalGroupCall>,
        call: Arc<dyn GroupCall>,
    }

    fn fixture(can_manage: bool) -> Fixture {
        let session = Arc::new(Session::new(User::new(1, "Me")));
        session.add_user(User::new(2, "Alice"));
        session.add_user(User::new(3, "Bob"));
        session.add_user(User::bot(4, "Helper"));
        session.add_user(User::new(5, "Carol"));
        let members = (1..=5).map(UserId).collect();
        let channel = Arc::new(Channel::new(3, "Group", session.clone(), members, can_manage));
        let local = LocalGroupCall::start(channel.clone());
        let call: Arc<dyn GroupCall> = local.clone();
        Fixture {
            session,
            channel,
            local,
            call,
        }
    }

    fn config(style: TitleStyle) -> PanelConfig {
        PanelConfig {
            title_style: style,
            ..PanelConfig::default()
        }
    }

    #[test]
    fn test_new_panel_shows_connecting() {
        let f = fixture(true);
        let panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        assert!(!panel.is_hidden());
        assert_eq!(panel.mute_button().kind, MuteButtonType::Connecting);
        assert!(panel.geometry().is_some());
    }

    #[test]
    fn test_sync_follows_call_state() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));

        f.local.set_state(CallState::Joined);
        panel.sync();
        assert_eq!(panel.mute_button().kind, MuteButtonType::Muted);

        f.local.set_force_muted(true);
        panel.sync();
        assert_eq!(panel.mute_button().kind, MuteButtonType::ForceMuted);
    }

    #[test]
    fn test_mute_click_toggles() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        f.local.set_state(CallState::Joined);

        panel.mute_clicked(MouseButton::Right);
        assert_eq!(f.call.muted(), MuteState::Muted);

        panel.mute_clicked(MouseButton::Left);
        assert_eq!(f.call.muted(), MuteState::Active);
        panel.sync();
        assert_eq!(panel.mute_button().text, "Mute");

        panel.mute_clicked(MouseButton::Left);
        assert_eq!(f.call.muted(), MuteState::Muted);
    }

    #[test]
    fn test_force_muted_ignores_click() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        f.local.set_force_muted(true);
        panel.mute_clicked(MouseButton::Left);
        assert_eq!(f.call.muted(), MuteState::ForceMuted);
    }

    #[test]
    fn test_only_self_levels_reach_mute_button() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        f.local.push_level(UserId(2), 0.9);
        panel.sync();
        assert_eq!(panel.mute_level(), 0.0);

        f.local.push_level(f.session.self_id(), 0.4);
        panel.sync();
        assert_eq!(panel.mute_level(), 0.4);
    }

    #[test]
    fn test_add_members_builds_already_in_set() {
        let f = fixture(true);
        f.local.join_participant(UserId(2));
        f.session.register_invited_to_call(f.call.id(), [UserId(3)]);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));

        panel.add_members_requested();
        let Some(Layer::Invite(controller)) = panel.layer() else {
            panic!("invite box not shown");
        };
        assert!(controller.is_already_in(UserId(1)));
        assert!(controller.is_already_in(UserId(2)));
        assert!(controller.is_already_in(UserId(3)));
        assert!(!controller.is_already_in(UserId(5)));
        // Self, Alice, Bob are in; Alice, Bob, Carol are rows.
        assert_eq!(controller.additional_title(), "2 / 3");
    }

    #[test]
    fn test_add_members_requires_matching_call() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        f.channel.set_call(None);
        panel.add_members();
        assert!(panel.layer().is_none());
    }

    #[test]
    fn test_invite_flow_raises_single_toast() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        panel.add_members();
        panel.invite_row_clicked(UserId(5));
        panel.confirm_invite();

        assert!(panel.layer().is_none());
        let toasts = panel.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].text.plain(), "You invited Carol to the voice chat.");
        assert!(panel.take_toasts().is_empty());
    }

    #[test]
    fn test_invite_nobody_is_silent() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        panel.add_members();
        panel.confirm_invite();
        assert!(panel.take_toasts().is_empty());
    }

    #[test]
    fn test_invite_many_toast() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        panel.add_members();
        panel.invite_row_clicked(UserId(2));
        panel.invite_row_clicked(UserId(3));
        panel.invite_item_deselected(UserId(3));
        panel.invite_row_clicked(UserId(5));
        panel.confirm_invite();

        let toasts = panel.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].text.plain(), "You invited 2 members to the voice chat.");
    }

    #[test]
    fn test_invite_after_call_gone_closes_silently() {
        let Fixture {
            channel, local, call, ..
        } = fixture(true);
        let mut panel = GroupPanel::new(&call, config(TitleStyle::Native));
        panel.add_members();
        panel.invite_row_clicked(UserId(2));
        let call_id = call.id();
        drop(call);
        drop(local);

        panel.confirm_invite();
        assert!(panel.layer().is_none());
        assert!(panel.take_toasts().is_empty());
        assert!(channel.session().invited_to_call_users(call_id).is_empty());
    }

    #[test]
    fn test_hangup_opens_leave_box() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        panel.hangup(false);
        let Some(Layer::Leave(leave)) = panel.layer() else {
            panic!("leave box not shown");
        };
        assert!(leave.has_discard_checkbox());
        assert!(!leave.discard_checked());

        panel.set_leave_discard_checked(true);
        panel.confirm_leave();
        assert!(panel.layer().is_none());
        assert_eq!(f.call.state(), CallState::Ended);
        assert!(f.channel.call().is_none());

        assert!(!panel.call_ended());
        panel.sync();
        assert!(panel.call_ended());
    }

    #[test]
    fn test_close_hides_while_call_alive() {
        let Fixture { local, call, .. } = fixture(true);
        let mut panel = GroupPanel::new(&call, config(TitleStyle::Native));
        assert!(panel.handle_close());
        assert!(panel.is_hidden());

        drop(call);
        drop(local);
        assert!(!panel.handle_close());
    }

    #[test]
    fn test_close_after_restore_hides_again() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));

        assert!(panel.handle_close());
        assert!(panel.is_hidden());

        panel.show_and_activate();
        assert!(!panel.is_hidden());

        assert!(panel.handle_close());
        assert!(panel.is_hidden());
        assert!(panel.call().is_some());
    }

    #[test]
    fn test_close_before_destroy_detaches() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        panel.close_before_destroy();
        assert!(panel.call().is_none());
        panel.open_settings();
        assert!(panel.layer().is_none());
    }

    #[test]
    fn test_member_mute_request_forwarded() {
        let f = fixture(true);
        f.local.join_participant(UserId(2));
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        panel.member_mute_requested(UserId(2), true);

        let members = panel.members();
        let alice = members.iter().find(|m| m.user.id == UserId(2)).unwrap();
        assert!(alice.muted);
        assert!(alice.can_toggle_mute);
        let me = members.iter().find(|m| m.is_self).unwrap();
        assert!(!me.can_toggle_mute);
    }

    #[test]
    fn test_title_label_with_custom_controls() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::CustomControls));
        // "Voice Chat" is 10 chars at 8px.
        let label = panel.title_label().unwrap();
        assert_eq!(label.geometry, Rect::new(150, 10, 80, 20));
        assert_eq!(panel.native_title(), " ");

        panel.resize(Size::new(300, 520));
        panel.refresh_title();
        // Reserved region is [0, 198); centered x = 110 still fits.
        assert_eq!(panel.title_label().unwrap().geometry.x, 110);
    }

    #[test]
    fn test_native_title_without_custom_controls() {
        let f = fixture(true);
        let panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        assert!(panel.title_label().is_none());
        assert_eq!(panel.native_title(), "Voice Chat");
    }

    #[test]
    fn test_members_height_grows_with_participants() {
        let f = fixture(true);
        let mut panel = GroupPanel::new(&f.call, config(TitleStyle::Native));
        let before = panel.geometry().unwrap().members.height;
        f.local.join_participant(UserId(2));
        panel.sync();
        assert_eq!(panel.geometry().unwrap().members.height, before + 56);
    }
}
