//! Confirmation box for leaving or ending the call.

use std::sync::{Arc, Weak};
use tracing::debug;

use crate::call::GroupCall;
use crate::lang;

/// Where the box is shown from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxContext {
    GroupCallPanel,
    MainWindow,
}

pub struct LeaveGroupCallBox {
    call: Weak<dyn GroupCall>,
    /// Present only for users allowed to end the call for everyone.
    discard: Option<bool>,
    context: BoxContext,
}

impl LeaveGroupCallBox {
    pub fn new(call: &Arc<dyn GroupCall>, discard_checked: bool, context: BoxContext) -> Self {
        let discard = call
            .channel()
            .can_manage_call()
            .then_some(discard_checked);
        Self {
            call: Arc::downgrade(call),
            discard,
            context,
        }
    }

    pub fn title(&self) -> &'static str {
        lang::group_call_leave_title()
    }

    pub fn text(&self) -> &'static str {
        lang::group_call_leave_sure()
    }

    pub fn discard_label(&self) -> &'static str {
        lang::group_call_end()
    }

    pub fn has_discard_checkbox(&self) -> bool {
        self.discard.is_some()
    }

    pub fn discard_checked(&self) -> bool {
        self.discard.unwrap_or(false)
    }

    pub fn set_discard_checked(&mut self, checked: bool) {
        if let Some(discard) = self.discard.as_mut() {
            *discard = checked;
        }
    }

    pub fn context(&self) -> BoxContext {
        self.context
    }

    /// Closes the box and leaves the call, ending it if the checkbox is set.
    pub fn confirm(self) {
        let discard = self.discard_checked();
        let Some(call) = self.call.upgrade() else {
            debug!("Call gone before leave was confirmed");
            return;
        };
        if discard {
            call.discard();
        } else {
            call.hangup();
        }
    }
}
