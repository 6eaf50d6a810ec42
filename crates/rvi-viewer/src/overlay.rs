//! Overlay state machine for compact presentation.
//!
//! Below the viewport breakpoint, blocks render inside a dialog opened
//! from a summary trigger. This type tracks the open/closed state and
//! the focus contract: opening moves focus into the dialog and traps it
//! there; closing — by the close button, the backdrop, or Escape —
//! restores focus to the trigger.

/// Why an overlay was closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The explicit close button.
    Button,
    /// A click on the backdrop.
    Backdrop,
    /// The Escape key.
    Escape,
    /// The container is being detached from its host.
    Detach,
}

/// Overlay open/close state for one rendered container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    trigger_id: String,
    dialog_id: String,
    open: bool,
    /// Element that should hold focus per the overlay contract.
    focus: Option<String>,
}

impl Overlay {
    pub(crate) fn new(trigger_id: String, dialog_id: String) -> Self {
        Self {
            trigger_id,
            dialog_id,
            open: false,
            focus: None,
        }
    }

    /// Whether the dialog is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Element id of the summary trigger.
    #[must_use]
    pub fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    /// Element id of the dialog.
    #[must_use]
    pub fn dialog_id(&self) -> &str {
        &self.dialog_id
    }

    /// Where focus should currently rest, per the overlay contract.
    #[must_use]
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Open the dialog from its trigger; focus moves to the dialog.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.focus = Some(self.dialog_id.clone());
    }

    /// Close the dialog; focus returns to the trigger.
    ///
    /// Returns `true` when the dialog was open.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.focus = Some(self.trigger_id.clone());
        tracing::debug!(?reason, "overlay closed");
        true
    }

    /// Trap focus inside the open dialog: a focus request for an
    /// element outside the dialog is redirected back to it. With the
    /// dialog closed, requests pass through untouched.
    #[must_use]
    pub fn trap_focus<'a>(&'a self, requested: &'a str) -> &'a str {
        if self.open && !requested.starts_with(self.dialog_id.as_str()) {
            &self.dialog_id
        } else {
            requested
        }
    }
}
