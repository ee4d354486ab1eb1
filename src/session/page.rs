//! Retained model of the token-management page.
//!
//! Every control other than the list panel is optional. A host page that
//! leaves one out simply loses the behavior bound to it; nothing else breaks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::models::Secret;

pub const OPEN_LABEL: &str = "API Tokens";
pub const GENERATE_LABEL: &str = "Generate New Token";
pub const GENERATING_LABEL: &str = "Generating...";
pub const DELETE_LABEL: &str = "Delete Token";
pub const DELETING_LABEL: &str = "Deleting...";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
pub const EMPTY_STATE_TEXT: &str = "You don't have any API tokens yet.";

/// How long the copy control shows its confirmation label.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

// ── Controls ─────────────────────────────────────────────────

#[derive(Debug)]
struct ButtonState {
    label: String,
    idle_label: String,
    enabled: bool,
}

/// Handle to a clickable control. Clones refer to the same control, so a
/// busy guard can restore it while the page is otherwise borrowed.
#[derive(Debug, Clone)]
pub struct Button(Rc<RefCell<ButtonState>>);

impl Button {
    pub fn new(label: &str) -> Self {
        Self(Rc::new(RefCell::new(ButtonState {
            label: label.to_string(),
            idle_label: label.to_string(),
            enabled: true,
        })))
    }

    pub fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    pub fn set_label(&self, label: &str) {
        self.0.borrow_mut().label = label.to_string();
    }

    /// Disable the control and show `label` until the returned guard drops.
    #[must_use = "the control is re-enabled when the guard drops"]
    pub fn busy(&self, label: &str) -> BusyGuard {
        {
            let mut state = self.0.borrow_mut();
            state.enabled = false;
            state.label = label.to_string();
        }
        BusyGuard {
            button: self.clone(),
        }
    }

    pub fn restore(&self) {
        let mut state = self.0.borrow_mut();
        state.enabled = true;
        state.label = state.idle_label.clone();
    }
}

/// Re-enables its control on drop, including when the owning future is
/// dropped mid-request.
pub struct BusyGuard {
    button: Button,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.button.restore();
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub visible: bool,
    pub text: String,
}

impl Panel {
    pub fn hidden(text: &str) -> Self {
        Self {
            visible: false,
            text: text.to_string(),
        }
    }
}

/// Delete action bound to one rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    pub token_id: String,
    pub last_4_digits: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub masked: String,
    pub created: String,
    pub delete: DeleteAction,
}

#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    pub visible: bool,
    /// `None` when the host page has no table body.
    pub rows: Option<Vec<TokenRow>>,
}

#[derive(Debug, Clone, Default)]
pub struct SecretField {
    pub value: Secret,
    pub selected: bool,
}

/// One-shot panel revealing a freshly generated secret.
#[derive(Debug, Clone, Default)]
pub struct SecretReveal {
    pub visible: bool,
    pub field: Option<SecretField>,
}

#[derive(Debug, Clone)]
pub struct ConfirmModal {
    pub visible: bool,
    /// Shows the last four digits of the token awaiting deletion.
    pub last4: Option<String>,
    pub confirm: Option<Button>,
    pub cancel: Option<Button>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Success(String),
}

impl Notification {
    pub fn message(&self) -> String {
        match self {
            Notification::Error(msg) => format!("Error: {}", msg),
            Notification::Success(msg) => msg.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

// ── Page ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TokenPage {
    pub open_trigger: Option<Button>,
    pub list_panel: Panel,
    pub empty_state: Option<Panel>,
    pub table: Option<TokenTable>,
    pub generate: Option<Button>,
    pub reveal: Option<SecretReveal>,
    pub copy: Option<Button>,
    pub delete_modal: Option<ConfirmModal>,
    notifications: Vec<Notification>,
    copy_feedback_until: Option<Instant>,
}

impl Default for TokenPage {
    fn default() -> Self {
        Self::full()
    }
}

impl TokenPage {
    /// A page carrying every control.
    pub fn full() -> Self {
        Self {
            open_trigger: Some(Button::new(OPEN_LABEL)),
            list_panel: Panel::hidden(""),
            empty_state: Some(Panel::hidden(EMPTY_STATE_TEXT)),
            table: Some(TokenTable {
                visible: false,
                rows: Some(Vec::new()),
            }),
            generate: Some(Button::new(GENERATE_LABEL)),
            reveal: Some(SecretReveal {
                visible: false,
                field: Some(SecretField::default()),
            }),
            copy: Some(Button::new(COPY_LABEL)),
            delete_modal: Some(ConfirmModal {
                visible: false,
                last4: Some(String::new()),
                confirm: Some(Button::new(DELETE_LABEL)),
                cancel: Some(Button::new("Cancel")),
            }),
            notifications: Vec::new(),
            copy_feedback_until: None,
        }
    }

    /// A page with only the list panel; every optional control is absent.
    pub fn bare() -> Self {
        Self {
            open_trigger: None,
            list_panel: Panel::hidden(""),
            empty_state: None,
            table: None,
            generate: None,
            reveal: None,
            copy: None,
            delete_modal: None,
            notifications: Vec::new(),
            copy_feedback_until: None,
        }
    }

    pub fn rows(&self) -> &[TokenRow] {
        self.table
            .as_ref()
            .and_then(|t| t.rows.as_deref())
            .unwrap_or(&[])
    }

    pub fn table_visible(&self) -> bool {
        self.table.as_ref().is_some_and(|t| t.visible)
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state.as_ref().is_some_and(|p| p.visible)
    }

    pub fn delete_modal_visible(&self) -> bool {
        self.delete_modal.as_ref().is_some_and(|m| m.visible)
    }

    pub fn reveal_visible(&self) -> bool {
        self.reveal.as_ref().is_some_and(|r| r.visible)
    }

    /// Current content of the secret field, empty when absent or cleared.
    pub fn revealed_secret(&self) -> Option<&Secret> {
        self.reveal
            .as_ref()
            .and_then(|r| r.field.as_ref())
            .map(|f| &f.value)
            .filter(|v| !v.is_empty())
    }

    pub fn notify_error(&mut self, message: &str) {
        self.notifications.push(Notification::Error(message.to_string()));
    }

    pub fn notify_success(&mut self, message: &str) {
        self.notifications.push(Notification::Success(message.to_string()));
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Populate the reveal panel with `secret`, pre-selected for copying.
    /// Needs both the panel and its field.
    pub fn show_secret(&mut self, secret: Secret) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        let Some(field) = reveal.field.as_mut() else {
            return;
        };
        field.value = secret;
        field.selected = true;
        reveal.visible = true;
    }

    pub fn hide_secret(&mut self) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        reveal.visible = false;
        if let Some(field) = reveal.field.as_mut() {
            field.value = Secret::default();
            field.selected = false;
        }
    }

    /// Select the secret for copying and flip the copy label to its
    /// confirmation text. Returns the secret for the clipboard.
    pub fn copy_secret(&mut self, now: Instant) -> Option<Secret> {
        let copy = self.copy.clone()?;
        let field = self.reveal.as_mut()?.field.as_mut()?;
        if field.value.is_empty() {
            return None;
        }
        field.selected = true;
        let value = field.value.clone();

        copy.set_label(COPIED_LABEL);
        self.copy_feedback_until = Some(now + COPY_FEEDBACK);
        Some(value)
    }

    /// Expire time-based feedback.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.copy_feedback_until {
            if now >= until {
                if let Some(copy) = &self.copy {
                    copy.restore();
                }
                self.copy_feedback_until = None;
            }
        }
    }
}
