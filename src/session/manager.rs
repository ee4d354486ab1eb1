use std::time::Instant;

use crate::api::TokenApi;
use crate::models::token::{format_created_at, mask};
use crate::models::{Secret, TokenSummary};
use crate::session::events::{EventOutcome, UiEvent};
use crate::session::page::{DeleteAction, TokenPage, TokenRow, DELETING_LABEL, GENERATING_LABEL};

pub const LOAD_FAILED: &str = "Failed to load tokens. Please try again.";
pub const GENERATE_FAILED: &str = "Failed to generate token. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete token. Please try again.";
pub const DELETE_SUCCEEDED: &str = "Token deleted successfully.";

/// Renders a creation timestamp for the token table.
pub type TimeFormatter = fn(i64) -> String;

pub fn local_time(timestamp: i64) -> String {
    format_created_at(timestamp, &chrono::Local)
}

/// Mediates between the token page and the token API.
///
/// Owns the page model and the single pending-delete selection. Mutating
/// operations take `&mut self`, so UI events are applied one at a time.
pub struct TokenSessionManager<A> {
    api: A,
    page: TokenPage,
    pending_delete_id: Option<String>,
    format_time: TimeFormatter,
}

impl<A: TokenApi> TokenSessionManager<A> {
    pub fn new(api: A, page: TokenPage) -> Self {
        Self {
            api,
            page,
            pending_delete_id: None,
            format_time: local_time,
        }
    }

    pub fn with_time_formatter(mut self, format_time: TimeFormatter) -> Self {
        self.format_time = format_time;
        self
    }

    pub fn page(&self) -> &TokenPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut TokenPage {
        &mut self.page
    }

    pub fn pending_delete_id(&self) -> Option<&str> {
        self.pending_delete_id.as_deref()
    }

    pub async fn open_tokens_panel(&mut self) {
        self.page.list_panel.visible = true;
        self.refresh_token_list().await;
    }

    pub fn close_tokens_panel(&mut self) {
        self.page.list_panel.visible = false;
        self.page.hide_secret();
    }

    /// Fetch the token list and fully re-render the table from it.
    /// On failure the page is left exactly as it was.
    pub async fn refresh_token_list(&mut self) {
        match self.api.list_tokens().await {
            Ok(tokens) => {
                tracing::debug!(count = tokens.len(), "rendering token list");
                self.display_tokens(&tokens);
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading tokens");
                self.page.notify_error(LOAD_FAILED);
            }
        }
    }

    fn display_tokens(&mut self, tokens: &[TokenSummary]) {
        let format_time = self.format_time;
        let (Some(empty_state), Some(table)) =
            (self.page.empty_state.as_mut(), self.page.table.as_mut())
        else {
            return;
        };
        let Some(rows) = table.rows.as_mut() else {
            return;
        };

        if tokens.is_empty() {
            rows.clear();
            empty_state.visible = true;
            table.visible = false;
            return;
        }

        *rows = tokens
            .iter()
            .map(|t| TokenRow {
                masked: t.masked(),
                created: format_time(t.created_at),
                delete: DeleteAction {
                    token_id: t.token_id.clone(),
                    last_4_digits: t.last_4_digits.clone(),
                },
            })
            .collect();
        empty_state.visible = false;
        table.visible = true;
    }

    /// Create a token, reveal its secret once, then refresh the list.
    /// The generate control stays disabled until this settles.
    pub async fn generate_token(&mut self) {
        let Some(button) = self.page.generate.clone() else {
            return;
        };
        let _busy = button.busy(GENERATING_LABEL);

        match self.api.generate_token().await {
            Ok(generated) => {
                tracing::info!(token = %mask(&generated.last_4_digits), "generated API token");
                self.page.show_secret(generated.token);
                self.refresh_token_list().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "error generating token");
                self.page.notify_error(GENERATE_FAILED);
            }
        }
    }

    /// Select a token for deletion and open the confirmation modal.
    pub fn request_delete(&mut self, token_id: &str, last_4_digits: &str) {
        let Some(modal) = self.page.delete_modal.as_mut() else {
            return;
        };
        let Some(last4) = modal.last4.as_mut() else {
            return;
        };
        self.pending_delete_id = Some(token_id.to_string());
        *last4 = last_4_digits.to_string();
        modal.visible = true;
    }

    /// Delete the pending token. Without a pending selection nothing is sent.
    /// On failure the modal and the selection stay so the user can retry.
    pub async fn confirm_delete(&mut self) {
        let Some(token_id) = self.pending_delete_id.clone() else {
            return;
        };
        let Some(button) = self
            .page
            .delete_modal
            .as_ref()
            .and_then(|m| m.confirm.clone())
        else {
            return;
        };
        let _busy = button.busy(DELETING_LABEL);

        match self.api.delete_token(&token_id).await {
            Ok(()) => {
                tracing::info!(token_id = %token_id, "deleted API token");
                if let Some(modal) = self.page.delete_modal.as_mut() {
                    modal.visible = false;
                }
                self.pending_delete_id = None;
                self.refresh_token_list().await;
                self.page.notify_success(DELETE_SUCCEEDED);
            }
            Err(e) => {
                tracing::error!(token_id = %token_id, error = %e, "error deleting token");
                self.page.notify_error(DELETE_FAILED);
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some(modal) = self.page.delete_modal.as_mut() {
            modal.visible = false;
        }
        self.pending_delete_id = None;
    }

    pub fn copy_secret(&mut self, now: Instant) -> Option<Secret> {
        self.page.copy_secret(now)
    }

    /// Apply one UI event to the page.
    pub async fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::OpenTokens => {
                if self.page.open_trigger.is_none() {
                    return EventOutcome::Ignored;
                }
                self.open_tokens_panel().await;
            }
            UiEvent::CloseTokens | UiEvent::TokensBackdrop => self.close_tokens_panel(),
            UiEvent::Refresh => self.refresh_token_list().await,
            UiEvent::Generate => {
                if self.page.generate.is_none() {
                    return EventOutcome::Ignored;
                }
                self.generate_token().await;
            }
            UiEvent::CopySecret => {
                return match self.copy_secret(Instant::now()) {
                    Some(secret) => EventOutcome::Copied(secret),
                    None => EventOutcome::Ignored,
                };
            }
            UiEvent::DeleteRow(index) => {
                if !self.page.list_panel.visible || !self.page.table_visible() {
                    return EventOutcome::Ignored;
                }
                let Some(action) = self.page.rows().get(index).map(|r| r.delete.clone()) else {
                    return EventOutcome::Ignored;
                };
                self.request_delete(&action.token_id, &action.last_4_digits);
            }
            UiEvent::ConfirmDelete => {
                if self.pending_delete_id.is_none() {
                    return EventOutcome::Ignored;
                }
                self.confirm_delete().await;
            }
            UiEvent::CancelDelete | UiEvent::CloseDeleteModal | UiEvent::DeleteBackdrop => {
                self.cancel_delete()
            }
            UiEvent::Escape => {
                let mut handled = false;
                if self.page.list_panel.visible {
                    self.close_tokens_panel();
                    handled = true;
                }
                if self.page.delete_modal_visible() {
                    self.cancel_delete();
                    handled = true;
                }
                if !handled {
                    return EventOutcome::Ignored;
                }
            }
        }
        EventOutcome::Handled
    }
}
