use crate::models::Secret;

/// User interactions the token page responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    OpenTokens,
    CloseTokens,
    /// Click on the list panel's backdrop, outside its content.
    TokensBackdrop,
    Refresh,
    Generate,
    CopySecret,
    /// Delete action of the row at this index in the current render.
    DeleteRow(usize),
    ConfirmDelete,
    CancelDelete,
    CloseDeleteModal,
    DeleteBackdrop,
    Escape,
}

#[derive(Debug)]
pub enum EventOutcome {
    Handled,
    /// The page has no control for the event, or nothing to act on.
    Ignored,
    /// The secret selected by a copy action, for the clipboard.
    Copied(Secret),
}
