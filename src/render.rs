//! Plain-text rendering of the token page for the terminal.

use std::fmt::Write;

use crate::session::page::TokenPage;

pub fn render_table(page: &TokenPage) -> String {
    let mut out = String::new();

    if page.empty_state_visible() {
        if let Some(empty) = &page.empty_state {
            let _ = writeln!(out, "{}", empty.text);
        }
        return out;
    }
    if !page.table_visible() {
        return out;
    }

    let _ = writeln!(out, "{:<4} {:<12} {:<18}", "#", "TOKEN", "CREATED");
    for (i, row) in page.rows().iter().enumerate() {
        let _ = writeln!(out, "{:<4} {:<12} {:<18}", i + 1, row.masked, row.created);
    }
    out
}

/// Render every visible part of the page.
pub fn render_page(page: &TokenPage) -> String {
    let mut out = String::new();

    if !page.list_panel.visible {
        return out;
    }

    let _ = writeln!(out, "── API Tokens ──────────────────────────");
    out.push_str(&render_table(page));

    if let Some(secret) = page.revealed_secret().filter(|_| page.reveal_visible()) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "New token (copy it now, it will not be shown again):\n  {}",
            secret.expose()
        );
    }

    if let Some(generate) = &page.generate {
        let state = if generate.is_enabled() { "" } else { " (busy)" };
        let _ = writeln!(out, "[{}]{}", generate.label(), state);
    }

    if let Some(modal) = page.delete_modal.as_ref().filter(|m| m.visible) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Delete token ****{}? This cannot be undone.",
            modal.last4.as_deref().unwrap_or("")
        );
        if let Some(confirm) = &modal.confirm {
            let _ = writeln!(out, "[{}] [Cancel]", confirm.label());
        }
    }

    out
}
