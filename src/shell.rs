//! Interactive terminal session: each typed command becomes one UI event.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::TokenApi;
use crate::render::render_page;
use crate::session::{EventOutcome, TokenSessionManager, UiEvent};

pub const HELP: &str = "\
commands:
  open            show your API tokens
  close           hide the token list
  refresh         reload the token list
  generate        create a new token
  copy            copy the newly generated token
  delete <row>    delete the token on that row
  confirm         confirm the pending delete
  cancel          cancel the pending delete
  esc             close whatever is open
  help            show this help
  quit            leave the session";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput {
    Event(UiEvent),
    Help,
    Quit,
    Empty,
}

/// Parse one input line. Row numbers are 1-based as printed.
pub fn parse_command(line: &str) -> Result<ShellInput, String> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(ShellInput::Empty);
    };
    let arg = parts.next();

    let event = match cmd.to_ascii_lowercase().as_str() {
        "open" => UiEvent::OpenTokens,
        "close" => UiEvent::CloseTokens,
        "refresh" => UiEvent::Refresh,
        "generate" | "gen" => UiEvent::Generate,
        "copy" => UiEvent::CopySecret,
        "delete" | "rm" => {
            let row: usize = arg
                .ok_or_else(|| "usage: delete <row>".to_string())?
                .parse()
                .map_err(|_| "row must be a number".to_string())?;
            if row == 0 {
                return Err("rows are numbered from 1".into());
            }
            UiEvent::DeleteRow(row - 1)
        }
        "confirm" | "y" | "yes" => UiEvent::ConfirmDelete,
        "cancel" | "n" | "no" => UiEvent::CancelDelete,
        "esc" | "escape" => UiEvent::Escape,
        "help" | "?" => return Ok(ShellInput::Help),
        "quit" | "exit" | "q" => return Ok(ShellInput::Quit),
        other => return Err(format!("unknown command: {} (try 'help')", other)),
    };
    Ok(ShellInput::Event(event))
}

pub async fn run<A: TokenApi>(manager: &mut TokenSessionManager<A>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    manager.dispatch(UiEvent::OpenTokens).await;
    flush(manager);

    while let Some(line) = lines.next_line().await? {
        let input = match parse_command(&line) {
            Ok(input) => input,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        match input {
            ShellInput::Empty => {}
            ShellInput::Help => println!("{}", HELP),
            ShellInput::Quit => break,
            ShellInput::Event(event) => match manager.dispatch(event).await {
                EventOutcome::Copied(secret) => println!("{}", secret.expose()),
                EventOutcome::Ignored => tracing::debug!(?event, "event ignored"),
                EventOutcome::Handled => {}
            },
        }
        flush(manager);
    }

    manager.close_tokens_panel();
    Ok(())
}

/// Show pending notifications, then the page.
fn flush<A: TokenApi>(manager: &mut TokenSessionManager<A>) {
    let page = manager.page_mut();
    page.tick(std::time::Instant::now());
    for note in page.take_notifications() {
        if note.is_error() {
            eprintln!("{}", note.message());
        } else {
            println!("{}", note.message());
        }
    }
    print!("{}", render_page(manager.page()));
}
