use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use token_session::api::{HttpTokenApi, TokenApi};
use token_session::cli::{Cli, Commands};
use token_session::config;
use token_session::render::render_table;
use token_session::session::{TokenPage, TokenSessionManager};
use token_session::shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let cfg = config::load()?.with_overrides(args.api_url.as_deref(), args.session_cookie.clone())?;

    // Logs go to stderr so they never interleave with the rendered page.
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "token_session=info,tokens=info".into()),
    );
    let json_layer = cfg
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!cfg.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    if cfg.session_cookie.is_none() {
        tracing::warn!("TOKENS_SESSION_COOKIE is not set, requests will be unauthenticated");
    }
    tracing::debug!(api_url = %cfg.api_url, "using token API");

    let api = HttpTokenApi::new(&cfg)?;
    let mut manager = TokenSessionManager::new(api, TokenPage::full());

    let result = match args.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(&mut manager).await,
        Commands::List => handle_list(&mut manager).await,
        Commands::Generate => handle_generate(&mut manager).await,
        Commands::Delete { token_id, yes } => handle_delete(&mut manager, &token_id, yes).await,
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

/// Print queued notifications; fail if any of them is an error.
fn drain_notifications<A: TokenApi>(manager: &mut TokenSessionManager<A>) -> anyhow::Result<()> {
    let mut first_error = None;
    for note in manager.page_mut().take_notifications() {
        if note.is_error() {
            first_error.get_or_insert(note.message());
        } else {
            println!("{}", note.message());
        }
    }
    match first_error {
        Some(msg) => Err(anyhow::anyhow!(msg)),
        None => Ok(()),
    }
}

async fn handle_list<A: TokenApi>(manager: &mut TokenSessionManager<A>) -> anyhow::Result<()> {
    manager.open_tokens_panel().await;
    drain_notifications(manager)?;
    print!("{}", render_table(manager.page()));
    Ok(())
}

async fn handle_generate<A: TokenApi>(manager: &mut TokenSessionManager<A>) -> anyhow::Result<()> {
    manager.generate_token().await;
    drain_notifications(manager)?;

    if let Some(secret) = manager.page().revealed_secret() {
        println!("Token created. Copy it now, it will not be shown again:");
        println!("  {}", secret.expose());
    }
    println!();
    print!("{}", render_table(manager.page()));
    manager.close_tokens_panel();
    Ok(())
}

async fn handle_delete<A: TokenApi>(
    manager: &mut TokenSessionManager<A>,
    token_id: &str,
    yes: bool,
) -> anyhow::Result<()> {
    manager.refresh_token_list().await;
    drain_notifications(manager)?;

    let last4 = manager
        .page()
        .rows()
        .iter()
        .find(|r| r.delete.token_id == token_id)
        .map(|r| r.delete.last_4_digits.clone())
        .ok_or_else(|| anyhow::anyhow!("Token not found: {}", token_id))?;

    manager.request_delete(token_id, &last4);

    if !yes && !confirm(&format!("Delete token ****{}? [y/N] ", last4)).await? {
        manager.cancel_delete();
        println!("Cancelled.");
        return Ok(());
    }

    manager.confirm_delete().await;
    drain_notifications(manager)
}

async fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
