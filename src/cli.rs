use clap::{Parser, Subcommand};

/// tokens — manage your API tokens
#[derive(Parser)]
#[command(name = "tokens", version, about)]
pub struct Cli {
    /// Base URL of the token API
    #[arg(long, env = "TOKENS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Cookie header carrying your session (e.g. "session=...")
    #[arg(long, env = "TOKENS_SESSION_COOKIE", global = true, hide_env_values = true)]
    pub session_cookie: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your tokens
    List,

    /// Generate a new token and print it once
    Generate,

    /// Delete a token
    Delete {
        token_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session (default)
    Shell,
}
