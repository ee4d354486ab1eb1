//! Token Session Manager — list, generate and delete API tokens.
//!
//! The library holds the manager and the page model it drives; the `tokens`
//! binary is a terminal front end over it.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod render;
pub mod session;
pub mod shell;
