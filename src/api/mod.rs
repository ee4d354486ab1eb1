pub mod client;
pub mod middleware;

pub use client::{HttpTokenApi, TokenApi};
