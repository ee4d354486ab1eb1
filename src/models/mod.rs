pub mod token;

pub use token::{GeneratedToken, Secret, TokenListResponse, TokenSummary};
