pub mod events;
pub mod manager;
pub mod page;

pub use events::{EventOutcome, UiEvent};
pub use manager::TokenSessionManager;
pub use page::TokenPage;
