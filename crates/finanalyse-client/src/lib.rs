pub mod chat;
pub mod client;
pub mod config;
pub mod loader;
pub mod session;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::{ChatMessage, ChatSession, Sender, GREETING, UNAVAILABLE_REPLY};
pub use client::FinAnalyseClient;
pub use config::ClientConfig;
pub use loader::{ensure_distinct, load_company, load_comparison, load_movers, load_profile, CompanySnapshot};
pub use session::{generate_session_id, SessionStore, SESSION_KEY};
pub use suggest::{Suggestions, SuggestionDebouncer, DEFAULT_DEBOUNCE};
