use finanalyse_core::{ChatRequest, DashboardApi, DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const GREETING: &str = "Hello! I'm FinAnalyse AI. Ask me a question about finance.";

pub const UNAVAILABLE_REPLY: &str =
    "The AI assistant is temporarily unavailable. Please try again in a few moments.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into(), is_error: false }
    }

    fn assistant(text: impl Into<String>, is_error: bool) -> Self {
        Self { sender: Sender::Assistant, text: text.into(), is_error }
    }
}

/// A conversation with the assistant, bound to one persisted session id.
pub struct ChatSession {
    api: Arc<dyn DashboardApi>,
    session_id: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(api: Arc<dyn DashboardApi>, session_id: impl Into<String>) -> Self {
        Self {
            api,
            session_id: session_id.into(),
            history: vec![ChatMessage::assistant(GREETING, false)],
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends one message and returns the assistant's reply as recorded in
    /// the history. API failures become an error reply rather than an `Err`;
    /// only empty input is rejected.
    pub async fn send(&mut self, message: &str) -> Result<ChatMessage> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DashboardError::InvalidInput("Message cannot be empty".to_string()));
        }
        self.history.push(ChatMessage::user(message));

        let request = ChatRequest {
            session_id: self.session_id.clone(),
            message: message.to_string(),
        };

        let reply = match self.api.chat(&request).await {
            Ok(reply) => ChatMessage::assistant(reply.response, false),
            Err(DashboardError::ServiceUnavailable(detail)) => {
                tracing::warn!(%detail, "Chat service unavailable");
                ChatMessage::assistant(UNAVAILABLE_REPLY, true)
            }
            Err(e) => {
                tracing::error!(error = %e, "Chat request failed");
                ChatMessage::assistant(format!("Sorry, an error occurred: {}", e.user_message()), true)
            }
        };

        self.history.push(reply.clone());
        Ok(reply)
    }
}
