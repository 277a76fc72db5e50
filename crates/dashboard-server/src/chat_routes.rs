use axum::{
    extract::State,
    response::Html,
    routing::get,
    Form, Router,
};
use dashboard_views::pages;
use finanalyse_client::{generate_session_id, ChatSession};
use serde::Deserialize;

use crate::{AppState, PageError};

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub session_id: String,
    pub message: String,
}

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", get(chat_page).post(send_message))
}

async fn chat_page(State(state): State<AppState>) -> Html<String> {
    let chat = ChatSession::new(state.api.clone(), generate_session_id());
    Html(pages::chat_page(chat.session_id(), chat.history()))
}

/// The session id travels in a hidden form field; a blank one starts a new session.
async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Html<String>, PageError> {
    let session_id = if form.session_id.trim().is_empty() {
        generate_session_id()
    } else {
        form.session_id
    };
    let mut chat = ChatSession::new(state.api.clone(), session_id);
    chat.send(&form.message).await?;
    Ok(Html(pages::chat_page(chat.session_id(), chat.history())))
}
