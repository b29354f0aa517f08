//! Chat endpoint: natural-language questions about the submitted history.
//!
//! Always answers 200 with a reply; assistant trouble degrades to a friendly
//! message instead of breaking the page.

use api_types::{
    chat::{ChatRequest, ChatResponse},
    transaction::{TransactionKind as ApiKind, TransactionView},
};
use axum::{Extension, Json, extract::State};
use chrono::Utc;
use engine::insight;

use crate::{server::ServerState, user};

fn from_view(view: TransactionView, user_id: &str) -> engine::Transaction {
    engine::Transaction {
        id: view.id,
        user_id: user_id.to_string(),
        kind: match view.kind {
            ApiKind::Income => engine::TransactionKind::Income,
            ApiKind::Expense => engine::TransactionKind::Expense,
        },
        amount_minor: view.amount_minor,
        category: view.category,
        note: view.note,
        created_at: view.created_at.with_timezone(&Utc),
    }
}

pub async fn ask(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let history: Vec<engine::Transaction> = payload
        .transactions
        .into_iter()
        .map(|view| from_view(view, &user.username))
        .collect();

    let reply = match insight::compose_prompt(&payload.message, &history) {
        Ok(prompt) => state.assistant.ask(&prompt).await,
        Err(err) => {
            tracing::error!("failed to compose assistant prompt: {err}");
            crate::assistant::FAILURE_REPLY.to_string()
        }
    };

    Json(ChatResponse { reply })
}
