//! Transactions API endpoints

use api_types::transaction::{
    AmountInput, TransactionKind as ApiKind, TransactionNew, TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

pub(crate) fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

pub(crate) fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        amount_minor: tx.amount_minor,
        category: tx.category,
        note: tx.note,
        created_at: tx.created_at.fixed_offset(),
    }
}

fn draft(payload: TransactionNew) -> engine::TransactionDraft {
    engine::TransactionDraft {
        amount: payload.amount.map(|amount| match amount {
            AmountInput::Number(value) => engine::AmountField::Major(value),
            AmountInput::Text(text) => engine::AmountField::Text(text),
        }),
        kind: payload.kind,
        category: payload.category,
        note: payload.note,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions(&user.username).await?;

    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let fields = draft(payload).validate()?;
    let created = state
        .engine
        .create_transaction(&user.username, fields)
        .await?;

    Ok((StatusCode::CREATED, Json(view(created))))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionView>, ServerError> {
    let fields = draft(payload).validate()?;
    let updated = state
        .engine
        .update_transaction(&user.username, id, fields)
        .await?;

    Ok(Json(view(updated)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
