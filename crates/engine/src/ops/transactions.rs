use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{EngineError, NewTransaction, ResultEngine, Transaction, transactions};

use super::{Engine, with_tx};

impl Engine {
    /// Lists all transactions owned by `user_id`, newest first by
    /// `(created_at DESC, id DESC)`.
    ///
    /// A user without transactions gets an empty list, not an error.
    pub async fn list_transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    /// Inserts a new transaction owned by `user_id`.
    ///
    /// The row carries its owner from birth; id and `created_at` are
    /// generated here and never change afterwards.
    pub async fn create_transaction(
        &self,
        user_id: &str,
        fields: NewTransaction,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::new(
            user_id.to_string(),
            fields.kind,
            fields.amount.cents(),
            fields.category,
            fields.note,
        )?;

        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;

        Ok(tx)
    }

    /// Updates amount/kind/category/note of an owned transaction.
    ///
    /// An unknown id and a row owned by another user are both
    /// [`EngineError::KeyNotFound`]; other users' rows are indistinguishable
    /// from missing ones. `id`, `user_id` and `created_at` never change.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        id: Uuid,
        fields: NewTransaction,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            self.require_owned(&db_tx, user_id, id).await?;

            let active = transactions::ActiveModel {
                id: ActiveValue::Set(id.to_string()),
                kind: ActiveValue::Set(fields.kind.as_str().to_string()),
                amount_minor: ActiveValue::Set(fields.amount.cents()),
                category: ActiveValue::Set(fields.category.clone()),
                note: ActiveValue::Set(fields.note.clone()),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;

            Transaction::try_from(updated)
        })
    }

    /// Deletes an owned transaction.
    ///
    /// Deleting an id that is absent (including one already deleted) is
    /// [`EngineError::KeyNotFound`], never a silent success.
    pub async fn delete_transaction(&self, user_id: &str, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_owned(&db_tx, user_id, id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }

    async fn require_owned(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(model)
    }
}
