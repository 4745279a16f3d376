//! Expense repository for database operations.
//!
//! Every query is scoped to the owning user, so one user can never read or
//! modify another user's expenses.

use std::sync::Arc;

use chrono::Utc;
use econome_core::expense::NewExpense;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::expenses;

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: Arc<DatabaseConnection>,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new expense for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, user_id: Uuid, input: &NewExpense) -> Result<expenses::Model, DbErr> {
        let now = Utc::now().into();

        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            category: Set(input.category.clone()),
            amount: Set(input.amount),
            date: Set(input.date.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        expense.insert(self.db.as_ref()).await
    }

    /// Lists all expenses of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::Date)
            .all(self.db.as_ref())
            .await
    }

    /// Finds one expense owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
    ) -> Result<Option<expenses::Model>, DbErr> {
        expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
    }

    /// Replaces the fields of an expense owned by a user.
    ///
    /// Returns `None` if the expense does not exist or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        input: &NewExpense,
    ) -> Result<Option<expenses::Model>, DbErr> {
        let Some(existing) = self.find_by_id(user_id, expense_id).await? else {
            return Ok(None);
        };

        let mut expense: expenses::ActiveModel = existing.into();
        expense.category = Set(input.category.clone());
        expense.amount = Set(input.amount);
        expense.date = Set(input.date.into());
        expense.updated_at = Set(Utc::now().into());

        expense.update(self.db.as_ref()).await.map(Some)
    }

    /// Deletes an expense owned by a user.
    ///
    /// Returns `false` if nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user_id: Uuid, expense_id: Uuid) -> Result<bool, DbErr> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::Id.eq(expense_id))
            .filter(expenses::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }
}
