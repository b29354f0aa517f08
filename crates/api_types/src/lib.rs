use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Amount as submitted by a client: a JSON number (major units) or a
    /// decimal string. Coercion and validation happen server-side.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(f64),
        Text(String),
    }

    /// Request body for creating or updating a transaction.
    ///
    /// Fields are optional so that a missing value surfaces as a validation
    /// error instead of a deserialization failure.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount: Option<AmountInput>,
        /// "income" or "expense".
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub category: Option<String>,
        pub note: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Exact amount in minor units (cents).
        pub amount_minor: i64,
        pub category: String,
        pub note: Option<String>,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
    }
}

pub mod chat {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatRequest {
        pub message: String,
        /// Transaction history the reply should be grounded in, as previously
        /// fetched from `GET /transactions`.
        #[serde(default)]
        pub transactions: Vec<transaction::TransactionView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatResponse {
        pub reply: String,
    }
}

pub mod report {
    use super::*;

    /// One calendar day of accumulated income and expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DatePoint {
        pub date: NaiveDate,
        pub income_minor: i64,
        pub expense_minor: i64,
    }

    /// One `YYYY-MM` month of accumulated income and expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthPoint {
        pub month: String,
        pub income_minor: i64,
        pub expense_minor: i64,
    }

    /// Expense total for one category.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySlice {
        pub category: String,
        pub expense_minor: i64,
    }

    /// Aggregated dashboard feed, recomputed from the full history on every
    /// request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub income_minor: i64,
        pub expense_minor: i64,
        pub balance_minor: i64,
        /// Inclusive month span of the history, at least 1.
        pub months_count: u32,
        /// Average income per month, major units.
        pub avg_income: f64,
        /// Average expense per month, major units.
        pub avg_expense: f64,
        /// Percentage of income retained, absent when there is no income.
        pub saving_rate: Option<f64>,
        pub overspent: bool,
        pub dates: Vec<DatePoint>,
        pub months: Vec<MonthPoint>,
        pub categories: Vec<CategorySlice>,
        pub top_expense: Option<transaction::TransactionView>,
        pub most_frequent_category: Option<String>,
    }
}
