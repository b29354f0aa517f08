//! Pure aggregation of a transaction history into dashboard figures.
//!
//! Everything here is a deterministic function of the input slice; callers
//! recompute on every fetch instead of maintaining incremental state. Empty
//! input is the zero case, never an error.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::{MoneyCents, Transaction, TransactionKind};

/// Income and expense accumulated for one calendar date (UTC).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub income: MoneyCents,
    pub expense: MoneyCents,
}

/// Income and expense accumulated for one `YYYY-MM` month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: String,
    pub income: MoneyCents,
    pub expense: MoneyCents,
}

/// Expense total for one category, in first-occurrence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBucket {
    pub category: String,
    pub expense: MoneyCents,
}

/// Aggregated view over a transaction history.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub income: MoneyCents,
    pub expense: MoneyCents,
    pub balance: MoneyCents,
    /// Inclusive month span between earliest and latest transaction; 1 when
    /// the history is empty.
    pub months_count: u32,
    /// Average income per month, major units.
    pub avg_income: f64,
    /// Average expense per month, major units.
    pub avg_expense: f64,
    /// `None` when there is no income to save from.
    pub saving_rate: Option<f64>,
    pub overspent: bool,
    /// Chronologically ascending.
    pub dates: Vec<DateBucket>,
    /// Ascending by `YYYY-MM` key.
    pub months: Vec<MonthBucket>,
    pub categories: Vec<CategoryBucket>,
    /// Any expense transaction of maximal amount.
    pub top_expense: Option<Transaction>,
    /// Most frequent category across all transactions; any maximal entry on
    /// ties.
    pub most_frequent_category: Option<String>,
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Inclusive month span between the earliest and latest `created_at`.
fn months_count(transactions: &[Transaction]) -> u32 {
    let mut stamps = transactions.iter().map(|tx| tx.created_at);
    let Some(first) = stamps.next() else {
        return 1;
    };
    let (earliest, latest) = stamps.fold((first, first), |(min, max), ts| {
        (min.min(ts), max.max(ts))
    });

    let span = (latest.year() - earliest.year()) * 12 + latest.month() as i32
        - earliest.month() as i32
        + 1;
    span.max(1) as u32
}

impl Report {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income = MoneyCents::ZERO;
        let mut expense = MoneyCents::ZERO;
        let mut by_date: BTreeMap<NaiveDate, (MoneyCents, MoneyCents)> = BTreeMap::new();
        let mut by_month: BTreeMap<String, (MoneyCents, MoneyCents)> = BTreeMap::new();
        let mut by_category: Vec<CategoryBucket> = Vec::new();
        let mut category_counts: HashMap<&str, u64> = HashMap::new();
        let mut top_expense: Option<&Transaction> = None;

        for tx in transactions {
            let amount = MoneyCents::new(tx.amount_minor);
            let date = tx.created_at.date_naive();
            let date_entry = by_date.entry(date).or_default();
            let month_entry = by_month.entry(month_key(date)).or_default();

            match tx.kind {
                TransactionKind::Income => {
                    income += amount;
                    date_entry.0 += amount;
                    month_entry.0 += amount;
                }
                TransactionKind::Expense => {
                    expense += amount;
                    date_entry.1 += amount;
                    month_entry.1 += amount;

                    match by_category
                        .iter_mut()
                        .find(|bucket| bucket.category == tx.category)
                    {
                        Some(bucket) => bucket.expense += amount,
                        None => by_category.push(CategoryBucket {
                            category: tx.category.clone(),
                            expense: amount,
                        }),
                    }

                    if top_expense.is_none_or(|top| tx.amount_minor > top.amount_minor) {
                        top_expense = Some(tx);
                    }
                }
            }

            *category_counts.entry(tx.category.as_str()).or_default() += 1;
        }

        let months_count = months_count(transactions);
        let balance = income - expense;
        let saving_rate = income
            .is_positive()
            .then(|| balance.cents() as f64 / income.cents() as f64 * 100.0);
        let most_frequent_category = category_counts
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(category, _)| category.to_string());

        Report {
            income,
            expense,
            balance,
            months_count,
            avg_income: income.to_major() / f64::from(months_count),
            avg_expense: expense.to_major() / f64::from(months_count),
            saving_rate,
            overspent: expense > income,
            dates: by_date
                .into_iter()
                .map(|(date, (income, expense))| DateBucket {
                    date,
                    income,
                    expense,
                })
                .collect(),
            months: by_month
                .into_iter()
                .map(|(month, (income, expense))| MonthBucket {
                    month,
                    income,
                    expense,
                })
                .collect(),
            categories: by_category,
            top_expense: top_expense.cloned(),
            most_frequent_category,
        }
    }
}
