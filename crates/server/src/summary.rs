//! Dashboard summary endpoint.

use api_types::report::{CategorySlice, DatePoint, MonthPoint, Summary};
use axum::{Extension, Json, extract::State};
use engine::Report;

use crate::{ServerError, server::ServerState, transactions::view, user};

/// Recomputes the aggregated report from the caller's full history on every
/// request.
pub async fn get_summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Summary>, ServerError> {
    let history = state.engine.list_transactions(&user.username).await?;
    let report = Report::from_transactions(&history);

    Ok(Json(Summary {
        income_minor: report.income.cents(),
        expense_minor: report.expense.cents(),
        balance_minor: report.balance.cents(),
        months_count: report.months_count,
        avg_income: report.avg_income,
        avg_expense: report.avg_expense,
        saving_rate: report.saving_rate,
        overspent: report.overspent,
        dates: report
            .dates
            .into_iter()
            .map(|bucket| DatePoint {
                date: bucket.date,
                income_minor: bucket.income.cents(),
                expense_minor: bucket.expense.cents(),
            })
            .collect(),
        months: report
            .months
            .into_iter()
            .map(|bucket| MonthPoint {
                month: bucket.month,
                income_minor: bucket.income.cents(),
                expense_minor: bucket.expense.cents(),
            })
            .collect(),
        categories: report
            .categories
            .into_iter()
            .map(|bucket| CategorySlice {
                category: bucket.category,
                expense_minor: bucket.expense.cents(),
            })
            .collect(),
        top_expense: report.top_expense.map(view),
        most_frequent_category: report.most_frequent_category,
    }))
}
