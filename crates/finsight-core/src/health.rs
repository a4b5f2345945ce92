//! Financial health scorer
//!
//! Composes savings rate, budget adherence, and trend stability into a
//! single 0-100 score with a coarse label. Stability is measured from the
//! monthly trend series by comparing trailing windows; with fewer than two
//! months of history neither stability bonus is awarded.

use crate::analytics;
use crate::models::{
    Budget, HealthCategory, HealthMetrics, HealthReport, Totals, Transaction, TrendPoint,
};

/// Recent average income must stay above this fraction of the earlier
/// average for the income-stability bonus.
const INCOME_STABILITY_FLOOR: f64 = 0.75;

/// Recent average expenses must stay below this multiple of the earlier
/// average for the expense-stability bonus.
const EXPENSE_STABILITY_CEILING: f64 = 1.25;

/// Score a transaction/budget snapshot.
///
/// Returns `None` when there are no transactions: an absent score, not a
/// zero score.
pub fn score_health(transactions: &[Transaction], budgets: &[Budget]) -> Option<HealthReport> {
    if transactions.is_empty() {
        return None;
    }

    let Totals { income, expenses } = analytics::totals(transactions);
    let savings_rate = if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    };
    let budget_adherence = adherence(transactions, budgets);
    let (income_stable, expenses_stable) = stability(&analytics::monthly_trend(transactions));

    let mut score = savings_points(savings_rate) + adherence_points(budget_adherence);
    if income_stable {
        score += 20;
    }
    if expenses_stable {
        score += 10;
    }

    Some(HealthReport {
        score,
        category: HealthCategory::for_score(score),
        metrics: HealthMetrics {
            savings_rate,
            budget_adherence,
            expense_to_income_ratio: (income > 0.0).then(|| expenses / income * 100.0),
        },
        income_stable,
        expenses_stable,
    })
}

/// Percent of budgeted categories whose expense spend stayed within the
/// limit. Zero when no budgets exist.
fn adherence(transactions: &[Transaction], budgets: &[Budget]) -> f64 {
    if budgets.is_empty() {
        return 0.0;
    }

    let met = budgets
        .iter()
        .filter(|budget| {
            let spent: f64 = transactions
                .iter()
                .filter(|tx| tx.category == budget.category && tx.is_expense())
                .map(|tx| tx.amount.abs())
                .sum();
            spent <= budget.amount
        })
        .count();

    met as f64 / budgets.len() as f64 * 100.0
}

/// Savings rate contributes up to 40 points on a step function.
fn savings_points(savings_rate: f64) -> u8 {
    if savings_rate >= 20.0 {
        40
    } else if savings_rate >= 10.0 {
        30
    } else if savings_rate >= 5.0 {
        20
    } else if savings_rate > 0.0 {
        10
    } else {
        0
    }
}

/// Budget adherence contributes up to 30 points on a step function.
fn adherence_points(budget_adherence: f64) -> u8 {
    if budget_adherence >= 80.0 {
        30
    } else if budget_adherence >= 60.0 {
        20
    } else if budget_adherence >= 40.0 {
        10
    } else {
        0
    }
}

/// Trailing-window stability check over the monthly series.
///
/// The series splits into an earlier and a recent half. Income is stable
/// when the recent average holds at least [`INCOME_STABILITY_FLOOR`] of the
/// earlier average; expenses are stable when the recent average stays below
/// [`EXPENSE_STABILITY_CEILING`] times the earlier average (or both halves
/// are expense-free).
fn stability(trend: &[TrendPoint]) -> (bool, bool) {
    if trend.len() < 2 {
        return (false, false);
    }

    let (earlier, recent) = trend.split_at(trend.len() / 2);
    let earlier_income = mean(earlier.iter().map(|p| p.income));
    let recent_income = mean(recent.iter().map(|p| p.income));
    let earlier_expenses = mean(earlier.iter().map(|p| p.expenses));
    let recent_expenses = mean(recent.iter().map(|p| p.expenses));

    let income_stable =
        earlier_income > 0.0 && recent_income >= earlier_income * INCOME_STABILITY_FLOOR;
    let expenses_stable = if earlier_expenses > 0.0 {
        recent_expenses <= earlier_expenses * EXPENSE_STABILITY_CEILING
    } else {
        recent_expenses == 0.0
    };

    (income_stable, expenses_stable)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
