//! Pure aggregation over transaction snapshots
//!
//! Totals, category grouping, and the monthly trend series. Everything here
//! is deterministic and side-effect free apart from warnings about skipped
//! records.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use tracing::warn;

use crate::models::{CategoryTotal, Totals, Transaction, TrendPoint};

/// Income and expense totals.
///
/// Income is the sum of positive amounts, expenses the sum of absolute
/// negative amounts. Zero-amount records are degenerate and contribute to
/// neither bucket.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        if tx.amount > 0.0 {
            totals.income += tx.amount;
        } else if tx.amount < 0.0 {
            totals.expenses += tx.amount.abs();
        }
    }
    totals
}

/// Absolute amounts grouped by category, over ALL transactions.
///
/// Income and expense categories mix here: the grouping deliberately does
/// not filter by sign, so callers wanting an expense-only breakdown must use
/// [`expense_totals_by_category`]. Output order is first-occurrence order;
/// consumers must not rely on it.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    grouped_abs_totals(transactions.iter())
}

/// Absolute amounts grouped by category, expense records only.
pub fn expense_totals_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    grouped_abs_totals(transactions.iter().filter(|tx| tx.is_expense()))
}

fn grouped_abs_totals<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> Vec<CategoryTotal> {
    let mut order = Vec::new();
    let mut sums = HashMap::new();

    for tx in transactions {
        if !sums.contains_key(&tx.category) {
            order.push(tx.category);
        }
        *sums.entry(tx.category).or_insert(0.0) += tx.amount.abs();
    }

    order
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            amount: sums[&category],
        })
        .collect()
}

/// Income/expense series bucketed by calendar month, ascending.
///
/// Buckets are keyed on the first day of the month so the sort is
/// chronological, never lexicographic on the display label. Records whose
/// date fails to parse are skipped with a warning; one bad record never
/// corrupts the aggregate.
pub fn monthly_trend(transactions: &[Transaction]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<chrono::NaiveDate, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let date = match tx.parsed_date() {
            Ok(date) => date,
            Err(error) => {
                warn!(
                    title = %tx.title,
                    date = %tx.date,
                    error = %error,
                    "skipping record with unparseable date"
                );
                continue;
            }
        };

        let month = date.with_day(1).unwrap_or(date);
        let bucket = buckets.entry(month).or_insert((0.0, 0.0));
        if tx.amount > 0.0 {
            bucket.0 += tx.amount;
        } else if tx.amount < 0.0 {
            bucket.1 += tx.amount.abs();
        }
    }

    buckets
        .into_iter()
        .map(|(month, (income, expenses))| TrendPoint {
            month,
            label: month.format("%b %Y").to_string(),
            income,
            expenses,
        })
        .collect()
}
