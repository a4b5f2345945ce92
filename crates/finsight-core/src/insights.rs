//! Heuristic insight engine
//!
//! The dependency-free fallback arm for the narrative operations: spending
//! insights, action recommendations, and next-month expense forecasts. Works
//! on any transaction snapshot with zero external dependencies.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analytics;
use crate::models::{
    ActionRecommendation, Category, ExpenseForecast, ForecastCategory, Impact, Insight, Timeframe,
    Totals, Transaction,
};

/// Growth factor applied to per-category averages when forecasting.
const FORECAST_GROWTH_FACTOR: f64 = 1.05;

/// Title keywords hinting at debt service.
const DEBT_KEYWORDS: &[&str] = &["loan", "debt", "mortgage", "credit"];

/// How many income records each side of the income-trend comparison uses.
const INCOME_TREND_WINDOW: usize = 5;

/// Generate spending/income insights from a transaction snapshot.
///
/// The snapshot is assumed newest-first, as the storage layer orders it;
/// the income-trend comparison relies on that ordering.
pub fn generate_insights(transactions: &[Transaction]) -> Vec<Insight> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let Totals { income, expenses } = analytics::totals(transactions);
    let savings_rate = if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    };

    let mut insights = vec![Insight {
        title: "Monthly Savings Rate".to_string(),
        description: format!("Your savings rate is {:.1}% of your income.", savings_rate),
        action: Some(if savings_rate < 20.0 {
            "Try to increase your savings rate to at least 20% for financial security."
                .to_string()
        } else {
            "Great job! Keep maintaining this savings rate.".to_string()
        }),
        amount: Some(income - expenses),
    }];

    let by_category = analytics::expense_totals_by_category(transactions);
    if expenses > 0.0 {
        if let Some(top) = by_category.iter().max_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(Ordering::Equal)
        }) {
            insights.push(Insight {
                title: "Top Spending Category".to_string(),
                description: format!(
                    "Your highest spending is in {} at {:.1}% of total expenses.",
                    top.category,
                    top.amount / expenses * 100.0
                ),
                action: Some("Review if you can optimize spending in this category.".to_string()),
                amount: Some(top.amount),
            });
        }
    }

    if transactions.len() > 10 {
        let income_amounts: Vec<f64> = transactions
            .iter()
            .filter(|tx| tx.is_income())
            .map(|tx| tx.amount)
            .collect();
        let recent: f64 = income_amounts.iter().take(INCOME_TREND_WINDOW).sum();
        let older: f64 = income_amounts
            .iter()
            .skip(INCOME_TREND_WINDOW)
            .take(INCOME_TREND_WINDOW)
            .sum();

        if recent > 0.0 && older > 0.0 {
            let change = (recent - older) / older * 100.0;
            insights.push(Insight {
                title: "Income Trend".to_string(),
                description: format!(
                    "Your recent income has {} by {:.1}%.",
                    if change > 0.0 { "increased" } else { "decreased" },
                    change.abs()
                ),
                action: Some(if change < 0.0 {
                    "Look for additional income sources to stabilize your finances.".to_string()
                } else {
                    "Consider investing the extra income for future growth.".to_string()
                }),
                amount: Some((recent - older).abs()),
            });
        }
    }

    insights
}

/// Recommend financial actions from a transaction snapshot.
pub fn recommend_actions(transactions: &[Transaction]) -> Vec<ActionRecommendation> {
    if transactions.is_empty() {
        return starter_actions();
    }

    let Totals { income, expenses } = analytics::totals(transactions);
    let savings_rate = if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    };

    let mut actions = Vec::new();

    if savings_rate < 20.0 {
        actions.push(ActionRecommendation {
            title: "Increase Your Savings Rate".to_string(),
            description: format!(
                "Your current savings rate is {:.1}%. Aim to save at least 20% of your income.",
                savings_rate
            ),
            impact: Impact::High,
            timeframe: Timeframe::MediumTerm,
        });
    } else {
        actions.push(ActionRecommendation {
            title: "Maintain Your Savings Rate".to_string(),
            description: format!(
                "Great job! Your savings rate is {:.1}%. Consider investing your savings for \
                 long-term growth.",
                savings_rate
            ),
            impact: Impact::Medium,
            timeframe: Timeframe::LongTerm,
        });
    }

    if expenses > 0.0 {
        let by_category = analytics::expense_totals_by_category(transactions);
        if let Some(top) = by_category.iter().max_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(Ordering::Equal)
        }) {
            let share = top.amount / expenses * 100.0;
            if share > 30.0 {
                actions.push(ActionRecommendation {
                    title: format!("Optimize {} Spending", top.category),
                    description: format!(
                        "This category accounts for {:.1}% of your expenses. Look for ways to \
                         reduce costs here.",
                        share
                    ),
                    impact: Impact::High,
                    timeframe: Timeframe::ShortTerm,
                });
            }
        }
    }

    actions.push(ActionRecommendation {
        title: "Build or Strengthen Emergency Fund".to_string(),
        description: "Ensure you have 3-6 months of essential expenses saved in an easily \
                      accessible account."
            .to_string(),
        impact: Impact::High,
        timeframe: Timeframe::MediumTerm,
    });

    let has_debt = transactions.iter().any(|tx| {
        tx.is_expense() && {
            let title = tx.title.to_lowercase();
            DEBT_KEYWORDS.iter().any(|keyword| title.contains(keyword))
        }
    });
    if has_debt {
        actions.push(ActionRecommendation {
            title: "Create a Debt Repayment Plan".to_string(),
            description: "Focus on paying off high-interest debt first, then work on other debts."
                .to_string(),
            impact: Impact::High,
            timeframe: Timeframe::MediumTerm,
        });
    }

    actions
}

fn starter_actions() -> Vec<ActionRecommendation> {
    vec![
        ActionRecommendation {
            title: "Start Tracking Your Expenses".to_string(),
            description: "Begin by recording all your expenses to get a clear picture of your \
                          spending habits."
                .to_string(),
            impact: Impact::High,
            timeframe: Timeframe::ShortTerm,
        },
        ActionRecommendation {
            title: "Create a Basic Budget".to_string(),
            description: "Set up a simple budget for essential categories like housing, food, \
                          and transportation."
                .to_string(),
            impact: Impact::High,
            timeframe: Timeframe::ShortTerm,
        },
        ActionRecommendation {
            title: "Build an Emergency Fund".to_string(),
            description: "Start saving for an emergency fund to cover 3-6 months of expenses."
                .to_string(),
            impact: Impact::High,
            timeframe: Timeframe::MediumTerm,
        },
    ]
}

/// Predict next-month expenses per category.
///
/// Per-category average expense amount with a small growth factor applied,
/// sorted by predicted amount descending.
pub fn predict_future_expenses(transactions: &[Transaction]) -> ExpenseForecast {
    if transactions.is_empty() {
        return ExpenseForecast::default();
    }

    let mut order: Vec<Category> = Vec::new();
    let mut sums: HashMap<Category, f64> = HashMap::new();
    let mut counts: HashMap<Category, usize> = HashMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        if !sums.contains_key(&tx.category) {
            order.push(tx.category);
        }
        *sums.entry(tx.category).or_insert(0.0) += tx.amount.abs();
        *counts.entry(tx.category).or_insert(0) += 1;
    }

    let mut total_predicted = 0.0;
    let mut categories: Vec<ForecastCategory> = Vec::new();

    for category in order {
        let count = counts[&category];
        let average = if count > 0 { sums[&category] / count as f64 } else { 0.0 };
        let predicted = average * FORECAST_GROWTH_FACTOR;
        if predicted > 0.0 {
            total_predicted += predicted;
            categories.push(ForecastCategory {
                name: category.as_str().to_string(),
                amount: predicted,
                icon: category.icon().to_string(),
            });
        }
    }

    categories.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
    });

    ExpenseForecast {
        total_predicted,
        categories,
    }
}
