//! Rule-based budget recommendation engine
//!
//! Derives a suggested monthly budget for the heaviest spending categories
//! from historical spend, any existing budgets, and income, using
//! percentage-of-income guidelines.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analytics;
use crate::models::{Budget, BudgetRecommendation, Category, Transaction};

/// Observation window the spend history is assumed to cover, in months.
///
/// The monthly average divides the per-category total by this; callers with
/// a different window pass their own value to [`recommend_budgets`].
pub const DEFAULT_HISTORY_MONTHS: u32 = 3;

/// How many top-spend categories receive a recommendation.
const TOP_CATEGORY_COUNT: usize = 5;

/// Recommend budgets using the default observation window.
pub fn recommend_budgets_default(
    transactions: &[Transaction],
    existing_budgets: &[Budget],
) -> Vec<BudgetRecommendation> {
    recommend_budgets(transactions, existing_budgets, DEFAULT_HISTORY_MONTHS)
}

/// Recommend a monthly budget for the top expense categories.
///
/// Categories are ranked by total expense descending, ties broken by
/// category id so the selection is deterministic. Recommendations are never
/// negative; with zero recorded income the no-budget branch recommends 0
/// rather than dividing by zero.
pub fn recommend_budgets(
    transactions: &[Transaction],
    existing_budgets: &[Budget],
    months_of_history: u32,
) -> Vec<BudgetRecommendation> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let months = months_of_history.max(1) as f64;
    let income = analytics::totals(transactions).income;

    let existing_by_category: HashMap<Category, f64> = existing_budgets
        .iter()
        .map(|budget| (budget.category, budget.amount))
        .collect();

    let mut spend = analytics::expense_totals_by_category(transactions);
    spend.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    spend.truncate(TOP_CATEGORY_COUNT);

    spend
        .into_iter()
        .map(|entry| {
            let monthly_average = entry.amount / months;
            let current_budget = existing_by_category.get(&entry.category).copied();

            let (recommended_budget, reasoning) = match current_budget {
                Some(current) if monthly_average > current => (
                    (monthly_average * 0.9).ceil(),
                    "Your average spending is higher than your current budget. Consider \
                     adjusting it to be more realistic while aiming for some reduction."
                        .to_string(),
                ),
                Some(current) if monthly_average < current * 0.7 => (
                    (monthly_average * 1.1).ceil(),
                    "Your spending is well below budget. You could reduce this budget and \
                     allocate funds elsewhere."
                        .to_string(),
                ),
                Some(current) => (
                    current,
                    "Your current budget aligns well with your spending patterns.".to_string(),
                ),
                None if income > 0.0 => {
                    let actual_percent = monthly_average / income * 100.0;
                    let percent = actual_percent.min(percent_of_income_cap(entry.category));
                    (
                        (percent / 100.0 * income).ceil(),
                        format!(
                            "Based on your income and typical financial guidelines, consider \
                             allocating about {:.1}% of your income to this category.",
                            percent
                        ),
                    )
                }
                None => (
                    0.0,
                    "Not enough income recorded to size this budget from income guidelines."
                        .to_string(),
                ),
            };

            BudgetRecommendation {
                category: entry.category,
                current_budget,
                recommended_budget,
                reasoning,
                icon: entry.category.icon().to_string(),
            }
        })
        .collect()
}

/// Guideline ceiling for the share of income a category should consume.
fn percent_of_income_cap(category: Category) -> f64 {
    match category {
        Category::Housing => 30.0,
        Category::Food | Category::Grocery => 15.0,
        Category::Transport => 10.0,
        _ => 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64, category: Category, date: &str) -> Transaction {
        Transaction {
            id: None,
            title: "test".to_string(),
            amount,
            category,
            date: date.to_string(),
            notes: None,
            merchant: None,
        }
    }

    fn budget(category: Category, amount: f64) -> Budget {
        Budget {
            category,
            amount,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(recommend_budgets_default(&[], &[]).is_empty());
    }

    #[test]
    fn test_overspend_recommends_reduction() {
        // 900 over 3 months = 300/month against a 200 budget.
        let transactions = vec![
            tx(3000.0, Category::Salary, "2024-01-01"),
            tx(-900.0, Category::Food, "2024-01-10"),
        ];
        let recs = recommend_budgets_default(&transactions, &[budget(Category::Food, 200.0)]);
        let food = recs.iter().find(|r| r.category == Category::Food).unwrap();
        assert_eq!(food.current_budget, Some(200.0));
        assert_eq!(food.recommended_budget, 270.0); // ceil(300 * 0.9)
    }

    #[test]
    fn test_underspend_recommends_tightening() {
        // 300 over 3 months = 100/month against a 200 budget (< 70%).
        let transactions = vec![
            tx(3000.0, Category::Salary, "2024-01-01"),
            tx(-300.0, Category::Food, "2024-01-10"),
        ];
        let recs = recommend_budgets_default(&transactions, &[budget(Category::Food, 200.0)]);
        let food = recs.iter().find(|r| r.category == Category::Food).unwrap();
        assert_eq!(food.recommended_budget, 110.0); // ceil(100 * 1.1)
    }

    #[test]
    fn test_aligned_budget_kept() {
        // 540 over 3 months = 180/month against a 200 budget: within range.
        let transactions = vec![
            tx(3000.0, Category::Salary, "2024-01-01"),
            tx(-540.0, Category::Food, "2024-01-10"),
        ];
        let recs = recommend_budgets_default(&transactions, &[budget(Category::Food, 200.0)]);
        let food = recs.iter().find(|r| r.category == Category::Food).unwrap();
        assert_eq!(food.recommended_budget, 200.0);
    }

    #[test]
    fn test_no_budget_uses_income_guideline_cap() {
        // Housing spend of 6000 over 3 months = 2000/month on 4000 income:
        // 50% actual, capped at the 30% housing guideline.
        let transactions = vec![
            tx(4000.0, Category::Salary, "2024-01-01"),
            tx(-6000.0, Category::Housing, "2024-01-05"),
        ];
        let recs = recommend_budgets_default(&transactions, &[]);
        let housing = recs.iter().find(|r| r.category == Category::Housing).unwrap();
        assert_eq!(housing.current_budget, None);
        assert_eq!(housing.recommended_budget, 1200.0); // 30% of 4000
    }

    #[test]
    fn test_no_budget_below_cap_uses_actual_percent() {
        // 300/month transport on 4000 income is 7.5%, under the 10% cap.
        let transactions = vec![
            tx(4000.0, Category::Salary, "2024-01-01"),
            tx(-900.0, Category::Transport, "2024-01-05"),
        ];
        let recs = recommend_budgets_default(&transactions, &[]);
        let transport = recs
            .iter()
            .find(|r| r.category == Category::Transport)
            .unwrap();
        assert_eq!(transport.recommended_budget, 300.0);
    }

    #[test]
    fn test_zero_income_never_divides() {
        let transactions = vec![tx(-900.0, Category::Food, "2024-01-10")];
        let recs = recommend_budgets_default(&transactions, &[]);
        let food = recs.iter().find(|r| r.category == Category::Food).unwrap();
        assert_eq!(food.recommended_budget, 0.0);
        assert!(food.reasoning.contains("income"));
    }

    #[test]
    fn test_top_five_with_deterministic_tie_break() {
        let transactions = vec![
            tx(-100.0, Category::Food, "2024-01-01"),
            tx(-100.0, Category::Grocery, "2024-01-01"),
            tx(-100.0, Category::Transport, "2024-01-01"),
            tx(-100.0, Category::Entertainment, "2024-01-01"),
            tx(-100.0, Category::Shopping, "2024-01-01"),
            tx(-100.0, Category::Travel, "2024-01-01"),
        ];
        let recs = recommend_budgets_default(&transactions, &[]);
        assert_eq!(recs.len(), 5);
        // All tied; lexicographic category id order decides who stays.
        let ids: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            ids,
            vec!["entertainment", "food", "grocery", "shopping", "transport"]
        );
    }

    #[test]
    fn test_recommendations_never_negative() {
        let transactions = vec![
            tx(1000.0, Category::Salary, "2024-01-01"),
            tx(-500.0, Category::Food, "2024-01-02"),
            tx(-20.0, Category::Transport, "2024-01-03"),
        ];
        let recs = recommend_budgets_default(&transactions, &[budget(Category::Food, 1000.0)]);
        assert!(recs.iter().all(|r| r.recommended_budget >= 0.0));
    }
}
