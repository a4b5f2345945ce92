//! Integration tests for the delegate/fallback contract
//!
//! A failing delegate must be observationally identical to running with no
//! delegate at all: same output shapes, same values, no surfaced errors.

use finsight_core::ai::MockBackend;
use finsight_core::{Advisor, AdvisorClient, Budget, Category, Transaction};

fn tx(title: &str, amount: f64, category: Category, date: &str) -> Transaction {
    Transaction {
        id: None,
        title: title.to_string(),
        amount,
        category,
        date: date.to_string(),
        notes: None,
        merchant: None,
    }
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        tx("Paycheck", 2500.0, Category::Salary, "2024-02-01"),
        tx("Rent", -1200.0, Category::Housing, "2024-02-02"),
        tx("Groceries", -320.0, Category::Grocery, "2024-02-05"),
        tx("Starbucks coffee", -6.5, Category::Food, "2024-02-06"),
        tx("Paycheck", 2500.0, Category::Salary, "2024-01-01"),
        tx("Rent", -1200.0, Category::Housing, "2024-01-02"),
        tx("Car loan payment", -400.0, Category::Transport, "2024-01-08"),
    ]
}

fn sample_budgets() -> Vec<Budget> {
    vec![
        Budget {
            category: Category::Housing,
            amount: 2500.0,
            created_at: None,
        },
        Budget {
            category: Category::Grocery,
            amount: 300.0,
            created_at: None,
        },
    ]
}

fn failing_advisor() -> Advisor {
    Advisor::new(Some(AdvisorClient::Mock(MockBackend::failing())))
}

#[tokio::test]
async fn failing_delegate_matches_heuristic_classification() {
    let heuristic = Advisor::heuristic();
    let degraded = failing_advisor();

    for description in ["Starbucks coffee", "Uber ride", "wire deposit", ""] {
        assert_eq!(
            degraded.predict_category(description).await,
            heuristic.predict_category(description).await,
            "mismatch for {:?}",
            description
        );
    }
}

#[tokio::test]
async fn failing_delegate_matches_heuristic_enrichment() {
    let heuristic = Advisor::heuristic();
    let degraded = failing_advisor();

    for description in ["AMAZON.COM ORDER", "mystery charge", "salary transfer"] {
        assert_eq!(
            degraded.enrich_transaction(description).await,
            heuristic.enrich_transaction(description).await
        );
    }
}

#[tokio::test]
async fn failing_delegate_matches_heuristic_analytics_suite() {
    let transactions = sample_transactions();
    let budgets = sample_budgets();

    let heuristic = Advisor::heuristic();
    let degraded = failing_advisor();

    assert_eq!(
        degraded.generate_insights(&transactions).await,
        heuristic.generate_insights(&transactions).await
    );
    assert_eq!(
        degraded.recommend_budgets(&transactions, &budgets).await,
        heuristic.recommend_budgets(&transactions, &budgets).await
    );
    assert_eq!(
        degraded.predict_future_expenses(&transactions).await,
        heuristic.predict_future_expenses(&transactions).await
    );
    assert_eq!(
        degraded.recommend_actions(&transactions).await,
        heuristic.recommend_actions(&transactions).await
    );
    assert_eq!(
        degraded.analyze_health(&transactions, &budgets).await,
        heuristic.analyze_health(&transactions, &budgets).await
    );
}

#[tokio::test]
async fn healthy_delegate_takes_precedence() {
    let advisor = Advisor::new(Some(AdvisorClient::Mock(MockBackend::new())));
    let insights = advisor.generate_insights(&sample_transactions()).await;
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].title, "Mock Insight");
}

#[tokio::test]
async fn blank_credential_is_rejected_up_front() {
    // Constructing a delegate with a blank credential fails loudly so the
    // caller chooses fallback deliberately, never by accident.
    assert!(AdvisorClient::gemini(" ").is_err());

    let advisor = Advisor::heuristic();
    assert!(!advisor.has_delegate());
    assert_eq!(
        advisor.predict_category("Starbucks coffee").await,
        Category::Food
    );
}
