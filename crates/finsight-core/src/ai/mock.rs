//! Mock backend for testing
//!
//! Returns predictable responses for all advisor operations, plus a failing
//! mode whose every operation reports an external-service error. The failing
//! mode is how tests drive the orchestrator's fallback arm without a
//! network.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{
    ActionRecommendation, Budget, BudgetRecommendation, Category, Enrichment, ExpenseForecast,
    ForecastCategory, Impact, Insight, Timeframe, Transaction,
};

use super::AdvisorBackend;

/// Mock advisor backend
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    failing: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            failing: false,
        }
    }

    /// Create a mock whose operations all fail with an external-service
    /// error, simulating an unreachable or misbehaving endpoint.
    pub fn failing() -> Self {
        Self {
            healthy: false,
            failing: true,
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(Error::ExternalService(
            "mock backend configured to fail".into(),
        ))
    }
}

#[async_trait]
impl AdvisorBackend for MockBackend {
    async fn predict_category(&self, description: &str) -> Result<Category> {
        if self.failing {
            return self.fail();
        }
        let description = description.to_lowercase();
        let category = if description.contains("netflix") {
            Category::Entertainment
        } else if description.contains("uber") {
            Category::Transport
        } else if description.contains("starbucks") {
            Category::Food
        } else if description.contains("salary") {
            Category::Salary
        } else {
            Category::OtherExpense
        };
        Ok(category)
    }

    async fn enrich_transaction(&self, description: &str) -> Result<Enrichment> {
        if self.failing {
            return self.fail();
        }
        let category = self.predict_category(description).await?;
        Ok(Enrichment {
            merchant_name: "Mock Merchant".to_string(),
            category,
            icon: category.icon().to_string(),
        })
    }

    async fn generate_insights(&self, _transactions: &[Transaction]) -> Result<Vec<Insight>> {
        if self.failing {
            return self.fail();
        }
        Ok(vec![Insight {
            title: "Mock Insight".to_string(),
            description: "Spending looks steady.".to_string(),
            action: Some("Nothing to do.".to_string()),
            amount: None,
        }])
    }

    async fn recommend_budgets(
        &self,
        _transactions: &[Transaction],
        _existing_budgets: &[Budget],
    ) -> Result<Vec<BudgetRecommendation>> {
        if self.failing {
            return self.fail();
        }
        Ok(vec![BudgetRecommendation {
            category: Category::Food,
            current_budget: None,
            recommended_budget: 250.0,
            reasoning: "Mock recommendation".to_string(),
            icon: Category::Food.icon().to_string(),
        }])
    }

    async fn predict_future_expenses(
        &self,
        _transactions: &[Transaction],
    ) -> Result<ExpenseForecast> {
        if self.failing {
            return self.fail();
        }
        Ok(ExpenseForecast {
            total_predicted: 100.0,
            categories: vec![ForecastCategory {
                name: "food".to_string(),
                amount: 100.0,
                icon: "🍔".to_string(),
            }],
        })
    }

    async fn recommend_actions(
        &self,
        _transactions: &[Transaction],
    ) -> Result<Vec<ActionRecommendation>> {
        if self.failing {
            return self.fail();
        }
        Ok(vec![ActionRecommendation {
            title: "Mock Action".to_string(),
            description: "Keep doing what you're doing.".to_string(),
            impact: Impact::Low,
            timeframe: Timeframe::LongTerm,
        }])
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_predict_category() {
        let mock = MockBackend::new();
        assert_eq!(
            mock.predict_category("NETFLIX.COM").await.unwrap(),
            Category::Entertainment
        );
        assert_eq!(
            mock.predict_category("something else").await.unwrap(),
            Category::OtherExpense
        );
    }

    #[tokio::test]
    async fn test_failing_mock_errors_everywhere() {
        let mock = MockBackend::failing();
        assert!(mock.predict_category("NETFLIX.COM").await.is_err());
        assert!(mock.generate_insights(&[]).await.is_err());
        assert!(mock.recommend_budgets(&[], &[]).await.is_err());
        assert!(mock.predict_future_expenses(&[]).await.is_err());
        assert!(mock.recommend_actions(&[]).await.is_err());
        assert!(!mock.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        assert!(MockBackend::new().health_check().await);
    }
}
