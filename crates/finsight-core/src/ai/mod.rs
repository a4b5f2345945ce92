//! Pluggable AI advisor abstraction
//!
//! This module provides a backend-agnostic interface for the generative
//! operations: category prediction, merchant enrichment, insights, budget
//! recommendations, expense forecasts, and action recommendations.
//!
//! # Architecture
//!
//! - `AdvisorBackend` trait: defines the interface for all advisor operations
//! - `AdvisorClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//! - `Advisor`: the orchestration layer that demotes backend failures to
//!   the deterministic heuristic engine
//!
//! # Configuration
//!
//! Environment variables:
//! - `FINSIGHT_AI_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API credential (required for the gemini backend)
//! - `GEMINI_API_URL`: Override the generateContent endpoint (optional)

mod gemini;
mod mock;
pub mod orchestrator;
pub mod parsing;

pub use gemini::{GeminiBackend, DEFAULT_ENDPOINT};
pub use mock::MockBackend;
pub use orchestrator::Advisor;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ActionRecommendation, Budget, BudgetRecommendation, Category, Enrichment, ExpenseForecast,
    Insight, Transaction,
};

/// Trait defining the interface for all advisor backends
///
/// Backends must be Send + Sync to allow use across async tasks. A backend
/// fails loudly: it never substitutes heuristic data on error — that
/// decision belongs to the orchestrator.
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Predict a category for a transaction description
    async fn predict_category(&self, description: &str) -> Result<Category>;

    /// Derive merchant label, category, and icon from a description
    async fn enrich_transaction(&self, description: &str) -> Result<Enrichment>;

    /// Generate narrative insights over a transaction snapshot
    async fn generate_insights(&self, transactions: &[Transaction]) -> Result<Vec<Insight>>;

    /// Recommend per-category monthly budgets
    async fn recommend_budgets(
        &self,
        transactions: &[Transaction],
        existing_budgets: &[Budget],
    ) -> Result<Vec<BudgetRecommendation>>;

    /// Predict next-month expenses by category
    async fn predict_future_expenses(
        &self,
        transactions: &[Transaction],
    ) -> Result<ExpenseForecast>;

    /// Recommend concrete financial actions
    async fn recommend_actions(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<ActionRecommendation>>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete advisor client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AdvisorClient {
    /// Hosted generative-language backend
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AdvisorClient {
    /// Create an advisor client from environment variables
    ///
    /// Checks `FINSIGHT_AI_BACKEND` to determine which backend to use:
    /// - `gemini` (default): uses GEMINI_API_KEY and GEMINI_API_URL
    /// - `mock`: creates a mock backend for testing
    ///
    /// Returns None when the required variables are not set; absence is the
    /// supported heuristic-only operating mode.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("FINSIGHT_AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(AdvisorClient::Gemini),
            "mock" => Some(AdvisorClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown FINSIGHT_AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(AdvisorClient::Gemini)
            }
        }
    }

    /// Create a Gemini backend directly from a credential
    pub fn gemini(api_key: &str) -> Result<Self> {
        Ok(AdvisorClient::Gemini(GeminiBackend::new(api_key)?))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AdvisorClient::Mock(MockBackend::new())
    }
}

// Implement AdvisorBackend for AdvisorClient by delegating to the inner backend
#[async_trait]
impl AdvisorBackend for AdvisorClient {
    async fn predict_category(&self, description: &str) -> Result<Category> {
        match self {
            AdvisorClient::Gemini(b) => b.predict_category(description).await,
            AdvisorClient::Mock(b) => b.predict_category(description).await,
        }
    }

    async fn enrich_transaction(&self, description: &str) -> Result<Enrichment> {
        match self {
            AdvisorClient::Gemini(b) => b.enrich_transaction(description).await,
            AdvisorClient::Mock(b) => b.enrich_transaction(description).await,
        }
    }

    async fn generate_insights(&self, transactions: &[Transaction]) -> Result<Vec<Insight>> {
        match self {
            AdvisorClient::Gemini(b) => b.generate_insights(transactions).await,
            AdvisorClient::Mock(b) => b.generate_insights(transactions).await,
        }
    }

    async fn recommend_budgets(
        &self,
        transactions: &[Transaction],
        existing_budgets: &[Budget],
    ) -> Result<Vec<BudgetRecommendation>> {
        match self {
            AdvisorClient::Gemini(b) => b.recommend_budgets(transactions, existing_budgets).await,
            AdvisorClient::Mock(b) => b.recommend_budgets(transactions, existing_budgets).await,
        }
    }

    async fn predict_future_expenses(
        &self,
        transactions: &[Transaction],
    ) -> Result<ExpenseForecast> {
        match self {
            AdvisorClient::Gemini(b) => b.predict_future_expenses(transactions).await,
            AdvisorClient::Mock(b) => b.predict_future_expenses(transactions).await,
        }
    }

    async fn recommend_actions(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<ActionRecommendation>> {
        match self {
            AdvisorClient::Gemini(b) => b.recommend_actions(transactions).await,
            AdvisorClient::Mock(b) => b.recommend_actions(transactions).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AdvisorClient::Gemini(b) => b.health_check().await,
            AdvisorClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AdvisorClient::Gemini(b) => b.model(),
            AdvisorClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AdvisorClient::Gemini(b) => b.host(),
            AdvisorClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_client_mock() {
        let client = AdvisorClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[test]
    fn test_gemini_constructor_rejects_blank_key() {
        assert!(AdvisorClient::gemini("").is_err());
        assert!(AdvisorClient::gemini("key").is_ok());
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AdvisorClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_classification_through_enum() {
        let client = AdvisorClient::mock();
        let category = client.predict_category("NETFLIX.COM").await.unwrap();
        assert_eq!(category, Category::Entertainment);
    }
}
