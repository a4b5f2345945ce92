//! Gemini backend implementation
//!
//! HTTP client for the Google generative-language API. Each operation
//! formats a natural-language prompt, posts it to the `generateContent`
//! endpoint, and parses the returned text as structured data.
//!
//! The wire contract matches the hosted service exactly: request body
//! `{"contents":[{"parts":[{"text": ...}]}], "generationConfig": {...}}`,
//! response `{"candidates":[{"content":{"parts":[{"text": ...}]}}]}`, API
//! key passed as a `key` query parameter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    ActionRecommendation, Budget, BudgetRecommendation, Category, Enrichment, ExpenseForecast,
    Insight, Transaction,
};

use super::parsing::{
    parse_actions, parse_budget_recommendations, parse_category, parse_enrichment,
    parse_expense_forecast, parse_insights,
};
use super::AdvisorBackend;

/// Default generateContent endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

const DEFAULT_MODEL: &str = "gemini-pro";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// At most this many transactions are serialized into a prompt.
const PROMPT_TRANSACTION_LIMIT: usize = 50;

/// The category menu included in classification prompts. The model must
/// answer with one of these ids.
const CATEGORY_MENU: &str = "food (restaurants, cafes, dining out)
grocery (supermarkets, food stores)
transport (gas, fuel, uber, public transit)
entertainment (movies, concerts, streaming services)
shopping (retail, clothing, online purchases)
housing (rent, mortgage, home expenses)
utilities (electric, water, internet, phone bills)
healthcare (medical, dental, pharmacy)
education (tuition, books, courses)
personal (haircuts, spa, fitness)
travel (hotels, flights, vacations)
subscription (regular memberships, subscriptions)
other_expense (miscellaneous expenses)
salary (regular employment income)
freelance (contract work, gigs)
gift (presents, donations received)
investment (returns from investments)
refund (returned purchases, reimbursements)
other_income (miscellaneous income)";

/// Gemini backend
///
/// Constructed with an API credential; a blank credential is a
/// configuration error, never a silent degrade — choosing the heuristic
/// path is the orchestrator's decision, not an accident here.
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a backend against the default endpoint.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a backend against a custom endpoint (e.g. a local stand-in
    /// exposing the same prompt/response contract).
    pub fn with_endpoint(endpoint: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Configuration(
                "generative API key must not be blank".into(),
            ));
        }
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create from environment variables.
    ///
    /// Requires `GEMINI_API_KEY`; honors `GEMINI_API_URL` for a custom
    /// endpoint. Returns `None` when unconfigured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let endpoint =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        match Self::with_endpoint(&endpoint, &api_key) {
            Ok(backend) => Some(backend),
            Err(error) => {
                tracing::warn!(error = %error, "ignoring invalid Gemini configuration");
                None
            }
        }
    }

    /// Send one prompt and return the model's raw text.
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ExternalService(format!(
                "generative API error {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| Error::ExternalService("generative API returned no candidates".into()))
    }

    fn transactions_json(transactions: &[Transaction]) -> Result<String> {
        let window = &transactions[..transactions.len().min(PROMPT_TRANSACTION_LIMIT)];
        Ok(serde_json::to_string(window)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[async_trait]
impl AdvisorBackend for GeminiBackend {
    async fn predict_category(&self, description: &str) -> Result<Category> {
        let prompt = format!(
            "Based on this transaction description, categorize it into EXACTLY ONE of these \
             specific categories (don't make up new ones): \n{menu}\n    \nTransaction: \
             \"{description}\"\n    \nReturn only the category name (a single word from the list \
             above) with no additional text.",
            menu = CATEGORY_MENU,
            description = description
        );

        let response = self.generate_content(&prompt).await?;
        debug!(response = %response, "Gemini category response");
        parse_category(&response)
    }

    async fn enrich_transaction(&self, description: &str) -> Result<Enrichment> {
        let prompt = format!(
            "Based on this transaction description, provide merchant information and determine \
             its category. Use EXACTLY one of these specific categories (don't make up new \
             ones): \n{menu}\n\nTransaction: \"{description}\"\n    \nFormat your response as a \
             JSON object with the following structure:\n{{\n  \"merchantName\": \"Detected \
             merchant name\",\n  \"category\": \"Exactly one of the categories from the list \
             above\",\n  \"icon\": \"An emoji that represents this category\"\n}}",
            menu = CATEGORY_MENU,
            description = description
        );

        let response = self.generate_content(&prompt).await?;
        debug!(response = %response, "Gemini enrichment response");
        parse_enrichment(&response)
    }

    async fn generate_insights(&self, transactions: &[Transaction]) -> Result<Vec<Insight>> {
        let prompt = format!(
            "Based on these financial transactions, generate 3-5 meaningful insights about \
             spending patterns, income trends, or financial behaviors. For each insight, provide \
             a title, brief description, and optional actionable suggestion.\n    \nTransactions: \
             {data}\n    \nFormat your response as a JSON array of insights with the following \
             structure:\n[\n  {{\n    \"title\": \"Insight title\",\n    \"description\": \"Brief \
             description of the insight\",\n    \"action\": \"Suggested action the user could \
             take\"\n  }}\n]",
            data = Self::transactions_json(transactions)?
        );

        let response = self.generate_content(&prompt).await?;
        debug!(response = %response, "Gemini insights response");
        parse_insights(&response)
    }

    async fn recommend_budgets(
        &self,
        transactions: &[Transaction],
        existing_budgets: &[Budget],
    ) -> Result<Vec<BudgetRecommendation>> {
        let prompt = format!(
            "Based on these financial transactions and existing budgets, recommend 3-5 budget \
             adjustments or new budget categories. Category names must come from this list: \
             \n{menu}\n    \nTransactions: {data}\nExisting Budgets: {budgets}\n    \nFormat your \
             response as a JSON array with the following structure:\n[\n  {{\n    \"category\": \
             \"Category name\",\n    \"currentBudget\": number or null if no existing budget,\n    \
             \"recommendedBudget\": number,\n    \"reasoning\": \"Brief explanation for this \
             recommendation\",\n    \"icon\": \"An emoji that represents this category\"\n  }}\n]",
            menu = CATEGORY_MENU,
            data = Self::transactions_json(transactions)?,
            budgets = serde_json::to_string(existing_budgets)?
        );

        let response = self.generate_content(&prompt).await?;
        debug!(response = %response, "Gemini budget recommendation response");
        parse_budget_recommendations(&response)
    }

    async fn predict_future_expenses(
        &self,
        transactions: &[Transaction],
    ) -> Result<ExpenseForecast> {
        let prompt = format!(
            "Based on these financial transactions, predict future expenses for the next month \
             by category.\n    \nTransactions: {data}\n    \nFormat your response as a JSON \
             object with the following structure:\n{{\n  \"totalPredicted\": number,\n  \
             \"categories\": [\n    {{\n      \"name\": \"Category name\",\n      \"amount\": \
             number,\n      \"icon\": \"An emoji that represents this category\"\n    }}\n  ]\n}}",
            data = Self::transactions_json(transactions)?
        );

        let response = self.generate_content(&prompt).await?;
        debug!(response = %response, "Gemini expense forecast response");
        parse_expense_forecast(&response)
    }

    async fn recommend_actions(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<ActionRecommendation>> {
        let prompt = format!(
            "Based on these financial transactions, provide 3-5 financial action \
             recommendations.\n    \nTransactions: {data}\n    \nFormat your response as a JSON \
             array with the following structure:\n[\n  {{\n    \"title\": \"Recommendation \
             title\",\n    \"description\": \"Description of the recommendation\",\n    \
             \"impact\": \"High/Medium/Low\",\n    \"timeframe\": \
             \"Short-term/Medium-term/Long-term\"\n  }}\n]",
            data = Self::transactions_json(transactions)?
        );

        let response = self.generate_content(&prompt).await?;
        debug!(response = %response, "Gemini action recommendation response");
        parse_actions(&response)
    }

    async fn health_check(&self) -> bool {
        // The generateContent endpoint has no cheap liveness probe; a HEAD
        // request against the endpoint host answers reachability.
        self.http_client
            .head(&self.endpoint)
            .send()
            .await
            .is_ok()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_is_configuration_error() {
        assert!(matches!(
            GeminiBackend::new(""),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            GeminiBackend::new("   "),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_valid_credential_constructs() {
        let backend = GeminiBackend::new("test-key").unwrap();
        assert_eq!(backend.model(), "gemini-pro");
        assert_eq!(backend.host(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["temperature"], 0.7);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_response_wire_shape() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"food"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.candidates[0].content.parts[0].text, "food");
    }

    #[test]
    fn test_transactions_json_caps_window() {
        let transactions: Vec<Transaction> = (0..60)
            .map(|i| Transaction {
                id: None,
                title: format!("tx {}", i),
                amount: -1.0,
                category: Category::Food,
                date: "2024-01-01".to_string(),
                notes: None,
                merchant: None,
            })
            .collect();
        let json = GeminiBackend::transactions_json(&transactions).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), PROMPT_TRANSACTION_LIMIT);
    }
}
