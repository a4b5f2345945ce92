//! JSON parsing helpers for generative-model responses
//!
//! Model responses often wrap the JSON payload in prose or code fences;
//! these helpers extract the payload and validate its shape before anything
//! reaches a caller. Validation failures surface as errors so the
//! orchestrator can demote to the heuristic engine.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{
    ActionRecommendation, BudgetRecommendation, Category, Enrichment, ExpenseForecast,
    ForecastCategory, Impact, Insight, Timeframe,
};

/// Parse a bare category id from a response.
///
/// The prompt asks for a single category name with no extra text, but
/// models still add quoting or trailing prose; the first line is stripped
/// down to its identifier characters.
pub fn parse_category(response: &str) -> Result<Category> {
    let token = response
        .trim()
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .to_ascii_lowercase();

    token.parse().map_err(|_| {
        Error::InvalidData(format!(
            "Unknown category from AI: {}",
            truncate(response)
        ))
    })
}

#[derive(Debug, Deserialize)]
struct RawInsight {
    title: String,
    description: String,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    amount: Option<f64>,
}

/// Parse an insight list from a response.
pub fn parse_insights(response: &str) -> Result<Vec<Insight>> {
    let raw: Vec<RawInsight> = from_json(extract_json_array(response)?)?;
    raw.into_iter()
        .map(|insight| {
            if insight.title.trim().is_empty() {
                return Err(Error::InvalidData("AI insight with empty title".into()));
            }
            Ok(Insight {
                title: insight.title,
                description: insight.description,
                action: insight.action,
                amount: insight.amount,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBudgetRecommendation {
    category: String,
    #[serde(default)]
    current_budget: Option<f64>,
    recommended_budget: f64,
    reasoning: String,
    #[serde(default)]
    icon: Option<String>,
}

/// Parse budget recommendations from a response.
///
/// Categories must be known ids and amounts must be non-negative finite
/// numbers; anything else is invalid data.
pub fn parse_budget_recommendations(response: &str) -> Result<Vec<BudgetRecommendation>> {
    let raw: Vec<RawBudgetRecommendation> = from_json(extract_json_array(response)?)?;
    raw.into_iter()
        .map(|rec| {
            let category = parse_known_category(&rec.category)?;
            if !rec.recommended_budget.is_finite() || rec.recommended_budget < 0.0 {
                return Err(Error::InvalidData(format!(
                    "AI recommended a negative budget for {}",
                    category
                )));
            }
            Ok(BudgetRecommendation {
                category,
                current_budget: rec.current_budget,
                recommended_budget: rec.recommended_budget,
                reasoning: rec.reasoning,
                icon: rec.icon.unwrap_or_else(|| category.icon().to_string()),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawForecast {
    total_predicted: f64,
    categories: Vec<RawForecastCategory>,
}

#[derive(Debug, Deserialize)]
struct RawForecastCategory {
    name: String,
    amount: f64,
    #[serde(default)]
    icon: Option<String>,
}

/// Parse an expense forecast from a response.
pub fn parse_expense_forecast(response: &str) -> Result<ExpenseForecast> {
    let raw: RawForecast = from_json(extract_json_object(response)?)?;
    if !raw.total_predicted.is_finite() || raw.total_predicted < 0.0 {
        return Err(Error::InvalidData(
            "AI forecast total is not a non-negative number".into(),
        ));
    }
    let categories = raw
        .categories
        .into_iter()
        .map(|cat| {
            if !cat.amount.is_finite() || cat.amount < 0.0 {
                return Err(Error::InvalidData(format!(
                    "AI forecast amount for {} is not a non-negative number",
                    cat.name
                )));
            }
            let icon = cat
                .icon
                .unwrap_or_else(|| Category::parse_lossy(&cat.name).icon().to_string());
            Ok(ForecastCategory {
                name: cat.name,
                amount: cat.amount,
                icon,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ExpenseForecast {
        total_predicted: raw.total_predicted,
        categories,
    })
}

#[derive(Debug, Deserialize)]
struct RawAction {
    title: String,
    description: String,
    impact: String,
    timeframe: String,
}

/// Parse action recommendations from a response.
pub fn parse_actions(response: &str) -> Result<Vec<ActionRecommendation>> {
    let raw: Vec<RawAction> = from_json(extract_json_array(response)?)?;
    raw.into_iter()
        .map(|action| {
            let impact: Impact = action
                .impact
                .parse()
                .map_err(|e: String| Error::InvalidData(e))?;
            let timeframe: Timeframe = action
                .timeframe
                .parse()
                .map_err(|e: String| Error::InvalidData(e))?;
            Ok(ActionRecommendation {
                title: action.title,
                description: action.description,
                impact,
                timeframe,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnrichment {
    #[serde(default)]
    merchant_name: String,
    category: String,
    #[serde(default)]
    icon: Option<String>,
}

/// Parse merchant enrichment from a response.
pub fn parse_enrichment(response: &str) -> Result<Enrichment> {
    let raw: RawEnrichment = from_json(extract_json_object(response)?)?;
    let category = parse_known_category(&raw.category)?;
    Ok(Enrichment {
        merchant_name: raw.merchant_name,
        category,
        icon: raw.icon.unwrap_or_else(|| category.icon().to_string()),
    })
}

/// Strict category parse, case-insensitive over the known ids only.
fn parse_known_category(label: &str) -> Result<Category> {
    label
        .trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| Error::InvalidData(format!("Unknown category from AI: {}", label)))
}

/// Locate the outermost JSON object in a response.
fn extract_json_object(response: &str) -> Result<&str> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');
    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::InvalidData(format!(
            "No JSON object found in AI response | Raw: {}",
            truncate(response)
        ))),
    }
}

/// Locate the outermost JSON array in a response.
fn extract_json_array(response: &str) -> Result<&str> {
    let response = response.trim();
    let start = response.find('[');
    let end = response.rfind(']');
    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::InvalidData(format!(
            "No JSON array found in AI response | Raw: {}",
            truncate(response)
        ))),
    }
}

fn from_json<'a, T: Deserialize<'a>>(json_str: &'a str) -> Result<T> {
    serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid JSON from AI: {} | Raw: {}",
            e,
            truncate(json_str)
        ))
    })
}

/// Truncate long responses for error messages.
fn truncate(response: &str) -> String {
    if response.len() > 200 {
        let mut end = 200;
        while !response.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &response[..end])
    } else {
        response.to_string()
    }
}
