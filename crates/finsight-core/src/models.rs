//! Data model shared across the analytics core
//!
//! `Transaction` and `Budget` are the caller-supplied snapshot records; the
//! remaining types are derived values recomputed on demand and never
//! persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;

/// Whether a category describes money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Income,
    Expense,
}

/// Closed category enumeration.
///
/// Declaration order is load-bearing: the keyword classifier scores
/// categories in this order and resolves ties toward the earlier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Grocery,
    Transport,
    Entertainment,
    Shopping,
    Housing,
    Utilities,
    Healthcare,
    Education,
    Personal,
    Travel,
    Subscription,
    OtherExpense,
    Salary,
    Freelance,
    Gift,
    Investment,
    Refund,
    OtherIncome,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: &'static [Category] = &[
        Category::Food,
        Category::Grocery,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Housing,
        Category::Utilities,
        Category::Healthcare,
        Category::Education,
        Category::Personal,
        Category::Travel,
        Category::Subscription,
        Category::OtherExpense,
        Category::Salary,
        Category::Freelance,
        Category::Gift,
        Category::Investment,
        Category::Refund,
        Category::OtherIncome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Grocery => "grocery",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Housing => "housing",
            Category::Utilities => "utilities",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Personal => "personal",
            Category::Travel => "travel",
            Category::Subscription => "subscription",
            Category::OtherExpense => "other_expense",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Gift => "gift",
            Category::Investment => "investment",
            Category::Refund => "refund",
            Category::OtherIncome => "other_income",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Salary
            | Category::Freelance
            | Category::Gift
            | Category::Investment
            | Category::Refund
            | Category::OtherIncome => CategoryKind::Income,
            _ => CategoryKind::Expense,
        }
    }

    /// Display emoji for dashboards and recommendations.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Grocery => "🛒",
            Category::Transport => "🚗",
            Category::Entertainment => "🎬",
            Category::Shopping => "🛍️",
            Category::Housing => "🏠",
            Category::Utilities => "💡",
            Category::Healthcare => "🏥",
            Category::Education => "📚",
            Category::Personal => "💇",
            Category::Travel => "✈️",
            Category::Subscription => "📱",
            Category::OtherExpense => "📋",
            Category::Salary => "💰",
            Category::Freelance => "💼",
            Category::Gift => "🎁",
            Category::Investment => "📈",
            Category::Refund => "💵",
            Category::OtherIncome => "💵",
        }
    }

    /// Total mapping from arbitrary labels to a category.
    ///
    /// Unknown identifiers map to `other_expense` so icon/label lookups over
    /// externally-produced category strings can never fail.
    pub fn parse_lossy(label: &str) -> Category {
        label
            .trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(Category::OtherExpense)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "food" => Ok(Category::Food),
            "grocery" => Ok(Category::Grocery),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "shopping" => Ok(Category::Shopping),
            "housing" => Ok(Category::Housing),
            "utilities" => Ok(Category::Utilities),
            "healthcare" => Ok(Category::Healthcare),
            "education" => Ok(Category::Education),
            "personal" => Ok(Category::Personal),
            "travel" => Ok(Category::Travel),
            "subscription" => Ok(Category::Subscription),
            "other_expense" => Ok(Category::OtherExpense),
            "salary" => Ok(Category::Salary),
            "freelance" => Ok(Category::Freelance),
            "gift" => Ok(Category::Gift),
            "investment" => Ok(Category::Investment),
            "refund" => Ok(Category::Refund),
            "other_income" => Ok(Category::OtherIncome),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// A single income or expense record.
///
/// Sign of `amount` determines the kind: positive is income, negative is
/// expense. A zero amount is degenerate and contributes to neither side of
/// the totals. The analytics core only ever reads snapshots; it never
/// mutates records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Storage-assigned identifier; absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    /// ISO-8601 date as stored by the document layer. Parsed per record by
    /// the analytics that need it; see [`Transaction::parsed_date`].
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Parse the record's date, accepting plain dates (`2024-01-05`) and
    /// full RFC 3339 timestamps.
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        if let Ok(date) = self.date.parse::<NaiveDate>() {
            return Ok(date);
        }
        let timestamp = DateTime::parse_from_rfc3339(&self.date)?;
        Ok(timestamp.date_naive())
    }
}

/// Monthly spending ceiling for one category.
///
/// At most one active budget per category; the storage layer enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: Category,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Income/expense totals over a transaction snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

/// Absolute amount grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// One calendar-month bucket of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// First day of the bucket's month; the sort key.
    pub month: NaiveDate,
    /// Display label, e.g. "Jan 2024".
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

/// A narrative observation about spending or income behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Suggested monthly budget for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    pub category: Category,
    pub current_budget: Option<f64>,
    pub recommended_budget: f64,
    pub reasoning: String,
    pub icon: String,
}

/// Next-month expense prediction, per category plus overall.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForecast {
    pub total_predicted: f64,
    pub categories: Vec<ForecastCategory>,
}

/// One category line of an expense forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCategory {
    pub name: String,
    pub amount: f64,
    pub icon: String,
}

/// Expected impact of an action recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Impact::High),
            "medium" => Ok(Impact::Medium),
            "low" => Ok(Impact::Low),
            _ => Err(format!("Unknown impact: {}", s)),
        }
    }
}

/// Horizon over which an action recommendation pays off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Timeframe {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::ShortTerm => "Short-term",
            Timeframe::MediumTerm => "Medium-term",
            Timeframe::LongTerm => "Long-term",
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short-term" => Ok(Timeframe::ShortTerm),
            "medium-term" => Ok(Timeframe::MediumTerm),
            "long-term" => Ok(Timeframe::LongTerm),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

/// A concrete financial action the user could take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecommendation {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub timeframe: Timeframe,
}

/// Merchant information derived from a transaction description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    /// Canonical merchant label; empty when no rule matched.
    pub merchant_name: String,
    pub category: Category,
    pub icon: String,
}

/// Overall health label derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthCategory {
    pub fn for_score(score: u8) -> HealthCategory {
        match score {
            80.. => HealthCategory::Excellent,
            60..=79 => HealthCategory::Good,
            40..=59 => HealthCategory::Fair,
            _ => HealthCategory::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthCategory::Excellent => "excellent",
            HealthCategory::Good => "good",
            HealthCategory::Fair => "fair",
            HealthCategory::Poor => "poor",
        }
    }
}

/// Raw metrics backing a health score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Percent of income kept; 0 when there is no income.
    pub savings_rate: f64,
    /// Percent of budgeted categories whose spend stayed within the limit;
    /// 0 when no budgets exist.
    pub budget_adherence: f64,
    /// Expenses as a percent of income; `None` when there is no income.
    pub expense_to_income_ratio: Option<f64>,
}

/// Composite financial health score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// 0..=100 by construction.
    pub score: u8,
    pub category: HealthCategory,
    pub metrics: HealthMetrics,
    pub income_stable: bool,
    pub expenses_stable: bool,
}

/// A health report plus the action recommendations that accompany it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAnalysis {
    /// Absent when there are no transactions to score.
    pub report: Option<HealthReport>,
    pub actions: Vec<ActionRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
        }
    }

    #[test]
    fn test_category_parse_lossy_never_fails() {
        assert_eq!(Category::parse_lossy("food"), Category::Food);
        assert_eq!(Category::parse_lossy(" Travel "), Category::Travel);
        assert_eq!(Category::parse_lossy("my custom thing"), Category::OtherExpense);
        assert_eq!(Category::parse_lossy(""), Category::OtherExpense);
        // icon lookup stays total over arbitrary labels
        assert_eq!(Category::parse_lossy("???").icon(), "📋");
    }

    #[test]
    fn test_category_kind_split() {
        let income: Vec<_> = Category::ALL
            .iter()
            .filter(|c| c.kind() == CategoryKind::Income)
            .collect();
        assert_eq!(income.len(), 6);
        assert!(income.contains(&&Category::Salary));
        assert_eq!(Category::Food.kind(), CategoryKind::Expense);
    }

    #[test]
    fn test_transaction_date_parsing() {
        let mut tx = Transaction {
            id: None,
            title: "Coffee".to_string(),
            amount: -4.5,
            category: Category::Food,
            date: "2024-01-05".to_string(),
            notes: None,
            merchant: None,
        };
        assert_eq!(
            tx.parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );

        tx.date = "2024-01-05T09:30:00Z".to_string();
        assert_eq!(
            tx.parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );

        tx.date = "not a date".to_string();
        assert!(tx.parsed_date().is_err());
    }

    #[test]
    fn test_transaction_serde_shape() {
        let json = r#"{"title":"Paycheck","amount":2500.0,"category":"salary","date":"2024-02-01"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.category, Category::Salary);
        assert!(tx.is_income());
        assert!(tx.id.is_none());
    }

    #[test]
    fn test_health_category_thresholds() {
        assert_eq!(HealthCategory::for_score(100), HealthCategory::Excellent);
        assert_eq!(HealthCategory::for_score(80), HealthCategory::Excellent);
        assert_eq!(HealthCategory::for_score(79), HealthCategory::Good);
        assert_eq!(HealthCategory::for_score(60), HealthCategory::Good);
        assert_eq!(HealthCategory::for_score(40), HealthCategory::Fair);
        assert_eq!(HealthCategory::for_score(39), HealthCategory::Poor);
        assert_eq!(HealthCategory::for_score(0), HealthCategory::Poor);
    }
}
