//! Finsight Core Library
//!
//! Analytics and categorization core for the Finsight personal finance
//! tracker:
//! - Pure aggregation over transaction snapshots (totals, category
//!   breakdowns, monthly trend series)
//! - Deterministic keyword classifier and merchant enrichment engine
//! - Rule-based budget recommendations and financial health scoring
//! - Heuristic insight/action/forecast generation
//! - Pluggable AI advisor backends with explicit heuristic fallback
//!
//! The crate holds no state and performs no I/O apart from the optional AI
//! delegate's HTTP calls; callers supply in-memory `Transaction`/`Budget`
//! snapshots and receive derived values.

pub mod ai;
pub mod analytics;
pub mod budget;
pub mod classify;
pub mod enrich;
pub mod error;
pub mod health;
pub mod insights;
pub mod models;

pub use ai::{Advisor, AdvisorBackend, AdvisorClient, GeminiBackend, MockBackend};
pub use analytics::{category_totals, expense_totals_by_category, monthly_trend, totals};
pub use budget::{recommend_budgets, recommend_budgets_default, DEFAULT_HISTORY_MONTHS};
pub use classify::classify;
pub use enrich::enrich;
pub use error::{Error, Result};
pub use health::score_health;
pub use insights::{generate_insights, predict_future_expenses, recommend_actions};
pub use models::{
    ActionRecommendation, Budget, BudgetRecommendation, Category, CategoryKind, CategoryTotal,
    Enrichment, ExpenseForecast, ForecastCategory, HealthAnalysis, HealthCategory, HealthMetrics,
    HealthReport, Impact, Insight, Timeframe, Totals, Transaction, TrendPoint,
};
