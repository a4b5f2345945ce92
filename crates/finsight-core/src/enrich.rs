//! Merchant enrichment engine
//!
//! Maps free-text descriptions to a canonical merchant label, category, and
//! display icon. Unlike the classifier this is first-match over an ordered
//! rule list, not best-score: the first rule with any keyword hit wins.

use crate::classify::income_indicated;
use crate::models::{Category, Enrichment};

struct MerchantRule {
    keywords: &'static [&'static str],
    name: &'static str,
    category: Category,
    icon: &'static str,
}

/// Ordered rule list; earlier rules shadow later ones.
const MERCHANT_RULES: &[MerchantRule] = &[
    MerchantRule {
        keywords: &["amazon", "amzn"],
        name: "Amazon",
        category: Category::Shopping,
        icon: "🛍️",
    },
    MerchantRule {
        keywords: &["walmart", "target", "costco", "sams club"],
        name: "Retail Store",
        category: Category::Shopping,
        icon: "🛍️",
    },
    MerchantRule {
        keywords: &["uber", "lyft", "taxi", "cab"],
        name: "Ride Share",
        category: Category::Transport,
        icon: "🚗",
    },
    MerchantRule {
        keywords: &["netflix", "hulu", "disney+", "hbo"],
        name: "Streaming Service",
        category: Category::Subscription,
        icon: "📱",
    },
    MerchantRule {
        keywords: &["restaurant", "cafe", "coffee", "starbucks", "mcdonald", "burger", "pizza"],
        name: "Restaurant",
        category: Category::Food,
        icon: "🍔",
    },
    MerchantRule {
        keywords: &["grocery", "supermarket", "food store", "trader joe", "whole foods"],
        name: "Grocery Store",
        category: Category::Grocery,
        icon: "🛒",
    },
    MerchantRule {
        keywords: &["gas", "shell", "exxon", "chevron", "bp"],
        name: "Gas Station",
        category: Category::Transport,
        icon: "⛽",
    },
    MerchantRule {
        keywords: &["doctor", "medical", "hospital", "clinic", "pharmacy", "dental"],
        name: "Healthcare Provider",
        category: Category::Healthcare,
        icon: "🏥",
    },
    MerchantRule {
        keywords: &["spotify", "apple music", "pandora"],
        name: "Music Service",
        category: Category::Subscription,
        icon: "🎵",
    },
    MerchantRule {
        keywords: &["rent", "mortgage", "apartment", "house payment"],
        name: "Housing",
        category: Category::Housing,
        icon: "🏠",
    },
    MerchantRule {
        keywords: &["electric", "water", "gas", "utility", "internet", "phone bill"],
        name: "Utility Company",
        category: Category::Utilities,
        icon: "💡",
    },
    MerchantRule {
        keywords: &["gym", "fitness", "workout"],
        name: "Fitness",
        category: Category::Personal,
        icon: "💪",
    },
    MerchantRule {
        keywords: &["school", "tuition", "college", "university", "course"],
        name: "Education",
        category: Category::Education,
        icon: "📚",
    },
    MerchantRule {
        keywords: &["hotel", "airbnb", "booking", "flight", "airline", "travel"],
        name: "Travel",
        category: Category::Travel,
        icon: "✈️",
    },
    MerchantRule {
        keywords: &["salary", "payroll", "direct deposit", "income"],
        name: "Income",
        category: Category::Salary,
        icon: "💰",
    },
];

/// Derive merchant label, category, and icon from a description.
///
/// Never fails. With no rule hit the merchant label is empty and the
/// category falls back to the classifier's income/expense default.
pub fn enrich(description: &str) -> Enrichment {
    let haystack = description.to_lowercase();

    for rule in MERCHANT_RULES {
        if rule.keywords.iter().any(|keyword| haystack.contains(keyword)) {
            return Enrichment {
                merchant_name: rule.name.to_string(),
                category: rule.category,
                icon: rule.icon.to_string(),
            };
        }
    }

    if income_indicated(&haystack) {
        Enrichment {
            merchant_name: String::new(),
            category: Category::OtherIncome,
            icon: "💵".to_string(),
        }
    } else {
        Enrichment {
            merchant_name: String::new(),
            category: Category::OtherExpense,
            icon: "📋".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrich_known_merchants() {
        let amazon = enrich("AMAZON.COM ORDER 123");
        assert_eq!(amazon.merchant_name, "Amazon");
        assert_eq!(amazon.category, Category::Shopping);

        let uber = enrich("Uber trip 04/12");
        assert_eq!(uber.merchant_name, "Ride Share");
        assert_eq!(uber.category, Category::Transport);
    }

    #[test]
    fn test_enrich_first_match_wins() {
        // "netflix" hits the streaming rule before anything else can.
        let netflix = enrich("netflix monthly subscription");
        assert_eq!(netflix.merchant_name, "Streaming Service");
        assert_eq!(netflix.category, Category::Subscription);

        // "gas" is in both the gas-station and utility rules; the
        // gas-station rule comes first.
        let gas = enrich("gas purchase");
        assert_eq!(gas.merchant_name, "Gas Station");
        assert_eq!(gas.icon, "⛽");
    }

    #[test]
    fn test_enrich_no_match_defaults() {
        let unknown = enrich("mystery charge");
        assert_eq!(unknown.merchant_name, "");
        assert_eq!(unknown.category, Category::OtherExpense);
        assert_eq!(unknown.icon, "📋");

        let deposit = enrich("wire deposit");
        assert_eq!(deposit.merchant_name, "");
        assert_eq!(deposit.category, Category::OtherIncome);
        assert_eq!(deposit.icon, "💵");
    }
}
