//! Category domain entity

use chrono::{DateTime, Utc};

/// Topic a post is filed under (e.g. "Wealth", "Lifestyle")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Icon name rendered by the front end
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// Categories every fresh store starts with: name, slug, description, icon.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str, &str); 3] = [
    (
        "Wealth",
        "wealth",
        "Strategies for building and preserving wealth.",
        "DollarSign",
    ),
    (
        "Lifestyle",
        "lifestyle",
        "Living your best life, from travel to wellness.",
        "Coffee",
    ),
    (
        "Business",
        "business",
        "Insights for entrepreneurs and leaders.",
        "Briefcase",
    ),
];
