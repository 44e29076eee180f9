//! Business icon lookup.
//!
//! Two-level resolution: the category string is normalized through an alias
//! table to a canonical key, then the sub-category is looked up within that
//! category's table. Absence at any level falls back to the category default
//! and finally the global default, so the lookup is total and never fails.

/// Global fallback for unrecognized categories.
const DEFAULT_ICON: &str = "🏢";

/// Canonical category keys the icon tables are defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Restaurant,
    Retail,
    Health,
    Automotive,
    Services,
}

/// Map a raw category string to a canonical key. Known synonyms collapse to
/// the same key; anything else is unrecognized.
fn canonical_category(category: &str) -> Option<Category> {
    match category.trim().to_lowercase().as_str() {
        "restaurant" | "food" | "dining" | "pizza" | "coffee" | "bakery" | "cafe" => {
            Some(Category::Restaurant)
        }
        "retail" | "shop" | "store" | "grocery" | "clothing" | "boutique" => {
            Some(Category::Retail)
        }
        "health" | "beauty" | "salon" | "fitness" | "gym" | "medical" => Some(Category::Health),
        "automotive" | "auto" | "car" | "car-repair" => Some(Category::Automotive),
        "services" | "service" => Some(Category::Services),
        _ => None,
    }
}

/// Resolve the display glyph for a (category, sub-category) pair.
pub fn get_business_icon(category: &str, sub_category: &str) -> &'static str {
    let Some(canonical) = canonical_category(category) else {
        return DEFAULT_ICON;
    };

    let sub = sub_category.trim().to_lowercase();
    match canonical {
        Category::Restaurant => match sub.as_str() {
            "pizza" => "🍕",
            "coffee" => "☕",
            _ => "🍽️",
        },
        Category::Retail => match sub.as_str() {
            "clothing" => "👔",
            "grocery" => "🛒",
            _ => "🛍️",
        },
        Category::Health => match sub.as_str() {
            "salon" => "✂️",
            _ => "🏥",
        },
        Category::Automotive => match sub.as_str() {
            "car-repair" => "🚗",
            _ => "🔧",
        },
        // Single-glyph category: the sub-category is irrelevant
        Category::Services => "🔧",
    }
}
