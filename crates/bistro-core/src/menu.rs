//! # Menu Module
//!
//! Menu catalogue filtering, search and sorting.
//!
//! ## Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Filter Pipeline                                    │
//! │                                                                         │
//! │   all items ──► search ──► dietary filters ──► sort ──► filtered list   │
//! │                                                                         │
//! │   search:  case-insensitive substring on name OR category               │
//! │   dietary: vegetarian / vegan / gluten-free checkboxes, AND-combined    │
//! │   sort:    name · price low→high · price high→low · rating · popular    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Photo URL, when the dish has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price_cents: i64,
    /// Aggregate star rating in tenths (43 = 4.3 stars), 0 when unrated.
    pub rating_x10: i64,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    /// Chef's picks sort first under the "popular" ordering.
    pub featured: bool,
}

impl MenuItem {
    /// Price as `Money`.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Available orderings for the filtered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Alphabetical by name.
    Name,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Highest rating first.
    Rating,
    /// Featured items first, otherwise menu order.
    Popular,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Name
    }
}

// =============================================================================
// Menu Filter
// =============================================================================

/// The active filter state of the menu page.
///
/// Dietary checkboxes combine with AND: checking vegan AND gluten-free shows
/// only dishes that are both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuFilter {
    pub search: String,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub sort: SortKey,
}

impl MenuFilter {
    /// Whether a single item passes the search and dietary filters.
    pub fn matches(&self, item: &MenuItem) -> bool {
        if !self.search.trim().is_empty() {
            let needle = self.search.trim().to_lowercase();
            let in_name = item.name.to_lowercase().contains(&needle);
            let in_category = item.category.to_lowercase().contains(&needle);
            if !in_name && !in_category {
                return false;
            }
        }
        if self.vegetarian && !item.vegetarian {
            return false;
        }
        if self.vegan && !item.vegan {
            return false;
        }
        if self.gluten_free && !item.gluten_free {
            return false;
        }
        true
    }

    /// Filters and sorts the catalogue.
    ///
    /// The sort is stable, so equal keys (e.g. two non-featured items under
    /// "popular") keep their menu order.
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        let mut filtered: Vec<&MenuItem> =
            items.iter().filter(|item| self.matches(item)).collect();

        match self.sort {
            SortKey::Name => filtered.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::PriceLow => filtered.sort_by_key(|item| item.price_cents),
            SortKey::PriceHigh => filtered.sort_by_key(|item| std::cmp::Reverse(item.price_cents)),
            SortKey::Rating => filtered.sort_by_key(|item| std::cmp::Reverse(item.rating_x10)),
            SortKey::Popular => filtered.sort_by_key(|item| std::cmp::Reverse(item.featured)),
        }
        filtered
    }

    /// True when no search, no dietary filter and the default sort.
    pub fn is_default(&self) -> bool {
        *self == MenuFilter::default()
    }

    /// Resets everything to the defaults (the "clear filters" button).
    pub fn clear(&mut self) {
        *self = MenuFilter::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: "margherita".to_string(),
                name: "Pizza Margherita".to_string(),
                category: "Pizza".to_string(),
                description: "Tomato, mozzarella, basil".to_string(),
                image: Some("/static/images/margherita.jpg".to_string()),
                price_cents: 1500,
                rating_x10: 45,
                vegetarian: true,
                vegan: false,
                gluten_free: false,
                featured: true,
            },
            MenuItem {
                id: "carbonara".to_string(),
                name: "Spaghetti Carbonara".to_string(),
                category: "Pasta".to_string(),
                description: "Guanciale, egg, pecorino".to_string(),
                image: None,
                price_cents: 1350,
                rating_x10: 48,
                vegetarian: false,
                vegan: false,
                gluten_free: false,
                featured: false,
            },
            MenuItem {
                id: "insalata".to_string(),
                name: "Insalata Mista".to_string(),
                category: "Salads".to_string(),
                description: "Mixed leaves, olive oil".to_string(),
                image: None,
                price_cents: 750,
                rating_x10: 39,
                vegetarian: true,
                vegan: true,
                gluten_free: true,
                featured: false,
            },
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let items = catalogue();
        let filter = MenuFilter::default();
        assert!(filter.is_default());
        assert_eq!(filter.apply(&items).len(), 3);
    }

    #[test]
    fn test_search_matches_name_and_category() {
        let items = catalogue();
        let mut filter = MenuFilter::default();

        filter.search = "pizza".to_string();
        let hits = filter.apply(&items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "margherita");

        // Category match, case-insensitive
        filter.search = "SALAD".to_string();
        let hits = filter.apply(&items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "insalata");

        filter.search = "sushi".to_string();
        assert!(filter.apply(&items).is_empty());
    }

    #[test]
    fn test_dietary_filters_combine_with_and() {
        let items = catalogue();
        let mut filter = MenuFilter::default();

        filter.vegetarian = true;
        assert_eq!(filter.apply(&items).len(), 2);

        filter.gluten_free = true;
        let hits = filter.apply(&items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "insalata");
    }

    #[test]
    fn test_sort_orders() {
        let items = catalogue();
        let mut filter = MenuFilter::default();

        let by_name: Vec<&str> = filter.apply(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(by_name, ["insalata", "margherita", "carbonara"]);

        filter.sort = SortKey::PriceLow;
        let cheap_first: Vec<&str> =
            filter.apply(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(cheap_first, ["insalata", "carbonara", "margherita"]);

        filter.sort = SortKey::PriceHigh;
        let dear_first: Vec<&str> =
            filter.apply(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(dear_first, ["margherita", "carbonara", "insalata"]);

        filter.sort = SortKey::Rating;
        let rated: Vec<&str> = filter.apply(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(rated, ["carbonara", "margherita", "insalata"]);

        filter.sort = SortKey::Popular;
        let popular: Vec<&str> = filter.apply(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(popular, ["margherita", "carbonara", "insalata"]);
    }

    #[test]
    fn test_clear_resets_filters() {
        let mut filter = MenuFilter {
            search: "pizza".to_string(),
            vegan: true,
            sort: SortKey::Rating,
            ..MenuFilter::default()
        };
        assert!(!filter.is_default());

        filter.clear();
        assert!(filter.is_default());
    }
}
