use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::FoodItemEntity;

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Calories,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive match against item names and descriptions.
    pub search: Option<String>,
    /// Exact category name; `All Categories` (or absent) disables the filter.
    pub category: Option<String>,
    #[serde(default)]
    pub sort_by: SortKey,
}

/// Derive the displayed subset from the full item list and the three
/// controls: text search, category filter, sort key. Sorting is stable, so
/// ties keep the input order.
pub fn filter_and_sort(mut items: Vec<FoodItemEntity>, query: &CatalogQuery) -> Vec<FoodItemEntity> {
    if let Some(search) = query.search.as_deref().filter(|search| !search.is_empty()) {
        let needle = search.to_lowercase();
        items.retain(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        });
    }

    if let Some(category) = query.category.as_deref()
        && category != ALL_CATEGORIES
    {
        items.retain(|item| item.category == category);
    }

    match query.sort_by {
        SortKey::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Calories => items.sort_by_key(|item| item.calories),
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: i32, name: &str, description: &str, price: f32, calories: i32, category: &str) -> FoodItemEntity {
        FoodItemEntity {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            calories,
            protein: "10g".to_string(),
            image: String::new(),
            category: category.to_string(),
        }
    }

    fn sample() -> Vec<FoodItemEntity> {
        vec![
            food(1, "Salmon Bowl", "Omega-3 rich salmon", 15.99, 520, "Post-Workout"),
            food(2, "Quinoa Bowl", "Lean protein with quinoa", 12.99, 450, "Post-Workout"),
            food(3, "Smoothie Bowl", "Plant-based protein blend", 9.99, 380, "Pre-Workout"),
        ]
    }

    #[test]
    fn empty_controls_return_full_list_sorted_by_key() {
        let query = CatalogQuery {
            search: None,
            category: Some(ALL_CATEGORIES.to_string()),
            sort_by: SortKey::Name,
        };
        let result = filter_and_sort(sample(), &query);

        assert_eq!(result.len(), 3);
        let names: Vec<_> = result.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Quinoa Bowl", "Salmon Bowl", "Smoothie Bowl"]);
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let query = CatalogQuery {
            search: Some("QUINOA".to_string()),
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(sample(), &query);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);

        let query = CatalogQuery {
            search: Some("protein".to_string()),
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(sample(), &query);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn category_filter_keeps_only_matching_items() {
        let query = CatalogQuery {
            category: Some("Pre-Workout".to_string()),
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(sample(), &query);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Pre-Workout");
    }

    #[test]
    fn category_with_no_matches_yields_an_empty_list() {
        let query = CatalogQuery {
            category: Some("Desserts".to_string()),
            ..CatalogQuery::default()
        };
        assert!(filter_and_sort(sample(), &query).is_empty());
    }

    #[test]
    fn price_sort_is_ascending() {
        let query = CatalogQuery {
            sort_by: SortKey::Price,
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(sample(), &query);

        let prices: Vec<_> = result.iter().map(|item| item.price).collect();
        assert_eq!(prices, [9.99, 12.99, 15.99]);
    }

    #[test]
    fn calorie_sort_is_ascending() {
        let query = CatalogQuery {
            sort_by: SortKey::Calories,
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(sample(), &query);

        let calories: Vec<_> = result.iter().map(|item| item.calories).collect();
        assert_eq!(calories, [380, 450, 520]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let items = vec![
            food(1, "Same", "a", 5.0, 100, "Pre-Workout"),
            food(2, "Same", "b", 5.0, 100, "Pre-Workout"),
        ];
        let query = CatalogQuery {
            sort_by: SortKey::Price,
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(items, &query);
        let ids: Vec<_> = result.iter().map(|item| item.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
