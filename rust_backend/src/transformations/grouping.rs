//! Partitioning of records into independently analyzed categories.

use std::collections::HashMap;

use crate::core::domain::Categorized;

/// Records sharing one category key, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<T> {
    pub category: String,
    pub items: Vec<T>,
}

/// Partition `items` by `key_fn`.
///
/// Categories are ordered by first occurrence; items keep input order within
/// each category.
///
/// # Example
/// ```
/// use occupancy_rust::transformations::grouping::partition;
///
/// let words = ["apple", "bean", "avocado", "beet", "cherry"];
/// let groups = partition(&words, |w| w[..1].to_string());
/// let keys: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
/// assert_eq!(keys, vec!["a", "b", "c"]);
/// assert_eq!(groups[0].items, vec!["apple", "avocado"]);
/// ```
pub fn partition<T, F>(items: &[T], key_fn: F) -> Vec<CategoryGroup<T>>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let mut groups: Vec<CategoryGroup<T>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = key_fn(item);
        match positions.get(&key) {
            Some(&position) => groups[position].items.push(item.clone()),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(CategoryGroup {
                    category: key,
                    items: vec![item.clone()],
                });
            }
        }
    }

    groups
}

/// Partition by each record's category key.
pub fn partition_by_category<T: Categorized + Clone>(items: &[T]) -> Vec<CategoryGroup<T>> {
    partition(items, |item| item.category_key().to_string())
}
