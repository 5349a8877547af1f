use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::domain::Categorized;

/// Caller-selected category scope: every category, or one label.
///
/// In text form (`From<&str>`, TOML) an empty value or `all` in any case
/// means [`CategoryFilter::All`]. A category literally named `all` can only
/// be selected by building `CategoryFilter::Only` directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches<T: Categorized>(&self, record: &T) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => record.category_key() == label,
        }
    }

    /// Filter records to the selected category, keeping input order
    pub fn apply<T: Categorized + Clone>(&self, records: &[T]) -> Vec<T> {
        match self {
            CategoryFilter::All => records.to_vec(),
            CategoryFilter::Only(_) => records
                .iter()
                .filter(|r| self.matches(*r))
                .cloned()
                .collect(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::from(value.as_str())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(label) => f.write_str(label),
        }
    }
}
