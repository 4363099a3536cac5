//! Card feed filtering.
//!
//! The feed is a pure function of the in-memory list and the selected filter: exact
//! category match, order preserved, no search, no pagination.

use crate::{Card, CardError, Category};

/// The feed's category selector: everything, or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => card.category == *category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = CardError;

    /// Parses `"all"` or a category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(s.parse()?))
    }
}

/// Filters the list, preserving order. The caller renders an empty-state message
/// when the result is empty.
pub fn filter_cards<'a>(cards: &'a [Card], filter: CategoryFilter) -> Vec<&'a Card> {
    cards.iter().filter(|card| filter.matches(card)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardId;
    use chrono::Utc;

    fn card(id: &str, category: Category) -> Card {
        Card {
            id: CardId::from(id),
            title: format!("card {id}"),
            content: None,
            category,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_filter_keeps_exact_matches_in_order() {
        let cards = vec![
            card("1", Category::Memo),
            card("2", Category::Inspiration),
            card("3", Category::Memo),
        ];
        let filtered = filter_cards(&cards, CategoryFilter::Only(Category::Memo));
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn all_filter_returns_the_full_list_unchanged() {
        let cards = vec![
            card("1", Category::Practice),
            card("2", Category::Inspiration),
        ];
        let filtered = filter_cards(&cards, CategoryFilter::All);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id.as_str(), "1");
    }

    #[test]
    fn filter_parses_all_and_category_names_only() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "memo".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Memo)
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn no_matches_yields_an_empty_feed() {
        let cards = vec![card("1", Category::Memo)];
        assert!(filter_cards(&cards, CategoryFilter::Only(Category::Practice)).is_empty());
    }
}
