//! Domain model for inspiration cards.
//!
//! A card is a flat record: a required title, optional free text and image URL, a
//! category tag from a closed set, and a creation timestamp used for display and
//! newest-first ordering. Validation happens when a [`CardDraft`] is built, so a
//! constructed draft is always safe to hand to a storage adapter.

use crate::{CardError, CardResult};
use chrono::{DateTime, Utc};
use inspo_types::{normalise_optional, NonEmptyText};
use serde::{Deserialize, Serialize};

/// Opaque card identifier assigned by the storage backend.
///
/// The relational adapter assigns UUIDs; the local JSON adapter derives ids from
/// millisecond timestamps. Callers treat both as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// The user identifier a card is scoped to in the backed variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed category set. No other value is ever valid, in memory or at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Inspiration,
    Practice,
    Memo,
}

impl Category {
    /// All members, in display order.
    pub const ALL: [Category; 3] = [Category::Inspiration, Category::Practice, Category::Memo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Inspiration => "inspiration",
            Category::Practice => "practice",
            Category::Memo => "memo",
        }
    }

    /// The valid category names, for error responses that echo the closed set back.
    pub fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_owned()).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inspiration" => Ok(Category::Inspiration),
            "practice" => Ok(Category::Practice),
            "memo" => Ok(Category::Memo),
            other => Err(CardError::InvalidCategory(other.to_owned())),
        }
    }
}

/// One persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated card-to-be, as collected from the creation form or the shortcut
/// endpoint. Construction enforces the domain invariants: the title is trimmed and
/// non-empty, blank optional fields are normalised to `None`, and the category
/// defaults to `inspiration`.
#[derive(Debug, Clone)]
pub struct CardDraft {
    pub title: NonEmptyText,
    pub content: Option<String>,
    pub category: Category,
    pub image_url: Option<String>,
}

impl CardDraft {
    /// Creates a draft with the default category (`inspiration`) and no optional
    /// fields. Fails if the title is empty after trimming.
    pub fn new(title: impl AsRef<str>) -> CardResult<Self> {
        Ok(Self {
            title: NonEmptyText::new(title)?,
            content: None,
            category: Category::Inspiration,
            image_url: None,
        })
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the free-text content; blank input is treated as absent.
    pub fn with_content(mut self, content: Option<impl AsRef<str>>) -> Self {
        self.content = normalise_optional(content);
        self
    }

    /// Sets the image URL; blank input is treated as absent. The URL is not
    /// validated for reachability.
    pub fn with_image_url(mut self, image_url: Option<impl AsRef<str>>) -> Self {
        self.image_url = normalise_optional(image_url);
        self
    }
}

/// Partial update for an existing card. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<NonEmptyText>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
}

impl CardPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_parses_only_the_closed_set() {
        assert_eq!(Category::from_str("inspiration").unwrap(), Category::Inspiration);
        assert_eq!(Category::from_str("practice").unwrap(), Category::Practice);
        assert_eq!(Category::from_str("memo").unwrap(), Category::Memo);
        assert!(matches!(
            Category::from_str("journal"),
            Err(CardError::InvalidCategory(v)) if v == "journal"
        ));
    }

    #[test]
    fn category_serialises_to_lowercase_strings() {
        assert_eq!(serde_json::to_string(&Category::Memo).unwrap(), "\"memo\"");
        let parsed: Category = serde_json::from_str("\"practice\"").unwrap();
        assert_eq!(parsed, Category::Practice);
    }

    #[test]
    fn draft_trims_title_and_rejects_blank() {
        let draft = CardDraft::new("  morning pages  ").unwrap();
        assert_eq!(draft.title.as_str(), "morning pages");
        assert_eq!(draft.category, Category::Inspiration);
        assert!(CardDraft::new("   ").is_err());
    }

    #[test]
    fn draft_normalises_blank_optional_fields() {
        let draft = CardDraft::new("idea")
            .unwrap()
            .with_content(Some("  "))
            .with_image_url(None::<&str>);
        assert_eq!(draft.content, None);
        assert_eq!(draft.image_url, None);
    }
}
