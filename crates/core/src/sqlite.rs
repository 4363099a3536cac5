//! Relational storage adapter (the backed variant).
//!
//! Owns the `inspiration_cards` table. The category column carries a CHECK
//! constraint mirroring the closed [`Category`](crate::Category) set, so even a raw
//! SQL write cannot introduce an invalid tag. Ownership is a `user_id` equality
//! filter on every read; per-row consistency is the database's job.

use crate::{Card, CardDraft, CardError, CardId, CardPatch, CardResult, Category, OwnerId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS inspiration_cards (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    title       TEXT NOT NULL,
    content     TEXT,
    category    TEXT NOT NULL CHECK (category IN ('inspiration', 'practice', 'memo')),
    image_url   TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_inspiration_cards_owner
    ON inspiration_cards (user_id, created_at DESC);
";

/// SQLite-backed card store.
///
/// The connection sits behind a mutex: callers are sequential in this system, the
/// lock only makes the adapter safe to share behind an `Arc` across handler tasks.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> CardResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> CardResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> CardResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CardError::Unavailable("connection mutex poisoned".into()))
    }

    fn row_to_raw(row: &Row<'_>) -> rusqlite::Result<RawCard> {
        Ok(RawCard {
            id: row.get("id")?,
            title: row.get("title")?,
            content: row.get("content")?,
            category: row.get("category")?,
            image_url: row.get("image_url")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A row as stored, before the category and timestamp columns are parsed back
/// into domain types. The CHECK constraint keeps `category` inside the closed
/// set, so a parse failure here means the table was modified out of band.
struct RawCard {
    id: String,
    title: String,
    content: Option<String>,
    category: String,
    image_url: Option<String>,
    created_at: String,
}

impl RawCard {
    fn into_card(self) -> CardResult<Card> {
        Ok(Card {
            id: CardId::new(self.id),
            title: self.title,
            content: self.content,
            category: Category::from_str(&self.category)?,
            image_url: self.image_url,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc),
        })
    }
}

impl crate::CardStore for SqliteStore {
    fn list(&self, owner: &OwnerId) -> CardResult<Vec<Card>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, content, category, image_url, created_at
             FROM inspiration_cards
             WHERE user_id = ?1
             ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![owner.as_str()], Self::row_to_raw)?;
        let mut cards = Vec::new();
        for row in rows {
            cards.push(row?.into_card()?);
        }
        Ok(cards)
    }

    fn insert(&self, owner: &OwnerId, draft: CardDraft) -> CardResult<Card> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO inspiration_cards
                 (id, user_id, title, content, category, image_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                owner.as_str(),
                draft.title.as_str(),
                draft.content,
                draft.category.as_str(),
                draft.image_url,
                now_str,
                now_str,
            ],
        )?;

        Ok(Card {
            id: CardId::new(id),
            title: draft.title.into_inner(),
            content: draft.content,
            category: draft.category,
            image_url: draft.image_url,
            created_at: now,
        })
    }

    fn delete(&self, id: &CardId) -> CardResult<bool> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM inspiration_cards WHERE id = ?1",
            params![id.as_str()],
        )?;
        Ok(affected > 0)
    }

    fn update(&self, id: &CardId, patch: CardPatch) -> CardResult<Card> {
        let conn = self.conn()?;
        let existing = conn
            .query_row(
                "SELECT id, title, content, category, image_url, created_at
                 FROM inspiration_cards
                 WHERE id = ?1",
                params![id.as_str()],
                Self::row_to_raw,
            )
            .optional()?;

        let mut card = match existing {
            Some(raw) => raw.into_card()?,
            None => return Err(CardError::NotFound(id.clone())),
        };

        if let Some(title) = patch.title {
            card.title = title.into_inner();
        }
        if let Some(content) = patch.content {
            card.content = Some(content);
        }
        if let Some(category) = patch.category {
            card.category = category;
        }
        if let Some(image_url) = patch.image_url {
            card.image_url = Some(image_url);
        }

        conn.execute(
            "UPDATE inspiration_cards
             SET title = ?2, content = ?3, category = ?4, image_url = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                id.as_str(),
                card.title,
                card.content,
                card.category.as_str(),
                card.image_url,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardStore;

    fn owner() -> OwnerId {
        OwnerId::new("00000000-0000-0000-0000-000000000001")
    }

    fn draft(title: &str, category: Category) -> CardDraft {
        CardDraft::new(title).unwrap().with_category(category)
    }

    #[test]
    fn insert_then_list_round_trips_visible_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let card = store
            .insert(
                &owner(),
                draft("buy milk", Category::Memo).with_content(Some("two bottles")),
            )
            .unwrap();

        let listed = store.list(&owner()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, card.id);
        assert_eq!(listed[0].title, "buy milk");
        assert_eq!(listed[0].content.as_deref(), Some("two bottles"));
        assert_eq!(listed[0].category, Category::Memo);
        assert_eq!(listed[0].image_url, None);
    }

    #[test]
    fn list_is_scoped_to_the_owner() {
        let store = SqliteStore::open_in_memory().unwrap();
        let other = OwnerId::new("00000000-0000-0000-0000-000000000002");
        store
            .insert(&owner(), draft("mine", Category::Inspiration))
            .unwrap();
        store
            .insert(&other, draft("theirs", Category::Inspiration))
            .unwrap();

        let listed = store.list(&owner()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "mine");
    }

    #[test]
    fn newest_card_listed_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        // Two inserts can share a timestamp on a fast machine; space them out.
        store
            .insert(&owner(), draft("first", Category::Inspiration))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .insert(&owner(), draft("second", Category::Practice))
            .unwrap();

        let listed = store.list(&owner()).unwrap();
        assert_eq!(listed[0].title, "second");
        assert_eq!(listed[1].title, "first");
    }

    #[test]
    fn delete_removes_the_row_and_unknown_id_is_a_no_op() {
        let store = SqliteStore::open_in_memory().unwrap();
        let card = store
            .insert(&owner(), draft("ephemeral", Category::Memo))
            .unwrap();

        assert!(store.delete(&card.id).unwrap());
        assert!(store.list(&owner()).unwrap().is_empty());
        assert!(!store.delete(&CardId::from("no-such-id")).unwrap());
    }

    #[test]
    fn update_applies_partial_fields_and_rejects_unknown_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let card = store
            .insert(&owner(), draft("rough idea", Category::Inspiration))
            .unwrap();

        let patch = CardPatch {
            category: Some(Category::Practice),
            content: Some("sketch the outline".into()),
            ..Default::default()
        };
        let updated = store.update(&card.id, patch).unwrap();
        assert_eq!(updated.title, "rough idea");
        assert_eq!(updated.category, Category::Practice);
        assert_eq!(updated.content.as_deref(), Some("sketch the outline"));

        let missing = store.update(&CardId::from("no-such-id"), CardPatch::default());
        assert!(matches!(missing, Err(CardError::NotFound(_))));
    }
}
