//! Local-only storage adapter.
//!
//! Mirrors the browser-storage variant of the app: the whole card list lives under a
//! single key, here one JSON file on disk. An absent or corrupt file loads as an
//! empty list, never an error, and ids are derived from millisecond timestamps.
//! This adapter is single-user; it ignores owner scoping.

use crate::{Card, CardDraft, CardError, CardId, CardPatch, CardResult, OwnerId};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Default file name, matching the storage key of the original local variant.
pub const LOCAL_STORE_FILE: &str = "inspo-note-cards.json";

/// File-backed card store for local-only use.
pub struct JsonStore {
    path: PathBuf,
    cards: Mutex<Vec<Card>>,
}

impl JsonStore {
    /// Opens the store at `path`, loading whatever is there.
    ///
    /// A missing file or undecodable content degrades to an empty list; the latter
    /// is logged, since it means previously saved cards are being ignored.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let cards = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Card>>(&raw) {
                Ok(cards) => cards,
                Err(err) => {
                    warn!(?path, %err, "card file is corrupt, starting with an empty list");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            path,
            cards: Mutex::new(cards),
        }
    }

    fn cards(&self) -> CardResult<MutexGuard<'_, Vec<Card>>> {
        self.cards
            .lock()
            .map_err(|_| CardError::Unavailable("card list mutex poisoned".into()))
    }

    /// Writes the full list back to disk. The list is small by design (a personal
    /// notebook), so whole-file rewrites are fine.
    fn persist(&self, cards: &[Card]) -> CardResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(CardError::FileWrite)?;
        }
        let raw = serde_json::to_string_pretty(cards)?;
        std::fs::write(&self.path, raw).map_err(CardError::FileWrite)
    }

    /// Millisecond-timestamp id, bumped past any id already in use so that two
    /// inserts within the same millisecond stay distinct.
    fn next_id(cards: &[Card]) -> CardId {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !cards.iter().any(|card| card.id.as_str() == candidate) {
                return CardId::new(candidate);
            }
            millis += 1;
        }
    }
}

impl crate::CardStore for JsonStore {
    fn list(&self, _owner: &OwnerId) -> CardResult<Vec<Card>> {
        let mut cards = self.cards()?.clone();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    // Mutations write the candidate list to disk first and only then commit it to
    // the cache: a failed write must leave the in-memory list unchanged.

    fn insert(&self, _owner: &OwnerId, draft: CardDraft) -> CardResult<Card> {
        let mut cards = self.cards()?;
        let card = Card {
            id: Self::next_id(&cards),
            title: draft.title.into_inner(),
            content: draft.content,
            category: draft.category,
            image_url: draft.image_url,
            created_at: Utc::now(),
        };
        let mut next = cards.clone();
        next.insert(0, card.clone());
        self.persist(&next)?;
        *cards = next;
        Ok(card)
    }

    fn delete(&self, id: &CardId) -> CardResult<bool> {
        let mut cards = self.cards()?;
        let mut next = cards.clone();
        next.retain(|card| card.id != *id);
        if next.len() == cards.len() {
            return Ok(false);
        }
        self.persist(&next)?;
        *cards = next;
        Ok(true)
    }

    fn update(&self, id: &CardId, patch: CardPatch) -> CardResult<Card> {
        let mut cards = self.cards()?;
        let mut next = cards.clone();
        let card = next
            .iter_mut()
            .find(|card| card.id == *id)
            .ok_or_else(|| CardError::NotFound(id.clone()))?;

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
        let updated = card.clone();
        self.persist(&next)?;
        *cards = next;
        Ok(updated)
    }
}
