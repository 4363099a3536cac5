//! Session tracking and the in-memory card mirror.
//!
//! The tracker observes authentication state transitions from the opaque auth
//! backend and keeps the owner's card list loaded: a sign-in (or a startup probe
//! that finds an existing session) triggers exactly one list-load, a sign-out
//! clears the list, and a token refresh changes nothing. Mutations fail fast when
//! no session is active, and mirror into the in-memory list only after the storage
//! adapter confirms them.
//!
//! The `loaded` flag keeps loads single-shot: a redundant `SignedIn` for the
//! session that is already loaded never triggers another fetch. Loads themselves
//! run to completion inside the event that started them, so two loads for the
//! same owner can never be outstanding at once.

use crate::feed::{filter_cards, CategoryFilter};
use crate::{Card, CardDraft, CardError, CardId, CardPatch, CardResult, CardStore, OwnerId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication lifecycle, as observed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No session; the list is empty and mutations are rejected.
    Anonymous,
    /// The startup session probe has not settled yet.
    Authenticating,
    /// A session is active for this owner.
    Authenticated(OwnerId),
}

/// Asynchronous state-change notifications from the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(OwnerId),
    SignedOut,
    /// Credential renewal only; data and state are preserved.
    TokenRefreshed,
}

/// Tracks the session and owns the in-memory card list.
pub struct SessionTracker {
    store: Arc<dyn CardStore>,
    state: SessionState,
    cards: Vec<Card>,
    loaded: bool,
    last_error: Option<String>,
}

impl SessionTracker {
    /// A fresh tracker starts in `Authenticating`: the caller is expected to probe
    /// the current session and pass the result to [`start`](Self::start).
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self {
            store,
            state: SessionState::Authenticating,
            cards: Vec::new(),
            loaded: false,
            last_error: None,
        }
    }

    /// Settles the startup session probe. An existing session behaves exactly like
    /// a `SignedIn` event; no session lands in `Anonymous`.
    pub fn start(&mut self, session: Option<OwnerId>) {
        match session {
            Some(owner) => self.sign_in(owner),
            None => {
                debug!("no session found at startup");
                self.state = SessionState::Anonymous;
            }
        }
    }

    /// Applies one auth state-change notification.
    pub fn handle_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(owner) => self.sign_in(owner),
            AuthEvent::SignedOut => {
                info!("signed out, clearing card list");
                self.state = SessionState::Anonymous;
                self.cards.clear();
                self.loaded = false;
                self.last_error = None;
            }
            AuthEvent::TokenRefreshed => {
                debug!("token refreshed, keeping current state");
            }
        }
    }

    fn sign_in(&mut self, owner: OwnerId) {
        if self.state == SessionState::Authenticated(owner.clone()) && self.loaded {
            debug!(%owner, "already loaded for this session, skipping reload");
            return;
        }
        info!(%owner, "session active, loading cards");
        self.state = SessionState::Authenticated(owner);
        self.load();
    }

    /// Re-issues the list read after a failure. A no-op unless authenticated.
    pub fn reload(&mut self) {
        if matches!(self.state, SessionState::Authenticated(_)) {
            self.load();
        }
    }

    fn load(&mut self) {
        let owner = match &self.state {
            SessionState::Authenticated(owner) => owner.clone(),
            _ => return,
        };

        match self.store.list(&owner) {
            Ok(cards) => {
                debug!(count = cards.len(), "cards loaded");
                self.cards = cards;
                self.loaded = true;
                self.last_error = None;
            }
            Err(err) => {
                warn!(%err, "loading cards failed");
                self.cards.clear();
                self.last_error = Some(format!("failed to load cards: {err}"));
            }
        }
    }

    fn require_owner(&self) -> CardResult<OwnerId> {
        match &self.state {
            SessionState::Authenticated(owner) => Ok(owner.clone()),
            _ => Err(CardError::NotSignedIn),
        }
    }

    /// Inserts a card and prepends it to the mirror (newest first).
    pub fn add_card(&mut self, draft: CardDraft) -> CardResult<Card> {
        let owner = self.require_owner()?;
        match self.store.insert(&owner, draft) {
            Ok(card) => {
                self.cards.insert(0, card.clone());
                Ok(card)
            }
            Err(err) => {
                self.last_error = Some(format!("failed to add card: {err}"));
                Err(err)
            }
        }
    }

    /// Deletes a card. Unknown ids are a visible no-op (`Ok(false)`).
    pub fn delete_card(&mut self, id: &CardId) -> CardResult<bool> {
        self.require_owner()?;
        match self.store.delete(id) {
            Ok(removed) => {
                if removed {
                    self.cards.retain(|card| card.id != *id);
                }
                Ok(removed)
            }
            Err(err) => {
                self.last_error = Some(format!("failed to delete card: {err}"));
                Err(err)
            }
        }
    }

    /// Applies a partial update and refreshes the mirrored copy.
    pub fn update_card(&mut self, id: &CardId, patch: CardPatch) -> CardResult<Card> {
        self.require_owner()?;
        match self.store.update(id, patch) {
            Ok(updated) => {
                if let Some(card) = self.cards.iter_mut().find(|card| card.id == *id) {
                    *card = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => {
                self.last_error = Some(format!("failed to update card: {err}"));
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The feed: the mirror filtered by category, order preserved.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Card> {
        filter_cards(&self.cards, filter)
    }

    /// The message for the most recent failure, if any. Cleared by a successful
    /// load or a sign-out.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
