//! The storage adapter contract.

use crate::{Card, CardDraft, CardId, CardPatch, CardResult, OwnerId};

/// Thin CRUD contract every storage adapter implements.
///
/// Adapters never see invalid fields: [`CardDraft`] and [`CardPatch`] are validated
/// on construction. A failed mutation leaves the persisted table unchanged; there is
/// no retry and no partial-failure handling.
pub trait CardStore: Send + Sync {
    /// Lists the owner's cards, newest first.
    fn list(&self, owner: &OwnerId) -> CardResult<Vec<Card>>;

    /// Inserts one card for the owner and returns it as persisted (with the
    /// backend-assigned id and timestamp).
    fn insert(&self, owner: &OwnerId, draft: CardDraft) -> CardResult<Card>;

    /// Deletes a card by id. Returns `false` when no such card existed; an unknown
    /// id is an observable no-op, not an error.
    fn delete(&self, id: &CardId) -> CardResult<bool>;

    /// Applies a partial update and returns the updated card. Unknown ids are an
    /// error ([`crate::CardError::NotFound`]).
    fn update(&self, id: &CardId, patch: CardPatch) -> CardResult<Card>;
}
