//! # Inspo Core
//!
//! Core logic for the inspiration cards notebook:
//! - Domain model and validation ([`Card`], [`CardDraft`], [`Category`])
//! - Storage adapters: relational ([`SqliteStore`]) and local JSON ([`JsonStore`])
//! - Session tracking with a duplicate-load guard ([`SessionTracker`])
//! - Client-side feed filtering ([`CategoryFilter`])
//! - The press-and-hold delete gesture state machine ([`HoldToDelete`])
//!
//! **No API concerns**: HTTP handlers, bearer-token validation, and wire types
//! belong in `inspo-api-rest` and `inspo-api-shared`.

pub mod card;
pub mod config;
pub mod feed;
pub mod gesture;
pub mod local;
pub mod session;
pub mod sqlite;
pub mod store;

pub use card::{Card, CardDraft, CardId, CardPatch, Category, OwnerId};
pub use config::{CoreConfig, StorageBackend};
pub use feed::CategoryFilter;
pub use gesture::{HoldState, HoldToDelete, HOLD_THRESHOLD};
pub use local::JsonStore;
pub use session::{AuthEvent, SessionState, SessionTracker};
pub use sqlite::SqliteStore;
pub use store::CardStore;

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("card title cannot be empty")]
    EmptyTitle(#[from] inspo_types::TextError),
    #[error("invalid category '{0}': must be one of inspiration, practice, memo")]
    InvalidCategory(String),
    #[error("no card with id {0}")]
    NotFound(CardId),
    #[error("not signed in")]
    NotSignedIn,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to write card file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialise cards: {0}")]
    Serialisation(#[from] serde_json::Error),
    #[error("invalid timestamp in stored card: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("storage adapter unavailable: {0}")]
    Unavailable(String),
}

pub type CardResult<T> = std::result::Result<T, CardError>;
