//! # API shared
//!
//! Types and utilities shared by the HTTP surface:
//! - bearer-token validation ([`auth`])
//! - wire types for the shortcut endpoint ([`wire`])
//! - the health response ([`health`])
//!
//! Nothing here touches storage; this crate only shapes requests and responses.

pub mod auth;
pub mod health;
pub mod wire;

pub use auth::{validate_bearer, AuthFailure};
pub use health::{HealthResponse, HealthService};
pub use wire::{
    AddIdeaRequest, AddIdeaResponse, DiagnosticsResponse, ErrorResponse, InsertedCard,
};
