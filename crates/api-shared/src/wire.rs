//! Wire types for the shortcut endpoint.
//!
//! Field names and shapes match the original integration exactly (camelCase for
//! `imageUrl`/`validCategories`, snake_case for `created_at`), since existing
//! shortcut clients depend on them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/add-idea`.
///
/// `content` becomes the card title (the shortcut only sends a title); `category`
/// arrives as a plain string and is validated against the closed set by the
/// handler. Missing fields default to empty so validation can answer with the
/// endpoint's own error messages rather than a deserialisation failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddIdeaRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// Success body of `POST /api/add-idea`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddIdeaResponse {
    pub success: bool,
    pub message: String,
    pub data: InsertedCard,
}

/// The persisted card fields echoed back to the shortcut.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InsertedCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub created_at: String,
}

/// Error body for every failure status of the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Echoed back on invalid-category rejections only.
    #[serde(
        rename = "validCategories",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub valid_categories: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            valid_categories: None,
        }
    }

    pub fn with_valid_categories(error: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            error: error.into(),
            valid_categories: Some(categories),
        }
    }
}

/// Body of the `GET /api/add-idea` diagnostic variant: a timestamp plus booleans
/// for which configuration values are present. No secret material is included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub timestamp: String,
    #[serde(rename = "hasAuthToken")]
    pub has_auth_token: bool,
    #[serde(rename = "hasOwnerId")]
    pub has_owner_id: bool,
}
