//! # API REST
//!
//! The HTTP surface of the inspiration cards notebook:
//! - `POST /api/add-idea` — the shortcut insert endpoint (static bearer token)
//! - `GET /api/add-idea` — configuration diagnostics
//! - `OPTIONS /api/add-idea` — permissive CORS
//! - `/health` and Swagger UI
//!
//! Handlers validate in a fixed order (auth, then content, then category) and
//! short-circuit without touching storage; the response statuses and messages are
//! part of the contract with existing shortcut clients.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inspo_api_shared::{
    validate_bearer, AddIdeaRequest, AddIdeaResponse, DiagnosticsResponse, ErrorResponse,
    HealthResponse, HealthService, InsertedCard,
};
use inspo_core::{CardDraft, CardStore, Category, OwnerId};

/// Configuration for the HTTP surface, resolved once at startup.
///
/// The bearer secret and the owner every shortcut insert is scoped to both come
/// from the environment; the server refuses to start without them rather than
/// falling back to a placeholder identity.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub auth_token: String,
    pub shortcut_owner: OwnerId,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiConfigError {
    #[error("API_AUTH_TOKEN is not set")]
    MissingAuthToken,
    #[error("INSPO_SHORTCUT_OWNER is not set")]
    MissingShortcutOwner,
}

impl ApiConfig {
    /// Builds the config from pre-read environment values; blank values count as
    /// absent.
    pub fn from_env_values(
        auth_token: Option<String>,
        shortcut_owner: Option<String>,
    ) -> Result<Self, ApiConfigError> {
        let auth_token = auth_token
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ApiConfigError::MissingAuthToken)?;
        let shortcut_owner = shortcut_owner
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(OwnerId::new)
            .ok_or(ApiConfigError::MissingShortcutOwner)?;
        Ok(Self {
            auth_token,
            shortcut_owner,
        })
    }
}

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub cfg: Arc<ApiConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, add_idea, diagnostics),
    components(schemas(
        AddIdeaRequest,
        AddIdeaResponse,
        InsertedCard,
        ErrorResponse,
        DiagnosticsResponse,
        HealthResponse
    ))
)]
struct ApiDoc;

/// Builds the application router, Swagger UI and CORS included.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/add-idea",
            post(add_idea).get(diagnostics).fallback(other_method),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

/// Binds `addr` and serves the router until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("++ inspo REST listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health check response", body = HealthResponse))
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/add-idea",
    responses((status = 200, description = "Configuration diagnostics", body = DiagnosticsResponse))
)]
/// Diagnostic variant: reports which configuration values are present, without
/// exposing any of them.
async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    Json(DiagnosticsResponse {
        timestamp: Utc::now().to_rfc3339(),
        has_auth_token: !state.cfg.auth_token.is_empty(),
        has_owner_id: !state.cfg.shortcut_owner.as_str().is_empty(),
    })
}

#[utoipa::path(
    post,
    path = "/api/add-idea",
    request_body = AddIdeaRequest,
    responses(
        (status = 200, description = "Card inserted", body = AddIdeaResponse),
        (status = 400, description = "Empty content or invalid category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
/// Shortcut insert: one row, title = trimmed content, owned by the configured
/// shortcut owner.
///
/// Takes the raw body so that authentication is always checked first; a request
/// with a bad token gets 401 no matter what the body looks like.
async fn add_idea(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if let Err(failure) = validate_bearer(auth_header, &state.cfg.auth_token) {
        return error_response(StatusCode::UNAUTHORIZED, ErrorResponse::new(failure.to_string()));
    }

    let request: AddIdeaRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(%err, "unparseable add-idea body");
            return error_response(StatusCode::BAD_REQUEST, ErrorResponse::new("无效的请求体"));
        }
    };

    let draft = match CardDraft::new(&request.content) {
        Ok(draft) => draft,
        Err(_) => {
            return error_response(StatusCode::BAD_REQUEST, ErrorResponse::new("内容不能为空"));
        }
    };

    let category = match request.category.parse::<Category>() {
        Ok(category) => category,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_valid_categories("无效的分类", Category::valid_names()),
            );
        }
    };

    let draft = draft
        .with_category(category)
        .with_image_url(request.image_url.as_deref());

    match state.store.insert(&state.cfg.shortcut_owner, draft) {
        Ok(card) => Json(AddIdeaResponse {
            success: true,
            message: "灵感添加成功".into(),
            data: InsertedCard {
                id: card.id.to_string(),
                title: card.title,
                category: card.category.as_str().into(),
                created_at: card.created_at.to_rfc3339(),
            },
        })
        .into_response(),
        Err(err) => {
            tracing::error!(%err, "shortcut insert failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(format!("保存失败: {err}")),
            )
        }
    }
}

/// Anything other than GET/POST/OPTIONS on the endpoint. Bare OPTIONS (no CORS
/// preflight headers) still answers 200; everything else is rejected.
async fn other_method(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorResponse::new("只支持POST请求"),
    )
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use inspo_core::SqliteStore;
    use tower::ServiceExt;

    const TOKEN: &str = "test-secret";

    fn state() -> (Arc<SqliteStore>, AppState) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let cfg = ApiConfig {
            auth_token: TOKEN.into(),
            shortcut_owner: OwnerId::new("owner-1"),
        };
        (
            store.clone(),
            AppState {
                store,
                cfg: Arc::new(cfg),
            },
        )
    }

    async fn send(
        app_state: AppState,
        method: &str,
        auth: Option<&str>,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri("/api/add-idea")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let response = app(app_state)
            .oneshot(builder.body(Body::from(body.to_owned())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn missing_token_yields_401_even_with_an_invalid_body() {
        let (_store, state) = state();
        let (status, body) = send(state, "POST", None, "this is not json").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "缺少Authorization header");
    }

    #[tokio::test]
    async fn wrong_token_yields_401() {
        let (_store, state) = state();
        let (status, body) = send(
            state,
            "POST",
            Some("Bearer wrong"),
            r#"{"content":"buy milk","category":"memo"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "无效的认证Token");
    }

    #[tokio::test]
    async fn blank_content_yields_400() {
        let (_store, state) = state();
        let (status, body) = send(
            state,
            "POST",
            Some(&format!("Bearer {TOKEN}")),
            r#"{"content":"   ","category":"memo"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "内容不能为空");
    }

    #[tokio::test]
    async fn invalid_category_yields_400_with_the_valid_set() {
        let (store, state) = state();
        let (status, body) = send(
            state,
            "POST",
            Some(&format!("Bearer {TOKEN}")),
            r#"{"content":"buy milk","category":"journal"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "无效的分类");
        assert_eq!(
            body["validCategories"],
            serde_json::json!(["inspiration", "practice", "memo"])
        );
        // Validation short-circuits before storage is touched.
        assert!(store.list(&OwnerId::new("owner-1")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_insert_yields_200_and_persists_one_card() {
        let (store, state) = state();
        let (status, body) = send(
            state,
            "POST",
            Some(&format!("Bearer {TOKEN}")),
            r#"{"content":"buy milk","category":"memo"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["title"], "buy milk");
        assert_eq!(body["data"]["category"], "memo");

        let cards = store.list(&OwnerId::new("owner-1")).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "buy milk");
        assert_eq!(cards[0].content, None);
    }

    #[tokio::test]
    async fn content_is_trimmed_into_the_title() {
        let (store, state) = state();
        let (status, _body) = send(
            state,
            "POST",
            Some(&format!("Bearer {TOKEN}")),
            r#"{"content":"  spaced out  ","category":"inspiration","imageUrl":" "}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let cards = store.list(&OwnerId::new("owner-1")).unwrap();
        assert_eq!(cards[0].title, "spaced out");
        assert_eq!(cards[0].image_url, None);
    }

    #[tokio::test]
    async fn other_methods_yield_405() {
        let (_store, state) = state();
        let (status, body) = send(state, "PUT", Some(&format!("Bearer {TOKEN}")), "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "只支持POST请求");
    }

    #[tokio::test]
    async fn bare_options_yields_200() {
        let (_store, state) = state();
        let (status, _body) = send(state, "OPTIONS", None, "").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn diagnostics_reports_which_config_values_are_present() {
        let (_store, state) = state();
        let (status, body) = send(state, "GET", None, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hasAuthToken"], true);
        assert_eq!(body["hasOwnerId"], true);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let (_store, state) = state();
        let response = app(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn config_requires_both_values() {
        assert!(matches!(
            ApiConfig::from_env_values(None, Some("owner".into())),
            Err(ApiConfigError::MissingAuthToken)
        ));
        assert!(matches!(
            ApiConfig::from_env_values(Some("token".into()), Some("  ".into())),
            Err(ApiConfigError::MissingShortcutOwner)
        ));
        let cfg = ApiConfig::from_env_values(Some(" token ".into()), Some("owner".into())).unwrap();
        assert_eq!(cfg.auth_token, "token");
        assert_eq!(cfg.shortcut_owner.as_str(), "owner");
    }
}
