use serde::Serialize;
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
}

/// Simple health service shared by every REST binary.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Static health check; no state is needed to answer it.
    pub fn check_health() -> HealthResponse {
        HealthResponse {
            ok: true,
            message: "inspo is alive".into(),
        }
    }
}
