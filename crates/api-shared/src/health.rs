use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service shared by the server binaries.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Static health check; the service carries no state worth probing.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "rxsum is alive".into(),
        }
    }
}
