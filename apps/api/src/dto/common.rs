use sahaops_core::ActorIdentity;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Service liveness payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for email+password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API representation of the authenticated actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/actor-response.ts"
)]
pub struct ActorResponse {
    pub id: i64,
    pub role: String,
    pub display_name: Option<String>,
}

impl From<ActorIdentity> for ActorResponse {
    fn from(value: ActorIdentity) -> Self {
        Self {
            id: value.id(),
            role: value.role().as_str().to_owned(),
            display_name: value.display_name().map(ToOwned::to_owned),
        }
    }
}
