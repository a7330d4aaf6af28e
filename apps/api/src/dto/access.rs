use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Incoming payload for issuing an access grant.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-grant-request.ts"
)]
pub struct CreateGrantRequest {
    pub principal_type: String,
    pub principal_id: i64,
    pub scope_type: String,
    pub customer_id: Option<i64>,
    pub store_id: Option<i64>,
    pub owner_id: Option<i64>,
}

/// API representation of a grant's principal summary.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/principal-summary-response.ts"
)]
pub struct PrincipalSummaryResponse {
    pub principal_type: String,
    pub principal_id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// API representation of an enriched access grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/grant-response.ts"
)]
pub struct GrantResponse {
    pub id: i64,
    pub principal_type: String,
    pub principal_id: i64,
    pub scope_type: String,
    /// Owning-customer context; present for customer-scope grants and
    /// back-filled for store-scope grants when the store resolves.
    pub customer_id: Option<i64>,
    pub store_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub scope_label: String,
    pub principal: Option<PrincipalSummaryResponse>,
    pub created_at: String,
}

/// API representation of a principal with all its grants.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/principal-grants-response.ts"
)]
pub struct PrincipalGrantsResponse {
    pub principal: Option<PrincipalSummaryResponse>,
    pub grants: Vec<GrantResponse>,
}

/// API representation of a store.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/store-response.ts"
)]
pub struct StoreResponse {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
}
