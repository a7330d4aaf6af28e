use sahaops_application::{EnrichedGrant, PrincipalGrants, PrincipalSummary};
use sahaops_domain::Store;

use super::{GrantResponse, PrincipalGrantsResponse, PrincipalSummaryResponse, StoreResponse};

impl From<PrincipalSummary> for PrincipalSummaryResponse {
    fn from(value: PrincipalSummary) -> Self {
        Self {
            principal_type: value.principal.principal_type().as_str().to_owned(),
            principal_id: value.principal.principal_id(),
            name: value.name,
            email: value.email,
        }
    }
}

impl From<EnrichedGrant> for GrantResponse {
    fn from(value: EnrichedGrant) -> Self {
        Self {
            id: value.grant.id().as_i64(),
            principal_type: value.grant.principal().principal_type().as_str().to_owned(),
            principal_id: value.grant.principal().principal_id(),
            scope_type: value.grant.scope().scope_type().as_str().to_owned(),
            customer_id: value.customer_id.map(|id| id.as_i64()),
            store_id: value.grant.scope().store_id().map(|id| id.as_i64()),
            owner_id: value.grant.owner_id().map(|id| id.as_i64()),
            scope_label: value.scope_label,
            principal: value.principal.map(PrincipalSummaryResponse::from),
            created_at: value.grant.created_at().to_rfc3339(),
        }
    }
}

impl From<PrincipalGrants> for PrincipalGrantsResponse {
    fn from(value: PrincipalGrants) -> Self {
        Self {
            principal: value.principal.map(PrincipalSummaryResponse::from),
            grants: value.grants.into_iter().map(GrantResponse::from).collect(),
        }
    }
}

impl From<Store> for StoreResponse {
    fn from(value: Store) -> Self {
        Self {
            id: value.id().as_i64(),
            customer_id: value.customer_id().as_i64(),
            name: value.name().to_owned(),
        }
    }
}
