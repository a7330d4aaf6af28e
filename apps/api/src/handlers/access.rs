use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use sahaops_application::CreateGrantInput;
use sahaops_core::{ActorIdentity, ActorRole, AppError, CustomerId, GrantId, OwnerId, StoreId};
use sahaops_domain::{GrantScope, PrincipalRef, PrincipalType, ScopeType};

use crate::dto::{CreateGrantRequest, GrantResponse, PrincipalGrantsResponse, StoreResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::require_staff;

pub async fn list_store_grants_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(store_id): Path<i64>,
) -> ApiResult<Json<Vec<GrantResponse>>> {
    require_staff(&actor)?;

    let grants = state
        .access_grant_service
        .list_grants_for_store(StoreId::new(store_id))
        .await?
        .into_iter()
        .map(GrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn list_customer_grants_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(customer_id): Path<i64>,
) -> ApiResult<Json<Vec<GrantResponse>>> {
    require_staff(&actor)?;

    let grants = state
        .access_grant_service
        .list_grants_for_customer(CustomerId::new(customer_id))
        .await?
        .into_iter()
        .map(GrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn list_principal_grants_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((principal_type, principal_id)): Path<(String, i64)>,
) -> ApiResult<Json<PrincipalGrantsResponse>> {
    require_staff(&actor)?;

    let principal_type = PrincipalType::from_str(principal_type.as_str())?;
    let listed = state
        .access_grant_service
        .list_grants_for_principal(&PrincipalRef::new(principal_type, principal_id))
        .await?;

    Ok(Json(PrincipalGrantsResponse::from(listed)))
}

pub async fn create_grant_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreateGrantRequest>,
) -> ApiResult<(StatusCode, Json<GrantResponse>)> {
    require_staff(&actor)?;

    let principal_type = PrincipalType::from_str(payload.principal_type.as_str())?;
    let scope_type = ScopeType::from_str(payload.scope_type.as_str())?;
    let scope = GrantScope::from_parts(scope_type, payload.customer_id, payload.store_id)?;

    let granted = state
        .access_grant_service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::new(principal_type, payload.principal_id),
            scope,
            owner_id: payload.owner_id.map(OwnerId::new),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(GrantResponse::from(granted))))
}

pub async fn revoke_grant_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(grant_id): Path<i64>,
) -> ApiResult<StatusCode> {
    require_staff(&actor)?;

    state
        .access_grant_service
        .revoke_grant(GrantId::new(grant_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_stores_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<StoreResponse>>> {
    if actor.role() != ActorRole::Customer {
        return Err(AppError::Forbidden(
            "only access owners may list their accessible stores".to_owned(),
        )
        .into());
    }

    let store_ids = state
        .access_grant_service
        .resolve_accessible_store_ids(OwnerId::new(actor.id()))
        .await?;

    let mut stores = Vec::with_capacity(store_ids.len());
    for store_id in store_ids {
        if let Some(store) = state.directory_repository.find_store(store_id).await? {
            stores.push(StoreResponse::from(store));
        }
    }

    Ok(Json(stores))
}
