use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use sahaops_core::{ActorIdentity, ActorRole, AppError, AppResult};
use tower_sessions::Session;

use crate::dto::{ActorResponse, LoginRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// Session key carrying the authenticated actor.
pub const SESSION_ACTOR_KEY: &str = "sahaops.actor";

/// POST /auth/login - resolve the email against admins, then employees,
/// then access owners, and open a session on a password match.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<ActorResponse>> {
    let actor = resolve_actor(&state, payload.email.as_str(), payload.password.as_str())
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid email or password".to_owned()))?;

    session
        .insert(SESSION_ACTOR_KEY, actor.clone())
        .await
        .map_err(|error| AppError::Internal(format!("failed to store session actor: {error}")))?;

    Ok(Json(ActorResponse::from(actor)))
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<ActorResponse>> {
    Ok(Json(ActorResponse::from(actor)))
}

async fn resolve_actor(
    state: &AppState,
    email: &str,
    password: &str,
) -> AppResult<Option<ActorIdentity>> {
    if let Some(admin) = state.directory_repository.find_admin_by_email(email).await? {
        return verified(
            state,
            password,
            admin.password_hash(),
            ActorIdentity::new(
                admin.id().as_i64(),
                ActorRole::Admin,
                Some(admin.name().to_owned()),
            ),
        );
    }

    if let Some(employee) = state
        .directory_repository
        .find_employee_by_email(email)
        .await?
    {
        return verified(
            state,
            password,
            employee.password_hash(),
            ActorIdentity::new(
                employee.id().as_i64(),
                ActorRole::Employee,
                Some(employee.name().to_owned()),
            ),
        );
    }

    if let Some(owner) = state.directory_repository.find_owner_by_email(email).await? {
        return verified(
            state,
            password,
            owner.password_hash(),
            ActorIdentity::new(
                owner.id().as_i64(),
                ActorRole::Customer,
                Some(owner.name().to_owned()),
            ),
        );
    }

    Ok(None)
}

fn verified(
    state: &AppState,
    password: &str,
    hash: &str,
    actor: ActorIdentity,
) -> AppResult<Option<ActorIdentity>> {
    Ok(state
        .password_hasher
        .verify_password(password, hash)?
        .then_some(actor))
}
