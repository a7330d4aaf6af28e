use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sahaops_application::{AccessGrantRepository, NewAccessGrant};
use sahaops_core::{AppError, AppResult, CustomerId, GrantId, OwnerId, StoreId};
use sahaops_domain::{AccessGrant, GrantScope, PrincipalRef, PrincipalType, ScopeType};
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed access grant persistence.
///
/// Partial unique indexes per scope kind enforce the one-grant-per-edge
/// invariant; violations surface as conflicts.
#[derive(Clone)]
pub struct PostgresAccessGrantRepository {
    pool: PgPool,
}

impl PostgresAccessGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GrantRow {
    id: i64,
    principal_type: String,
    principal_id: i64,
    scope_type: String,
    customer_id: Option<i64>,
    store_id: Option<i64>,
    owner_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl GrantRow {
    fn decode(self) -> AppResult<AccessGrant> {
        let principal_type =
            PrincipalType::from_str(self.principal_type.as_str()).map_err(|error| {
                AppError::Internal(format!("failed to decode grant '{}': {error}", self.id))
            })?;
        let scope_type = ScopeType::from_str(self.scope_type.as_str()).map_err(|error| {
            AppError::Internal(format!("failed to decode grant '{}': {error}", self.id))
        })?;
        let scope =
            GrantScope::from_parts(scope_type, self.customer_id, self.store_id).map_err(
                |error| AppError::Internal(format!("failed to decode grant '{}': {error}", self.id)),
            )?;

        Ok(AccessGrant::new(
            GrantId::new(self.id),
            PrincipalRef::new(principal_type, self.principal_id),
            scope,
            self.owner_id.map(OwnerId::new),
            self.created_at,
        ))
    }
}

#[async_trait]
impl AccessGrantRepository for PostgresAccessGrantRepository {
    async fn insert(&self, grant: NewAccessGrant) -> AppResult<AccessGrant> {
        let row = sqlx::query_as::<_, GrantRow>(
            r#"
            INSERT INTO access_grants
                (principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at
            "#,
        )
        .bind(grant.principal.principal_type().as_str())
        .bind(grant.principal.principal_id())
        .bind(grant.scope.scope_type().as_str())
        .bind(grant.scope.customer_id().map(|id| id.as_i64()))
        .bind(grant.scope.store_id().map(|id| id.as_i64()))
        .bind(grant.owner_id.map(|id| id.as_i64()))
        .bind(grant.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_grant_conflict)?;

        row.decode()
    }

    async fn delete(&self, grant_id: GrantId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM access_grants
            WHERE id = $1
            "#,
        )
        .bind(grant_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete grant: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_store_scope_for_store(&self, store_id: StoreId) -> AppResult<Vec<AccessGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT id, principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at
            FROM access_grants
            WHERE scope_type = 'STORE' AND store_id = $1
            ORDER BY id
            "#,
        )
        .bind(store_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list store grants: {error}")))?;

        rows.into_iter().map(GrantRow::decode).collect()
    }

    async fn list_store_scope_for_stores(
        &self,
        store_ids: &[StoreId],
    ) -> AppResult<Vec<AccessGrant>> {
        let raw_ids: Vec<i64> = store_ids.iter().map(StoreId::as_i64).collect();

        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT id, principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at
            FROM access_grants
            WHERE scope_type = 'STORE' AND store_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list store grants: {error}")))?;

        rows.into_iter().map(GrantRow::decode).collect()
    }

    async fn list_customer_scope_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> AppResult<Vec<AccessGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT id, principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at
            FROM access_grants
            WHERE scope_type = 'CUSTOMER' AND customer_id = $1
            ORDER BY id
            "#,
        )
        .bind(customer_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list customer grants: {error}"))
        })?;

        rows.into_iter().map(GrantRow::decode).collect()
    }

    async fn list_for_principal(&self, principal: &PrincipalRef) -> AppResult<Vec<AccessGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT id, principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at
            FROM access_grants
            WHERE principal_type = $1 AND principal_id = $2
            ORDER BY id
            "#,
        )
        .bind(principal.principal_type().as_str())
        .bind(principal.principal_id())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list principal grants: {error}"))
        })?;

        rows.into_iter().map(GrantRow::decode).collect()
    }

    async fn list_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<AccessGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT id, principal_type, principal_id, scope_type, customer_id, store_id, owner_id, created_at
            FROM access_grants
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list owner grants: {error}")))?;

        rows.into_iter().map(GrantRow::decode).collect()
    }
}

fn map_grant_conflict(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("an identical grant already exists".to_owned());
    }

    AppError::Internal(format!("failed to create grant: {error}"))
}
