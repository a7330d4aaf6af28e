use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sahaops_core::{AppError, AppResult, CustomerId, GrantId, OwnerId, StoreId};
use sahaops_domain::{AccessGrant, GrantScope, PrincipalRef, Store};

use crate::DirectoryRepository;

mod enrichment;
mod owner_access;
#[cfg(test)]
mod tests;

/// Human-readable summary of a grant's principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalSummary {
    /// The summarized principal.
    pub principal: PrincipalRef,
    /// Display name; the customer title for customer principals.
    pub name: String,
    /// Login email, when the principal kind has one.
    pub email: Option<String>,
}

/// A grant joined with its display context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedGrant {
    /// The underlying grant record.
    pub grant: AccessGrant,
    /// Principal summary; `None` when the principal no longer resolves.
    pub principal: Option<PrincipalSummary>,
    /// Display label for the granted scope.
    pub scope_label: String,
    /// Owning customer context; back-filled via the store for store-scope
    /// grants so enriched results always carry it when resolvable.
    pub customer_id: Option<CustomerId>,
}

/// Grants held by one principal, regardless of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalGrants {
    /// Principal summary; `None` when the principal no longer resolves.
    pub principal: Option<PrincipalSummary>,
    /// The principal's grants, enriched.
    pub grants: Vec<EnrichedGrant>,
}

/// Input payload for issuing a grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGrantInput {
    /// Grant holder.
    pub principal: PrincipalRef,
    /// Granted scope.
    pub scope: GrantScope,
    /// Access owner the grant is issued to, for owner-scoped resolution.
    pub owner_id: Option<OwnerId>,
}

/// Draft persisted by the repository, which assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessGrant {
    /// Grant holder.
    pub principal: PrincipalRef,
    /// Granted scope.
    pub scope: GrantScope,
    /// Access owner the grant is issued to, if any.
    pub owner_id: Option<OwnerId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository port for grant persistence.
#[async_trait]
pub trait AccessGrantRepository: Send + Sync {
    /// Persists a grant and assigns its id. A grant identical in
    /// principal and scope surfaces as a conflict.
    async fn insert(&self, grant: NewAccessGrant) -> AppResult<AccessGrant>;

    /// Deletes a grant by id; returns whether a record existed.
    async fn delete(&self, grant_id: GrantId) -> AppResult<bool>;

    /// Lists store-scope grants on one store.
    async fn list_store_scope_for_store(&self, store_id: StoreId) -> AppResult<Vec<AccessGrant>>;

    /// Lists store-scope grants across a set of stores.
    async fn list_store_scope_for_stores(
        &self,
        store_ids: &[StoreId],
    ) -> AppResult<Vec<AccessGrant>>;

    /// Lists customer-scope grants on one customer.
    async fn list_customer_scope_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> AppResult<Vec<AccessGrant>>;

    /// Lists grants held by a principal, any scope.
    async fn list_for_principal(&self, principal: &PrincipalRef) -> AppResult<Vec<AccessGrant>>;

    /// Lists grants issued to an access owner, any scope.
    async fn list_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<AccessGrant>>;
}

/// Application service resolving the grant hierarchy into concrete access.
///
/// A customer-level grant is equivalent to a store-level grant for every
/// store that customer owns; the listing operations materialize that rule
/// in both traversal directions.
#[derive(Clone)]
pub struct AccessGrantService {
    grants: Arc<dyn AccessGrantRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl AccessGrantService {
    /// Creates a new service from injected persistence handles.
    #[must_use]
    pub fn new(
        grants: Arc<dyn AccessGrantRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self { grants, directory }
    }

    /// Lists grants effective for a store: direct store-scope grants plus
    /// customer-scope grants on the owning customer.
    pub async fn list_grants_for_store(&self, store_id: StoreId) -> AppResult<Vec<EnrichedGrant>> {
        let store = self
            .directory
            .find_store(store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("store '{store_id}' does not exist")))?;

        let mut grants = self.grants.list_store_scope_for_store(store_id).await?;
        grants.extend(
            self.grants
                .list_customer_scope_for_customer(store.customer_id())
                .await?,
        );

        Ok(self.expand_all(&grants).await)
    }

    /// Lists grants effective for a customer: customer-scope grants plus
    /// store-scope grants over every store the customer owns.
    pub async fn list_grants_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> AppResult<Vec<EnrichedGrant>> {
        self.directory
            .find_customer(customer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("customer '{customer_id}' does not exist"))
            })?;

        let mut grants = self
            .grants
            .list_customer_scope_for_customer(customer_id)
            .await?;
        let store_ids: Vec<StoreId> = self
            .directory
            .list_stores_for_customer(customer_id)
            .await?
            .iter()
            .map(Store::id)
            .collect();
        grants.extend(self.grants.list_store_scope_for_stores(&store_ids).await?);

        Ok(self.expand_all(&grants).await)
    }

    /// Lists all grants held by a principal, regardless of scope.
    pub async fn list_grants_for_principal(
        &self,
        principal: &PrincipalRef,
    ) -> AppResult<PrincipalGrants> {
        let grants = self.grants.list_for_principal(principal).await?;

        Ok(PrincipalGrants {
            principal: self.principal_summary(principal).await,
            grants: self.expand_all(&grants).await,
        })
    }

    /// Issues a grant after verifying the referenced scope entity exists.
    /// An identical existing grant fails with a conflict.
    pub async fn create_grant(&self, input: CreateGrantInput) -> AppResult<EnrichedGrant> {
        match input.scope {
            GrantScope::Customer(customer_id) => {
                self.directory
                    .find_customer(customer_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("customer '{customer_id}' does not exist"))
                    })?;
            }
            GrantScope::Store(store_id) => {
                self.directory.find_store(store_id).await?.ok_or_else(|| {
                    AppError::NotFound(format!("store '{store_id}' does not exist"))
                })?;
            }
        }

        let grant = self
            .grants
            .insert(NewAccessGrant {
                principal: input.principal,
                scope: input.scope,
                owner_id: input.owner_id,
                created_at: Utc::now(),
            })
            .await?;

        Ok(self.expand_grant(&grant).await)
    }

    /// Revokes a grant by id.
    pub async fn revoke_grant(&self, grant_id: GrantId) -> AppResult<()> {
        if !self.grants.delete(grant_id).await? {
            return Err(AppError::NotFound(format!(
                "grant '{grant_id}' does not exist"
            )));
        }

        Ok(())
    }

    async fn expand_all(&self, grants: &[AccessGrant]) -> Vec<EnrichedGrant> {
        let mut enriched = Vec::with_capacity(grants.len());
        for grant in grants {
            enriched.push(self.expand_grant(grant).await);
        }

        enriched
    }
}
