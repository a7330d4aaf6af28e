use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use sahaops_application::{AccessGrantRepository, NewAccessGrant};
use sahaops_core::{AppError, AppResult, CustomerId, GrantId, OwnerId, StoreId};
use sahaops_domain::{AccessGrant, PrincipalRef};
use tokio::sync::RwLock;


/// In-memory access grant implementation.
///
/// Duplicate detection runs under the write lock, matching the unique
/// indexes of the Postgres adapter.
#[derive(Debug, Default)]
pub struct InMemoryAccessGrantRepository {
    grants: RwLock<HashMap<GrantId, AccessGrant>>,
    next_id: AtomicI64,
}

impl InMemoryAccessGrantRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessGrantRepository for InMemoryAccessGrantRepository {
    async fn insert(&self, grant: NewAccessGrant) -> AppResult<AccessGrant> {
        let mut grants = self.grants.write().await;

        if grants
            .values()
            .any(|stored| stored.principal() == &grant.principal && stored.scope() == &grant.scope)
        {
            return Err(AppError::Conflict(
                "an identical grant already exists".to_owned(),
            ));
        }

        let id = GrantId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = AccessGrant::new(id, grant.principal, grant.scope, grant.owner_id, grant.created_at);
        grants.insert(id, stored.clone());

        Ok(stored)
    }

    async fn delete(&self, grant_id: GrantId) -> AppResult<bool> {
        Ok(self.grants.write().await.remove(&grant_id).is_some())
    }

    async fn list_store_scope_for_store(&self, store_id: StoreId) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .collect_sorted(|grant| grant.scope().store_id() == Some(store_id))
            .await)
    }

    async fn list_store_scope_for_stores(
        &self,
        store_ids: &[StoreId],
    ) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .collect_sorted(|grant| {
                grant
                    .scope()
                    .store_id()
                    .is_some_and(|store_id| store_ids.contains(&store_id))
            })
            .await)
    }

    async fn list_customer_scope_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .collect_sorted(|grant| grant.scope().customer_id() == Some(customer_id))
            .await)
    }

    async fn list_for_principal(&self, principal: &PrincipalRef) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .collect_sorted(|grant| grant.principal() == principal)
            .await)
    }

    async fn list_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .collect_sorted(|grant| grant.owner_id() == Some(owner_id))
            .await)
    }
}

impl InMemoryAccessGrantRepository {
    async fn collect_sorted(&self, keep: impl Fn(&AccessGrant) -> bool) -> Vec<AccessGrant> {
        let grants = self.grants.read().await;

        let mut listed: Vec<AccessGrant> = grants.values().filter(|grant| keep(grant)).cloned().collect();
        listed.sort_by_key(AccessGrant::id);

        listed
    }
}
