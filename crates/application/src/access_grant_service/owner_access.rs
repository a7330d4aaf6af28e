use std::collections::BTreeSet;

use sahaops_core::{AppResult, OwnerId, StoreId};
use sahaops_domain::GrantScope;

use super::AccessGrantService;

impl AccessGrantService {
    /// Resolves the complete store-id set an access owner may act upon:
    /// direct store-scope grants plus every store of each customer-scope
    /// grant, deduplicated. Unknown owners resolve to the empty set.
    pub async fn resolve_accessible_store_ids(
        &self,
        owner_id: OwnerId,
    ) -> AppResult<BTreeSet<StoreId>> {
        let grants = self.grants.list_for_owner(owner_id).await?;

        let mut store_ids = BTreeSet::new();
        for grant in &grants {
            match grant.scope() {
                GrantScope::Store(store_id) => {
                    store_ids.insert(*store_id);
                }
                GrantScope::Customer(customer_id) => {
                    for store in self.directory.list_stores_for_customer(*customer_id).await? {
                        store_ids.insert(store.id());
                    }
                }
            }
        }

        Ok(store_ids)
    }

    /// Authorization gate for owner-facing flows: whether the owner may
    /// act on the given store.
    pub async fn owner_can_access_store(
        &self,
        owner_id: OwnerId,
        store_id: StoreId,
    ) -> AppResult<bool> {
        let store_ids = self.resolve_accessible_store_ids(owner_id).await?;

        Ok(store_ids.contains(&store_id))
    }
}
