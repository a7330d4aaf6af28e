use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use sahaops_core::{
    AdminId, AppError, AppResult, CustomerId, EmployeeId, GrantId, OwnerId, StoreId,
};
use sahaops_domain::{
    AccessGrant, AccessOwner, Admin, Customer, Employee, GrantScope, PrincipalRef, Store,
};

use crate::DirectoryRepository;

use super::{AccessGrantRepository, AccessGrantService, CreateGrantInput, NewAccessGrant};

#[derive(Default)]
struct FakeDirectory {
    customers: HashMap<CustomerId, Customer>,
    stores: HashMap<StoreId, Store>,
    employees: HashMap<EmployeeId, Employee>,
    admins: HashMap<AdminId, Admin>,
    owners: HashMap<OwnerId, AccessOwner>,
}

#[async_trait]
impl DirectoryRepository for FakeDirectory {
    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.customers.get(&customer_id).cloned())
    }

    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>> {
        Ok(self.stores.get(&store_id).cloned())
    }

    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<Employee>> {
        Ok(self.employees.get(&employee_id).cloned())
    }

    async fn find_admin(&self, admin_id: AdminId) -> AppResult<Option<Admin>> {
        Ok(self.admins.get(&admin_id).cloned())
    }

    async fn find_owner(&self, owner_id: OwnerId) -> AppResult<Option<AccessOwner>> {
        Ok(self.owners.get(&owner_id).cloned())
    }

    async fn list_stores_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<Store>> {
        let mut stores: Vec<Store> = self
            .stores
            .values()
            .filter(|store| store.customer_id() == customer_id)
            .cloned()
            .collect();
        stores.sort_by_key(Store::id);
        Ok(stores)
    }

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        Ok(self
            .admins
            .values()
            .find(|admin| admin.email() == email)
            .cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .employees
            .values()
            .find(|employee| employee.email() == email)
            .cloned())
    }

    async fn find_owner_by_email(&self, email: &str) -> AppResult<Option<AccessOwner>> {
        Ok(self
            .owners
            .values()
            .find(|owner| owner.email() == email)
            .cloned())
    }
}

#[derive(Default)]
struct FakeGrantRepository {
    grants: Mutex<HashMap<GrantId, AccessGrant>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl AccessGrantRepository for FakeGrantRepository {
    async fn insert(&self, grant: NewAccessGrant) -> AppResult<AccessGrant> {
        let mut grants = self.grants.lock().await;
        if grants
            .values()
            .any(|stored| stored.principal() == &grant.principal && stored.scope() == &grant.scope)
        {
            return Err(AppError::Conflict("grant already exists".to_owned()));
        }

        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        let stored = AccessGrant::new(
            GrantId::new(*next_id),
            grant.principal,
            grant.scope,
            grant.owner_id,
            grant.created_at,
        );
        grants.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, grant_id: GrantId) -> AppResult<bool> {
        Ok(self.grants.lock().await.remove(&grant_id).is_some())
    }

    async fn list_store_scope_for_store(&self, store_id: StoreId) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .values()
            .filter(|grant| grant.scope().store_id() == Some(store_id))
            .cloned()
            .collect())
    }

    async fn list_store_scope_for_stores(
        &self,
        store_ids: &[StoreId],
    ) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .values()
            .filter(|grant| {
                grant
                    .scope()
                    .store_id()
                    .is_some_and(|store_id| store_ids.contains(&store_id))
            })
            .cloned()
            .collect())
    }

    async fn list_customer_scope_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .values()
            .filter(|grant| grant.scope().customer_id() == Some(customer_id))
            .cloned()
            .collect())
    }

    async fn list_for_principal(&self, principal: &PrincipalRef) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .values()
            .filter(|grant| grant.principal() == principal)
            .cloned()
            .collect())
    }

    async fn list_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .values()
            .filter(|grant| grant.owner_id() == Some(owner_id))
            .cloned()
            .collect())
    }
}

fn seeded_directory() -> FakeDirectory {
    let mut directory = FakeDirectory::default();
    directory.customers.insert(
        CustomerId::new(1),
        Customer::new(CustomerId::new(1), "Aksoy Gıda"),
    );
    directory.stores.insert(
        StoreId::new(10),
        Store::new(StoreId::new(10), CustomerId::new(1), "Kadıköy Şube"),
    );
    directory.stores.insert(
        StoreId::new(11),
        Store::new(StoreId::new(11), CustomerId::new(1), "Bostancı Şube"),
    );
    directory.customers.insert(
        CustomerId::new(2),
        Customer::new(CustomerId::new(2), "Demir Market"),
    );
    directory.stores.insert(
        StoreId::new(20),
        Store::new(StoreId::new(20), CustomerId::new(2), "Moda Şube"),
    );
    directory.employees.insert(
        EmployeeId::new(5),
        Employee::new(EmployeeId::new(5), "Murat Kaya", "murat@sahaops.dev", "x"),
    );
    directory
}

fn service_with(directory: FakeDirectory) -> AccessGrantService {
    AccessGrantService::new(Arc::new(FakeGrantRepository::default()), Arc::new(directory))
}

#[tokio::test]
async fn customer_grant_covers_every_store_of_the_customer() -> AppResult<()> {
    let service = service_with(seeded_directory());
    service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Employee(EmployeeId::new(5)),
            scope: GrantScope::Customer(CustomerId::new(1)),
            owner_id: None,
        })
        .await?;

    for store_id in [10, 11] {
        let listed = service
            .list_grants_for_store(StoreId::new(store_id))
            .await?;
        assert_eq!(listed.len(), 1);
        assert!(listed[0].scope_label.starts_with("Müşteri:"));
        assert_eq!(listed[0].customer_id, Some(CustomerId::new(1)));
    }

    // The sibling customer's store is untouched.
    let other = service.list_grants_for_store(StoreId::new(20)).await?;
    assert!(other.is_empty());
    Ok(())
}

#[tokio::test]
async fn store_grant_does_not_extend_to_sibling_stores() -> AppResult<()> {
    let service = service_with(seeded_directory());
    service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Employee(EmployeeId::new(5)),
            scope: GrantScope::Store(StoreId::new(10)),
            owner_id: None,
        })
        .await?;

    let granted = service.list_grants_for_store(StoreId::new(10)).await?;
    assert_eq!(granted.len(), 1);
    assert!(granted[0].scope_label.starts_with("Mağaza:"));
    // Store grants back-fill the owning customer.
    assert_eq!(granted[0].customer_id, Some(CustomerId::new(1)));

    let sibling = service.list_grants_for_store(StoreId::new(11)).await?;
    assert!(sibling.is_empty());
    Ok(())
}

#[tokio::test]
async fn listing_grants_for_unknown_store_fails_not_found() {
    let service = service_with(seeded_directory());
    let result = service.list_grants_for_store(StoreId::new(99)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn customer_listing_includes_store_scope_grants() -> AppResult<()> {
    let service = service_with(seeded_directory());
    service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Employee(EmployeeId::new(5)),
            scope: GrantScope::Store(StoreId::new(11)),
            owner_id: None,
        })
        .await?;
    service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Admin(AdminId::new(3)),
            scope: GrantScope::Customer(CustomerId::new(1)),
            owner_id: None,
        })
        .await?;

    let listed = service
        .list_grants_for_customer(CustomerId::new(1))
        .await?;
    assert_eq!(listed.len(), 2);

    let unknown = service.list_grants_for_customer(CustomerId::new(9)).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn duplicate_grant_fails_with_conflict() -> AppResult<()> {
    let service = service_with(seeded_directory());
    let input = CreateGrantInput {
        principal: PrincipalRef::Employee(EmployeeId::new(5)),
        scope: GrantScope::Customer(CustomerId::new(1)),
        owner_id: None,
    };

    service.create_grant(input.clone()).await?;
    let second = service.create_grant(input).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn creating_grant_for_missing_scope_entity_fails_not_found() {
    let service = service_with(seeded_directory());

    let missing_store = service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Employee(EmployeeId::new(5)),
            scope: GrantScope::Store(StoreId::new(99)),
            owner_id: None,
        })
        .await;
    assert!(matches!(missing_store, Err(AppError::NotFound(_))));

    let missing_customer = service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Employee(EmployeeId::new(5)),
            scope: GrantScope::Customer(CustomerId::new(9)),
            owner_id: None,
        })
        .await;
    assert!(matches!(missing_customer, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn revoking_grants_deletes_once() -> AppResult<()> {
    let service = service_with(seeded_directory());
    let granted = service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Employee(EmployeeId::new(5)),
            scope: GrantScope::Store(StoreId::new(10)),
            owner_id: None,
        })
        .await?;

    service.revoke_grant(granted.grant.id()).await?;
    let again = service.revoke_grant(granted.grant.id()).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn owner_store_set_unions_direct_and_inherited_grants() -> AppResult<()> {
    let service = service_with(seeded_directory());
    let owner_id = OwnerId::new(40);

    // Direct grant on a sibling customer's store plus a customer-wide
    // grant; the union covers all three stores exactly once.
    service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Customer(CustomerId::new(2)),
            scope: GrantScope::Store(StoreId::new(20)),
            owner_id: Some(owner_id),
        })
        .await?;
    service
        .create_grant(CreateGrantInput {
            principal: PrincipalRef::Customer(CustomerId::new(1)),
            scope: GrantScope::Customer(CustomerId::new(1)),
            owner_id: Some(owner_id),
        })
        .await?;

    let resolved = service.resolve_accessible_store_ids(owner_id).await?;
    let expected: Vec<i64> = resolved.iter().map(StoreId::as_i64).collect();
    assert_eq!(expected, vec![10, 11, 20]);

    // Idempotent: resolving again yields the identical set.
    let resolved_again = service.resolve_accessible_store_ids(owner_id).await?;
    assert_eq!(resolved, resolved_again);

    assert!(
        service
            .owner_can_access_store(owner_id, StoreId::new(11))
            .await?
    );
    assert!(
        !service
            .owner_can_access_store(owner_id, StoreId::new(99))
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn unknown_owner_resolves_to_empty_set() -> AppResult<()> {
    let service = service_with(seeded_directory());
    let resolved = service
        .resolve_accessible_store_ids(OwnerId::new(777))
        .await?;
    assert!(resolved.is_empty());
    Ok(())
}

#[tokio::test]
async fn expansion_degrades_gracefully_for_orphaned_references() -> AppResult<()> {
    let service = service_with(seeded_directory());

    // A grant whose principal and store no longer resolve: the summary is
    // None and the label falls back to the raw id.
    let orphaned = AccessGrant::new(
        GrantId::new(500),
        PrincipalRef::Employee(EmployeeId::new(404)),
        GrantScope::Store(StoreId::new(99)),
        None,
        Utc::now(),
    );
    let enriched = service.expand_grant(&orphaned).await;
    assert!(enriched.principal.is_none());
    assert_eq!(enriched.scope_label, "Mağaza: 99");
    assert_eq!(enriched.customer_id, None);
    Ok(())
}

#[tokio::test]
async fn principal_listing_carries_summary_and_grants() -> AppResult<()> {
    let service = service_with(seeded_directory());
    let principal = PrincipalRef::Employee(EmployeeId::new(5));
    service
        .create_grant(CreateGrantInput {
            principal,
            scope: GrantScope::Store(StoreId::new(10)),
            owner_id: None,
        })
        .await?;
    service
        .create_grant(CreateGrantInput {
            principal,
            scope: GrantScope::Customer(CustomerId::new(2)),
            owner_id: None,
        })
        .await?;

    let listed = service.list_grants_for_principal(&principal).await?;
    assert_eq!(listed.grants.len(), 2);
    let summary = listed.principal.ok_or_else(|| {
        AppError::Internal("expected a resolvable principal summary".to_owned())
    })?;
    assert_eq!(summary.name, "Murat Kaya");
    assert_eq!(summary.email.as_deref(), Some("murat@sahaops.dev"));
    Ok(())
}
