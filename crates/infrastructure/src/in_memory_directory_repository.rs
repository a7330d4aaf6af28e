use std::collections::HashMap;

use async_trait::async_trait;
use sahaops_application::DirectoryRepository;
use sahaops_core::{AdminId, AppResult, CustomerId, EmployeeId, OwnerId, StoreId};
use sahaops_domain::{AccessOwner, Admin, Customer, Employee, Store};
use tokio::sync::RwLock;

/// In-memory directory implementation for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    stores: RwLock<HashMap<StoreId, Store>>,
    employees: RwLock<HashMap<EmployeeId, Employee>>,
    admins: RwLock<HashMap<AdminId, Admin>>,
    owners: RwLock<HashMap<OwnerId, AccessOwner>>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a customer record.
    pub async fn upsert_customer(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id(), customer);
    }

    /// Inserts or replaces a store record.
    pub async fn upsert_store(&self, store: Store) {
        self.stores.write().await.insert(store.id(), store);
    }

    /// Inserts or replaces an employee record.
    pub async fn upsert_employee(&self, employee: Employee) {
        self.employees.write().await.insert(employee.id(), employee);
    }

    /// Inserts or replaces an admin record.
    pub async fn upsert_admin(&self, admin: Admin) {
        self.admins.write().await.insert(admin.id(), admin);
    }

    /// Inserts or replaces an access-owner record.
    pub async fn upsert_owner(&self, owner: AccessOwner) {
        self.owners.write().await.insert(owner.id(), owner);
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&customer_id).cloned())
    }

    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>> {
        Ok(self.stores.read().await.get(&store_id).cloned())
    }

    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<Employee>> {
        Ok(self.employees.read().await.get(&employee_id).cloned())
    }

    async fn find_admin(&self, admin_id: AdminId) -> AppResult<Option<Admin>> {
        Ok(self.admins.read().await.get(&admin_id).cloned())
    }

    async fn find_owner(&self, owner_id: OwnerId) -> AppResult<Option<AccessOwner>> {
        Ok(self.owners.read().await.get(&owner_id).cloned())
    }

    async fn list_stores_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<Store>> {
        let stores = self.stores.read().await;

        let mut listed: Vec<Store> = stores
            .values()
            .filter(|store| store.customer_id() == customer_id)
            .cloned()
            .collect();
        listed.sort_by_key(Store::id);

        Ok(listed)
    }

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        Ok(self
            .admins
            .read()
            .await
            .values()
            .find(|admin| admin.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .await
            .values()
            .find(|employee| employee.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_owner_by_email(&self, email: &str) -> AppResult<Option<AccessOwner>> {
        Ok(self
            .owners
            .read()
            .await
            .values()
            .find(|owner| owner.email().eq_ignore_ascii_case(email))
            .cloned())
    }
}
