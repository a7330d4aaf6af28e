use async_trait::async_trait;
use sahaops_core::{AdminId, AppResult, CustomerId, EmployeeId, OwnerId, StoreId};
use sahaops_domain::{AccessOwner, Admin, Customer, Employee, Store};

/// Repository port for directory lookups.
///
/// The directory is read-only from the engines' perspective; its records
/// are maintained by the surrounding CRUD surface.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Looks up a customer by id.
    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>>;

    /// Looks up a store by id.
    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>>;

    /// Looks up an employee by id.
    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<Employee>>;

    /// Looks up an admin by id.
    async fn find_admin(&self, admin_id: AdminId) -> AppResult<Option<Admin>>;

    /// Looks up an access owner by id.
    async fn find_owner(&self, owner_id: OwnerId) -> AppResult<Option<AccessOwner>>;

    /// Lists every store belonging to a customer.
    async fn list_stores_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<Store>>;

    /// Looks up an admin by login email.
    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>>;

    /// Looks up an employee by login email.
    async fn find_employee_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Looks up an access owner by login email.
    async fn find_owner_by_email(&self, email: &str) -> AppResult<Option<AccessOwner>>;
}

/// Port for password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
