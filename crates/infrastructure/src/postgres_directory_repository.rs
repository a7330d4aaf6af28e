use async_trait::async_trait;
use sahaops_application::DirectoryRepository;
use sahaops_core::{AdminId, AppError, AppResult, CustomerId, EmployeeId, OwnerId, StoreId};
use sahaops_domain::{AccessOwner, Admin, Customer, Employee, Store};
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed directory lookups.
#[derive(Clone)]
pub struct PostgresDirectoryRepository {
    pool: PgPool,
}

impl PostgresDirectoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    title: String,
}

#[derive(Debug, FromRow)]
struct StoreRow {
    id: i64,
    customer_id: i64,
    name: String,
}

// Employees, admins and access owners share the same column shape.
#[derive(Debug, FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
}

#[async_trait]
impl DirectoryRepository for PostgresDirectoryRepository {
    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, title
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load customer: {error}")))?;

        Ok(row.map(|row| Customer::new(CustomerId::new(row.id), row.title)))
    }

    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, customer_id, name
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(store_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load store: {error}")))?;

        Ok(row.map(|row| {
            Store::new(
                StoreId::new(row.id),
                CustomerId::new(row.customer_id),
                row.name,
            )
        }))
    }

    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(employee_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load employee: {error}")))?;

        Ok(row.map(|row| {
            Employee::new(
                EmployeeId::new(row.id),
                row.name,
                row.email,
                row.password_hash,
            )
        }))
    }

    async fn find_admin(&self, admin_id: AdminId) -> AppResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(admin_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load admin: {error}")))?;

        Ok(row.map(|row| Admin::new(AdminId::new(row.id), row.name, row.email, row.password_hash)))
    }

    async fn find_owner(&self, owner_id: OwnerId) -> AppResult<Option<AccessOwner>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM access_owners
            WHERE id = $1
            "#,
        )
        .bind(owner_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load access owner: {error}")))?;

        Ok(row.map(|row| {
            AccessOwner::new(OwnerId::new(row.id), row.name, row.email, row.password_hash)
        }))
    }

    async fn list_stores_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<Store>> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, customer_id, name
            FROM stores
            WHERE customer_id = $1
            ORDER BY id
            "#,
        )
        .bind(customer_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list stores for customer: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| {
                Store::new(
                    StoreId::new(row.id),
                    CustomerId::new(row.customer_id),
                    row.name,
                )
            })
            .collect())
    }

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM admins
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load admin by email: {error}")))?;

        Ok(row.map(|row| Admin::new(AdminId::new(row.id), row.name, row.email, row.password_hash)))
    }

    async fn find_employee_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM employees
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load employee by email: {error}"))
        })?;

        Ok(row.map(|row| {
            Employee::new(
                EmployeeId::new(row.id),
                row.name,
                row.email,
                row.password_hash,
            )
        }))
    }

    async fn find_owner_by_email(&self, email: &str) -> AppResult<Option<AccessOwner>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash
            FROM access_owners
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load access owner by email: {error}"))
        })?;

        Ok(row.map(|row| {
            AccessOwner::new(OwnerId::new(row.id), row.name, row.email, row.password_hash)
        }))
    }
}
