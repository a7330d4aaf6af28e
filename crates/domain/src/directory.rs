use sahaops_core::{AdminId, CustomerId, EmployeeId, OwnerId, StoreId};
use serde::{Deserialize, Serialize};

/// A customer business entity owning one or more stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    title: String,
}

impl Customer {
    /// Creates a customer read model.
    #[must_use]
    pub fn new(id: CustomerId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Returns the customer id.
    #[must_use]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Returns the customer title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// A store location; belongs to exactly one customer, immutably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    id: StoreId,
    customer_id: CustomerId,
    name: String,
}

impl Store {
    /// Creates a store read model.
    #[must_use]
    pub fn new(id: StoreId, customer_id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            customer_id,
            name: name.into(),
        }
    }

    /// Returns the store id.
    #[must_use]
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Returns the owning customer id.
    #[must_use]
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the store display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// A field-service employee account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    email: String,
    password_hash: String,
}

impl Employee {
    /// Creates an employee record.
    #[must_use]
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns the employee id.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the employee display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

/// An administrative back-office account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    id: AdminId,
    name: String,
    email: String,
    password_hash: String,
}

impl Admin {
    /// Creates an admin record.
    #[must_use]
    pub fn new(
        id: AdminId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns the admin id.
    #[must_use]
    pub fn id(&self) -> AdminId {
        self.id
    }

    /// Returns the admin display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

/// An external customer-side account holder, distinct from the customer
/// business entity. Holds access grants via its owner id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessOwner {
    id: OwnerId,
    name: String,
    email: String,
    password_hash: String,
}

impl AccessOwner {
    /// Creates an access-owner record.
    #[must_use]
    pub fn new(
        id: OwnerId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns the owner id.
    #[must_use]
    pub fn id(&self) -> OwnerId {
        self.id
    }

    /// Returns the owner display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}
