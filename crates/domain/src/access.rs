use std::str::FromStr;

use chrono::{DateTime, Utc};
use sahaops_core::{
    AdminId, AppError, AppResult, CustomerId, EmployeeId, GrantId, OwnerId, StoreId,
};
use serde::{Deserialize, Serialize};

/// Storage discriminant for the principal kind of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrincipalType {
    /// Field-service employee principal.
    Employee,
    /// Customer business-entity principal.
    Customer,
    /// Administrative principal.
    Admin,
}

impl PrincipalType {
    /// Returns the verbatim storage value for this principal kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Customer => "CUSTOMER",
            Self::Admin => "ADMIN",
        }
    }
}

impl FromStr for PrincipalType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EMPLOYEE" => Ok(Self::Employee),
            "CUSTOMER" => Ok(Self::Customer),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!(
                "unknown principal type '{value}'"
            ))),
        }
    }
}

/// Holder of a grant in the admin-auditing model.
///
/// A single tagged union replaces per-kind branching in the lookup paths;
/// [`PrincipalType`] is only the storage discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrincipalRef {
    /// Employee principal.
    Employee(EmployeeId),
    /// Customer principal.
    Customer(CustomerId),
    /// Admin principal.
    Admin(AdminId),
}

impl PrincipalRef {
    /// Builds a principal reference from its persisted parts.
    #[must_use]
    pub fn new(principal_type: PrincipalType, principal_id: i64) -> Self {
        match principal_type {
            PrincipalType::Employee => Self::Employee(EmployeeId::new(principal_id)),
            PrincipalType::Customer => Self::Customer(CustomerId::new(principal_id)),
            PrincipalType::Admin => Self::Admin(AdminId::new(principal_id)),
        }
    }

    /// Returns the storage discriminant.
    #[must_use]
    pub fn principal_type(&self) -> PrincipalType {
        match self {
            Self::Employee(_) => PrincipalType::Employee,
            Self::Customer(_) => PrincipalType::Customer,
            Self::Admin(_) => PrincipalType::Admin,
        }
    }

    /// Returns the raw id within the principal's directory table.
    #[must_use]
    pub fn principal_id(&self) -> i64 {
        match self {
            Self::Employee(id) => id.as_i64(),
            Self::Customer(id) => id.as_i64(),
            Self::Admin(id) => id.as_i64(),
        }
    }
}

/// Storage discriminant for grant scope granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeType {
    /// All stores under a customer.
    Customer,
    /// A single store.
    Store,
}

impl ScopeType {
    /// Returns the verbatim storage value for this scope kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Store => "STORE",
        }
    }
}

impl FromStr for ScopeType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CUSTOMER" => Ok(Self::Customer),
            "STORE" => Ok(Self::Store),
            _ => Err(AppError::Validation(format!(
                "unknown scope type '{value}'"
            ))),
        }
    }
}

/// Granularity of what an access grant covers.
///
/// A customer-level scope implicitly covers every store the customer owns;
/// a store-level scope is store-local and does not extend to siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantScope {
    /// All stores belonging to the customer.
    Customer(CustomerId),
    /// One store.
    Store(StoreId),
}

impl GrantScope {
    /// Builds a scope from its persisted parts, enforcing that exactly the
    /// foreign key matching the scope type is populated.
    pub fn from_parts(
        scope_type: ScopeType,
        customer_id: Option<i64>,
        store_id: Option<i64>,
    ) -> AppResult<Self> {
        match (scope_type, customer_id, store_id) {
            (ScopeType::Customer, Some(customer_id), None) => {
                Ok(Self::Customer(CustomerId::new(customer_id)))
            }
            (ScopeType::Store, None, Some(store_id)) => Ok(Self::Store(StoreId::new(store_id))),
            (ScopeType::Customer, _, _) => Err(AppError::Validation(
                "customer-scope grants require customer_id and no store_id".to_owned(),
            )),
            (ScopeType::Store, _, _) => Err(AppError::Validation(
                "store-scope grants require store_id and no customer_id".to_owned(),
            )),
        }
    }

    /// Returns the storage discriminant.
    #[must_use]
    pub fn scope_type(&self) -> ScopeType {
        match self {
            Self::Customer(_) => ScopeType::Customer,
            Self::Store(_) => ScopeType::Store,
        }
    }

    /// Returns the customer id when the scope is customer-level.
    #[must_use]
    pub fn customer_id(&self) -> Option<CustomerId> {
        match self {
            Self::Customer(customer_id) => Some(*customer_id),
            Self::Store(_) => None,
        }
    }

    /// Returns the store id when the scope is store-level.
    #[must_use]
    pub fn store_id(&self) -> Option<StoreId> {
        match self {
            Self::Customer(_) => None,
            Self::Store(store_id) => Some(*store_id),
        }
    }
}

/// An authorization edge tying a principal (and optionally the access
/// owner it was issued to) to a customer- or store-level scope.
///
/// Grants are created and revoked, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    id: GrantId,
    principal: PrincipalRef,
    scope: GrantScope,
    owner_id: Option<OwnerId>,
    created_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Creates a grant record. Scope/foreign-key consistency is structural
    /// in [`GrantScope`]; uniqueness is enforced by the persistence layer.
    #[must_use]
    pub fn new(
        id: GrantId,
        principal: PrincipalRef,
        scope: GrantScope,
        owner_id: Option<OwnerId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            principal,
            scope,
            owner_id,
            created_at,
        }
    }

    /// Returns the grant id.
    #[must_use]
    pub fn id(&self) -> GrantId {
        self.id
    }

    /// Returns the grant holder.
    #[must_use]
    pub fn principal(&self) -> &PrincipalRef {
        &self.principal
    }

    /// Returns the granted scope.
    #[must_use]
    pub fn scope(&self) -> &GrantScope {
        &self.scope
    }

    /// Returns the access owner the grant was issued to, if any.
    #[must_use]
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{GrantScope, PrincipalType, ScopeType};

    #[test]
    fn scope_from_parts_rejects_mismatched_foreign_keys() {
        assert!(GrantScope::from_parts(ScopeType::Customer, None, Some(10)).is_err());
        assert!(GrantScope::from_parts(ScopeType::Store, Some(1), Some(10)).is_err());
        assert!(GrantScope::from_parts(ScopeType::Store, None, None).is_err());
    }

    #[test]
    fn scope_from_parts_accepts_matching_foreign_key() {
        let scope = GrantScope::from_parts(ScopeType::Customer, Some(1), None);
        assert!(matches!(scope, Ok(GrantScope::Customer(id)) if id.as_i64() == 1));
    }

    #[test]
    fn principal_type_round_trips_storage_value() {
        let restored = PrincipalType::from_str(PrincipalType::Employee.as_str());
        assert!(matches!(restored, Ok(PrincipalType::Employee)));
    }
}
