use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Role of the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// Administrative back-office user.
    Admin,
    /// Field-service employee.
    Employee,
    /// Customer-side account holder.
    Customer,
}

impl ActorRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Customer => "customer",
        }
    }

    /// Returns a human-readable role label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
            Self::Customer => "Customer",
        }
    }
}

impl FromStr for ActorRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            "customer" => Ok(Self::Customer),
            _ => Err(AppError::Validation(format!(
                "unknown actor role '{value}'"
            ))),
        }
    }
}

/// Caller context persisted in the authenticated session and handed to
/// the application services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    id: i64,
    role: ActorRole,
    display_name: Option<String>,
}

impl ActorIdentity {
    /// Creates an actor identity from authentication data.
    #[must_use]
    pub fn new(id: i64, role: ActorRole, display_name: Option<String>) -> Self {
        Self {
            id,
            role,
            display_name,
        }
    }

    /// Returns the raw id of the caller within its role's directory table.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the caller role.
    #[must_use]
    pub fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns the display name, if the identity provider supplied one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
