use sahaops_core::CustomerId;
use sahaops_domain::{AccessGrant, GrantScope, PrincipalRef};

use super::{AccessGrantService, EnrichedGrant, PrincipalSummary};

impl AccessGrantService {
    /// Joins a grant with its display context. Read-only; every lookup is
    /// best-effort so listings stay resilient to orphaned references.
    pub async fn expand_grant(&self, grant: &AccessGrant) -> EnrichedGrant {
        let principal = self.principal_summary(grant.principal()).await;
        let (scope_label, customer_id) = self.scope_context(grant.scope()).await;

        EnrichedGrant {
            grant: grant.clone(),
            principal,
            scope_label,
            customer_id,
        }
    }

    /// Single dispatch point for the three principal kinds. Missing rows
    /// and repository errors both degrade to `None`.
    pub(super) async fn principal_summary(
        &self,
        principal: &PrincipalRef,
    ) -> Option<PrincipalSummary> {
        let (name, email) = match principal {
            PrincipalRef::Employee(employee_id) => {
                match self.directory.find_employee(*employee_id).await {
                    Ok(Some(employee)) => {
                        (employee.name().to_owned(), Some(employee.email().to_owned()))
                    }
                    _ => return None,
                }
            }
            PrincipalRef::Customer(customer_id) => {
                match self.directory.find_customer(*customer_id).await {
                    Ok(Some(customer)) => (customer.title().to_owned(), None),
                    _ => return None,
                }
            }
            PrincipalRef::Admin(admin_id) => match self.directory.find_admin(*admin_id).await {
                Ok(Some(admin)) => (admin.name().to_owned(), Some(admin.email().to_owned())),
                _ => return None,
            },
        };

        Some(PrincipalSummary {
            principal: *principal,
            name,
            email,
        })
    }

    /// Resolves the scope display label and the owning-customer context.
    /// Store-scope grants back-fill the customer through the store record.
    async fn scope_context(&self, scope: &GrantScope) -> (String, Option<CustomerId>) {
        match scope {
            GrantScope::Customer(customer_id) => {
                let label = match self.directory.find_customer(*customer_id).await {
                    Ok(Some(customer)) => format!("Müşteri: {}", customer.title()),
                    _ => format!("Müşteri: {customer_id}"),
                };

                (label, Some(*customer_id))
            }
            GrantScope::Store(store_id) => match self.directory.find_store(*store_id).await {
                Ok(Some(store)) => (
                    format!("Mağaza: {}", store.name()),
                    Some(store.customer_id()),
                ),
                _ => (format!("Mağaza: {store_id}"), None),
            },
        }
    }
}
