use chrono::Utc;
use sahaops_core::{
    ActorIdentity, ActorRole, AdminId, AppError, AppResult, EmployeeId, NonEmptyString, OwnerId,
};
use sahaops_domain::{EventStatus, PlannedBy, ScheduleEvent, ScheduleWindow};

use super::{NewEventInput, NewScheduleEvent, ScheduleService};

impl ScheduleService {
    /// Creates a visit assignment. Admin only. Validates the referenced
    /// employee and store, the window invariants, and the employee's
    /// non-overlap before anything is written.
    pub async fn create_event(
        &self,
        input: NewEventInput,
        actor: &ActorIdentity,
    ) -> AppResult<ScheduleEvent> {
        if actor.role() != ActorRole::Admin {
            return Err(AppError::Forbidden(
                "only admins may create schedule events".to_owned(),
            ));
        }

        self.directory
            .find_employee(input.employee_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("employee '{}' does not exist", input.employee_id))
            })?;
        self.directory
            .find_store(input.store_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("store '{}' does not exist", input.store_id))
            })?;

        let title = NonEmptyString::new(input.title)?;
        let window = ScheduleWindow::new(input.starts_at, input.ends_at)?;

        let overlapping = self
            .events
            .list_overlapping(input.employee_id, window.starts_at(), window.ends_at(), None)
            .await?;
        if !overlapping.is_empty() {
            return Err(AppError::Conflict(format!(
                "employee '{}' is already booked in this window",
                input.employee_id
            )));
        }

        let planner_name = self.resolve_planner_name(actor).await;

        self.events
            .insert(NewScheduleEvent {
                title,
                notes: input.notes,
                employee_id: input.employee_id,
                store_id: input.store_id,
                window,
                status: input.status.unwrap_or(EventStatus::Planned),
                planned_by: PlannedBy::new(actor.id(), actor.role(), planner_name),
                planned_at: Utc::now(),
            })
            .await
    }

    /// Resolves the planner display name: the actor-supplied name first,
    /// then the employee, admin, and access-owner records sharing the
    /// actor id. First non-empty wins; lookups are best-effort.
    pub(super) async fn resolve_planner_name(&self, actor: &ActorIdentity) -> Option<String> {
        if let Some(name) = actor.display_name() {
            if !name.trim().is_empty() {
                return Some(name.to_owned());
            }
        }

        if let Ok(Some(employee)) = self
            .directory
            .find_employee(EmployeeId::new(actor.id()))
            .await
        {
            if !employee.name().trim().is_empty() {
                return Some(employee.name().to_owned());
            }
        }

        if let Ok(Some(admin)) = self.directory.find_admin(AdminId::new(actor.id())).await {
            if !admin.name().trim().is_empty() {
                return Some(admin.name().to_owned());
            }
        }

        if let Ok(Some(owner)) = self.directory.find_owner(OwnerId::new(actor.id())).await {
            if !owner.name().trim().is_empty() {
                return Some(owner.name().to_owned());
            }
        }

        None
    }
}
