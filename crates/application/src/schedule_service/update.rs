use sahaops_core::{ActorIdentity, ActorRole, AppError, AppResult, EventId, NonEmptyString};
use sahaops_domain::{ScheduleEvent, ScheduleWindow};

use super::{EventPatch, ScheduleService};

impl ScheduleService {
    /// Applies a partial update. Employees may only change the status;
    /// admins may patch any field. The post-merge event is revalidated as
    /// a whole and re-checked for booking conflicts, so a rejected request
    /// never leaves the record half-updated.
    pub async fn update_event(
        &self,
        event_id: EventId,
        patch: EventPatch,
        actor: &ActorIdentity,
    ) -> AppResult<ScheduleEvent> {
        let current = self.events.find(event_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("schedule event '{event_id}' does not exist"))
        })?;

        match actor.role() {
            ActorRole::Employee => {
                if patch.has_non_status_fields() {
                    return Err(AppError::Forbidden(
                        "employees may only change the event status".to_owned(),
                    ));
                }
                let Some(status) = patch.status else {
                    return Err(AppError::Validation("status is required".to_owned()));
                };

                self.events.update(&current.with_status(status)).await
            }
            ActorRole::Admin => self.apply_admin_patch(current, patch).await,
            ActorRole::Customer => Err(AppError::Forbidden(
                "customers may not modify schedule events".to_owned(),
            )),
        }
    }

    async fn apply_admin_patch(
        &self,
        current: ScheduleEvent,
        patch: EventPatch,
    ) -> AppResult<ScheduleEvent> {
        if let Some(employee_id) = patch.employee_id {
            self.directory
                .find_employee(employee_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("employee '{employee_id}' does not exist"))
                })?;
        }
        if let Some(store_id) = patch.store_id {
            self.directory.find_store(store_id).await?.ok_or_else(|| {
                AppError::NotFound(format!("store '{store_id}' does not exist"))
            })?;
        }

        let title = match patch.title {
            Some(title) => NonEmptyString::new(title)?,
            None => current.title().clone(),
        };
        let notes = patch.notes.or_else(|| current.notes().map(ToOwned::to_owned));
        let employee_id = patch.employee_id.unwrap_or(current.employee_id());
        let store_id = patch.store_id.unwrap_or(current.store_id());
        let window = ScheduleWindow::new(
            patch.starts_at.unwrap_or(current.starts_at()),
            patch.ends_at.unwrap_or(current.ends_at()),
        )?;
        let status = patch.status.unwrap_or(current.status());

        let overlapping = self
            .events
            .list_overlapping(
                employee_id,
                window.starts_at(),
                window.ends_at(),
                Some(current.id()),
            )
            .await?;
        if !overlapping.is_empty() {
            return Err(AppError::Conflict(format!(
                "employee '{employee_id}' is already booked in this window"
            )));
        }

        let updated = ScheduleEvent::new(
            current.id(),
            title,
            notes,
            employee_id,
            store_id,
            window,
            status,
            current.planned_by().clone(),
            current.planned_at(),
        );

        self.events.update(&updated).await
    }
}
