use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sahaops_core::{AppError, AppResult, EmployeeId, EventId, NonEmptyString, StoreId};
use sahaops_domain::{EventStatus, PlannedBy, ScheduleEvent, ScheduleWindow, Store};

use crate::DirectoryRepository;

mod create;
mod update;
#[cfg(test)]
mod tests;

/// Filter for calendar range queries; events intersecting `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRangeQuery {
    /// Inclusive range start.
    pub from: DateTime<Utc>,
    /// Exclusive range end.
    pub to: DateTime<Utc>,
    /// Optional employee filter.
    pub employee_id: Option<EmployeeId>,
    /// Optional store filter.
    pub store_id: Option<StoreId>,
}

/// Input payload for creating a visit assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventInput {
    /// Event title.
    pub title: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Assigned employee.
    pub employee_id: EmployeeId,
    /// Visited store.
    pub store_id: StoreId,
    /// Visit start instant.
    pub starts_at: DateTime<Utc>,
    /// Visit end instant.
    pub ends_at: DateTime<Utc>,
    /// Initial status; defaults to planned.
    pub status: Option<EventStatus>,
}

/// Validated draft persisted by the repository, which assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleEvent {
    /// Event title.
    pub title: NonEmptyString,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Assigned employee.
    pub employee_id: EmployeeId,
    /// Visited store.
    pub store_id: StoreId,
    /// Validated visit window.
    pub window: ScheduleWindow,
    /// Initial status.
    pub status: EventStatus,
    /// Planning provenance.
    pub planned_by: PlannedBy,
    /// Planning timestamp.
    pub planned_at: DateTime<Utc>,
}

/// Partial update payload; absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement notes.
    pub notes: Option<String>,
    /// Replacement employee.
    pub employee_id: Option<EmployeeId>,
    /// Replacement store.
    pub store_id: Option<StoreId>,
    /// Replacement start instant.
    pub starts_at: Option<DateTime<Utc>>,
    /// Replacement end instant.
    pub ends_at: Option<DateTime<Utc>>,
    /// Replacement status.
    pub status: Option<EventStatus>,
}

impl EventPatch {
    /// Returns whether the patch carries any field other than the status.
    #[must_use]
    pub fn has_non_status_fields(&self) -> bool {
        self.title.is_some()
            || self.notes.is_some()
            || self.employee_id.is_some()
            || self.store_id.is_some()
            || self.starts_at.is_some()
            || self.ends_at.is_some()
    }
}

/// A schedule event joined with its display context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    /// The underlying event record.
    pub event: ScheduleEvent,
    /// Assigned employee's display name, when resolvable.
    pub employee_name: Option<String>,
    /// Visited store record, when resolvable.
    pub store: Option<Store>,
    /// Planner display name, with a role+id fallback label.
    pub planner_name: String,
}

/// Repository port for schedule event persistence.
#[async_trait]
pub trait ScheduleEventRepository: Send + Sync {
    /// Persists a new event and assigns its id. Adapters that can detect
    /// overlap at write time surface it as a conflict.
    async fn insert(&self, event: NewScheduleEvent) -> AppResult<ScheduleEvent>;

    /// Looks up an event by id.
    async fn find(&self, event_id: EventId) -> AppResult<Option<ScheduleEvent>>;

    /// Replaces a persisted event.
    async fn update(&self, event: &ScheduleEvent) -> AppResult<ScheduleEvent>;

    /// Lists events intersecting the query range, ordered by start
    /// ascending.
    async fn list_in_range(&self, query: &EventRangeQuery) -> AppResult<Vec<ScheduleEvent>>;

    /// Lists events for an employee overlapping `[starts_at, ends_at)`
    /// half-open, optionally excluding one event id.
    async fn list_overlapping(
        &self,
        employee_id: EmployeeId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude: Option<EventId>,
    ) -> AppResult<Vec<ScheduleEvent>>;
}

/// Application service placing visit assignments on employee timelines.
///
/// Enforces the per-employee non-overlap invariant and the 15-minute grid
/// on every write path; the transition graph between statuses is
/// unconstrained for admins.
#[derive(Clone)]
pub struct ScheduleService {
    events: Arc<dyn ScheduleEventRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl ScheduleService {
    /// Creates a new service from injected persistence handles.
    #[must_use]
    pub fn new(
        events: Arc<dyn ScheduleEventRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self { events, directory }
    }

    /// Returns events intersecting `[from, to)`, optionally filtered by
    /// employee and/or store, ordered by start ascending.
    pub async fn query_events(&self, query: EventRangeQuery) -> AppResult<Vec<ScheduleEvent>> {
        if query.to <= query.from {
            return Err(AppError::Validation(
                "query range end must be after its start".to_owned(),
            ));
        }

        self.events.list_in_range(&query).await
    }

    /// Returns one event enriched with display context.
    pub async fn get_event(&self, event_id: EventId) -> AppResult<EventDetail> {
        let event = self.events.find(event_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("schedule event '{event_id}' does not exist"))
        })?;

        let employee_name = match self.directory.find_employee(event.employee_id()).await {
            Ok(Some(employee)) => Some(employee.name().to_owned()),
            _ => None,
        };
        let store = match self.directory.find_store(event.store_id()).await {
            Ok(Some(store)) => Some(store),
            _ => None,
        };
        let planner_name = event
            .planned_by()
            .name()
            .filter(|name| !name.trim().is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| {
                format!(
                    "{} #{}",
                    event.planned_by().role().label(),
                    event.planned_by().id()
                )
            });

        Ok(EventDetail {
            event,
            employee_name,
            store,
            planner_name,
        })
    }
}
