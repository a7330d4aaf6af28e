use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sahaops_application::{EventRangeQuery, NewScheduleEvent, ScheduleEventRepository};
use sahaops_core::{AppError, AppResult, EmployeeId, EventId};
use sahaops_domain::ScheduleEvent;
use tokio::sync::RwLock;


/// In-memory schedule event implementation.
///
/// The write lock is held across the overlap re-check and the insert, so
/// concurrent writers are serialized. This mirrors the range-exclusion
/// constraint of the Postgres adapter: an overlapping write fails with a
/// conflict even if the engine's own check raced.
#[derive(Debug, Default)]
pub struct InMemoryScheduleEventRepository {
    events: RwLock<HashMap<EventId, ScheduleEvent>>,
    next_id: AtomicI64,
}

impl InMemoryScheduleEventRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleEventRepository for InMemoryScheduleEventRepository {
    async fn insert(&self, event: NewScheduleEvent) -> AppResult<ScheduleEvent> {
        let mut events = self.events.write().await;

        if has_overlap(
            &events,
            event.employee_id,
            event.window.starts_at(),
            event.window.ends_at(),
            None,
        ) {
            return Err(AppError::Conflict(format!(
                "employee '{}' is already booked in this window",
                event.employee_id
            )));
        }

        let id = EventId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = ScheduleEvent::new(
            id,
            event.title,
            event.notes,
            event.employee_id,
            event.store_id,
            event.window,
            event.status,
            event.planned_by,
            event.planned_at,
        );
        events.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find(&self, event_id: EventId) -> AppResult<Option<ScheduleEvent>> {
        Ok(self.events.read().await.get(&event_id).cloned())
    }

    async fn update(&self, event: &ScheduleEvent) -> AppResult<ScheduleEvent> {
        let mut events = self.events.write().await;

        if !events.contains_key(&event.id()) {
            return Err(AppError::NotFound(format!(
                "schedule event '{}' does not exist",
                event.id()
            )));
        }
        if has_overlap(
            &events,
            event.employee_id(),
            event.starts_at(),
            event.ends_at(),
            Some(event.id()),
        ) {
            return Err(AppError::Conflict(format!(
                "employee '{}' is already booked in this window",
                event.employee_id()
            )));
        }

        events.insert(event.id(), event.clone());

        Ok(event.clone())
    }

    async fn list_in_range(&self, query: &EventRangeQuery) -> AppResult<Vec<ScheduleEvent>> {
        let events = self.events.read().await;

        let mut listed: Vec<ScheduleEvent> = events
            .values()
            .filter(|event| event.window().overlaps_range(query.from, query.to))
            .filter(|event| {
                query
                    .employee_id
                    .is_none_or(|employee_id| event.employee_id() == employee_id)
            })
            .filter(|event| {
                query
                    .store_id
                    .is_none_or(|store_id| event.store_id() == store_id)
            })
            .cloned()
            .collect();
        listed.sort_by_key(ScheduleEvent::starts_at);

        Ok(listed)
    }

    async fn list_overlapping(
        &self,
        employee_id: EmployeeId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude: Option<EventId>,
    ) -> AppResult<Vec<ScheduleEvent>> {
        let events = self.events.read().await;

        let mut listed: Vec<ScheduleEvent> = events
            .values()
            .filter(|event| event.employee_id() == employee_id)
            .filter(|event| exclude.is_none_or(|excluded| event.id() != excluded))
            .filter(|event| event.window().overlaps_range(starts_at, ends_at))
            .cloned()
            .collect();
        listed.sort_by_key(ScheduleEvent::starts_at);

        Ok(listed)
    }
}

fn has_overlap(
    events: &HashMap<EventId, ScheduleEvent>,
    employee_id: EmployeeId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    exclude: Option<EventId>,
) -> bool {
    events
        .values()
        .filter(|event| event.employee_id() == employee_id)
        .filter(|event| exclude.is_none_or(|excluded| event.id() != excluded))
        .any(|event| event.window().overlaps_range(starts_at, ends_at))
}
