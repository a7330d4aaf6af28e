use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sahaops_application::{EventRangeQuery, NewScheduleEvent, ScheduleEventRepository};
use sahaops_core::{
    ActorRole, AppError, AppResult, EmployeeId, EventId, NonEmptyString, StoreId,
};
use sahaops_domain::{EventStatus, PlannedBy, ScheduleEvent, ScheduleWindow};
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed schedule event persistence.
///
/// The table carries a per-employee range-exclusion constraint, so two
/// concurrent overlapping bookings cannot both commit even though the
/// engine's conflict check is a point-in-time read. Exclusion violations
/// surface as conflicts, same as the eager check.
#[derive(Clone)]
pub struct PostgresScheduleEventRepository {
    pool: PgPool,
}

impl PostgresScheduleEventRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    title: String,
    notes: Option<String>,
    employee_id: i64,
    store_id: i64,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    status: String,
    planned_by_id: i64,
    planned_by_role: String,
    planned_by_name: Option<String>,
    planned_at: DateTime<Utc>,
}

impl EventRow {
    fn decode(self) -> AppResult<ScheduleEvent> {
        let id = self.id;
        let corrupt =
            move |error: AppError| AppError::Internal(format!("failed to decode event '{id}': {error}"));

        let title = NonEmptyString::new(self.title).map_err(corrupt)?;
        let window = ScheduleWindow::new(self.starts_at, self.ends_at).map_err(corrupt)?;
        let status = EventStatus::from_str(self.status.as_str()).map_err(corrupt)?;
        let role = ActorRole::from_str(self.planned_by_role.as_str()).map_err(corrupt)?;

        Ok(ScheduleEvent::new(
            EventId::new(self.id),
            title,
            self.notes,
            EmployeeId::new(self.employee_id),
            StoreId::new(self.store_id),
            window,
            status,
            PlannedBy::new(self.planned_by_id, role, self.planned_by_name),
            self.planned_at,
        ))
    }
}

#[async_trait]
impl ScheduleEventRepository for PostgresScheduleEventRepository {
    async fn insert(&self, event: NewScheduleEvent) -> AppResult<ScheduleEvent> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO schedule_events
                (title, notes, employee_id, store_id, starts_at, ends_at, status,
                 planned_by_id, planned_by_role, planned_by_name, planned_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, notes, employee_id, store_id, starts_at, ends_at, status,
                      planned_by_id, planned_by_role, planned_by_name, planned_at
            "#,
        )
        .bind(event.title.as_str())
        .bind(event.notes.as_deref())
        .bind(event.employee_id.as_i64())
        .bind(event.store_id.as_i64())
        .bind(event.window.starts_at())
        .bind(event.window.ends_at())
        .bind(event.status.as_str())
        .bind(event.planned_by.id())
        .bind(event.planned_by.role().as_str())
        .bind(event.planned_by.name())
        .bind(event.planned_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_booking_conflict(error, event.employee_id))?;

        row.decode()
    }

    async fn find(&self, event_id: EventId) -> AppResult<Option<ScheduleEvent>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, notes, employee_id, store_id, starts_at, ends_at, status,
                   planned_by_id, planned_by_role, planned_by_name, planned_at
            FROM schedule_events
            WHERE id = $1
            "#,
        )
        .bind(event_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load event: {error}")))?;

        row.map(EventRow::decode).transpose()
    }

    async fn update(&self, event: &ScheduleEvent) -> AppResult<ScheduleEvent> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE schedule_events
            SET title = $2, notes = $3, employee_id = $4, store_id = $5,
                starts_at = $6, ends_at = $7, status = $8
            WHERE id = $1
            RETURNING id, title, notes, employee_id, store_id, starts_at, ends_at, status,
                      planned_by_id, planned_by_role, planned_by_name, planned_at
            "#,
        )
        .bind(event.id().as_i64())
        .bind(event.title().as_str())
        .bind(event.notes())
        .bind(event.employee_id().as_i64())
        .bind(event.store_id().as_i64())
        .bind(event.starts_at())
        .bind(event.ends_at())
        .bind(event.status().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_booking_conflict(error, event.employee_id()))?;

        row.decode()
    }

    async fn list_in_range(&self, query: &EventRangeQuery) -> AppResult<Vec<ScheduleEvent>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, notes, employee_id, store_id, starts_at, ends_at, status,
                   planned_by_id, planned_by_role, planned_by_name, planned_at
            FROM schedule_events
            WHERE starts_at < $2 AND ends_at > $1
                AND ($3::BIGINT IS NULL OR employee_id = $3)
                AND ($4::BIGINT IS NULL OR store_id = $4)
            ORDER BY starts_at ASC
            "#,
        )
        .bind(query.from)
        .bind(query.to)
        .bind(query.employee_id.map(|id| id.as_i64()))
        .bind(query.store_id.map(|id| id.as_i64()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list events: {error}")))?;

        rows.into_iter().map(EventRow::decode).collect()
    }

    async fn list_overlapping(
        &self,
        employee_id: EmployeeId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude: Option<EventId>,
    ) -> AppResult<Vec<ScheduleEvent>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, notes, employee_id, store_id, starts_at, ends_at, status,
                   planned_by_id, planned_by_role, planned_by_name, planned_at
            FROM schedule_events
            WHERE employee_id = $1
                AND starts_at < $3 AND ends_at > $2
                AND ($4::BIGINT IS NULL OR id <> $4)
            ORDER BY starts_at ASC
            "#,
        )
        .bind(employee_id.as_i64())
        .bind(starts_at)
        .bind(ends_at)
        .bind(exclude.map(|id| id.as_i64()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list overlapping events: {error}"))
        })?;

        rows.into_iter().map(EventRow::decode).collect()
    }
}

fn map_booking_conflict(error: sqlx::Error, employee_id: EmployeeId) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23P01")
    {
        return AppError::Conflict(format!(
            "employee '{employee_id}' is already booked in this window"
        ));
    }

    AppError::Internal(format!("failed to write event: {error}"))
}
