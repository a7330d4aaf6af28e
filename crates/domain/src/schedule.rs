use std::str::FromStr;

use chrono::{DateTime, Timelike, Utc};
use sahaops_core::{
    ActorRole, AppError, AppResult, EmployeeId, EventId, NonEmptyString, StoreId,
};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a visit assignment.
///
/// The transition graph is unconstrained for admins; employees may only
/// move an event between these states without touching other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Awaiting planning confirmation.
    Pending,
    /// Planned and confirmed; the default on creation.
    Planned,
    /// Visit carried out.
    Completed,
    /// Visit attempted but not carried out.
    Failed,
    /// Visit cancelled.
    Cancelled,
    /// Visit postponed to a later slot.
    Postponed,
}

impl EventStatus {
    /// Returns the verbatim storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Planned => "PLANNED",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Postponed => "POSTPONED",
        }
    }

    /// Returns all known statuses.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[EventStatus] = &[
            EventStatus::Pending,
            EventStatus::Planned,
            EventStatus::Completed,
            EventStatus::Failed,
            EventStatus::Cancelled,
            EventStatus::Postponed,
        ];

        ALL
    }
}

impl FromStr for EventStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "PLANNED" => Ok(Self::Planned),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "CANCELLED" => Ok(Self::Cancelled),
            "POSTPONED" => Ok(Self::Postponed),
            _ => Err(AppError::Validation(format!(
                "unknown event status '{value}'"
            ))),
        }
    }
}

/// Returns whether an instant lies on the 15-minute scheduling grid.
///
/// Only the minute component is constrained; seconds and sub-second
/// precision pass through unchecked.
#[must_use]
pub fn is_grid_aligned(instant: DateTime<Utc>) -> bool {
    instant.minute() % 15 == 0
}

/// A validated half-open visit window `[starts_at, ends_at)`.
///
/// Both bounds sit on the 15-minute grid and the end is strictly after the
/// start. Half-open semantics allow back-to-back bookings: a window ending
/// exactly where another begins does not overlap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl ScheduleWindow {
    /// Creates a validated visit window.
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> AppResult<Self> {
        if ends_at <= starts_at {
            return Err(AppError::Validation(
                "event end must be after its start".to_owned(),
            ));
        }
        if !is_grid_aligned(starts_at) {
            return Err(AppError::Validation(
                "event start must align to the 15-minute grid".to_owned(),
            ));
        }
        if !is_grid_aligned(ends_at) {
            return Err(AppError::Validation(
                "event end must align to the 15-minute grid".to_owned(),
            ));
        }

        Ok(Self { starts_at, ends_at })
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Half-open overlap test against another window.
    #[must_use]
    pub fn overlaps(&self, other: &ScheduleWindow) -> bool {
        self.overlaps_range(other.starts_at, other.ends_at)
    }

    /// Half-open overlap test against a raw candidate interval.
    #[must_use]
    pub fn overlaps_range(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        self.starts_at < ends_at && starts_at < self.ends_at
    }
}

/// Provenance of the planning action captured at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedBy {
    id: i64,
    role: ActorRole,
    name: Option<String>,
}

impl PlannedBy {
    /// Creates planner provenance from the acting identity.
    #[must_use]
    pub fn new(id: i64, role: ActorRole, name: Option<String>) -> Self {
        Self { id, role, name }
    }

    /// Returns the planner's raw id.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the planner's role.
    #[must_use]
    pub fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns the resolved planner display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A visit assignment placed on an employee timeline.
///
/// Windows are validated on construction, so every write path that
/// rebuilds the entity re-enforces the grid and ordering invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    id: EventId,
    title: NonEmptyString,
    notes: Option<String>,
    employee_id: EmployeeId,
    store_id: StoreId,
    window: ScheduleWindow,
    status: EventStatus,
    planned_by: PlannedBy,
    planned_at: DateTime<Utc>,
}

impl ScheduleEvent {
    /// Assembles an event from validated parts.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: EventId,
        title: NonEmptyString,
        notes: Option<String>,
        employee_id: EmployeeId,
        store_id: StoreId,
        window: ScheduleWindow,
        status: EventStatus,
        planned_by: PlannedBy,
        planned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            notes,
            employee_id,
            store_id,
            window,
            status,
            planned_by,
            planned_at,
        }
    }

    /// Returns the event id.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Returns the event title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the free-form notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the assigned employee.
    #[must_use]
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the visited store.
    #[must_use]
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Returns the visit window.
    #[must_use]
    pub fn window(&self) -> &ScheduleWindow {
        &self.window
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.window.starts_at()
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.window.ends_at()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Returns the planning provenance.
    #[must_use]
    pub fn planned_by(&self) -> &PlannedBy {
        &self.planned_by
    }

    /// Returns the planning timestamp.
    #[must_use]
    pub fn planned_at(&self) -> DateTime<Utc> {
        self.planned_at
    }

    /// Returns a copy with a replaced status and all other fields intact.
    #[must_use]
    pub fn with_status(&self, status: EventStatus) -> Self {
        let mut updated = self.clone();
        updated.status = status;
        updated
    }
}
