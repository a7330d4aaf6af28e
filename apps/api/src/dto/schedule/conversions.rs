use sahaops_application::EventDetail;
use sahaops_domain::ScheduleEvent;

use super::{EventDetailResponse, EventResponse, StoreResponse};

impl From<ScheduleEvent> for EventResponse {
    fn from(value: ScheduleEvent) -> Self {
        Self {
            id: value.id().as_i64(),
            title: value.title().as_str().to_owned(),
            notes: value.notes().map(ToOwned::to_owned),
            employee_id: value.employee_id().as_i64(),
            store_id: value.store_id().as_i64(),
            start: value.starts_at().to_rfc3339(),
            end: value.ends_at().to_rfc3339(),
            status: value.status().as_str().to_owned(),
            planned_by_id: value.planned_by().id(),
            planned_by_role: value.planned_by().role().as_str().to_owned(),
            planned_by_name: value.planned_by().name().map(ToOwned::to_owned),
            planned_at: value.planned_at().to_rfc3339(),
        }
    }
}

impl From<EventDetail> for EventDetailResponse {
    fn from(value: EventDetail) -> Self {
        Self {
            event: EventResponse::from(value.event),
            employee_name: value.employee_name,
            store: value.store.map(StoreResponse::from),
            planner_name: value.planner_name,
        }
    }
}
