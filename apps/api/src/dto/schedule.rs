use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::access::StoreResponse;

mod conversions;

/// Incoming payload for creating a schedule event.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-event-request.ts"
)]
pub struct CreateEventRequest {
    pub title: String,
    pub notes: Option<String>,
    pub employee_id: i64,
    pub store_id: i64,
    pub start: String,
    pub end: String,
    pub status: Option<String>,
}

/// Incoming payload for partially updating a schedule event.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-event-request.ts"
)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub employee_id: Option<i64>,
    pub store_id: Option<i64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for the calendar range listing.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/event-query-params.ts"
)]
pub struct EventQueryParams {
    pub from: String,
    pub to: String,
    pub employee_id: Option<i64>,
    pub store_id: Option<i64>,
}

/// API representation of a schedule event.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/event-response.ts"
)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub notes: Option<String>,
    pub employee_id: i64,
    pub store_id: i64,
    pub start: String,
    pub end: String,
    pub status: String,
    pub planned_by_id: i64,
    pub planned_by_role: String,
    pub planned_by_name: Option<String>,
    pub planned_at: String,
}

/// API representation of a schedule event with display context.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/event-detail-response.ts"
)]
pub struct EventDetailResponse {
    pub event: EventResponse,
    pub employee_name: Option<String>,
    pub store: Option<StoreResponse>,
    pub planner_name: String,
}
