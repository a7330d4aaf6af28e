use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use sahaops_application::{EventPatch, EventRangeQuery, NewEventInput};
use sahaops_core::{ActorIdentity, AppError, EmployeeId, EventId, StoreId};
use sahaops_domain::EventStatus;

use crate::dto::{
    CreateEventRequest, EventDetailResponse, EventQueryParams, EventResponse, UpdateEventRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn query_events_handler(
    State(state): State<AppState>,
    Query(params): Query<EventQueryParams>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let query = EventRangeQuery {
        from: parse_instant("from", params.from.as_str())?,
        to: parse_instant("to", params.to.as_str())?,
        employee_id: params.employee_id.map(EmployeeId::new),
        store_id: params.store_id.map(StoreId::new),
    };

    let events = state
        .schedule_service
        .query_events(query)
        .await?
        .into_iter()
        .map(EventResponse::from)
        .collect();

    Ok(Json(events))
}

pub async fn create_event_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let input = NewEventInput {
        title: payload.title,
        notes: payload.notes,
        employee_id: EmployeeId::new(payload.employee_id),
        store_id: StoreId::new(payload.store_id),
        starts_at: parse_instant("start", payload.start.as_str())?,
        ends_at: parse_instant("end", payload.end.as_str())?,
        status: payload
            .status
            .as_deref()
            .map(EventStatus::from_str)
            .transpose()?,
    };

    let event = state.schedule_service.create_event(input, &actor).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn get_event_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ApiResult<Json<EventDetailResponse>> {
    let detail = state
        .schedule_service
        .get_event(EventId::new(event_id))
        .await?;

    Ok(Json(EventDetailResponse::from(detail)))
}

pub async fn update_event_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(event_id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let patch = EventPatch {
        title: payload.title,
        notes: payload.notes,
        employee_id: payload.employee_id.map(EmployeeId::new),
        store_id: payload.store_id.map(StoreId::new),
        starts_at: payload
            .start
            .as_deref()
            .map(|value| parse_instant("start", value))
            .transpose()?,
        ends_at: payload
            .end
            .as_deref()
            .map(|value| parse_instant("end", value))
            .transpose()?,
        status: payload
            .status
            .as_deref()
            .map(EventStatus::from_str)
            .transpose()?,
    };

    let event = state
        .schedule_service
        .update_event(EventId::new(event_id), patch, &actor)
        .await?;

    Ok(Json(EventResponse::from(event)))
}

fn parse_instant(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|error| AppError::Validation(format!("invalid {field} instant: {error}")))
}
