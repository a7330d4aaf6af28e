mod access;
mod common;
mod schedule;

pub use access::{
    CreateGrantRequest, GrantResponse, PrincipalGrantsResponse, PrincipalSummaryResponse,
    StoreResponse,
};
pub use common::{ActorResponse, HealthResponse, LoginRequest};
pub use schedule::{
    CreateEventRequest, EventDetailResponse, EventQueryParams, EventResponse, UpdateEventRequest,
};
