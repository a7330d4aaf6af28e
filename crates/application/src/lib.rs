//! Application services and ports.

#![forbid(unsafe_code)]

mod access_grant_service;
mod directory_ports;
mod schedule_service;

pub use access_grant_service::{
    AccessGrantRepository, AccessGrantService, CreateGrantInput, EnrichedGrant, NewAccessGrant,
    PrincipalGrants, PrincipalSummary,
};
pub use directory_ports::{DirectoryRepository, PasswordHasher};
pub use schedule_service::{
    EventDetail, EventPatch, EventRangeQuery, NewEventInput, NewScheduleEvent,
    ScheduleEventRepository, ScheduleService,
};
