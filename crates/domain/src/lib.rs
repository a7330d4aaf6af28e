//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod directory;
mod schedule;

pub use access::{AccessGrant, GrantScope, PrincipalRef, PrincipalType, ScopeType};
pub use directory::{AccessOwner, Admin, Customer, Employee, Store};
pub use schedule::{
    EventStatus, PlannedBy, ScheduleEvent, ScheduleWindow, is_grid_aligned,
};
