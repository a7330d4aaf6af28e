use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;

use sahaops_core::{
    ActorIdentity, ActorRole, AdminId, AppError, AppResult, CustomerId, EmployeeId, EventId,
    OwnerId, StoreId,
};
use sahaops_domain::{
    AccessOwner, Admin, Customer, Employee, EventStatus, ScheduleEvent, Store,
};

use crate::DirectoryRepository;

use super::{
    EventPatch, EventRangeQuery, NewEventInput, NewScheduleEvent, ScheduleEventRepository,
    ScheduleService,
};

#[derive(Default)]
struct FakeDirectory {
    customers: HashMap<CustomerId, Customer>,
    stores: HashMap<StoreId, Store>,
    employees: HashMap<EmployeeId, Employee>,
    admins: HashMap<AdminId, Admin>,
    owners: HashMap<OwnerId, AccessOwner>,
}

#[async_trait]
impl DirectoryRepository for FakeDirectory {
    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.customers.get(&customer_id).cloned())
    }

    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>> {
        Ok(self.stores.get(&store_id).cloned())
    }

    async fn find_employee(&self, employee_id: EmployeeId) -> AppResult<Option<Employee>> {
        Ok(self.employees.get(&employee_id).cloned())
    }

    async fn find_admin(&self, admin_id: AdminId) -> AppResult<Option<Admin>> {
        Ok(self.admins.get(&admin_id).cloned())
    }

    async fn find_owner(&self, owner_id: OwnerId) -> AppResult<Option<AccessOwner>> {
        Ok(self.owners.get(&owner_id).cloned())
    }

    async fn list_stores_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<Store>> {
        Ok(self
            .stores
            .values()
            .filter(|store| store.customer_id() == customer_id)
            .cloned()
            .collect())
    }

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        Ok(self
            .admins
            .values()
            .find(|admin| admin.email() == email)
            .cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .employees
            .values()
            .find(|employee| employee.email() == email)
            .cloned())
    }

    async fn find_owner_by_email(&self, email: &str) -> AppResult<Option<AccessOwner>> {
        Ok(self
            .owners
            .values()
            .find(|owner| owner.email() == email)
            .cloned())
    }
}

#[derive(Default)]
struct FakeEventRepository {
    events: Mutex<HashMap<EventId, ScheduleEvent>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl ScheduleEventRepository for FakeEventRepository {
    async fn insert(&self, event: NewScheduleEvent) -> AppResult<ScheduleEvent> {
        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        let stored = ScheduleEvent::new(
            EventId::new(*next_id),
            event.title,
            event.notes,
            event.employee_id,
            event.store_id,
            event.window,
            event.status,
            event.planned_by,
            event.planned_at,
        );
        self.events.lock().await.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find(&self, event_id: EventId) -> AppResult<Option<ScheduleEvent>> {
        Ok(self.events.lock().await.get(&event_id).cloned())
    }

    async fn update(&self, event: &ScheduleEvent) -> AppResult<ScheduleEvent> {
        self.events.lock().await.insert(event.id(), event.clone());
        Ok(event.clone())
    }

    async fn list_in_range(&self, query: &EventRangeQuery) -> AppResult<Vec<ScheduleEvent>> {
        let mut listed: Vec<ScheduleEvent> = self
            .events
            .lock()
            .await
            .values()
            .filter(|event| event.window().overlaps_range(query.from, query.to))
            .filter(|event| {
                query
                    .employee_id
                    .is_none_or(|employee_id| event.employee_id() == employee_id)
            })
            .filter(|event| query.store_id.is_none_or(|store_id| event.store_id() == store_id))
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
        Ok(self
            .events
            .lock()
            .await
            .values()
            .filter(|event| event.employee_id() == employee_id)
            .filter(|event| exclude.is_none_or(|excluded| event.id() != excluded))
            .filter(|event| event.window().overlaps_range(starts_at, ends_at))
            .cloned()
            .collect())
    }
}

fn seeded_directory() -> FakeDirectory {
    let mut directory = FakeDirectory::default();
    directory.customers.insert(
        CustomerId::new(1),
        Customer::new(CustomerId::new(1), "Aksoy Gıda"),
    );
    directory.stores.insert(
        StoreId::new(10),
        Store::new(StoreId::new(10), CustomerId::new(1), "Kadıköy Şube"),
    );
    directory.employees.insert(
        EmployeeId::new(3),
        Employee::new(EmployeeId::new(3), "Murat Kaya", "murat@sahaops.dev", "x"),
    );
    directory.employees.insert(
        EmployeeId::new(4),
        Employee::new(EmployeeId::new(4), "Elif Çetin", "elif@sahaops.dev", "x"),
    );
    directory.admins.insert(
        AdminId::new(7),
        Admin::new(AdminId::new(7), "Seda Yılmaz", "seda@sahaops.dev", "x"),
    );
    directory
}

fn service() -> ScheduleService {
    ScheduleService::new(
        Arc::new(FakeEventRepository::default()),
        Arc::new(seeded_directory()),
    )
}

fn admin() -> ActorIdentity {
    ActorIdentity::new(7, ActorRole::Admin, None)
}

fn employee() -> ActorIdentity {
    ActorIdentity::new(3, ActorRole::Employee, None)
}

fn at(hour: u32, minute: u32) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 1, 6, hour, minute, 0)
        .single()
        .ok_or_else(|| AppError::Internal("invalid test instant".to_owned()))
}

fn visit(starts: DateTime<Utc>, ends: DateTime<Utc>) -> NewEventInput {
    NewEventInput {
        title: "İlaçlama ziyareti".to_owned(),
        notes: None,
        employee_id: EmployeeId::new(3),
        store_id: StoreId::new(10),
        starts_at: starts,
        ends_at: ends,
        status: None,
    }
}

#[tokio::test]
async fn creation_defaults_status_to_planned() -> AppResult<()> {
    let service = service();
    let event = service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;

    assert_eq!(event.status(), EventStatus::Planned);
    assert_eq!(event.planned_by().role(), ActorRole::Admin);
    Ok(())
}

#[tokio::test]
async fn overlapping_booking_fails_with_conflict() -> AppResult<()> {
    let service = service();
    service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;

    let overlapping = service
        .create_event(visit(at(9, 15)?, at(9, 45)?), &admin())
        .await;
    assert!(matches!(overlapping, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn back_to_back_bookings_are_allowed() -> AppResult<()> {
    let service = service();
    service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;
    // Touching at 09:30 is not an overlap under half-open semantics.
    service
        .create_event(visit(at(9, 30)?, at(10, 0)?), &admin())
        .await?;
    Ok(())
}

#[tokio::test]
async fn overlap_is_scoped_to_one_employee() -> AppResult<()> {
    let service = service();
    service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;

    let mut other = visit(at(9, 0)?, at(9, 30)?);
    other.employee_id = EmployeeId::new(4);
    service.create_event(other, &admin()).await?;
    Ok(())
}

#[tokio::test]
async fn off_grid_minutes_fail_validation() -> AppResult<()> {
    let service = service();
    for minute in [7, 22, 44] {
        let rejected = service
            .create_event(visit(at(9, minute)?, at(11, 0)?), &admin())
            .await;
        assert!(matches!(rejected, Err(AppError::Validation(_))));
    }

    // The grid accepts every quarter-hour minute, independent of hour.
    for (start, end) in [
        ((6, 0), (6, 15)),
        ((9, 15), (9, 30)),
        ((13, 30), (13, 45)),
        ((22, 45), (23, 0)),
    ] {
        service
            .create_event(visit(at(start.0, start.1)?, at(end.0, end.1)?), &admin())
            .await?;
    }
    Ok(())
}

#[tokio::test]
async fn inverted_window_fails_validation() -> AppResult<()> {
    let service = service();
    let rejected = service
        .create_event(visit(at(10, 0)?, at(9, 0)?), &admin())
        .await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn only_admins_may_create_events() -> AppResult<()> {
    let service = service();
    let rejected = service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &employee())
        .await;
    assert!(matches!(rejected, Err(AppError::Forbidden(_))));
    Ok(())
}

#[tokio::test]
async fn missing_references_fail_not_found() -> AppResult<()> {
    let service = service();

    let mut unknown_employee = visit(at(9, 0)?, at(9, 30)?);
    unknown_employee.employee_id = EmployeeId::new(99);
    let result = service.create_event(unknown_employee, &admin()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let mut unknown_store = visit(at(9, 0)?, at(9, 30)?);
    unknown_store.store_id = StoreId::new(99);
    let result = service.create_event(unknown_store, &admin()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn employees_may_only_patch_the_status() -> AppResult<()> {
    let service = service();
    let event = service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;

    let rejected = service
        .update_event(
            event.id(),
            EventPatch {
                title: Some("x".to_owned()),
                ..EventPatch::default()
            },
            &employee(),
        )
        .await;
    assert!(matches!(rejected, Err(AppError::Forbidden(_))));

    let empty = service
        .update_event(event.id(), EventPatch::default(), &employee())
        .await;
    assert!(matches!(empty, Err(AppError::Validation(_))));

    let updated = service
        .update_event(
            event.id(),
            EventPatch {
                status: Some(EventStatus::Completed),
                ..EventPatch::default()
            },
            &employee(),
        )
        .await?;
    assert_eq!(updated.status(), EventStatus::Completed);
    assert_eq!(updated.title().as_str(), "İlaçlama ziyareti");
    Ok(())
}

#[tokio::test]
async fn customers_may_not_modify_events() -> AppResult<()> {
    let service = service();
    let event = service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;

    let rejected = service
        .update_event(
            event.id(),
            EventPatch {
                status: Some(EventStatus::Cancelled),
                ..EventPatch::default()
            },
            &ActorIdentity::new(40, ActorRole::Customer, None),
        )
        .await;
    assert!(matches!(rejected, Err(AppError::Forbidden(_))));
    Ok(())
}

#[tokio::test]
async fn admin_patch_revalidates_the_merged_window() -> AppResult<()> {
    let service = service();
    let event = service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;

    // Off-grid replacement start.
    let off_grid = service
        .update_event(
            event.id(),
            EventPatch {
                starts_at: Some(at(9, 5)?),
                ..EventPatch::default()
            },
            &admin(),
        )
        .await;
    assert!(matches!(off_grid, Err(AppError::Validation(_))));

    // Replacement start after the retained end.
    let inverted = service
        .update_event(
            event.id(),
            EventPatch {
                starts_at: Some(at(10, 0)?),
                ..EventPatch::default()
            },
            &admin(),
        )
        .await;
    assert!(matches!(inverted, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn admin_patch_rechecks_conflicts_excluding_itself() -> AppResult<()> {
    let service = service();
    let first = service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;
    service
        .create_event(visit(at(10, 0)?, at(10, 30)?), &admin())
        .await?;

    // Sliding the first event onto the second conflicts.
    let conflicted = service
        .update_event(
            first.id(),
            EventPatch {
                starts_at: Some(at(10, 15)?),
                ends_at: Some(at(10, 45)?),
                ..EventPatch::default()
            },
            &admin(),
        )
        .await;
    assert!(matches!(conflicted, Err(AppError::Conflict(_))));

    // Patching only the title keeps the window; the event does not
    // conflict with itself.
    let retitled = service
        .update_event(
            first.id(),
            EventPatch {
                title: Some("Takip ziyareti".to_owned()),
                ..EventPatch::default()
            },
            &admin(),
        )
        .await?;
    assert_eq!(retitled.title().as_str(), "Takip ziyareti");

    // Moving to a free slot succeeds.
    let moved = service
        .update_event(
            first.id(),
            EventPatch {
                starts_at: Some(at(11, 0)?),
                ends_at: Some(at(11, 30)?),
                ..EventPatch::default()
            },
            &admin(),
        )
        .await?;
    assert_eq!(moved.starts_at(), at(11, 0)?);
    Ok(())
}

#[tokio::test]
async fn updating_unknown_event_fails_not_found() -> AppResult<()> {
    let service = service();
    let result = service
        .update_event(
            EventId::new(999),
            EventPatch {
                status: Some(EventStatus::Completed),
                ..EventPatch::default()
            },
            &admin(),
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn query_rejects_an_empty_range() -> AppResult<()> {
    let service = service();
    let result = service
        .query_events(EventRangeQuery {
            from: at(10, 0)?,
            to: at(10, 0)?,
            employee_id: None,
            store_id: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn query_filters_and_orders_by_start() -> AppResult<()> {
    let service = service();
    service
        .create_event(visit(at(11, 0)?, at(11, 30)?), &admin())
        .await?;
    service
        .create_event(visit(at(9, 0)?, at(9, 30)?), &admin())
        .await?;
    let mut other = visit(at(9, 0)?, at(9, 30)?);
    other.employee_id = EmployeeId::new(4);
    service.create_event(other, &admin()).await?;

    let all = service
        .query_events(EventRangeQuery {
            from: at(8, 0)?,
            to: at(12, 0)?,
            employee_id: None,
            store_id: None,
        })
        .await?;
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|pair| pair[0].starts_at() <= pair[1].starts_at()));

    let one_employee = service
        .query_events(EventRangeQuery {
            from: at(8, 0)?,
            to: at(12, 0)?,
            employee_id: Some(EmployeeId::new(3)),
            store_id: None,
        })
        .await?;
    assert_eq!(one_employee.len(), 2);

    // A range touching only the 11:00 visit.
    let late = service
        .query_events(EventRangeQuery {
            from: at(10, 0)?,
            to: at(12, 0)?,
            employee_id: None,
            store_id: None,
        })
        .await?;
    assert_eq!(late.len(), 1);
    Ok(())
}

#[tokio::test]
async fn planner_name_falls_back_through_directory_records() -> AppResult<()> {
    let service = service();

    // Actor-supplied display name wins.
    let named = service
        .create_event(
            visit(at(9, 0)?, at(9, 30)?),
            &ActorIdentity::new(7, ActorRole::Admin, Some("Vardiya Amiri".to_owned())),
        )
        .await?;
    assert_eq!(named.planned_by().name(), Some("Vardiya Amiri"));

    // Without one, the admin record matching the actor id is used.
    let from_record = service
        .create_event(visit(at(10, 0)?, at(10, 30)?), &admin())
        .await?;
    assert_eq!(from_record.planned_by().name(), Some("Seda Yılmaz"));

    // With no resolvable record at all, the detail view labels by role+id.
    let anonymous = service
        .create_event(
            visit(at(11, 0)?, at(11, 30)?),
            &ActorIdentity::new(999, ActorRole::Admin, None),
        )
        .await?;
    let detail = service.get_event(anonymous.id()).await?;
    assert_eq!(detail.planner_name, "Admin #999");
    assert_eq!(detail.employee_name.as_deref(), Some("Murat Kaya"));
    assert!(detail.store.is_some());
    Ok(())
}

#[tokio::test]
async fn getting_unknown_event_fails_not_found() -> AppResult<()> {
    let service = service();
    let result = service.get_event(EventId::new(404)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}
