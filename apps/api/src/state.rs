use std::sync::Arc;

use sahaops_application::{
    AccessGrantService, DirectoryRepository, PasswordHasher, ScheduleService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_grant_service: AccessGrantService,
    pub schedule_service: ScheduleService,
    pub directory_repository: Arc<dyn DirectoryRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub frontend_url: String,
}
