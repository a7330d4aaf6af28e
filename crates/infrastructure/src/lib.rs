//! Persistence adapters and supporting infrastructure.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_access_grant_repository;
mod in_memory_directory_repository;
mod in_memory_schedule_event_repository;
mod postgres_access_grant_repository;
mod postgres_directory_repository;
mod postgres_schedule_event_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_access_grant_repository::InMemoryAccessGrantRepository;
pub use in_memory_directory_repository::InMemoryDirectoryRepository;
pub use in_memory_schedule_event_repository::InMemoryScheduleEventRepository;
pub use postgres_access_grant_repository::PostgresAccessGrantRepository;
pub use postgres_directory_repository::PostgresDirectoryRepository;
pub use postgres_schedule_event_repository::PostgresScheduleEventRepository;
