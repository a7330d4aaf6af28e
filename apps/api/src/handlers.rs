use sahaops_core::{ActorIdentity, ActorRole, AppError};

pub mod access;
pub mod health;
pub mod schedule;

/// Grant administration is a back-office concern; access owners only see
/// their own resolved stores.
pub(crate) fn require_staff(actor: &ActorIdentity) -> Result<(), AppError> {
    match actor.role() {
        ActorRole::Admin | ActorRole::Employee => Ok(()),
        ActorRole::Customer => Err(AppError::Forbidden(
            "this operation requires an admin or employee account".to_owned(),
        )),
    }
}
