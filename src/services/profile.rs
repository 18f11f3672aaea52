use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::api::backend::EnrollmentBackend;
use crate::api::errors::BackendError;
use crate::core::cache::{keys, CacheStore};
use crate::domain::actor::ActorContext;
use crate::schemas::user::{UpdateUserRequest, UserDto, UserSuspensionUpdate};
use crate::services::access::{self, AccessError};

const PROFILE_HEADLINE: &str = "Failed to update profile";
const SUSPENSION_HEADLINE: &str = "Failed to update user suspension";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("{message}")]
    Rejected { message: String, source: BackendError },
}

/// Saves the signed-in user's own profile. Blank fields are left unchanged.
pub async fn update_profile(
    actor: &ActorContext,
    backend: &dyn EnrollmentBackend,
    cache: &dyn CacheStore,
    request: UpdateUserRequest,
) -> Result<UserDto, ProfileError> {
    let request = request.without_blanks();
    request.validate()?;

    match backend.update_me(&request).await {
        Ok(user) => {
            cache.invalidate(&keys::user(&actor.user_id)).await;
            tracing::info!(user_id = %actor.user_id, "Profile updated");
            Ok(user)
        }
        Err(source) => {
            tracing::warn!(user_id = %actor.user_id, error = %source, "Profile update rejected");
            let message = source.user_message(PROFILE_HEADLINE);
            Err(ProfileError::Rejected { message, source })
        }
    }
}

/// Flips the suspension of `target`; admins only, never on themselves.
pub async fn toggle_suspension(
    actor: &ActorContext,
    backend: &dyn EnrollmentBackend,
    cache: &dyn CacheStore,
    target: &UserDto,
) -> Result<UserDto, ProfileError> {
    access::require_suspension_control(actor, &target.id)?;
    let update = UserSuspensionUpdate { is_suspended: !target.suspended.unwrap_or(false) };

    match backend.set_user_suspended(&target.id, &update).await {
        Ok(user) => {
            cache.invalidate(&keys::user(&target.id)).await;
            tracing::info!(
                admin_id = %actor.user_id,
                user_id = %target.id,
                suspended = update.is_suspended,
                "User suspension changed"
            );
            Ok(user)
        }
        Err(source) => {
            tracing::warn!(user_id = %target.id, error = %source, "Suspension change rejected");
            let message = source.user_message(SUSPENSION_HEADLINE);
            Err(ProfileError::Rejected { message, source })
        }
    }
}
