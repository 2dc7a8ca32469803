use crate::error::{ApiError, ERROR_INVALID_EMAIL};
use crate::records::check_patch_size;
use crate::store::UserStore;
use crate::types::{User, UserPatch};
use crate::validators::is_email_valid;

/// Get one user. `Ok(None)` when nothing is stored under `email`.
pub async fn fetch_user(store: &dyn UserStore, email: &str) -> Result<Option<User>, ApiError> {
    store.get(email).await
}

/// Get every user in the table. Unbounded: the whole table comes back in one result.
pub async fn fetch_users(store: &dyn UserStore) -> Result<Vec<User>, ApiError> {
    store.scan().await
}

/// Create a user; the email must be valid and not already taken.
pub async fn create_user(store: &dyn UserStore, user: User) -> Result<User, ApiError> {
    if !is_email_valid(&user.email) {
        tracing::warn!("Rejected create for invalid email {:?}", user.email);
        return Err(ApiError::InvalidInput(ERROR_INVALID_EMAIL));
    }

    store.put_if_absent(&user).await?;
    tracing::info!("Created user {}", user.email);
    Ok(user)
}

/// Update first/last name of an existing user (email is immutable)
pub async fn update_user(
    store: &dyn UserStore,
    email: &str,
    patch: UserPatch,
) -> Result<User, ApiError> {
    check_patch_size(email, &patch)?;
    let user = store.update_if_exists(email, &patch).await?;
    tracing::info!("Updated user {}", email);
    Ok(user)
}

pub async fn delete_user(store: &dyn UserStore, email: &str) -> Result<(), ApiError> {
    store.delete(email).await?;
    tracing::info!("Deleted user {}", email);
    Ok(())
}
