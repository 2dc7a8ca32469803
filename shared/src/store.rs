use crate::error::ApiError;
use crate::types::{User, UserPatch};
use async_trait::async_trait;

/// Primitive operations against the table holding `User` records.
///
/// Implementations own uniqueness: `put_if_absent` and `update_if_exists`
/// must be atomic with respect to the existence check, so two concurrent
/// creates for one email can never both succeed.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Point lookup. `Ok(None)` means the key is not stored.
    async fn get(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Every record in the table, in store order.
    async fn scan(&self) -> Result<Vec<User>, ApiError>;

    /// Fails with `AlreadyExists` if the email is taken.
    async fn put_if_absent(&self, user: &User) -> Result<(), ApiError>;

    /// Fails with `NotFound` without writing if the email is absent.
    /// Returns the record as stored after the patch.
    async fn update_if_exists(&self, email: &str, patch: &UserPatch) -> Result<User, ApiError>;

    /// Idempotent; deleting an absent key succeeds.
    async fn delete(&self, email: &str) -> Result<(), ApiError>;
}
