use crate::error::{
    ApiError, ERROR_COULD_NOT_DELETE_ITEM, ERROR_COULD_NOT_PUT_ITEM, ERROR_FAILED_TO_FETCH_RECORD,
};
use crate::records::user_to_item;
use crate::store::UserStore;
use crate::types::{User, UserPatch};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-process `UserStore` keyed by email, compiled for tests and the
/// `test-util` feature. Conditional writes happen under one write lock, so it
/// gives the same create-once guarantee as the DynamoDB condition expressions.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<String, User>>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, message: &'static str) -> Result<(), ApiError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ApiError::store(message, "memory store marked unavailable"));
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, email: &str) -> Result<Option<User>, ApiError> {
        self.check_available(ERROR_FAILED_TO_FETCH_RECORD)?;
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn scan(&self) -> Result<Vec<User>, ApiError> {
        self.check_available(ERROR_FAILED_TO_FETCH_RECORD)?;
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn put_if_absent(&self, user: &User) -> Result<(), ApiError> {
        self.check_available(ERROR_COULD_NOT_PUT_ITEM)?;
        // Same size limit the table enforces.
        user_to_item(user)?;

        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(ApiError::AlreadyExists);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn update_if_exists(&self, email: &str, patch: &UserPatch) -> Result<User, ApiError> {
        self.check_available(ERROR_COULD_NOT_PUT_ITEM)?;

        let mut users = self.users.write().await;
        let user = users.get_mut(email).ok_or(ApiError::NotFound)?;

        let mut patched = user.clone();
        patch.apply(&mut patched);
        user_to_item(&patched)?;

        *user = patched.clone();
        Ok(patched)
    }

    async fn delete(&self, email: &str) -> Result<(), ApiError> {
        self.check_available(ERROR_COULD_NOT_DELETE_ITEM)?;
        self.users.write().await.remove(email);
        Ok(())
    }
}
