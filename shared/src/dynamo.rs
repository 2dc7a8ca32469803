use crate::error::{
    ApiError, ERROR_COULD_NOT_DELETE_ITEM, ERROR_COULD_NOT_PUT_ITEM, ERROR_FAILED_TO_FETCH_RECORD,
};
use crate::records::{
    check_patch_size, item_to_user, user_to_item, Item, ATTR_EMAIL, ATTR_FIRST_NAME,
    ATTR_LAST_NAME,
};
use crate::store::UserStore;
use crate::types::{User, UserPatch};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoClient;

/// `UserStore` over a DynamoDB table whose partition key is the string
/// attribute `email`. Failures carry the SDK error context in their detail;
/// logging happens where the error is turned into a response.
pub struct DynamoUserStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoUserStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn key(email: &str) -> AttributeValue {
    AttributeValue::S(email.to_string())
}

/// DynamoDB reports an oversized item as a plain ValidationException.
fn is_item_too_large<E: ProvideErrorMetadata>(err: Option<&E>) -> bool {
    err.is_some_and(|e| {
        e.code() == Some("ValidationException")
            && e.message().is_some_and(|m| m.contains("size"))
    })
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn get(&self, email: &str) -> Result<Option<User>, ApiError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_EMAIL, key(email))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                ApiError::store(
                    ERROR_FAILED_TO_FETCH_RECORD,
                    format!("get_item {}: {}", email, DisplayErrorContext(&e)),
                )
            })?;

        result.item().map(item_to_user).transpose()
    }

    async fn scan(&self) -> Result<Vec<User>, ApiError> {
        let mut users = Vec::new();
        let mut start_key: Option<Item> = None;

        // A single Scan call stops at 1 MB; keep going until the table is exhausted.
        loop {
            let resp = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| {
                    ApiError::store(
                        ERROR_FAILED_TO_FETCH_RECORD,
                        format!("scan {}: {}", self.table_name, DisplayErrorContext(&e)),
                    )
                })?;

            for item in resp.items() {
                users.push(item_to_user(item)?);
            }

            match resp.last_evaluated_key {
                Some(last) if !last.is_empty() => start_key = Some(last),
                _ => break,
            }
        }

        tracing::info!("Scanned {} users from {}", users.len(), self.table_name);
        Ok(users)
    }

    async fn put_if_absent(&self, user: &User) -> Result<(), ApiError> {
        let item = user_to_item(user)?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#email)")
            .expression_attribute_names("#email", ATTR_EMAIL)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                Err(ApiError::AlreadyExists)
            }
            Err(e) if is_item_too_large(e.as_service_error()) => Err(ApiError::Encode(format!(
                "put_item {}: {}",
                user.email,
                DisplayErrorContext(&e)
            ))),
            Err(e) => Err(ApiError::store(
                ERROR_COULD_NOT_PUT_ITEM,
                format!("put_item {}: {}", user.email, DisplayErrorContext(&e)),
            )),
        }
    }

    async fn update_if_exists(&self, email: &str, patch: &UserPatch) -> Result<User, ApiError> {
        if patch.is_empty() {
            return self.get(email).await?.ok_or(ApiError::NotFound);
        }
        check_patch_size(email, patch)?;

        let mut sets = Vec::new();
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ATTR_EMAIL, key(email))
            .condition_expression("attribute_exists(#email)")
            .expression_attribute_names("#email", ATTR_EMAIL)
            .return_values(ReturnValue::AllNew);

        if let Some(first_name) = &patch.first_name {
            sets.push("#fn = :fn");
            request = request
                .expression_attribute_names("#fn", ATTR_FIRST_NAME)
                .expression_attribute_values(":fn", AttributeValue::S(first_name.clone()));
        }

        if let Some(last_name) = &patch.last_name {
            sets.push("#ln = :ln");
            request = request
                .expression_attribute_names("#ln", ATTR_LAST_NAME)
                .expression_attribute_values(":ln", AttributeValue::S(last_name.clone()));
        }

        let result = request
            .update_expression(format!("SET {}", sets.join(", ")))
            .send()
            .await;

        match result {
            Ok(output) => match output.attributes() {
                Some(item) => item_to_user(item),
                None => Err(ApiError::Decode(format!(
                    "update_item for {} returned no attributes",
                    email
                ))),
            },
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                Err(ApiError::NotFound)
            }
            // The stored record plus the patch is over the item limit.
            Err(e) if is_item_too_large(e.as_service_error()) => Err(ApiError::Encode(format!(
                "update_item {}: {}",
                email,
                DisplayErrorContext(&e)
            ))),
            Err(e) => Err(ApiError::store(
                ERROR_COULD_NOT_PUT_ITEM,
                format!("update_item {}: {}", email, DisplayErrorContext(&e)),
            )),
        }
    }

    async fn delete(&self, email: &str) -> Result<(), ApiError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_EMAIL, key(email))
            .send()
            .await
            .map_err(|e| {
                ApiError::store(
                    ERROR_COULD_NOT_DELETE_ITEM,
                    format!("delete_item {}: {}", email, DisplayErrorContext(&e)),
                )
            })?;

        Ok(())
    }
}
