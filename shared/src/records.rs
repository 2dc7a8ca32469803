use crate::error::ApiError;
use crate::types::{User, UserPatch};
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

pub const ATTR_EMAIL: &str = "email";
pub const ATTR_FIRST_NAME: &str = "firstName";
pub const ATTR_LAST_NAME: &str = "lastName";

/// DynamoDB rejects items larger than 400 KB (attribute names + values).
pub const MAX_ITEM_BYTES: usize = 400 * 1024;

pub type Item = HashMap<String, AttributeValue>;

/// Bytes DynamoDB charges for the given attributes (names + string values).
fn attrs_size<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> usize {
    attrs
        .into_iter()
        .map(|(name, value)| name.len() + value.len())
        .sum()
}

fn ensure_within_limit(email: &str, size: usize) -> Result<(), ApiError> {
    if size > MAX_ITEM_BYTES {
        return Err(ApiError::Encode(format!(
            "item for {} is {} bytes, limit is {}",
            email, size, MAX_ITEM_BYTES
        )));
    }
    Ok(())
}

/// Rejects a patch that cannot fit in an item on its own, before any write.
pub fn check_patch_size(email: &str, patch: &UserPatch) -> Result<(), ApiError> {
    let size = attrs_size(
        [
            (ATTR_EMAIL, Some(email)),
            (ATTR_FIRST_NAME, patch.first_name.as_deref()),
            (ATTR_LAST_NAME, patch.last_name.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v))),
    );
    ensure_within_limit(email, size)
}

pub fn user_to_item(user: &User) -> Result<Item, ApiError> {
    ensure_within_limit(
        &user.email,
        attrs_size([
            (ATTR_EMAIL, user.email.as_str()),
            (ATTR_FIRST_NAME, user.first_name.as_str()),
            (ATTR_LAST_NAME, user.last_name.as_str()),
        ]),
    )?;

    Ok(HashMap::from([
        (ATTR_EMAIL.to_string(), AttributeValue::S(user.email.clone())),
        (
            ATTR_FIRST_NAME.to_string(),
            AttributeValue::S(user.first_name.clone()),
        ),
        (
            ATTR_LAST_NAME.to_string(),
            AttributeValue::S(user.last_name.clone()),
        ),
    ]))
}

pub fn item_to_user(item: &Item) -> Result<User, ApiError> {
    Ok(User {
        email: string_attr(item, ATTR_EMAIL)?,
        first_name: string_attr(item, ATTR_FIRST_NAME)?,
        last_name: string_attr(item, ATTR_LAST_NAME)?,
    })
}

fn string_attr(item: &Item, name: &str) -> Result<String, ApiError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(other) => Err(ApiError::Decode(format!(
            "attribute {} is not a string: {:?}",
            name, other
        ))),
        None => Err(ApiError::Decode(format!("missing attribute {}", name))),
    }
}
