use crate::error::{ApiError, ERROR_INVALID_USER_DATA, ERROR_MISSING_EMAIL};
use crate::responses::{respond, Outcome};
use crate::store::UserStore;
use crate::types::{User, UserPatch};
use crate::users;
use lambda_http::{http::Method, Body, Error, Response};
use serde::de::DeserializeOwned;

/// The four operations a request can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Operation::Read),
            Method::POST => Some(Operation::Create),
            Method::PUT => Some(Operation::Update),
            Method::DELETE => Some(Operation::Delete),
            _ => None,
        }
    }
}

/// Transport-neutral view of an inbound request.
#[derive(Debug, Clone, Copy)]
pub struct ApiRequest<'a> {
    pub method: &'a Method,
    pub email: Option<&'a str>,
    pub body: &'a [u8],
}

/// Run one request against the store and format the response.
pub async fn dispatch(store: &dyn UserStore, req: ApiRequest<'_>) -> Result<Response<Body>, Error> {
    let result = match Operation::from_method(req.method) {
        Some(op) => execute(store, op, &req).await,
        None => Err(ApiError::MethodNotAllowed),
    };
    respond(result)
}

async fn execute(
    store: &dyn UserStore,
    op: Operation,
    req: &ApiRequest<'_>,
) -> Result<Outcome, ApiError> {
    match op {
        Operation::Read => match key(req) {
            Some(email) => users::fetch_user(store, email)
                .await?
                .map(Outcome::Found)
                .ok_or(ApiError::NotFound),
            None => users::fetch_users(store).await.map(Outcome::Listed),
        },
        Operation::Create => {
            let user: User = decode_body(req.body)?;
            users::create_user(store, user).await.map(Outcome::Created)
        }
        Operation::Update => {
            let email = key(req).ok_or(ApiError::InvalidInput(ERROR_MISSING_EMAIL))?;
            let patch: UserPatch = decode_body(req.body)?;
            users::update_user(store, email, patch)
                .await
                .map(Outcome::Updated)
        }
        Operation::Delete => {
            let email = key(req).ok_or(ApiError::InvalidInput(ERROR_MISSING_EMAIL))?;
            users::delete_user(store, email).await.map(|_| Outcome::Deleted)
        }
    }
}

/// The `email` query parameter; an empty value counts as absent.
fn key<'a>(req: &ApiRequest<'a>) -> Option<&'a str> {
    req.email.filter(|email| !email.is_empty())
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Invalid request body: {}", e);
        ApiError::InvalidInput(ERROR_INVALID_USER_DATA)
    })
}
