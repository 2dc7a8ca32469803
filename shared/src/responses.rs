use crate::error::ApiError;
use crate::types::User;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

/// Successful result of one dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(User),
    Listed(Vec<User>),
    Created(User),
    Updated(User),
    Deleted,
}

/// Turn the result of an operation into the HTTP response.
pub fn respond(result: Result<Outcome, ApiError>) -> Result<Response<Body>, Error> {
    match result {
        Ok(Outcome::Found(user)) | Ok(Outcome::Updated(user)) => {
            json_response(StatusCode::OK, &user)
        }
        Ok(Outcome::Listed(users)) => json_response(StatusCode::OK, &users),
        Ok(Outcome::Created(user)) => json_response(StatusCode::CREATED, &user),
        Ok(Outcome::Deleted) => empty_response(StatusCode::OK),
        Err(err) => error_response(&err),
    }
}

/// JSON body with the CORS header every API response carries.
pub fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    payload: &T,
) -> Result<Response<Body>, Error> {
    let resp = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(payload)?.into())
        .map_err(Box::new)?;
    Ok(resp)
}

pub fn empty_response(status: StatusCode) -> Result<Response<Body>, Error> {
    let resp = Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Empty)
        .map_err(Box::new)?;
    Ok(resp)
}

/// `{"error": "..."}` with the status for the error kind. Store details are
/// logged here and never reach the body.
pub fn error_response(err: &ApiError) -> Result<Response<Body>, Error> {
    let status = err.status();
    match err {
        ApiError::StoreUnavailable { message, detail } => {
            tracing::error!("{} ({}): {}", message, status, detail)
        }
        ApiError::Decode(detail) | ApiError::Encode(detail) => {
            tracing::error!("{} ({}): {}", err, status, detail)
        }
        _ => tracing::warn!("Request rejected ({}): {}", status, err),
    }
    json_response(status, &serde_json::json!({ "error": err.to_string() }))
}

/// CORS preflight answer.
pub fn preflight_response() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type,Authorization")
        .body(Body::Empty)
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ERROR_COULD_NOT_PUT_ITEM;

    fn body_json(resp: &Response<Body>) -> serde_json::Value {
        match resp.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[test]
    fn created_is_201_with_the_user() {
        let user = User {
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        };
        let resp = respond(Ok(Outcome::Created(user))).unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(&resp),
            serde_json::json!({"email": "a@b.com", "firstName": "A", "lastName": "B"})
        );
    }

    #[test]
    fn empty_listing_is_an_empty_array() {
        let resp = respond(Ok(Outcome::Listed(Vec::new()))).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(&resp), serde_json::json!([]));
    }

    #[test]
    fn json_response_sets_headers() {
        let resp = json_response(StatusCode::CREATED, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(body_json(&resp), serde_json::json!({"a": 1}));
    }

    #[test]
    fn empty_response_has_no_body() {
        let resp = empty_response(StatusCode::OK).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(matches!(resp.body(), Body::Empty));
    }

    #[test]
    fn error_response_hides_store_detail() {
        let err = ApiError::store(ERROR_COULD_NOT_PUT_ITEM, "ProvisionedThroughputExceeded");
        let resp = error_response(&err).unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(&resp),
            serde_json::json!({"error": "Could not put item"})
        );
    }

    #[test]
    fn method_not_allowed_is_405() {
        let resp = error_response(&ApiError::MethodNotAllowed).unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(&resp),
            serde_json::json!({"error": "method not allowed"})
        );
    }
}
