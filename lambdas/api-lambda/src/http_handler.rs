use lambda_http::{http::Method, Body, Error, Request, RequestExt, Response};
use std::sync::Arc;
use user_api_shared::handlers::{self, ApiRequest};
use user_api_shared::{responses, AppState};

/// Main Lambda handler - maps the API Gateway event onto the user dispatcher
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!(
        "User API invoked - Method: {} Path: {} Table: {}",
        method,
        path,
        state.config.table_name
    );

    // Handle CORS preflight
    if *method == Method::OPTIONS {
        return responses::preflight_response();
    }

    let query = event.query_string_parameters_ref();
    let body: &[u8] = event.body();

    let request = ApiRequest {
        method,
        email: query.and_then(|params| params.first("email")),
        body,
    };

    handlers::dispatch(state.store.as_ref(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::StatusCode;
    use std::collections::HashMap;
    use user_api_shared::config::Config;
    use user_api_shared::memory::MemoryUserStore;

    fn state() -> Arc<AppState> {
        AppState::new(
            Config {
                table_name: "users-test".to_string(),
                region: None,
                endpoint_url: None,
            },
            Box::new(MemoryUserStore::new()),
        )
    }

    fn request(method: &str, email: Option<&str>, body: &str) -> Request {
        let req = lambda_http::http::Request::builder()
            .method(method)
            .uri("/users")
            .body(Body::from(body.to_string()))
            .unwrap();
        match email {
            Some(email) => req.with_query_string_parameters(HashMap::from([(
                "email".to_string(),
                email.to_string(),
            )])),
            None => req,
        }
    }

    fn body_json(resp: &Response<Body>) -> serde_json::Value {
        match resp.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn preflight_is_answered_without_touching_the_store() {
        let resp = function_handler(request("OPTIONS", None, ""), state())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .headers()
            .contains_key("Access-Control-Allow-Methods"));
    }

    #[tokio::test]
    async fn email_query_parameter_reaches_the_dispatcher() {
        let state = state();
        let created = function_handler(
            request(
                "POST",
                None,
                r#"{"email":"ada@example.com","firstName":"Ada","lastName":"Lovelace"}"#,
            ),
            Arc::clone(&state),
        )
        .await
        .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let updated = function_handler(
            request("PUT", Some("ada@example.com"), r#"{"lastName":"King"}"#),
            Arc::clone(&state),
        )
        .await
        .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(body_json(&updated)["lastName"], "King");
        assert_eq!(body_json(&updated)["firstName"], "Ada");

        let fetched = function_handler(request("GET", Some("ada@example.com"), ""), state)
            .await
            .unwrap();
        assert_eq!(body_json(&fetched)["lastName"], "King");
    }

    #[tokio::test]
    async fn patch_is_not_a_supported_method() {
        let resp = function_handler(
            request("PATCH", Some("ada@example.com"), r#"{"firstName":"X"}"#),
            state(),
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
