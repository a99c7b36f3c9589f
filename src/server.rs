use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::{
    classifier::{Classification, classify},
    config::AppConfig,
    error::{RequestError, ServiceError},
    identity::Identity,
};

pub const BFHL_ROUTE: &str = "/bfhl";

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<Identity>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BfhlResponse {
    pub is_success: bool,
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(flatten)]
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BfhlResponse {
    pub fn from_outcome(identity: &Identity, outcome: Result<Classification, RequestError>) -> Self {
        match outcome {
            Ok(classification) => Self {
                is_success: true,
                identity: identity.clone(),
                classification,
                message: None,
                error: None,
            },
            Err(err) => {
                let detail = match &err {
                    RequestError::InvalidPayload => None,
                    RequestError::Unexpected(source) => Some(source.to_string()),
                };
                Self {
                    is_success: false,
                    identity: identity.clone(),
                    classification: Classification::default(),
                    message: Some(err.to_string()),
                    error: detail,
                }
            }
        }
    }
}

pub fn build_router(config: Arc<AppConfig>) -> Router {
    let state = AppState {
        identity: Arc::new(Identity::from_config(&config.identity)),
    };

    Router::new()
        .route("/", get(status))
        .route(BFHL_ROUTE, post(bfhl))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        route: BFHL_ROUTE,
    })
}

// Takes raw bytes so that a missing or wrong Content-Type still gets parsed
// and a malformed or unreadable body is reported in the response instead of
// as a rejection.
async fn bfhl(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<BfhlResponse> {
    let outcome = body
        .map_err(RequestError::from)
        .and_then(|bytes| process_payload(&bytes));

    match &outcome {
        Ok(result) => info!(
            odd = result.odd_numbers.len(),
            even = result.even_numbers.len(),
            alphabets = result.alphabets.len(),
            special = result.special_characters.len(),
            sum = %result.sum,
            "classified payload"
        ),
        Err(RequestError::InvalidPayload) => debug!("rejected payload without a data array"),
        Err(RequestError::Unexpected(err)) => warn!(error = %err, "failed to process payload"),
    }

    Json(BfhlResponse::from_outcome(&state.identity, outcome))
}

/// Parses a `/bfhl` body and classifies its `data` array.
pub fn process_payload(body: &[u8]) -> Result<Classification, RequestError> {
    let payload: Value = serde_json::from_slice(body)?;

    let object = match payload {
        Value::Object(object) => object,
        other => return Err(ServiceError::NotAnObject(json_type_name(&other)).into()),
    };

    match object.get("data") {
        Some(Value::Array(items)) => Ok(classify(items)),
        _ => Err(RequestError::InvalidPayload),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::config::IdentityConfig;

    fn test_app() -> Router {
        let config = AppConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            identity: IdentityConfig::default(),
        };
        build_router(Arc::new(config))
    }

    async fn post_bfhl(body: impl Into<Body>) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/bfhl")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_empty_classification(json: &Value) {
        assert_eq!(json["odd_numbers"], json!([]));
        assert_eq!(json["even_numbers"], json!([]));
        assert_eq!(json["alphabets"], json!([]));
        assert_eq!(json["special_characters"], json!([]));
        assert_eq!(json["sum"], "0");
        assert_eq!(json["concat_string"], "");
    }

    #[tokio::test]
    async fn root_reports_status() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, json!({"status": "ok", "route": "/bfhl"}));
    }

    #[tokio::test]
    async fn valid_payload_is_classified() {
        let (status, json) = post_bfhl(r#"{"data": ["a","1","334","4","R","$"]}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "is_success": true,
                "user_id": "john_doe_17091999",
                "email": "john@xyz.com",
                "roll_number": "ABCD123",
                "odd_numbers": ["1"],
                "even_numbers": ["334", "4"],
                "alphabets": ["A", "R"],
                "special_characters": ["$"],
                "sum": "339",
                "concat_string": "Ra",
            })
        );
    }

    #[rstest]
    #[case(r#"{"data": "not-an-array"}"#)]
    #[case(r#"{"data": {"a": 1}}"#)]
    #[case(r#"{"data": null}"#)]
    #[case(r#"{}"#)]
    #[tokio::test]
    async fn non_array_data_is_invalid(#[case] body: &'static str) {
        let (status, json) = post_bfhl(body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_success"], false);
        assert_eq!(json["message"], r#"Invalid payload: "data" should be an array"#);
        assert!(json.get("error").is_none());
        assert_eq!(json["user_id"], "john_doe_17091999");
        assert_empty_classification(&json);
    }

    #[rstest]
    #[case("{not json")]
    #[case("")]
    #[case(r#"["a", "b"]"#)]
    #[tokio::test]
    async fn unparsable_body_is_unexpected(#[case] body: &'static str) {
        let (status, json) = post_bfhl(body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_success"], false);
        assert_eq!(json["message"], "Unexpected error");
        assert!(!json["error"].as_str().unwrap().is_empty());
        assert_eq!(json["email"], "john@xyz.com");
        assert_empty_classification(&json);
    }

    #[tokio::test]
    async fn big_integers_are_summed_exactly() {
        let huge = "1".repeat(40);
        let body = json!({ "data": [&huge, "2"] }).to_string();
        let (status, json) = post_bfhl(body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_success"], true);
        assert_eq!(json["odd_numbers"], json!([huge]));
        assert_eq!(json["sum"], format!("{}3", "1".repeat(39)));
    }

    #[tokio::test]
    async fn integer_literals_wider_than_u64_keep_their_digits() {
        let (status, json) = post_bfhl(r#"{"data": [12345678901234567890123, 4]}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["odd_numbers"], json!(["12345678901234567890123"]));
        assert_eq!(json["even_numbers"], json!(["4"]));
        assert_eq!(json["sum"], "12345678901234567890127");
        assert_eq!(json["concat_string"], "");
    }

    #[tokio::test]
    async fn null_and_booleans_render_as_words() {
        let (_, json) = post_bfhl(r#"{"data": [null, true]}"#).await;

        assert_eq!(json["alphabets"], json!(["NONE", "TRUE"]));
        assert_eq!(json["concat_string"], "EuRtEnOn");
    }

    #[tokio::test]
    async fn bodies_over_the_default_limit_are_still_processed() {
        // axum rejects anything over 2 MiB unless the limit is lifted
        let items = vec!["a"; 800_000];
        let body = json!({ "data": items }).to_string();
        assert!(body.len() > 3 * 1024 * 1024);

        let (status, json) = post_bfhl(body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["is_success"], true);
        assert_eq!(json["alphabets"].as_array().unwrap().len(), 800_000);
    }

    #[tokio::test]
    async fn missing_content_type_is_still_parsed() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/bfhl")
                    .body(Body::from(r#"{"data": ["-5", "-6"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["is_success"], true);
        assert_eq!(json["odd_numbers"], json!(["-5"]));
        assert_eq!(json["even_numbers"], json!(["-6"]));
        assert_eq!(json["sum"], "-11");
    }

    #[tokio::test]
    async fn get_on_bfhl_is_not_allowed() {
        let response = test_app()
            .oneshot(Request::builder().uri("/bfhl").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn identity_comes_from_router_config() {
        let identity = Identity::from_config(&IdentityConfig {
            full_name: "Grace Hopper".to_string(),
            dob_ddmmyyyy: "09121906".to_string(),
            email: "grace@navy.mil".to_string(),
            roll_number: "GH1906".to_string(),
        });
        let response = BfhlResponse::from_outcome(&identity, Err(RequestError::InvalidPayload));
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["user_id"], "grace_hopper_09121906");
        assert_eq!(json["email"], "grace@navy.mil");
        assert_eq!(json["roll_number"], "GH1906");
    }
}
