//! JSON body extractor for mutating endpoints.
//!
//! The `_csrf_token` field is checked before anything else about the request
//! is looked at. A missing, empty or unparseable body counts as a body
//! without a token, so it is always answered with 403.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use deployment::Deployment;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use services::services::{command::REQUIRED_FIELDS_MESSAGE, csrf::COMMAND_FORM_SCOPE};
use tracing::{debug, warn};

use crate::{DeploymentImpl, error::ApiError};

pub const TOKEN_FIELD: &str = "_csrf_token";

/// Request payload `T` that carried a valid token for the command form.
#[derive(Debug)]
pub struct CsrfForm<T>(pub T);

impl<T> FromRequest<DeploymentImpl> for CsrfForm<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &DeploymentImpl) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.unwrap_or_default();
        let mut fields = parse_object(&body);

        let token = fields.remove(TOKEN_FIELD);
        let token = token.as_ref().and_then(Value::as_str).unwrap_or_default();
        if !state.csrf().is_token_valid(COMMAND_FORM_SCOPE, token) {
            warn!(token_present = !token.is_empty(), "Rejected request with invalid csrf token");
            return Err(ApiError::Forbidden);
        }

        serde_json::from_value(Value::Object(fields))
            .map(CsrfForm)
            .map_err(|e| {
                debug!(error = %e, "Rejected malformed command payload");
                ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
            })
    }
}

fn parse_object(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_object_bodies_parse_as_empty() {
        for body in [&b""[..], b"null", b"[1,2]", b"\"text\"", b"{not json"] {
            assert!(parse_object(body).is_empty());
        }
    }

    #[test]
    fn test_object_body_keeps_fields() {
        let fields = parse_object(br#"{"_csrf_token":"t","command":"ls"}"#);
        assert_eq!(fields.get(TOKEN_FIELD), Some(&Value::from("t")));
        assert_eq!(fields.get("command"), Some(&Value::from("ls")));
    }
}
