use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::Payload;

/// JSON request body that must be an object. Keeps the body untyped so the
/// field gate and validators see exactly what the client sent.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Payload);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(ApiError::invalid_json("Request body must be a JSON object")),
        }
    }
}
