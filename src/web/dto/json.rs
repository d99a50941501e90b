//! JSON body extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

/// A JSON extractor whose rejection uses the API error envelope.
///
/// axum's own `Json` answers a bad body with a plain-text 400/415/422; this
/// wrapper turns every such rejection into `400 {success:false, message}`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejecting request body: {}", e);
            ApiError::bad_request(format!("Invalid JSON: {}", e.body_text()))
        })?;

        Ok(JsonBody(value))
    }
}
