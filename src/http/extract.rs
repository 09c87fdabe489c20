use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use derive_more::{Display, From};
use serde_json::{Map, Value};

/// Request body as loose JSON, left for the handler to validate.
///
/// A body that is empty or not declared as JSON reads as an empty object.
/// A JSON body that fails to parse is rejected with the generic `500`.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[derive(Debug, Display, From)]
pub enum BodyError {
    #[display("failed to read body: {_0}")]
    Read(BytesRejection),
    #[display("malformed JSON body: {_0}")]
    Parse(serde_json::Error),
}

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        super::internal_error(&self)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = BodyError;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json);
        let bytes = Bytes::from_request(req, state).await?;

        if !declared_json || bytes.is_empty() {
            return Ok(Self(Value::Object(Map::new())));
        }
        Ok(Self(serde_json::from_slice(&bytes)?))
    }
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::is_json;

    #[test]
    fn recognizes_json_content_types() {
        assert!(is_json("application/json"));
        assert!(is_json("Application/JSON; charset=utf-8"));
        assert!(is_json("application/merge-patch+json"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/x-www-form-urlencoded"));
    }
}
