//! Request extractors
//!
//! Every route takes exactly one path parameter. [`PathParam`] extracts it
//! like `Path<String>`, but never lets axum's plain-text rejection escape:
//! a segment that percent-decodes to invalid UTF-8 is decoded lossily
//! (invalid bytes become U+FFFD) and handed to the handler, which then
//! validates it like any other input.

use axum::{
    extract::{
        path::ErrorKind,
        rejection::PathRejection,
        FromRequestParts, MatchedPath, Path,
    },
    http::request::Parts,
};
use tracing::debug;

use super::responses::ApiError;

/// The single path parameter of the matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam(pub String);

impl<S> FromRequestParts<S> for PathParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let rejection = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(value)) => return Ok(PathParam(value)),
            Err(rejection) => rejection,
        };

        let recovered = match &rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                ErrorKind::InvalidUtf8InPathParam { key } => lossy_segment(parts, key),
                _ => None,
            },
            _ => None,
        };

        match recovered {
            Some(value) => {
                debug!(path = %parts.uri.path(), "path parameter is not valid UTF-8, decoded lossily");
                Ok(PathParam(value))
            }
            None => {
                debug!(path = %parts.uri.path(), "path parameter rejected: {}", rejection.body_text());
                Err(ApiError::BadPath)
            }
        }
    }
}

/// Finds `{key}` in the matched route template and decodes the request
/// segment at the same position, replacing invalid UTF-8.
fn lossy_segment(parts: &Parts, key: &str) -> Option<String> {
    let template = parts.extensions.get::<MatchedPath>()?.as_str();
    let placeholder = format!("{{{key}}}");
    let position = template.split('/').position(|seg| seg == placeholder)?;
    let raw = parts.uri.path().split('/').nth(position)?;

    let bytes = urlencoding::decode_binary(raw.as_bytes());
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
