//! `Authorization: Bearer <token>` からトークンを取り出す extractor
use async_trait::async_trait;
use authgate::{BoxError, IdentityExtractor};
use axum::http::{HeaderMap, header, request::Parts};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("authorization header is not valid UTF-8")]
    NotUtf8,
    #[error("authorization scheme is not Bearer")]
    UnsupportedScheme,
    #[error("bearer token is empty")]
    EmptyToken,
}

/// Extracts bearer tokens. A request without an Authorization header has no
/// identifier; a header that is present but unusable is an extraction error.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerToken;

#[async_trait]
impl IdentityExtractor for BearerToken {
    type Identifier = String;

    async fn extract(&self, parts: &Parts) -> Result<Option<String>, BoxError> {
        Ok(bearer_token(&parts.headers)?.map(str::to_owned))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, BearerError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| BearerError::NotUtf8)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(BearerError::UnsupportedScheme)?
        .trim();

    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: HeaderValue) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value);
        headers
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let headers = headers_with(HeaderValue::from_static("Bearer secret-token"));

        assert_eq!(bearer_token(&headers), Ok(Some("secret-token")));
    }

    #[test]
    fn missing_header_is_not_an_error() {
        assert_eq!(bearer_token(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn other_schemes_are_rejected() {
        let headers = headers_with(HeaderValue::from_static("Basic dGVzdDp0ZXN0"));

        assert_eq!(bearer_token(&headers), Err(BearerError::UnsupportedScheme));
    }

    #[test]
    fn blank_token_is_rejected() {
        let headers = headers_with(HeaderValue::from_static("Bearer   "));

        assert_eq!(bearer_token(&headers), Err(BearerError::EmptyToken));
    }

    #[test]
    fn non_utf8_header_is_rejected() {
        let value = HeaderValue::from_bytes(b"Bearer \xff\xfe").expect("opaque header value");
        let headers = headers_with(value);

        assert_eq!(bearer_token(&headers), Err(BearerError::NotUtf8));
    }
}
