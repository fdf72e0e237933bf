/*
 * Responsibility
 * - "no authentication" sentinel の定義
 * - resolver の拒否 と accessor の不在 の両方で同じ値を使う
 * - IntoResponse 実装 (401 / 空 body)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The single "no authentication" error value.
///
/// Resolvers return it (boxed) to deny a request, and [`authentication`]
/// returns it when no profile is attached to the request. Callers compare
/// against it with `==`, or with `err.is::<NoAuthentication>()` once boxed.
///
/// [`authentication`]: crate::authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("no authentication")]
pub struct NoAuthentication;

impl NoAuthentication {
    /// Returns true if a boxed strategy error is this sentinel.
    pub fn matches(err: &(dyn std::error::Error + 'static)) -> bool {
        err.is::<NoAuthentication>()
    }
}

impl IntoResponse for NoAuthentication {
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

#[cfg(test)]
mod tests {
    use tower::BoxError;

    use super::*;

    #[test]
    fn boxed_sentinel_is_recognised() {
        let err: BoxError = NoAuthentication.into();

        assert!(NoAuthentication::matches(&*err));
        assert_eq!(err.downcast_ref::<NoAuthentication>(), Some(&NoAuthentication));
    }

    #[test]
    fn other_errors_are_not_the_sentinel() {
        let err: BoxError = "backend unavailable".into();

        assert!(!NoAuthentication::matches(&*err));
    }

    #[tokio::test]
    async fn sentinel_responds_unauthorized_with_empty_body() {
        let response = NoAuthentication.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body extraction");
        assert!(body.is_empty());
    }
}
