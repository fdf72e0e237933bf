//! extractor → resolver → profile を extensions に入れる
//!
//! - extractor の失敗は「identifier なし」として扱い、resolver は必ず呼ぶ
//! - resolver の失敗は種類を問わず 401 (空 body) で打ち切り、内側の service は呼ばない
//! - 成功時のレスポンスは内側の service にそのまま任せる
//!
//! The layer only assumes the tower `Service` contract, so it attaches the
//! same way to an axum `Router`, a single `MethodRouter`, or a bare
//! `tower::service_fn`.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::http::{Request, Response, StatusCode};
use tower::{Layer, Service};

use crate::context;
use crate::strategy::{IdentityExtractor, IdentityResolver};

/// Builds the authentication layer from an extractor and a resolver.
///
/// ```ignore
/// let auth = authenticator(BearerToken, TokenTable::new(tokens));
///
/// // whole router
/// let app = Router::new().route("/me", get(me)).route_layer(auth.clone());
/// // single route
/// let app = Router::new().route("/whoami", get(whoami).layer(auth));
/// ```
pub fn authenticator<E, R>(extract: E, resolve: R) -> AuthenticatorLayer<E, R>
where
    E: IdentityExtractor,
    R: IdentityResolver<E::Identifier>,
{
    AuthenticatorLayer {
        strategies: Arc::new(Strategies {
            extractor: extract,
            resolver: resolve,
        }),
    }
}

struct Strategies<E, R> {
    extractor: E,
    resolver: R,
}

/// Layer that wraps a service with [`AuthenticatorService`].
pub struct AuthenticatorLayer<E, R> {
    strategies: Arc<Strategies<E, R>>,
}

impl<E, R> Clone for AuthenticatorLayer<E, R> {
    fn clone(&self) -> Self {
        Self {
            strategies: self.strategies.clone(),
        }
    }
}

impl<S, E, R> Layer<S> for AuthenticatorLayer<E, R> {
    type Service = AuthenticatorService<S, E, R>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthenticatorService {
            inner,
            strategies: self.strategies.clone(),
        }
    }
}

/// Service that authenticates each request before handing it to `inner`.
pub struct AuthenticatorService<S, E, R> {
    inner: S,
    strategies: Arc<Strategies<E, R>>,
}

impl<S: Clone, E, R> Clone for AuthenticatorService<S, E, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            strategies: self.strategies.clone(),
        }
    }
}

impl<S, E, R, B, ResBody> Service<Request<B>> for AuthenticatorService<S, E, R>
where
    S: Service<Request<B>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    E: IdentityExtractor + 'static,
    R: IdentityResolver<E::Identifier> + 'static,
    B: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let strategies = self.strategies.clone();
        let not_ready_inner = self.inner.clone();
        let mut ready_inner = std::mem::replace(&mut self.inner, not_ready_inner);

        Box::pin(async move {
            let (mut parts, body) = request.into_parts();

            let identifier = match strategies.extractor.extract(&parts).await {
                Ok(identifier) => identifier,
                Err(err) => {
                    // 失敗は拒否ではなく匿名扱い (resolver に判断を委ねる)
                    tracing::debug!(error = %err, "identity extraction failed, resolving without identifier");
                    None
                }
            };

            let profile = match strategies.resolver.resolve(&parts, identifier).await {
                Ok(profile) => profile,
                Err(err) => {
                    tracing::debug!(
                        error = %err,
                        method = %parts.method,
                        path = %parts.uri.path(),
                        "authentication denied"
                    );
                    return Ok(unauthorized());
                }
            };

            context::attach(&mut parts.extensions, profile);

            ready_inner.call(Request::from_parts(parts, body)).await
        })
    }
}

fn unauthorized<B: Default>() -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
}
