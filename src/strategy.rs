//! Identity extraction and resolution strategies.
//!
//! Both stages are supplied by the caller. The extractor answers "who claims
//! to be asking" and the resolver answers "who is actually asking"; the
//! middleware only sequences them.
use std::{future::Future, marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use axum::http::request::Parts;
use tower::BoxError;

/// Derives an optional identifier from the incoming request.
///
/// - `Ok(Some(id))`: an identifier was found
/// - `Ok(None)`: the request carries no credentials; resolution still runs
/// - `Err(_)`: extraction failed; the middleware treats it exactly like `Ok(None)`
#[async_trait]
pub trait IdentityExtractor: Send + Sync {
    type Identifier: Send + 'static;

    async fn extract(&self, parts: &Parts) -> Result<Option<Self::Identifier>, BoxError>;
}

/// Resolves an optional identifier into an authenticated profile.
///
/// Deny with `Err(NoAuthentication.into())`. Any other error also denies the
/// request.
///
/// [`NoAuthentication`]: crate::NoAuthentication
#[async_trait]
pub trait IdentityResolver<Id: Send + 'static>: Send + Sync {
    type Profile: Clone + Send + Sync + 'static;

    async fn resolve(&self, parts: &Parts, identifier: Option<Id>) -> Result<Self::Profile, BoxError>;
}

#[async_trait]
impl<T> IdentityExtractor for Arc<T>
where
    T: IdentityExtractor + ?Sized,
{
    type Identifier = T::Identifier;

    async fn extract(&self, parts: &Parts) -> Result<Option<Self::Identifier>, BoxError> {
        (**self).extract(parts).await
    }
}

#[async_trait]
impl<Id, T> IdentityResolver<Id> for Arc<T>
where
    Id: Send + 'static,
    T: IdentityResolver<Id> + ?Sized,
{
    type Profile = T::Profile;

    async fn resolve(&self, parts: &Parts, identifier: Option<Id>) -> Result<Self::Profile, BoxError> {
        (**self).resolve(parts, identifier).await
    }
}

/// Extractor built from a closure. See [`extract_fn`].
pub struct ExtractFn<F, Fut> {
    f: F,
    _future: PhantomData<fn() -> Fut>,
}

/// Wraps a closure as an [`IdentityExtractor`].
///
/// The closure reads what it needs from the request head and returns an
/// owned future, so the future must not borrow `parts`.
///
/// ```ignore
/// let extract = extract_fn(|parts: &Parts| {
///     let addr = parts.headers.get("x-forwarded-for").cloned();
///     async move { Ok(addr.and_then(|v| v.to_str().ok().map(str::to_owned))) }
/// });
/// ```
pub fn extract_fn<F, Fut, I>(f: F) -> ExtractFn<F, Fut>
where
    F: Fn(&Parts) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<I>, BoxError>> + Send + 'static,
    I: Send + 'static,
{
    ExtractFn {
        f,
        _future: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, I> IdentityExtractor for ExtractFn<F, Fut>
where
    F: Fn(&Parts) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<I>, BoxError>> + Send + 'static,
    I: Send + 'static,
{
    type Identifier = I;

    async fn extract(&self, parts: &Parts) -> Result<Option<I>, BoxError> {
        (self.f)(parts).await
    }
}

/// Resolver built from a closure. See [`resolve_fn`].
pub struct ResolveFn<F, Fut> {
    f: F,
    _future: PhantomData<fn() -> Fut>,
}

/// Wraps a closure as an [`IdentityResolver`].
///
/// Same borrowing rule as [`extract_fn`]: the returned future is owned.
pub fn resolve_fn<F, Fut, Id, P>(f: F) -> ResolveFn<F, Fut>
where
    F: Fn(&Parts, Option<Id>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<P, BoxError>> + Send + 'static,
    Id: Send + 'static,
    P: Clone + Send + Sync + 'static,
{
    ResolveFn {
        f,
        _future: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, Id, P> IdentityResolver<Id> for ResolveFn<F, Fut>
where
    F: Fn(&Parts, Option<Id>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<P, BoxError>> + Send + 'static,
    Id: Send + 'static,
    P: Clone + Send + Sync + 'static,
{
    type Profile = P;

    async fn resolve(&self, parts: &Parts, identifier: Option<Id>) -> Result<P, BoxError> {
        (self.f)(parts, identifier).await
    }
}
