/*
 * Responsibility
 * - 認証済み profile を request extensions に格納する key (crate 外からは参照不可)
 * - handler 側から profile を取り出す accessor / extractor
 *
 * Notes
 * - middleware → extractor への受け渡しは extensions 経由
 * - key は型そのもの (TypeId) なので、他の middleware や app の値とは衝突しない
 */
use axum::{
    extract::FromRequestParts,
    http::{Extensions, request::Parts},
};

use crate::error::NoAuthentication;

/// Context key. Private, so only this crate can store or read it.
#[derive(Clone)]
struct ProfileSlot<P>(P);

/// Attaches `profile`, replacing any profile of the same type set by an
/// outer authenticator.
pub(crate) fn attach<P>(extensions: &mut Extensions, profile: P)
where
    P: Clone + Send + Sync + 'static,
{
    extensions.insert(ProfileSlot(profile));
}

/// Returns the profile the authenticator attached to this request.
///
/// Fails with [`NoAuthentication`] when the request never passed through an
/// authenticator resolving to `P`. The error is returned as is; turning it
/// into a response is up to the caller.
pub fn authentication<P>(extensions: &Extensions) -> Result<&P, NoAuthentication>
where
    P: Send + Sync + 'static,
{
    extensions
        .get::<ProfileSlot<P>>()
        .map(|slot| &slot.0)
        .ok_or(NoAuthentication)
}

/// Handler で profile を受け取るための extractor
/// authenticator が profile を extensions に insert 済みである前提
/// 見つからない場合は sentinel で reject する (401)
#[derive(Debug, Clone)]
pub struct Authenticated<P>(pub P);

impl<P, S> FromRequestParts<S> for Authenticated<P>
where
    P: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = NoAuthentication;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authentication::<P>(&parts.extensions)
            .cloned()
            .map(Authenticated)
    }
}
