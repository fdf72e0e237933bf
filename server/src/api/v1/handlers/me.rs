/*
 * Responsibility
 * - 認証済み主体を返す handler
 * - me: extractor (Authenticated) で受け取る
 * - whoami: accessor (authentication) で request から直接取り出し、不在時の扱いは handler が決める
 */
use authgate::{Authenticated, authentication};
use axum::{Json, extract::Request};

use crate::error::AppError;
use crate::services::auth::Principal;

pub async fn me(Authenticated(principal): Authenticated<Principal>) -> Json<Principal> {
    Json(principal)
}

pub async fn whoami(request: Request) -> Result<String, AppError> {
    let principal = authentication::<Principal>(request.extensions())?;

    Ok(principal.subject.clone())
}
