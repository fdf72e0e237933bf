/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証が必要な範囲をここで決める
 *   - /me: route_layer でまとめて保護 (GET/POST/PUT/DELETE)
 *   - /whoami: ルート単位で layer を掛ける
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::{me, whoami};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let auth = middleware::auth::layer(state);

    Router::new()
        .route("/me", get(me).post(me).put(me).delete(me))
        .route_layer(auth.clone())
        .route("/whoami", get(whoami).layer(auth))
}
