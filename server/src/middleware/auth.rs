//! Bearer トークン → TokenTable で主体を引き、Principal を extensions に入れる
//!
//! 検証の順序や 401 の返し方は authgate 側の責務。ここでは strategy を選ぶだけ。
use std::sync::Arc;

use authgate::{AuthenticatorLayer, authenticator};

use crate::services::auth::{BearerToken, TokenTable};
use crate::state::AppState;

pub type AuthLayer = AuthenticatorLayer<BearerToken, Arc<TokenTable>>;

/// `/api/v1/*` の保護対象ルートに掛ける layer を作る。
///
/// 例：
/// ```ignore
/// let auth = middleware::auth::layer(&state);
/// Router::new().route("/me", get(me)).route_layer(auth);
/// ```
pub fn layer(state: &AppState) -> AuthLayer {
    authenticator(BearerToken, state.tokens.clone())
}
