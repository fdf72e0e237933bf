/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: tokens: TokenTable (authenticator の resolver)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenTable;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenTable>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenTable>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &Config) -> Self {
        let tokens = TokenTable::new(config.auth_tokens.iter().cloned(), config.allow_anonymous);

        Self::new(Arc::new(tokens))
    }
}
