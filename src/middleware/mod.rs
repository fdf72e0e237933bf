/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - pub fn authenticator(...) など
 */
mod authenticator;

pub use authenticator::{AuthenticatorLayer, AuthenticatorService, authenticator};
