/*
 * Responsibility
 * - 認証ゲートの公開インターフェース (re-export)
 * - extractor → resolver → context 注入 の組み立ては middleware 側
 */
//! Request-scoped authentication gate for tower/axum services.
//!
//! An [`IdentityExtractor`] derives an optional identifier from the request,
//! an [`IdentityResolver`] turns it into a profile, and [`authenticator`]
//! wires both into a [`tower::Layer`]. Handlers read the profile back with
//! [`authentication`] or the [`Authenticated`] extractor.
//!
//! ```ignore
//! let layer = authgate::authenticator(BearerToken, token_table);
//! let app = Router::new().route("/me", get(me).route_layer(layer));
//!
//! async fn me(Authenticated(profile): Authenticated<Principal>) -> String {
//!     profile.subject
//! }
//! ```

pub mod context;
pub mod error;
pub mod middleware;
pub mod strategy;

pub use context::{Authenticated, authentication};
pub use error::NoAuthentication;
pub use middleware::{AuthenticatorLayer, AuthenticatorService, authenticator};
pub use strategy::{ExtractFn, IdentityExtractor, IdentityResolver, ResolveFn, extract_fn, resolve_fn};

pub use tower::BoxError;
