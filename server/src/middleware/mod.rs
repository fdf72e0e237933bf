/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: 認証 layer の組み立て / http: 横断的な HTTP layer
 */
pub mod auth;
pub mod http;
