/*
 * Responsibility
 * - Handler から見える「認証済み主体」の型 (authenticator の profile)
 * - resolver が生成し、request extensions 経由で handler に渡る
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 認証済みのリクエストに付与される主体
///
/// - `subject` は設定上のユーザー名 (匿名なら "anonymous")
/// - `authenticated_at` は resolver が主体を確定した時刻 (ログ相関用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub subject: String,
    pub anonymous: bool,
    pub authenticated_at: DateTime<Utc>,
}

impl Principal {
    pub const ANONYMOUS_SUBJECT: &'static str = "anonymous";

    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            anonymous: false,
            authenticated_at: Utc::now(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            subject: Self::ANONYMOUS_SUBJECT.to_string(),
            anonymous: true,
            authenticated_at: Utc::now(),
        }
    }
}
