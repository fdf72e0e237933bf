//! 設定済みトークン → 主体 を引く resolver
//!
//! トークンは SHA-256 digest で保持し、平文はメモリに残さない。
use std::collections::HashMap;

use async_trait::async_trait;
use authgate::{BoxError, IdentityResolver, NoAuthentication};
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use super::Principal;

type TokenDigest = [u8; 32];

pub struct TokenTable {
    subjects: HashMap<TokenDigest, String>,
    allow_anonymous: bool,
}

impl TokenTable {
    pub fn new<I>(tokens: I, allow_anonymous: bool) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let subjects = tokens
            .into_iter()
            .map(|(token, subject)| (digest(&token), subject))
            .collect();

        Self {
            subjects,
            allow_anonymous,
        }
    }

    pub fn token_count(&self) -> usize {
        self.subjects.len()
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        self.subjects.get(&digest(token)).map(String::as_str)
    }
}

fn digest(token: &str) -> TokenDigest {
    Sha256::digest(token.as_bytes()).into()
}

#[async_trait]
impl IdentityResolver<String> for TokenTable {
    type Profile = Principal;

    async fn resolve(&self, _parts: &Parts, identifier: Option<String>) -> Result<Principal, BoxError> {
        match identifier {
            Some(token) => match self.lookup(&token) {
                Some(subject) => Ok(Principal::authenticated(subject)),
                None => {
                    tracing::debug!("unknown bearer token");
                    Err(NoAuthentication.into())
                }
            },
            None if self.allow_anonymous => Ok(Principal::anonymous()),
            None => Err(NoAuthentication.into()),
        }
    }
}
