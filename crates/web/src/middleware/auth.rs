use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use anyhow::{Context, bail};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use storage::models::Competition;

use crate::error::WebError;
use crate::state::AppState;

/// Permission granted to an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Public,
    ManageCompetitions,
    Email,
    Dob,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::ManageCompetitions => "manage_competitions",
            Self::Email => "email",
            Self::Dob => "dob",
        }
    }
}

impl FromStr for Scope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "manage_competitions" => Ok(Self::ManageCompetitions),
            "email" => Ok(Self::Email),
            "dob" => Ok(Self::Dob),
            other => bail!("unknown scope '{other}'"),
        }
    }
}

/// Identity and scopes of whoever sent the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<i64>,
    pub scopes: HashSet<Scope>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: i64, scopes: impl IntoIterator<Item = Scope>) -> Self {
        Self {
            user_id: Some(user_id),
            scopes: scopes.into_iter().collect(),
        }
    }

    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Whether the caller is a delegate or organizer of `competition`.
    pub fn manages(&self, competition: &Competition) -> bool {
        self.user_id
            .is_some_and(|user_id| competition.is_managed_by(user_id))
    }
}

/// Static table of bearer tokens
#[derive(Debug, Clone, Default)]
pub struct AccessTokens {
    tokens: HashMap<String, Caller>,
}

impl AccessTokens {
    /// Parses `token:user_id:scope+scope` entries separated by commas.
    pub fn from_comma_separated(tokens_str: &str) -> anyhow::Result<Self> {
        let mut tokens = HashMap::new();

        for entry in tokens_str.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let mut parts = entry.splitn(3, ':');
            let (Some(token), Some(user_id), Some(scopes)) =
                (parts.next(), parts.next(), parts.next())
            else {
                bail!("access token entry must look like token:user_id:scopes");
            };

            if token.is_empty() {
                bail!("access token entry has an empty token");
            }

            let user_id: i64 = user_id
                .parse()
                .with_context(|| format!("invalid user id '{user_id}' in access token entry"))?;
            let scopes = scopes
                .split('+')
                .filter(|s| !s.is_empty())
                .map(Scope::from_str)
                .collect::<anyhow::Result<HashSet<_>>>()?;

            tokens.insert(token.to_string(), Caller::user(user_id, scopes));
        }

        Ok(Self { tokens })
    }

    pub fn resolve(&self, token: &str) -> Option<&Caller> {
        self.tokens.get(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers)? else {
            return Ok(Caller::anonymous());
        };

        match state.tokens.resolve(token) {
            Some(caller) => Ok(caller.clone()),
            None => {
                tracing::warn!("Invalid access token attempt");
                Err(WebError::Unauthorized)
            }
        }
    }
}

/// `Ok(None)` when no credentials were sent at all.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, WebError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(WebError::Unauthorized)?;

    Ok(Some(token))
}
