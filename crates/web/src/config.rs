use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use storage::dto::common::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use storage::dto::competition::MatchMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub access_tokens: String,
    /// Origin used when building `Link` headers
    pub public_url: String,
    pub default_per_page: u32,
    pub max_per_page: u32,
    pub search_match: MatchMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").context("Cannot load HOST env variable")?;
        let port: u16 = lookup("PORT")
            .context("Cannot load PORT env variable")?
            .parse()
            .context("PORT must be a number")?;
        let database_url =
            lookup("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?;

        let public_url = lookup("PUBLIC_URL").unwrap_or_else(|| format!("http://{host}:{port}"));
        let default_per_page = parse_or(&lookup, "DEFAULT_PER_PAGE", DEFAULT_PER_PAGE)?;
        let max_per_page = parse_or(&lookup, "MAX_PER_PAGE", MAX_PER_PAGE)?;
        let search_match = parse_or(&lookup, "SEARCH_MATCH", MatchMode::default())?;

        if default_per_page == 0 || max_per_page == 0 {
            bail!("DEFAULT_PER_PAGE and MAX_PER_PAGE must be positive");
        }
        if default_per_page > max_per_page {
            bail!("DEFAULT_PER_PAGE ({default_per_page}) exceeds MAX_PER_PAGE ({max_per_page})");
        }

        Ok(Self {
            host,
            port,
            database_url,
            access_tokens: lookup("ACCESS_TOKENS").unwrap_or_default(),
            public_url,
            default_per_page,
            max_per_page,
            search_match,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {name} '{raw}': {e}")),
        None => Ok(default),
    }
}
