use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use storage::dto::competition::{CompetitionFilterParams, InvalidParam};

const CURSOR_VERSION: u8 = 1;
/// Longest accepted `q`, in characters.
const MAX_QUERY_CHARS: usize = 255;
/// Bound for a cursor whose `q` is all control characters, each written as a
/// six-byte `\uXXXX` JSON escape, plus the other fields. Base64 adds a third.
const MAX_CURSOR_LEN: usize = (MAX_QUERY_CHARS * 6 + 512) * 4 / 3;

/// Continuation state of a listing. Carries the filter it was issued for so
/// that following it needs no server-side session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(rename = "v")]
    version: u8,
    pub offset: u32,
    pub per_page: u32,
    #[serde(default)]
    pub filter: CompetitionFilterParams,
}

impl Cursor {
    pub fn new(offset: u32, per_page: u32, filter: CompetitionFilterParams) -> Self {
        Self {
            version: CURSOR_VERSION,
            offset,
            per_page,
            filter,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(payload))
    }

    pub fn decode(token: &str) -> Result<Self, InvalidParam> {
        let invalid = || InvalidParam::new("cursor", token);

        if token.is_empty() || token.len() > MAX_CURSOR_LEN {
            return Err(invalid());
        }

        let payload = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let cursor: Cursor = serde_json::from_slice(&payload).map_err(|_| invalid())?;

        if cursor.version != CURSOR_VERSION || cursor.per_page == 0 {
            return Err(invalid());
        }

        Ok(cursor)
    }
}

/// Builds an RFC 8288 `Link` header value out of `(rel, cursor)` pairs.
pub fn link_header(base_url: &str, path: &str, links: &[(&str, &str)]) -> Option<String> {
    if links.is_empty() {
        return None;
    }

    let base_url = base_url.trim_end_matches('/');
    let value = links
        .iter()
        .map(|(rel, cursor)| format!("<{base_url}{path}?cursor={cursor}>; rel=\"{rel}\""))
        .collect::<Vec<_>>()
        .join(", ");

    Some(value)
}
