use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Competition, UserRef, country};

/// A query parameter that could not be interpreted. The message names the
/// parameter and echoes the submitted value verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: '{value}'")]
pub struct InvalidParam {
    pub field: String,
    pub value: String,
}

impl InvalidParam {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// How the free-text `q` parameter is matched against competitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every whitespace-separated token must appear in some field
    #[default]
    Tokens,
    /// The whole query must appear in some field
    Substring,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tokens" => Ok(Self::Tokens),
            "substring" => Ok(Self::Substring),
            other => Err(format!("unknown search match mode '{other}'")),
        }
    }
}

/// Lowercased search terms, all of which must match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Returns `None` for a blank query.
    pub fn new(q: &str, mode: MatchMode) -> Option<Self> {
        let q = q.trim();
        if q.is_empty() {
            return None;
        }

        let terms = match mode {
            MatchMode::Tokens => q.split_whitespace().map(str::to_lowercase).collect(),
            MatchMode::Substring => vec![q.to_lowercase()],
        };

        Some(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, fields: &[&str]) -> bool {
        let fields: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
        self.terms
            .iter()
            .all(|term| fields.iter().any(|field| field.contains(term.as_str())))
    }
}

/// Filter parameters of the competition listing, exactly as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionFilterParams {
    /// ISO-3166 alpha-2 country code
    #[validate(length(equal = 2))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_iso2: Option<String>,

    /// Free-text search over id, name and location
    #[validate(length(max = 255))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Earliest date of the window, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// Latest date of the window, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// Restrict to competitions the caller delegates or organizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by_me: Option<String>,
}

/// Query string of `GET /api/v0/competitions`. Documented as
/// `CompetitionFilterParams` plus the paging parameters listed on the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCompetitionsParams {
    #[serde(flatten)]
    pub filter: CompetitionFilterParams,
    /// Page size, capped at the configured maximum
    pub per_page: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Continuation token taken from a `Link` header
    pub cursor: Option<String>,
}

/// Listing filter after validation. Only externally visible competitions
/// ever match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitionFilter {
    pub country_id: Option<String>,
    pub search: Option<SearchQuery>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub managed_by: Option<i64>,
}

impl CompetitionFilter {
    pub fn matches(&self, comp: &Competition) -> bool {
        if !comp.is_visible() {
            return false;
        }

        if let Some(ref country_id) = self.country_id
            && &comp.country_id != country_id
        {
            return false;
        }

        if let Some(user_id) = self.managed_by
            && !comp.is_managed_by(user_id)
        {
            return false;
        }

        if let Some(ref search) = self.search {
            let fields = [
                comp.id.as_str(),
                comp.name.as_str(),
                comp.city_name.as_str(),
                comp.venue.as_deref().unwrap_or_default(),
                comp.venue_address.as_deref().unwrap_or_default(),
            ];
            if !search.matches(&fields) {
                return false;
            }
        }

        comp.overlaps(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub filter: CompetitionFilter,
    pub managed_by_me: bool,
}

const FIELD_ORDER: [&str; 5] = ["country_iso2", "q", "start", "end", "managed_by_me"];

impl CompetitionFilterParams {
    fn raw(&self, field: &str) -> Option<&str> {
        match field {
            "country_iso2" => self.country_iso2.as_deref(),
            "q" => self.q.as_deref(),
            "start" => self.start.as_deref(),
            "end" => self.end.as_deref(),
            "managed_by_me" => self.managed_by_me.as_deref(),
            _ => None,
        }
    }

    /// Validates every parameter and turns it into a typed filter. The
    /// `managed_by` restriction is left for the caller to fill in.
    pub fn resolve(&self, mode: MatchMode) -> Result<ResolvedFilter, InvalidParam> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let field = FIELD_ORDER
                .into_iter()
                .find(|f| field_errors.contains_key(*f))
                .unwrap_or("q");
            return Err(InvalidParam::new(field, self.raw(field).unwrap_or_default()));
        }

        let country_id = match self.country_iso2.as_deref() {
            Some(iso2) => Some(
                country::find_by_iso2(iso2)
                    .ok_or_else(|| InvalidParam::new("country_iso2", iso2))?
                    .id
                    .to_string(),
            ),
            None => None,
        };

        let search = self.q.as_deref().and_then(|q| SearchQuery::new(q, mode));
        let start = self.start.as_deref().map(|v| parse_date("start", v)).transpose()?;
        let end = self.end.as_deref().map(|v| parse_date("end", v)).transpose()?;
        let managed_by_me = self
            .managed_by_me
            .as_deref()
            .map(|v| parse_flag("managed_by_me", v))
            .transpose()?
            .unwrap_or(false);

        Ok(ResolvedFilter {
            filter: CompetitionFilter {
                country_id,
                search,
                start,
                end,
                managed_by: None,
            },
            managed_by_me,
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InvalidParam> {
    let is_iso_shape = value.len() == 10
        && value
            .char_indices()
            .all(|(i, ch)| if i == 4 || i == 7 { ch == '-' } else { ch.is_ascii_digit() });

    if !is_iso_shape {
        return Err(InvalidParam::new(field, value));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| InvalidParam::new(field, value))
}

fn parse_flag(field: &str, value: &str) -> Result<bool, InvalidParam> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(InvalidParam::new(field, value)),
    }
}

/// Parses a strictly positive integer parameter.
pub fn parse_positive(field: &str, value: &str) -> Result<u32, InvalidParam> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| InvalidParam::new(field, value))
}

/// Competition as returned by the listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionSummary {
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub city: String,
    pub venue: Option<String>,
    pub country_iso2: Option<String>,
    pub event_ids: Vec<String>,
    pub delegates: Vec<UserRef>,
    pub organizers: Vec<UserRef>,
}

/// Competition as returned by the detail endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionDetail {
    #[serde(flatten)]
    pub summary: CompetitionSummary,
    pub short_name: Option<String>,
    pub venue_address: Option<String>,
    pub latitude_degrees: Option<f64>,
    pub longitude_degrees: Option<f64>,
}

impl From<Competition> for CompetitionSummary {
    fn from(comp: Competition) -> Self {
        let country_iso2 = comp.country_iso2().map(str::to_string);
        Self {
            id: comp.id,
            name: comp.name,
            website: comp.website,
            start_date: comp.start_date,
            end_date: comp.end_date,
            city: comp.city_name,
            venue: comp.venue,
            country_iso2,
            event_ids: comp.event_ids,
            delegates: comp.delegates,
            organizers: comp.organizers,
        }
    }
}

impl From<Competition> for CompetitionDetail {
    fn from(comp: Competition) -> Self {
        let short_name = comp.short_name.clone();
        let venue_address = comp.venue_address.clone();
        let latitude_degrees = comp.latitude_microdegrees.map(microdegrees_to_degrees);
        let longitude_degrees = comp.longitude_microdegrees.map(microdegrees_to_degrees);

        Self {
            summary: CompetitionSummary::from(comp),
            short_name,
            venue_address,
            latitude_degrees,
            longitude_degrees,
        }
    }
}

fn microdegrees_to_degrees(value: i32) -> f64 {
    f64::from(value) / 1_000_000.0
}
