//! Fixtures shared by the competition service and handler tests

use std::sync::Arc;

use chrono::NaiveDate;
use storage::models::competition::CompetitionRow;
use storage::models::{Competition, UserRef};
use storage::repository::InMemoryCompetitionStore;
use storage::dto::competition::MatchMode;

use super::services::{CompetitionQueryService, ListingSettings};
use crate::middleware::auth::AccessTokens;
use crate::state::AppState;

pub const DANA: i64 = 1;
pub const OLLI: i64 = 2;
pub const STRANGER: i64 = 3;
const SAM: i64 = 4;

pub const PUBLIC_URL: &str = "http://localhost:3000";

/// Tokens accepted by `state()`
pub const TOKENS: &str = "dana-manage:1:public+manage_competitions,\
                          dana-public:1:public,\
                          olli-manage:2:public+manage_competitions,\
                          stranger-manage:3:public+manage_competitions";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Visible competition without staff.
pub fn competition(id: &str, start: &str, end: &str, country_id: &str) -> Competition {
    CompetitionRow {
        id: id.to_string(),
        name: id.to_string(),
        short_name: None,
        country_id: country_id.to_string(),
        city_name: "Somewhere".to_string(),
        venue: None,
        venue_address: None,
        latitude_microdegrees: None,
        longitude_microdegrees: None,
        website: None,
        start_date: date(start),
        end_date: date(end),
        show_at_all: true,
        confirmed: true,
    }
    .into_competition(vec![], vec![], vec!["333".to_string()])
}

fn dana() -> UserRef {
    UserRef::new(DANA, "Dana Delegate")
        .with_wca_id("2009DANA01")
        .with_email("dana@example.com")
}

fn olli() -> UserRef {
    UserRef::new(OLLI, "Olli Organizer").with_email("olli@example.com")
}

fn sam() -> UserRef {
    UserRef::new(SAM, "Sam Senior").with_wca_id("2005SAMS01")
}

/// Three visible competitions (2015-02-01, 2016-02-01, 2016-03-01), one
/// unannounced and one unconfirmed.
pub fn fixtures() -> Vec<Competition> {
    let mut feb2015 = competition("Feb2015", "2015-02-01", "2015-02-01", "USA");
    feb2015.name = "Boston Winter 2015".to_string();
    feb2015.city_name = "Boston, Massachusetts".to_string();
    feb2015.delegates = vec![sam()];
    feb2015.organizers = vec![olli()];

    let mut feb2016 = competition("Feb2016", "2016-02-01", "2016-02-01", "Germany");
    feb2016.name = "Berlin Winter 2016".to_string();
    feb2016.city_name = "Berlin".to_string();
    feb2016.venue = Some("Rathaus".to_string());
    feb2016.delegates = vec![dana()];

    let mut mar2016 = competition("Mar2016", "2016-03-01", "2016-03-02", "USA");
    mar2016.name = "Seattle Open 2016".to_string();
    mar2016.city_name = "Seattle, Washington".to_string();
    mar2016.delegates = vec![sam()];

    let mut hidden = competition("Hidden2016", "2016-02-01", "2016-02-01", "Germany");
    hidden.name = "Secret Open 2016".to_string();
    hidden.show_at_all = false;
    hidden.venue = Some("Kongresshalle".to_string());
    hidden.latitude_microdegrees = Some(52_520_008);
    hidden.longitude_microdegrees = Some(13_404_954);
    hidden.delegates = vec![dana()];

    let mut unconfirmed = competition("Unconfirmed2016", "2016-01-10", "2016-01-10", "USA");
    unconfirmed.confirmed = false;
    unconfirmed.delegates = vec![sam()];

    vec![feb2015, feb2016, mar2016, hidden, unconfirmed]
}

pub fn service_from(
    competitions: Vec<Competition>,
    default_per_page: u32,
    max_per_page: u32,
) -> CompetitionQueryService {
    CompetitionQueryService::new(
        Arc::new(InMemoryCompetitionStore::new(competitions)),
        ListingSettings {
            default_per_page,
            max_per_page,
            match_mode: MatchMode::Tokens,
        },
    )
}

pub fn service_with(default_per_page: u32, max_per_page: u32) -> CompetitionQueryService {
    service_from(fixtures(), default_per_page, max_per_page)
}

pub fn service() -> CompetitionQueryService {
    service_with(25, 100)
}

pub fn state_with(competitions: CompetitionQueryService) -> AppState {
    AppState {
        competitions,
        tokens: Arc::new(AccessTokens::from_comma_separated(TOKENS).unwrap()),
        public_url: Arc::from(PUBLIC_URL),
    }
}

pub fn state() -> AppState {
    state_with(service())
}
