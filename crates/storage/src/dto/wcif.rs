use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Competition, UserRef};

pub const FORMAT_VERSION: &str = "1.0";

/// Which flavour of the interchange document to build. The public one is
/// served without authentication and carries no contact details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WcifAudience {
    Managers,
    Public,
}

/// WCA Competition Interchange Format document
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WcifCompetition {
    pub format_version: String,
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub persons: Vec<WcifPerson>,
    pub events: Vec<WcifEvent>,
    pub schedule: WcifSchedule,
    pub competitor_limit: Option<u32>,
    pub extensions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WcifPerson {
    pub name: String,
    pub wca_user_id: i64,
    pub wca_id: Option<String>,
    pub registrant_id: Option<u32>,
    pub country_iso2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WcifEvent {
    pub id: String,
    /// Round structure is not tracked by this service
    pub rounds: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WcifSchedule {
    pub start_date: NaiveDate,
    pub number_of_days: i64,
    pub venues: Vec<WcifVenue>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WcifVenue {
    pub id: u32,
    pub name: String,
    pub latitude_microdegrees: i32,
    pub longitude_microdegrees: i32,
    pub country_iso2: Option<String>,
    pub rooms: Vec<serde_json::Value>,
}

impl WcifCompetition {
    pub fn build(comp: &Competition, audience: WcifAudience) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            id: comp.id.clone(),
            name: comp.name.clone(),
            short_name: comp.short_name.clone().unwrap_or_else(|| comp.name.clone()),
            persons: persons(comp, audience),
            events: comp
                .event_ids
                .iter()
                .map(|id| WcifEvent {
                    id: id.clone(),
                    rounds: Vec::new(),
                })
                .collect(),
            schedule: WcifSchedule {
                start_date: comp.start_date,
                number_of_days: comp.number_of_days(),
                venues: venue(comp).into_iter().collect(),
            },
            competitor_limit: None,
            extensions: Vec::new(),
        }
    }
}

fn venue(comp: &Competition) -> Option<WcifVenue> {
    let (Some(name), Some(lat), Some(lng)) = (
        comp.venue.as_ref(),
        comp.latitude_microdegrees,
        comp.longitude_microdegrees,
    ) else {
        return None;
    };

    Some(WcifVenue {
        id: 1,
        name: name.clone(),
        latitude_microdegrees: lat,
        longitude_microdegrees: lng,
        country_iso2: comp.country_iso2().map(str::to_string),
        rooms: Vec::new(),
    })
}

/// Staff as WCIF persons; someone listed both as delegate and organizer
/// appears once with both roles.
fn persons(comp: &Competition, audience: WcifAudience) -> Vec<WcifPerson> {
    let mut persons: Vec<WcifPerson> = Vec::new();

    let staff = comp
        .delegates
        .iter()
        .map(|u| (u, "delegate"))
        .chain(comp.organizers.iter().map(|u| (u, "organizer")));

    for (user, role) in staff {
        match persons.iter_mut().find(|p| p.wca_user_id == user.id) {
            Some(person) => person.roles.push(role.to_string()),
            None => persons.push(person(user, role, audience)),
        }
    }

    persons
}

fn person(user: &UserRef, role: &str, audience: WcifAudience) -> WcifPerson {
    WcifPerson {
        name: user.name.clone(),
        wca_user_id: user.id,
        wca_id: user.wca_id.clone(),
        registrant_id: None,
        country_iso2: user.country_iso2.clone(),
        email: match audience {
            WcifAudience::Managers => user.email.clone(),
            WcifAudience::Public => None,
        },
        roles: vec![role.to_string()],
    }
}
