use chrono::NaiveDate;
use sqlx::FromRow;

use super::country;
use super::user::UserRef;

/// Row of the `competitions` table, before staff and events are attached
#[derive(Debug, Clone, FromRow)]
pub struct CompetitionRow {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub country_id: String,
    pub city_name: String,
    pub venue: Option<String>,
    pub venue_address: Option<String>,
    pub latitude_microdegrees: Option<i32>,
    pub longitude_microdegrees: Option<i32>,
    pub website: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub show_at_all: bool,
    pub confirmed: bool,
}

impl CompetitionRow {
    pub fn into_competition(
        self,
        delegates: Vec<UserRef>,
        organizers: Vec<UserRef>,
        event_ids: Vec<String>,
    ) -> Competition {
        Competition {
            id: self.id,
            name: self.name,
            short_name: self.short_name,
            country_id: self.country_id,
            city_name: self.city_name,
            venue: self.venue,
            venue_address: self.venue_address,
            latitude_microdegrees: self.latitude_microdegrees,
            longitude_microdegrees: self.longitude_microdegrees,
            website: self.website,
            start_date: self.start_date,
            end_date: self.end_date,
            show_at_all: self.show_at_all,
            confirmed: self.confirmed,
            delegates,
            organizers,
            event_ids,
        }
    }
}

/// A competition together with its staff and events
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    /// WCA country id, e.g. `USA` or `Germany`
    pub country_id: String,
    pub city_name: String,
    pub venue: Option<String>,
    pub venue_address: Option<String>,
    pub latitude_microdegrees: Option<i32>,
    pub longitude_microdegrees: Option<i32>,
    pub website: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub show_at_all: bool,
    pub confirmed: bool,
    pub delegates: Vec<UserRef>,
    pub organizers: Vec<UserRef>,
    pub event_ids: Vec<String>,
}

impl Competition {
    /// Visible to everyone only once it is both announced and confirmed.
    pub fn is_visible(&self) -> bool {
        self.show_at_all && self.confirmed
    }

    pub fn is_delegate(&self, user_id: i64) -> bool {
        self.delegates.iter().any(|u| u.id == user_id)
    }

    pub fn is_organizer(&self, user_id: i64) -> bool {
        self.organizers.iter().any(|u| u.id == user_id)
    }

    /// Delegates and organizers both manage the competition.
    pub fn is_managed_by(&self, user_id: i64) -> bool {
        self.is_delegate(user_id) || self.is_organizer(user_id)
    }

    /// Inclusive overlap between the competition dates and an optionally
    /// open-ended window.
    pub fn overlaps(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        start.is_none_or(|s| self.end_date >= s) && end.is_none_or(|e| self.start_date <= e)
    }

    pub fn country_iso2(&self) -> Option<&'static str> {
        country::find_by_id(&self.country_id).map(|c| c.iso2)
    }

    pub fn number_of_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
