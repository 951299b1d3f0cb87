use std::sync::Arc;

use storage::{
    dto::{
        common::{Page, PageRequest},
        competition::{
            CompetitionDetail, CompetitionFilterParams, CompetitionSummary, ListCompetitionsParams,
            MatchMode, parse_positive,
        },
        wcif::{WcifAudience, WcifCompetition},
    },
    models::Competition,
    repository::CompetitionStore,
};

use crate::error::WebError;
use crate::middleware::auth::{Caller, Scope};
use crate::pagination::Cursor;

/// Page size limits and search behaviour of the listing
#[derive(Debug, Clone, Copy)]
pub struct ListingSettings {
    pub default_per_page: u32,
    pub max_per_page: u32,
    pub match_mode: MatchMode,
}

/// One page of the listing together with the cursors around it
#[derive(Debug)]
pub struct CompetitionListing {
    pub page: Page<CompetitionSummary>,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

/// Result of a single lookup by id, before the caller is taken into account
#[derive(Debug)]
pub enum Lookup {
    Found(Competition),
    Hidden(Competition),
    Missing,
}

#[derive(Clone)]
pub struct CompetitionQueryService {
    store: Arc<dyn CompetitionStore>,
    settings: ListingSettings,
}

impl CompetitionQueryService {
    pub fn new(store: Arc<dyn CompetitionStore>, settings: ListingSettings) -> Self {
        Self { store, settings }
    }

    /// Filtered, ordered page of visible competitions.
    pub async fn list(
        &self,
        params: ListCompetitionsParams,
        caller: &Caller,
    ) -> Result<CompetitionListing, WebError> {
        let (filter_params, request) = self.resolve_window(params)?;
        let resolved = filter_params.resolve(self.settings.match_mode)?;

        let mut filter = resolved.filter;
        if resolved.managed_by_me {
            let manager = caller
                .user_id
                .filter(|_| caller.has_scope(Scope::ManageCompetitions));

            match manager {
                Some(user_id) => filter.managed_by = Some(user_id),
                None => {
                    tracing::debug!("managed_by_me requested without manage_competitions scope");
                    return Ok(CompetitionListing {
                        page: Page::empty(request),
                        next_cursor: None,
                        prev_cursor: None,
                    });
                }
            }
        }

        let page = self
            .store
            .search(&filter, request)
            .await?
            .map(CompetitionSummary::from);

        let next_cursor = if page.has_next() {
            let next = request.next();
            Some(self.encode_cursor(next, &filter_params)?)
        } else {
            None
        };

        let prev_cursor = match request.previous() {
            Some(prev) => Some(self.encode_cursor(prev, &filter_params)?),
            None => None,
        };

        Ok(CompetitionListing {
            page,
            next_cursor,
            prev_cursor,
        })
    }

    /// Competition detail. Hidden competitions are reported missing unless
    /// the caller delegates or organizes them.
    pub async fn show(&self, id: &str, caller: &Caller) -> Result<CompetitionDetail, WebError> {
        let competition = self.visible_to(id, caller).await?;
        Ok(CompetitionDetail::from(competition))
    }

    /// Full interchange document, reserved to the competition's staff holding
    /// the `manage_competitions` scope.
    pub async fn wcif(&self, id: &str, caller: &Caller) -> Result<WcifCompetition, WebError> {
        let competition = self.visible_to(id, caller).await?;

        if !caller.has_scope(Scope::ManageCompetitions) {
            return Err(WebError::Forbidden(format!(
                "Missing required scope '{}'",
                Scope::ManageCompetitions.as_str()
            )));
        }

        if !caller.manages(&competition) {
            return Err(WebError::Forbidden(format!(
                "Not allowed to manage competition {}",
                competition.id
            )));
        }

        Ok(WcifCompetition::build(&competition, WcifAudience::Managers))
    }

    /// Interchange document without contact details.
    pub async fn public_wcif(&self, id: &str, caller: &Caller) -> Result<WcifCompetition, WebError> {
        let competition = self.visible_to(id, caller).await?;
        Ok(WcifCompetition::build(&competition, WcifAudience::Public))
    }

    pub async fn lookup(&self, id: &str) -> Result<Lookup, WebError> {
        let lookup = match self.store.find_by_id(id).await? {
            Some(competition) if competition.is_visible() => Lookup::Found(competition),
            Some(competition) => Lookup::Hidden(competition),
            None => Lookup::Missing,
        };

        Ok(lookup)
    }

    async fn visible_to(&self, id: &str, caller: &Caller) -> Result<Competition, WebError> {
        match self.lookup(id).await? {
            Lookup::Found(competition) => Ok(competition),
            Lookup::Hidden(competition) if caller.manages(&competition) => Ok(competition),
            Lookup::Hidden(_) | Lookup::Missing => Err(WebError::NotFound(id.to_string())),
        }
    }

    /// Picks the filter and window either from a cursor or from the explicit
    /// parameters. A cursor overrides everything else in the request.
    fn resolve_window(
        &self,
        params: ListCompetitionsParams,
    ) -> Result<(CompetitionFilterParams, PageRequest), WebError> {
        if let Some(token) = params.cursor.as_deref() {
            let cursor = Cursor::decode(token)?;
            let per_page = cursor.per_page.min(self.settings.max_per_page);
            return Ok((cursor.filter, PageRequest::new(cursor.offset, per_page)));
        }

        let per_page = params
            .per_page
            .as_deref()
            .map(|v| parse_positive("per_page", v))
            .transpose()?
            .unwrap_or(self.settings.default_per_page)
            .min(self.settings.max_per_page);

        let page = params
            .page
            .as_deref()
            .map(|v| parse_positive("page", v))
            .transpose()?
            .unwrap_or(1);

        Ok((params.filter, PageRequest::for_page(page, per_page)))
    }

    fn encode_cursor(
        &self,
        request: PageRequest,
        filter: &CompetitionFilterParams,
    ) -> Result<String, WebError> {
        Cursor::new(request.offset, request.limit, filter.clone())
            .encode()
            .map_err(|e| WebError::InternalServerError(e.to_string()))
    }
}
