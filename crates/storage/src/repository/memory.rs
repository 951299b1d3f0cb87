//! In-memory competition store

use std::cmp::Reverse;
use std::sync::RwLock;

use async_trait::async_trait;

use super::CompetitionStore;
use crate::dto::common::{Page, PageRequest};
use crate::dto::competition::CompetitionFilter;
use crate::error::{Result, StorageError};
use crate::models::Competition;

/// Holds competitions in a vector and evaluates filters in process
#[derive(Debug, Default)]
pub struct InMemoryCompetitionStore {
    competitions: RwLock<Vec<Competition>>,
}

impl InMemoryCompetitionStore {
    pub fn new(competitions: Vec<Competition>) -> Self {
        Self {
            competitions: RwLock::new(competitions),
        }
    }

    /// Inserts or replaces a competition with the same id.
    pub fn upsert(&self, competition: Competition) -> Result<()> {
        let mut competitions = self
            .competitions
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;

        match competitions.iter_mut().find(|c| c.id == competition.id) {
            Some(existing) => *existing = competition,
            None => competitions.push(competition),
        }

        Ok(())
    }
}

#[async_trait]
impl CompetitionStore for InMemoryCompetitionStore {
    async fn search(
        &self,
        filter: &CompetitionFilter,
        page: PageRequest,
    ) -> Result<Page<Competition>> {
        let competitions = self
            .competitions
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;

        let mut matching: Vec<&Competition> =
            competitions.iter().filter(|c| filter.matches(c)).collect();
        matching.sort_by(|a, b| {
            (Reverse(a.start_date), &a.id).cmp(&(Reverse(b.start_date), &b.id))
        });

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, total, page))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Competition>> {
        let competitions = self
            .competitions
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;

        Ok(competitions.iter().find(|c| c.id == id).cloned())
    }
}
