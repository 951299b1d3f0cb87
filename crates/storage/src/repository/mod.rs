pub mod competition;
pub mod memory;

use async_trait::async_trait;

use crate::dto::common::{Page, PageRequest};
use crate::dto::competition::CompetitionFilter;
use crate::error::Result;
use crate::models::Competition;

pub use competition::CompetitionRepository;
pub use memory::InMemoryCompetitionStore;

/// Read access to competition records
#[async_trait]
pub trait CompetitionStore: Send + Sync {
    /// Competitions matching `filter`, ordered by start date descending and
    /// then by id ascending, restricted to the requested window.
    async fn search(
        &self,
        filter: &CompetitionFilter,
        page: PageRequest,
    ) -> Result<Page<Competition>>;

    /// Looks a competition up by id regardless of its visibility.
    async fn find_by_id(&self, id: &str) -> Result<Option<Competition>>;
}
