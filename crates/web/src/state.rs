use std::sync::Arc;

use crate::features::competitions::services::CompetitionQueryService;
use crate::middleware::auth::AccessTokens;

#[derive(Clone)]
pub struct AppState {
    pub competitions: CompetitionQueryService,
    pub tokens: Arc<AccessTokens>,
    pub public_url: Arc<str>,
}
