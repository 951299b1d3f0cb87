use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::CompetitionStore;
use crate::dto::common::{Page, PageRequest};
use crate::dto::competition::CompetitionFilter;
use crate::error::Result;
use crate::models::competition::CompetitionRow;
use crate::models::{Competition, UserRef};

const COMPETITION_COLUMNS: &str = r#"
    c.id, c.name, c.short_name, c.country_id, c.city_name, c.venue, c.venue_address,
    c.latitude_microdegrees, c.longitude_microdegrees, c.website,
    c.start_date, c.end_date, c.show_at_all, c.confirmed
"#;

#[derive(FromRow)]
struct StaffRow {
    competition_id: String,
    role: String,
    id: i64,
    name: String,
    wca_id: Option<String>,
    country_iso2: Option<String>,
    email: Option<String>,
}

#[derive(FromRow)]
struct EventRow {
    competition_id: String,
    event_id: String,
}

/// PostgreSQL-backed competition store
#[derive(Debug, Clone)]
pub struct CompetitionRepository {
    pool: PgPool,
}

impl CompetitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, filter: &CompetitionFilter) -> Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM competitions c WHERE 1=1");
        push_filter(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Loads staff and events for a batch of rows, preserving row order.
    async fn attach_details(&self, rows: Vec<CompetitionRow>) -> Result<Vec<Competition>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();

        let staff: Vec<StaffRow> = sqlx::query_as(
            r#"
            SELECT s.competition_id, s.role, u.id, u.name, u.wca_id, u.country_iso2, u.email
            FROM (
                SELECT competition_id, user_id, 'delegate' AS role FROM competition_delegates
                UNION ALL
                SELECT competition_id, user_id, 'organizer' AS role FROM competition_organizers
            ) s
            INNER JOIN users u ON u.id = s.user_id
            WHERE s.competition_id = ANY($1)
            ORDER BY u.name, u.id
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let events: Vec<EventRow> = sqlx::query_as(
            r#"
            SELECT competition_id, event_id
            FROM competition_events
            WHERE competition_id = ANY($1)
            ORDER BY position, event_id
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let mut delegates: HashMap<String, Vec<UserRef>> = HashMap::new();
        let mut organizers: HashMap<String, Vec<UserRef>> = HashMap::new();
        for row in staff {
            let user = UserRef {
                id: row.id,
                name: row.name,
                wca_id: row.wca_id,
                country_iso2: row.country_iso2,
                email: row.email,
            };
            let target = if row.role == "delegate" {
                &mut delegates
            } else {
                &mut organizers
            };
            target.entry(row.competition_id).or_default().push(user);
        }

        let mut event_ids: HashMap<String, Vec<String>> = HashMap::new();
        for row in events {
            event_ids
                .entry(row.competition_id)
                .or_default()
                .push(row.event_id);
        }

        let competitions = rows
            .into_iter()
            .map(|row| {
                let d = delegates.remove(&row.id).unwrap_or_default();
                let o = organizers.remove(&row.id).unwrap_or_default();
                let e = event_ids.remove(&row.id).unwrap_or_default();
                row.into_competition(d, o, e)
            })
            .collect();

        Ok(competitions)
    }
}

#[async_trait]
impl CompetitionStore for CompetitionRepository {
    async fn search(
        &self,
        filter: &CompetitionFilter,
        page: PageRequest,
    ) -> Result<Page<Competition>> {
        let total = self.count(filter).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(COMPETITION_COLUMNS);
        query.push(" FROM competitions c WHERE 1=1");
        push_filter(&mut query, filter);

        // `competitions.id` is declared with the "C" collation, so the tiebreak
        // is byte-ordered and served by `competitions_start_date_id_idx`.
        query.push(" ORDER BY c.start_date DESC, c.id ASC LIMIT ");
        query.push_bind(i64::from(page.limit));
        query.push(" OFFSET ");
        query.push_bind(i64::from(page.offset));

        let rows: Vec<CompetitionRow> = query.build_query_as().fetch_all(&self.pool).await?;

        tracing::debug!(total, returned = rows.len(), offset = page.offset, "competition search");

        let competitions = self.attach_details(rows).await?;

        Ok(Page::new(competitions, total, page))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Competition>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(COMPETITION_COLUMNS);
        query.push(" FROM competitions c WHERE c.id = ");
        query.push_bind(id.to_string());

        let row: Option<CompetitionRow> = query.build_query_as().fetch_optional(&self.pool).await?;

        match row {
            Some(row) => Ok(self.attach_details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

/// Appends the listing predicates. Mirrors `CompetitionFilter::matches`.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &CompetitionFilter) {
    query.push(" AND c.show_at_all AND c.confirmed");

    if let Some(ref country_id) = filter.country_id {
        query.push(" AND c.country_id = ");
        query.push_bind(country_id.clone());
    }

    if let Some(start) = filter.start {
        query.push(" AND c.end_date >= ");
        query.push_bind(start);
    }

    if let Some(end) = filter.end {
        query.push(" AND c.start_date <= ");
        query.push_bind(end);
    }

    if let Some(user_id) = filter.managed_by {
        query.push(
            " AND (EXISTS (SELECT 1 FROM competition_delegates d WHERE d.competition_id = c.id AND d.user_id = ",
        );
        query.push_bind(user_id);
        query.push(
            ") OR EXISTS (SELECT 1 FROM competition_organizers o WHERE o.competition_id = c.id AND o.user_id = ",
        );
        query.push_bind(user_id);
        query.push("))");
    }

    if let Some(ref search) = filter.search {
        for term in search.terms() {
            let pattern = format!("%{}%", escape_like(term));
            let columns = [
                "c.id",
                "c.name",
                "c.city_name",
                "COALESCE(c.venue, '')",
                "COALESCE(c.venue_address, '')",
            ];

            query.push(" AND (");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    query.push(" OR ");
                }
                query.push(*column);
                query.push(" ILIKE ");
                query.push_bind(pattern.clone());
            }
            query.push(")");
        }
    }
}

/// Escapes LIKE wildcards so search terms match literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
