use axum::{
    Json,
    extract::{Path, Query, RawQuery, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use storage::dto::{
    competition::{
        CompetitionDetail, CompetitionFilterParams, CompetitionSummary, InvalidParam,
        ListCompetitionsParams,
    },
    wcif::WcifCompetition,
};

use crate::error::WebError;
use crate::middleware::auth::Caller;
use crate::pagination::link_header;
use crate::state::AppState;

pub const COMPETITIONS_PATH: &str = "/api/v0/competitions";

const TOTAL: &str = "total";
const PER_PAGE: &str = "per-page";

#[utoipa::path(
    get,
    path = "/api/v0/competitions",
    params(
        CompetitionFilterParams,
        ("per_page" = Option<String>, Query, description = "Page size, capped at the configured maximum"),
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("cursor" = Option<String>, Query, description = "Continuation token taken from a `Link` header")
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Page of visible competitions, most recent first. `Link` carries the next and previous pages.", body = Vec<CompetitionSummary>),
        (status = 401, description = "Unknown access token"),
        (status = 422, description = "Invalid filter or pagination parameter")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    caller: Caller,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<ListCompetitionsParams>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!("Rejected competition query string: {}", rejection.body_text());
        InvalidParam::new("query", raw_query.unwrap_or_default())
    })?;

    let listing = state.competitions.list(params, &caller).await?;

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(TOTAL), HeaderValue::from(listing.page.total));
    headers.insert(HeaderName::from_static(PER_PAGE), HeaderValue::from(listing.page.request.limit));

    let mut links = Vec::new();
    if let Some(ref next) = listing.next_cursor {
        links.push(("next", next.as_str()));
    }
    if let Some(ref prev) = listing.prev_cursor {
        links.push(("prev", prev.as_str()));
    }

    if let Some(link) = link_header(&state.public_url, COMPETITIONS_PATH, &links) {
        let value = HeaderValue::from_str(&link)
            .map_err(|e| WebError::InternalServerError(format!("Invalid Link header: {e}")))?;
        headers.insert(axum::http::header::LINK, value);
    }

    Ok((headers, Json(listing.page.items)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/competitions/{competition_id}",
    params(
        ("competition_id" = String, Path, description = "Competition id")
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionDetail),
        (status = 401, description = "Unknown access token"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(state): State<AppState>,
    caller: Caller,
    Path(competition_id): Path<String>,
) -> Result<Json<CompetitionDetail>, WebError> {
    let competition = state.competitions.show(&competition_id, &caller).await?;

    Ok(Json(competition))
}

#[utoipa::path(
    get,
    path = "/api/v0/competitions/{competition_id}/wcif",
    params(
        ("competition_id" = String, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "WCIF document", body = WcifCompetition),
        (status = 401, description = "Unknown access token"),
        (status = 403, description = "Missing manage_competitions scope or not staff of the competition"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition_wcif(
    State(state): State<AppState>,
    caller: Caller,
    Path(competition_id): Path<String>,
) -> Result<Json<WcifCompetition>, WebError> {
    let document = state.competitions.wcif(&competition_id, &caller).await?;

    Ok(Json(document))
}

#[utoipa::path(
    get,
    path = "/api/v0/competitions/{competition_id}/wcif/public",
    params(
        ("competition_id" = String, Path, description = "Competition id")
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "WCIF document without contact details", body = WcifCompetition),
        (status = 401, description = "Unknown access token"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition_public_wcif(
    State(state): State<AppState>,
    caller: Caller,
    Path(competition_id): Path<String>,
) -> Result<Json<WcifCompetition>, WebError> {
    let document = state
        .competitions
        .public_wcif(&competition_id, &caller)
        .await?;

    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::api_router;
    use crate::features::competitions::test_support::state;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn get(uri: &str, token: Option<&str>) -> (StatusCode, HeaderMap, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = api_router(state())
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }

    fn ids(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect()
    }

    fn next_link(headers: &HeaderMap) -> Option<String> {
        let link = headers.get(header::LINK)?.to_str().unwrap();
        link.split(", ")
            .find(|part| part.ends_with("rel=\"next\""))
            .map(|part| {
                let start = part.find('<').unwrap() + 1;
                let end = part.find('>').unwrap();
                part[start..end].to_string()
            })
    }

    #[tokio::test]
    async fn test_list_with_date_window() {
        let (status, headers, body) = get(
            "/api/v0/competitions?start=2015-02-01&end=2016-02-15",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["Feb2016", "Feb2015"]);
        assert_eq!(body[0]["start_date"], "2016-02-01");
        assert_eq!(headers.get("total").unwrap(), "2");
        assert!(headers.get(header::LINK).is_none());
    }

    #[tokio::test]
    async fn test_list_paginates_with_link_header() {
        let (status, headers, body) = get("/api/v0/competitions?per_page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["Mar2016", "Feb2016"]);
        assert_eq!(headers.get("per-page").unwrap(), "2");
        assert_eq!(headers.get("total").unwrap(), "3");

        let next = next_link(&headers).unwrap();
        let path = next.strip_prefix("http://localhost:3000").unwrap();
        assert!(path.starts_with("/api/v0/competitions?cursor="));

        let (status, headers, body) = get(path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["Feb2015"]);
        assert!(next_link(&headers).is_none());
        let link = headers.get(header::LINK).unwrap().to_str().unwrap();
        assert!(link.ends_with("rel=\"prev\""));
    }

    #[tokio::test]
    async fn test_invalid_country_is_unprocessable() {
        let (status, _, body) = get("/api/v0/competitions?country_iso2=XX", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "error": "Invalid country_iso2: 'XX'" }));
    }

    #[tokio::test]
    async fn test_invalid_date_is_unprocessable() {
        let (status, _, body) = get("/api/v0/competitions?start=2015-02-31", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "error": "Invalid start: '2015-02-31'" }));
    }

    #[tokio::test]
    async fn test_malformed_query_string_is_unprocessable() {
        let (status, headers, body) =
            get("/api/v0/competitions?per_page=1&per_page=2", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(body, json!({ "error": "Invalid query: 'per_page=1&per_page=2'" }));
    }

    #[tokio::test]
    async fn test_plaintext_query_with_country() {
        let (status, _, body) = get("/api/v0/competitions?q=winter&country_iso2=DE", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["Feb2016"]);
    }

    #[tokio::test]
    async fn test_managed_by_me_without_scope_is_empty() {
        let (status, _, body) =
            get("/api/v0/competitions?managed_by_me=true", Some("dana-public")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _, body) =
            get("/api/v0/competitions?managed_by_me=true", Some("dana-manage")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["Feb2016"]);
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let (status, _, body) = get("/api/v0/competitions", Some("forged")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_show_missing_and_hidden_look_identical() {
        let (missing_status, _, missing) = get("/api/v0/competitions/Nope2016", None).await;
        let (hidden_status, _, hidden) = get("/api/v0/competitions/Hidden2016", None).await;

        assert_eq!(missing_status, StatusCode::NOT_FOUND);
        assert_eq!(hidden_status, StatusCode::NOT_FOUND);
        assert_eq!(missing, json!({ "error": "Competition with id Nope2016 not found" }));
        assert_eq!(hidden, json!({ "error": "Competition with id Hidden2016 not found" }));
    }

    #[tokio::test]
    async fn test_show_competition() {
        let (status, _, body) = get("/api/v0/competitions/Feb2016", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "Feb2016");
        assert_eq!(body["country_iso2"], "DE");
        assert_eq!(body["venue"], "Rathaus");
        assert_eq!(body["delegates"][0]["wca_id"], "2009DANA01");
        assert!(body["delegates"][0].get("email").is_none());

        let (status, _, body) = get("/api/v0/competitions/Hidden2016", Some("dana-public")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "Hidden2016");
    }

    #[tokio::test]
    async fn test_wcif_for_own_hidden_competition() {
        let (status, _, body) =
            get("/api/v0/competitions/Hidden2016/wcif", Some("dana-manage")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["formatVersion"], "1.0");
        assert_eq!(body["id"], "Hidden2016");
        assert_eq!(body["persons"][0]["email"], "dana@example.com");
        assert_eq!(body["schedule"]["venues"][0]["name"], "Kongresshalle");
    }

    #[tokio::test]
    async fn test_wcif_without_scope_is_forbidden() {
        let (status, _, body) =
            get("/api/v0/competitions/Hidden2016/wcif", Some("dana-public")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "error": "Missing required scope 'manage_competitions'" }));
    }

    #[tokio::test]
    async fn test_wcif_existence_is_hidden_from_strangers() {
        let (status, _, _) =
            get("/api/v0/competitions/Hidden2016/wcif", Some("stranger-manage")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get("/api/v0/competitions/Feb2016/wcif", Some("stranger-manage")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_public_wcif() {
        let (status, _, body) = get("/api/v0/competitions/Feb2015/wcif/public", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "Feb2015");
        assert_eq!(body["persons"].as_array().unwrap().len(), 2);
        assert!(body["persons"][1].get("email").is_none());
    }
}
