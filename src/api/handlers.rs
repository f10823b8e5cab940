//! API Handlers
//!
//! HTTP request handlers for each directory endpoint.

use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::config::Config;
use crate::error::{DirectoryError, Result};
use crate::models::{
    BulkCreateResponse, BulkQuery, CountResponse, CreateRecordRequest, HealthResponse, ListQuery,
    MessageResponse, Record, StatsResponse,
};
use crate::service::DirectoryService;

/// Header reporting whether a listing was served from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: DirectoryService,
    /// Records generated by the bulk endpoint when no count is given
    pub bulk_record_count: usize,
    /// Largest count the bulk endpoint accepts
    pub max_bulk_record_count: usize,
}

impl AppState {
    /// Creates a new AppState around a directory service.
    pub fn new(
        directory: DirectoryService,
        bulk_record_count: usize,
        max_bulk_record_count: usize,
    ) -> Self {
        Self {
            directory,
            bulk_record_count,
            max_bulk_record_count,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DirectoryService::from_config(config),
            config.bulk_record_count,
            config.max_bulk_record_count,
        )
    }
}

/// Handler for GET /api/fetch-users
///
/// Returns one page of records, served from the cache when possible.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let limits = state.directory.limits();
    let page = query.page.unwrap_or(1);
    let size = query.page_size.unwrap_or(i64::from(limits.default_size));

    let listing = state.directory.list(page, size).await?;

    let mut response = Json(&*listing.page).into_response();
    response.headers_mut().insert(
        CACHE_STATUS_HEADER,
        HeaderValue::from_static(listing.status.as_str()),
    );
    Ok(response)
}

/// Handler for POST /api/create-users
///
/// Creates one record and returns it with its assigned id and timestamp.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<Record>)> {
    if let Some(error_msg) = req.validate() {
        return Err(DirectoryError::InvalidRequest(error_msg));
    }

    let record = state.directory.create(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for POST /api/create-bulk-users
///
/// Generates and ingests a batch of random records.
pub async fn bulk_create_handler(
    State(state): State<AppState>,
    Query(query): Query<BulkQuery>,
) -> Result<Json<BulkCreateResponse>> {
    let count = query.count.unwrap_or(state.bulk_record_count);
    if count > state.max_bulk_record_count {
        return Err(DirectoryError::InvalidRequest(format!(
            "count {} exceeds the maximum of {} records per bulk request",
            count, state.max_bulk_record_count
        )));
    }

    let summary = state.directory.create_generated(count).await?;

    Ok(Json(BulkCreateResponse::new(
        summary.inserted,
        summary.elapsed.as_secs_f64(),
    )))
}

/// Handler for DELETE /api/clear-cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    let removed = state.directory.clear_cache().await;
    Json(MessageResponse::cache_cleared(removed))
}

/// Handler for GET /api/users/count
pub async fn count_handler(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let total_records = state.directory.count().await?;
    Ok(Json(CountResponse { total_records }))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.directory.cache_stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRecord;

    fn state() -> AppState {
        AppState::from_config(&Config::default())
    }

    #[tokio::test]
    async fn test_create_and_count_handler() {
        let state = state();

        let req = NewRecord::new("Test User", 31, "test@example.com");
        let (status, record) = create_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record.id, 1);

        let count = count_handler(State(state)).await.unwrap();
        assert_eq!(count.total_records, 1);
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let req = NewRecord::new("", 31, "test@example.com");
        let result = create_handler(State(state()), Json(req)).await;
        assert!(matches!(result, Err(DirectoryError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_bulk_handler_uses_query_count() {
        let state = state();

        let response = bulk_create_handler(
            State(state.clone()),
            Query(BulkQuery { count: Some(150) }),
        )
        .await
        .unwrap();
        assert_eq!(response.count, 150);
        assert_eq!(state.directory.count().await.unwrap(), 150);
    }

    #[tokio::test]
    async fn test_bulk_handler_rejects_count_over_ceiling() {
        let state = state();

        let result = bulk_create_handler(
            State(state.clone()),
            Query(BulkQuery {
                count: Some(usize::MAX),
            }),
        )
        .await;
        assert!(matches!(result, Err(DirectoryError::InvalidRequest(_))));
        assert_eq!(state.directory.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_handler_sets_cache_header() {
        let state = state();

        let first = list_handler(State(state.clone()), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(first.headers()[CACHE_STATUS_HEADER], "MISS");

        let second = list_handler(State(state), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(second.headers()[CACHE_STATUS_HEADER], "HIT");
    }

    #[tokio::test]
    async fn test_stats_and_health_handlers() {
        let stats = stats_handler(State(state())).await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);

        let health = health_handler().await;
        assert_eq!(health.status, "healthy");
    }
}
