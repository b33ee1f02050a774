//! Measurement Routes
//!
//! The two read endpoints of the service.
//!
//! - GET /api/measurements - Range-filtered, paginated readings
//! - GET /api/measurements/metrics - Summary statistics over the same filter
//!
//! Validation runs before any storage access; both endpoints share the
//! same parameter set and the same filter normalization.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ListResponse, MeasurementParams, MetricsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::query::{Filter, Page, QueryError};

/// GET /api/measurements
///
/// Returns one time-ascending page of (timestamp, value) pairs for the
/// selected field. 400 on validation failure, 404 when the page holds no
/// records.
pub async fn list_measurements(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MeasurementParams>,
) -> ApiResult<Json<ListResponse>> {
    let filter = normalize(&params)?;
    let page = Page::new(params.page, params.limit);

    let result = state.engine.list_page(&filter, page).await?;
    Ok(Json(result.into()))
}

/// GET /api/measurements/metrics
///
/// Returns count, average, min, max and population standard deviation over
/// every qualifying value matching the filter. No pagination.
pub async fn measurement_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MeasurementParams>,
) -> ApiResult<Json<MetricsResponse>> {
    let filter = normalize(&params)?;

    let summary = state.engine.aggregate(&filter).await?;
    Ok(Json(summary.into()))
}

fn normalize(params: &MeasurementParams) -> Result<Filter, QueryError> {
    Filter::normalize(
        params.field.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )
    .map_err(QueryError::from)
}
