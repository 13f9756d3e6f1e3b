//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use engage_heatmap::{
    aggregate, day_labels, export_file_name, hour_labels, offset_from_minutes, parse_samples,
    should_animate, to_csv_string, AggregationStats, HeatmapError, HeatmapRow, ParsedSamples,
    Period, PeriodPreset, TimezoneMode,
};
use engage_teams::{check_params, EndpointDescriptor, TeamRef, TeamsEndpoint};

use crate::AppState;

type ApiError = (StatusCode, String);

fn bad_request(err: HeatmapError) -> ApiError {
    (StatusCode::BAD_REQUEST, err.to_string())
}

/// Request body for the users-by-time-of-the-day endpoints
///
/// `week` holds the records returned by the aggregation backend for
/// `start`/`end`; records that do not decode are skipped.
#[derive(Debug, Deserialize)]
pub struct UsersByTimeOfDayRequest {
    pub start: String,
    pub end: String,
    pub timezone: Option<TimezoneMode>,
    pub utc_offset_minutes: Option<i32>,
    #[serde(default)]
    pub week: Vec<Value>,
}

struct ResolvedRequest {
    period: Period,
    mode: TimezoneMode,
    offset: FixedOffset,
    parsed: ParsedSamples,
}

impl UsersByTimeOfDayRequest {
    fn resolve(&self, state: &AppState) -> Result<ResolvedRequest, ApiError> {
        let period = Period::parse(&self.start, &self.end).map_err(bad_request)?;
        period
            .ensure_max_days(state.config.heatmap.max_period_days)
            .map_err(bad_request)?;
        let offset = match self.utc_offset_minutes {
            Some(minutes) => offset_from_minutes(minutes).map_err(bad_request)?,
            None => state.default_offset,
        };

        Ok(ResolvedRequest {
            period,
            mode: self.timezone.unwrap_or(state.config.heatmap.timezone),
            offset,
            parsed: parse_samples(&self.week),
        })
    }
}

/// The busiest cell of a heatmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakCell {
    pub hour: usize,
    /// Column key of the cell
    pub date: String,
    pub users: u64,
}

/// Heatmap data ready for the renderer
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersByTimeOfDayResponse {
    /// Column keys, ascending
    pub dates: Vec<String>,
    /// One row per hour, indexed by `hour`
    pub values: Vec<HeatmapRow>,
    pub day_labels: Vec<String>,
    pub hour_labels: Vec<String>,
    pub animate: bool,
    /// `None` when every cell is zero
    pub peak: Option<PeakCell>,
    pub stats: AggregationStats,
}

/// Bucket posted samples into the hour × date grid
pub async fn users_by_time_of_day(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UsersByTimeOfDayRequest>,
) -> Result<Json<UsersByTimeOfDayResponse>, ApiError> {
    let resolved = request.resolve(&state)?;
    let heatmap = aggregate(
        &resolved.period,
        resolved.mode,
        resolved.offset,
        &resolved.parsed.samples,
    );

    let mut stats = heatmap.stats;
    stats.malformed += resolved.parsed.malformed;

    let dates = heatmap.grid.column_keys();
    let peak = heatmap.grid.peak().and_then(|(hour, column, users)| {
        dates.get(column).map(|date| PeakCell {
            hour,
            date: date.clone(),
            users,
        })
    });

    Ok(Json(UsersByTimeOfDayResponse {
        dates,
        values: heatmap.grid.rows(),
        day_labels: day_labels(heatmap.grid.columns(), heatmap.zone),
        hour_labels: hour_labels(),
        animate: should_animate(heatmap.grid.column_count()),
        peak,
        stats,
    }))
}

/// Download the raw samples as CSV
///
/// The viewer offset applies in both timezone modes.
pub async fn users_by_time_of_day_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UsersByTimeOfDayRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resolved = request.resolve(&state)?;
    let body = to_csv_string(&resolved.parsed.samples, resolved.offset)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&resolved.period)
    );

    tracing::debug!(
        rows = resolved.parsed.samples.len(),
        skipped = resolved.parsed.malformed,
        "exporting users by time of day"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Query for period presets
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub timezone: Option<TimezoneMode>,
    pub utc_offset_minutes: Option<i32>,
}

/// A resolved period preset
#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub key: String,
    pub start: String,
    pub end: String,
    pub timezone: TimezoneMode,
    pub columns: usize,
}

/// Resolve a period preset relative to now
pub async fn get_period(
    State(state): State<Arc<AppState>>,
    Path(preset): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PeriodResponse>, ApiError> {
    let preset: PeriodPreset = preset
        .parse()
        .map_err(|e: HeatmapError| (StatusCode::NOT_FOUND, e.to_string()))?;
    let mode = query.timezone.unwrap_or(state.config.heatmap.timezone);
    let offset = match query.utc_offset_minutes {
        Some(minutes) => offset_from_minutes(minutes).map_err(bad_request)?,
        None => state.default_offset,
    };

    let period = preset.range(Utc::now(), mode, offset).map_err(bad_request)?;
    Ok(Json(PeriodResponse {
        key: preset.key().to_string(),
        start: period.start_iso(),
        end: period.end_iso(),
        timezone: mode,
        columns: period.column_count(mode),
    }))
}

/// The full Teams contract table
pub async fn list_contracts() -> Json<Vec<EndpointDescriptor>> {
    Json(
        TeamsEndpoint::ALL
            .into_iter()
            .map(TeamsEndpoint::descriptor)
            .collect(),
    )
}

fn lookup_endpoint(name: &str) -> Result<TeamsEndpoint, ApiError> {
    name.parse()
        .map_err(|e: engage_teams::ContractError| (StatusCode::NOT_FOUND, e.to_string()))
}

/// One endpoint's contract
pub async fn get_contract(Path(name): Path<String>) -> Result<Json<EndpointDescriptor>, ApiError> {
    lookup_endpoint(&name).map(|endpoint| Json(endpoint.descriptor()))
}

/// Result of checking parameters against a contract
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub success: bool,
    pub endpoint: String,
    /// The team the parameters address, if any
    pub team: Option<TeamRef>,
    /// Fields the endpoint does not declare; they are passed through unchecked
    pub ignored_fields: Vec<String>,
}

/// Check untyped parameters against an endpoint contract
pub async fn check_contract(
    Path(name): Path<String>,
    Json(params): Json<Value>,
) -> Result<Json<CheckResponse>, ApiError> {
    let endpoint = lookup_endpoint(&name)?;
    check_params(endpoint, &params)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let descriptor = endpoint.descriptor();
    let ignored_fields: Vec<String> = params
        .as_object()
        .map(|obj| {
            obj.keys()
                .filter(|field| !descriptor.accepts_field(field))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(CheckResponse {
        success: true,
        endpoint: endpoint.name().to_string(),
        team: TeamRef::from_params(&params),
        ignored_fields,
    }))
}

/// Service status and configured defaults
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "service": "engage-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timezone": state.config.heatmap.timezone,
        "utc_offset_minutes": state.config.heatmap.utc_offset_minutes,
        "endpoints": TeamsEndpoint::ALL.len(),
    }))
}
