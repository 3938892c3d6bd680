use crate::infra::AppState;
use crate::report::{DataSourceKind, DataSourceView, ReportResponse};
use attrition_insight::error::AppError;
use attrition_insight::workflows::attrition::export::{
    recommendations_text, records_csv, statistics_csv,
};
use attrition_insight::workflows::attrition::{analyze_filtered, AttritionReport, RecordFilter};
use attrition_insight::workflows::dataset::parse_records;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Deserialize)]
pub(crate) struct UploadReportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) filter: RecordFilter,
}

pub(crate) fn attrition_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/attrition/report",
            get(report_endpoint).post(upload_report_endpoint),
        )
        .route("/api/v1/attrition/export/data.csv", get(export_data_endpoint))
        .route(
            "/api/v1/attrition/export/statistics.csv",
            get(export_statistics_endpoint),
        )
        .route(
            "/api/v1/attrition/export/recommendations.txt",
            get(export_recommendations_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn configured_report(state: &AppState, filter: &RecordFilter) -> AttritionReport {
    analyze_filtered(&state.dataset.records, filter, &state.policy)
}

fn configured_source(state: &AppState) -> DataSourceView {
    DataSourceView {
        kind: DataSourceKind::Configured,
        description: state.dataset.description.clone(),
        total_records: state.dataset.records.len(),
    }
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Query(filter): Query<RecordFilter>,
) -> Json<ReportResponse> {
    let report = configured_report(&state, &filter);
    Json(ReportResponse::build(report, configured_source(&state), filter))
}

pub(crate) async fn upload_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<UploadReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let UploadReportRequest { csv, filter } = payload;

    let records = parse_records(Cursor::new(csv.into_bytes())).map_err(|err| {
        tracing::warn!(error = %err, "rejected uploaded departure CSV");
        err
    })?;

    let report = analyze_filtered(&records, &filter, &state.policy);
    let data_source = DataSourceView {
        kind: DataSourceKind::Upload,
        description: "uploaded CSV".to_string(),
        total_records: records.len(),
    };
    Ok(Json(ReportResponse::build(report, data_source, filter)))
}

fn attachment(content_type: &'static str, filename: &str, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

pub(crate) async fn export_data_endpoint(
    Extension(state): Extension<AppState>,
    Query(filter): Query<RecordFilter>,
) -> Result<impl IntoResponse, AppError> {
    let report = configured_report(&state, &filter);
    let body = records_csv(&report.records)?;
    Ok(attachment(CSV_CONTENT_TYPE, "attrition_data.csv", body))
}

pub(crate) async fn export_statistics_endpoint(
    Extension(state): Extension<AppState>,
    Query(filter): Query<RecordFilter>,
) -> Result<impl IntoResponse, AppError> {
    let report = configured_report(&state, &filter);
    let body = statistics_csv(&report.summary)?;
    Ok(attachment(CSV_CONTENT_TYPE, "attrition_statistics.csv", body))
}

pub(crate) async fn export_recommendations_endpoint(
    Extension(state): Extension<AppState>,
    Query(filter): Query<RecordFilter>,
) -> impl IntoResponse {
    let report = configured_report(&state, &filter);
    attachment(
        TEXT_CONTENT_TYPE,
        "attrition_recommendations.txt",
        recommendations_text(&report.recommendations),
    )
}
