use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::services::ServeDir;

use crate::api::{error_status, ApiAnalysisResponse, ApiAnalyzeQuery, ApiReportLinks};
use competitor_metrics::config::AnalyzerConfig;
use competitor_metrics::report::ReportWriter;
use competitor_metrics::{analyze, Dataset, RawDataset};

#[derive(Clone)]
struct AppState {
    config: Arc<AnalyzerConfig>,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, _) = AnalyzerConfig::load(args.config).map_err(|err| err.to_string())?;
    let report_dir = config.reports.output_dir.clone();
    let state = AppState {
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .nest_service("/reports", ServeDir::new(&report_dir))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, reports = %report_dir.display(), "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Query(query): Query<ApiAnalyzeQuery>,
    Json(raw): Json<RawDataset>,
) -> Result<Json<ApiAnalysisResponse>, (StatusCode, String)> {
    let dataset = Dataset::from_raw(raw);
    let result = analyze(&dataset, &state.config)
        .map_err(|err| (error_status(&err), err.to_string()))?;

    let mut warnings = Vec::new();
    let reports = if query.reports.unwrap_or(false) {
        let writer = ReportWriter::for_request(state.config.reports.clone(), &result);
        match writer.write_all(&result) {
            Ok(paths) => Some(ApiReportLinks::from_paths(&paths)),
            Err(err) => {
                tracing::warn!(error = %err, "report writing failed");
                warnings.push(format!("report writing failed: {}", err));
                None
            }
        }
    } else {
        None
    };

    let mut response = ApiAnalysisResponse::from_result(result, warnings);
    response.reports = reports;
    Ok(Json(response))
}
