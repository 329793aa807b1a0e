//! # API REST
//!
//! REST surface for the rxsum summary engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Every endpoint is a stateless passthrough to the engine: nothing is
//! persisted here. Uses `api-shared` for the wire types.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    DisplaySummaryReq, DisplaySummaryRes, ExtractReq, ExtractRes, GenerateSummaryReq,
    GenerateSummaryRes, HealthRes, HealthService,
};
use rxsum_core::SummaryService;

/// Application state shared across REST API handlers.
///
/// Holds the summary engine as an explicit value; there is no process-wide
/// service instance.
#[derive(Clone, Default)]
pub struct AppState {
    pub summary_service: SummaryService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, extract_prescription, generate_summary, display_summary),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ExtractReq,
        api_shared::ExtractRes,
        api_shared::GenerateSummaryReq,
        api_shared::GenerateSummaryRes,
        api_shared::DisplaySummaryReq,
        api_shared::DisplaySummaryRes,
        rxsum_core::ClinicalFields,
        rxsum_core::Medicine,
        rxsum_core::ProvenanceLink,
        rxsum_core::AnnotatedSummary,
        rxsum_core::DisplaySegment,
    ))
)]
struct ApiDoc;

/// Builds the REST router with all endpoints, Swagger UI, and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/prescriptions/extract", post(extract_prescription))
        .route("/summaries/generate", post(generate_summary))
        .route("/summaries/display", post(display_summary))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/prescriptions/extract",
    request_body = ExtractReq,
    responses(
        (status = 200, description = "Extracted clinical fields", body = ExtractRes),
        (status = 422, description = "Empty document text")
    )
)]
/// Extract structured clinical fields from prescription text
///
/// Runs the deterministic pattern-matching extractor over the submitted
/// document. Extraction never fails: content the template rules do not match
/// leaves the corresponding fields at their defaults.
#[axum::debug_handler]
async fn extract_prescription(
    State(state): State<AppState>,
    Json(req): Json<ExtractReq>,
) -> Json<ExtractRes> {
    let fields = state.summary_service.extract(req.text.as_str());
    Json(ExtractRes { fields })
}

#[utoipa::path(
    post,
    path = "/summaries/generate",
    request_body = GenerateSummaryReq,
    responses(
        (status = 200, description = "Generated summary with provenance", body = GenerateSummaryRes),
        (status = 422, description = "Empty source identifier")
    )
)]
/// Generate a provenance-annotated summary for a clinical record
///
/// Renders the narrative, its provenance link list, and the display segments
/// in one pass. The caller (or the storage collaborator) is responsible for
/// persisting the result; this endpoint keeps nothing.
#[axum::debug_handler]
async fn generate_summary(
    State(state): State<AppState>,
    Json(req): Json<GenerateSummaryReq>,
) -> Json<GenerateSummaryRes> {
    let summary = state
        .summary_service
        .annotate(&req.fields, req.source_id.as_str());
    let segments = state
        .summary_service
        .reconstruct(&summary.summary_text, &summary.provenance_links);

    tracing::debug!(
        source_id = req.source_id.as_str(),
        links = summary.provenance_links.len(),
        "generated summary"
    );

    Json(GenerateSummaryRes {
        id: Uuid::new_v4(),
        patient_name: req.fields.patient_name,
        summary_text: summary.summary_text,
        provenance_links: summary.provenance_links,
        segments,
        generated_at: Utc::now(),
    })
}

#[utoipa::path(
    post,
    path = "/summaries/display",
    request_body = DisplaySummaryReq,
    responses(
        (status = 200, description = "Display segments", body = DisplaySummaryRes)
    )
)]
/// Re-derive display segments from a stored summary
///
/// Accepts the (summary text, provenance links) pair exactly as persisted at
/// generation time and re-parses the markup into ordered display segments.
/// Spans that no longer resolve against the link list are returned with
/// `provenance: null` rather than rejected.
#[axum::debug_handler]
async fn display_summary(
    State(state): State<AppState>,
    Json(req): Json<DisplaySummaryReq>,
) -> Json<DisplaySummaryRes> {
    let segments = state
        .summary_service
        .reconstruct(&req.summary_text, &req.provenance_links);
    Json(DisplaySummaryRes { segments })
}
