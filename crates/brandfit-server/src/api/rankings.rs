use axum::{
    extract::{Query, State},
    Extension, Json,
};
use brandfit_core::BrandConfig;
use brandfit_ranking::{run_pipeline, RankingRequest, RankingTable, Weight};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_ranking_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Query string shared by the JSON endpoint and the dashboard page.
///
/// Values are taken as raw strings so that malformed input is reported as a
/// `validation_error` instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RankingQuery {
    pub brand: Option<String>,
    pub weight: Option<String>,
    pub show_reasons: Option<String>,
}

/// Validated ranking parameters.
#[derive(Debug, Clone)]
pub(super) struct RankingParams {
    pub brand: BrandConfig,
    pub weight: Weight,
    pub show_reasons: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct RankingData {
    title: String,
    headers: Vec<&'static str>,
    #[serde(flatten)]
    table: RankingTable,
}

/// Resolve the query against the configured brands. An absent brand selects
/// the first configured one; an absent weight is [`Weight::DEFAULT`].
pub(super) fn resolve_params(state: &AppState, query: &RankingQuery) -> Result<RankingParams, String> {
    let brand = match query.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        Some(name) => state.brands.find(name).ok_or_else(|| {
            format!(
                "unknown brand '{name}' (configured: {})",
                state.brands.names().join(", ")
            )
        })?,
        None => state
            .brands
            .brands
            .first()
            .ok_or_else(|| "no brands configured".to_string())?,
    };

    let weight = match query.weight.as_deref().map(str::trim).filter(|w| !w.is_empty()) {
        Some(raw) => {
            let value: f64 = raw
                .parse()
                .map_err(|_| format!("weight must be a number, got '{raw}'"))?;
            Weight::new(value).map_err(|e| e.to_string())?
        }
        None => Weight::default(),
    };

    Ok(RankingParams {
        brand: brand.clone(),
        weight,
        show_reasons: parse_flag(query.show_reasons.as_deref()),
    })
}

/// HTML checkboxes submit `on` (or the `value` attribute); the JSON API
/// accepts `true`/`1` as well.
fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "on" | "yes")
    )
}

/// Run the ranking pipeline on the blocking pool.
pub(super) async fn load_table(
    state: &AppState,
    params: &RankingParams,
    request_id: &str,
) -> Result<RankingTable, ApiError> {
    let request = RankingRequest::new(
        &params.brand.name,
        params.weight,
        &state.config.data_dir,
        &state.config.image_dir,
    )
    .with_reasons(params.show_reasons);

    let outcome = tokio::task::spawn_blocking(move || run_pipeline(&request))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "ranking task panicked");
            ApiError::new(request_id, "internal_error", "ranking task failed")
        })?;

    outcome.map_err(|e| map_ranking_error(request_id.to_string(), &e))
}

pub(super) fn page_title(brand: &BrandConfig) -> String {
    format!("{} Influencer Analysis", brand.title())
}

pub(super) async fn get_rankings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<ApiResponse<RankingData>>, ApiError> {
    let params = resolve_params(&state, &query)
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;

    let table = load_table(&state, &params, &req_id.0).await?;
    tracing::debug!(
        brand = %params.brand.name,
        weight = %params.weight,
        rows = table.rows.len(),
        "served rankings"
    );

    Ok(Json(ApiResponse {
        data: RankingData {
            title: page_title(&params.brand),
            headers: table.headers(),
            table,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
