//! Request handlers.
//!
//! Rates cross the wire in percent (`coupon_percent: 5.0`) and are converted
//! to decimal fractions before pricing.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bondcalc_config::CalculatorConfig;
use bondcalc_core::curve::{locate_nearest_sample, sample_curve_with, CurveSample, YieldSweep};
use bondcalc_core::pricing::{estimate_ytm, explain};
use bondcalc_core::{
    BondTerms, BondType, Frequency, PricedBond, PricingClass, TreasurySymbol,
    MAX_YEARS_TO_MATURITY,
};
use bondcalc_portfolio::prelude::*;
use bondcalc_traits::{YieldQuote, YieldSource};

use crate::error::{ApiError, ApiResult};

/// Application state.
pub struct AppState {
    /// Portfolio session shared by all requests
    pub session: Mutex<PortfolioSession>,
    /// Treasury yield source
    pub yields: Arc<dyn YieldSource>,
    /// Active configuration
    pub config: CalculatorConfig,
}

// =============================================================================
// HEALTH
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

fn check_face(face: f64) -> ApiResult<f64> {
    if face.is_finite() && face > 0.0 {
        Ok(face)
    } else {
        Err(ApiError::bad_request("face_value must be positive"))
    }
}

fn check_percent(field: &str, value: f64) -> ApiResult<f64> {
    if (0.0..=100.0).contains(&value) {
        Ok(value / 100.0)
    } else {
        Err(ApiError::bad_request(format!(
            "{field} must be between 0 and 100"
        )))
    }
}

fn check_years(years: f64) -> ApiResult<f64> {
    if years.is_finite() && years > 0.0 && years <= MAX_YEARS_TO_MATURITY {
        Ok(years)
    } else {
        Err(ApiError::bad_request(format!(
            "years_to_maturity must be positive and at most {MAX_YEARS_TO_MATURITY}"
        )))
    }
}

fn parse_symbol(code: &str) -> ApiResult<TreasurySymbol> {
    code.parse()
        .map_err(|_| ApiError::bad_request(format!("unknown treasury symbol: {code}")))
}

/// Bond terms as sent by clients.
#[derive(Debug, Deserialize)]
pub struct TermsInput {
    /// Face value; defaults to `pricing.default_face_value`
    pub face_value: Option<f64>,
    /// Annual coupon rate in percent
    pub coupon_percent: f64,
    /// Years to maturity
    pub years_to_maturity: f64,
    /// Payments per year; defaults to `pricing.default_frequency`
    pub frequency: Option<u32>,
}

impl TermsInput {
    fn to_terms(&self, config: &CalculatorConfig, market_yield: f64) -> ApiResult<BondTerms> {
        let face = check_face(self.face_value.unwrap_or(config.pricing.default_face_value))?;
        let coupon = check_percent("coupon_percent", self.coupon_percent)?;
        let years = check_years(self.years_to_maturity)?;
        let frequency = match self.frequency {
            Some(n) => Frequency::from_periods_per_year(n)?,
            None => config.pricing.default_frequency,
        };
        Ok(BondTerms::new(face, coupon, years, market_yield).with_frequency(frequency))
    }
}

// =============================================================================
// PRICING
// =============================================================================

/// Price request.
#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    #[serde(flatten)]
    terms: TermsInput,
    /// Market yield in percent
    yield_percent: Option<f64>,
    /// Treasury benchmark being priced (e.g. `US10Y`)
    symbol: Option<String>,
}

/// Price response.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    #[serde(flatten)]
    bond: PricedBond,
    display_name: String,
    classification: PricingClass,
    explanation: String,
}

/// Price a bond.
///
/// The yield comes from `yield_percent`, else the live yield of `symbol`, else
/// `market_data.default_yield`. The result becomes the session's last priced
/// bond for `POST /api/v1/portfolio`.
pub async fn price_bond(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PriceRequest>,
) -> ApiResult<Json<PriceResponse>> {
    let symbol = req.symbol.as_deref().map(parse_symbol).transpose()?;
    let market_yield = match (req.yield_percent, symbol) {
        (Some(pct), _) => check_percent("yield_percent", pct)?,
        (None, Some(sym)) => state.yields.get_yield(&sym).await?.yield_value,
        (None, None) => state.config.market_data.default_yield,
    };
    let bond_type = symbol.map_or(BondType::Custom, BondType::Treasury);
    let terms = req.terms.to_terms(&state.config, market_yield)?;

    let bond = state.config.pricer().price_bond(&terms, bond_type)?;
    state.session.lock().record_priced(bond.clone());

    Ok(Json(PriceResponse {
        display_name: bond.display_name(),
        classification: bond.classification(),
        explanation: explain(&bond),
        bond,
    }))
}

/// YTM request.
#[derive(Debug, Deserialize)]
pub struct YtmRequest {
    price: f64,
    face_value: Option<f64>,
    coupon_percent: f64,
    years_to_maturity: f64,
}

/// YTM response.
#[derive(Debug, Serialize)]
pub struct YtmResponse {
    ytm: f64,
    ytm_percent: f64,
}

/// Approximate yield to maturity from a price.
pub async fn estimate_yield(
    State(state): State<Arc<AppState>>,
    Json(req): Json<YtmRequest>,
) -> ApiResult<Json<YtmResponse>> {
    if !req.price.is_finite() || req.price <= 0.0 {
        return Err(ApiError::bad_request("price must be positive"));
    }
    let face = check_face(
        req.face_value
            .unwrap_or(state.config.pricing.default_face_value),
    )?;
    let coupon = check_percent("coupon_percent", req.coupon_percent)?;
    let years = check_years(req.years_to_maturity)?;

    let ytm = estimate_ytm(req.price, face, coupon, years)?;
    Ok(Json(YtmResponse {
        ytm,
        ytm_percent: ytm * 100.0,
    }))
}

// =============================================================================
// CURVE
// =============================================================================

/// Curve request.
#[derive(Debug, Deserialize)]
pub struct CurveRequest {
    #[serde(flatten)]
    terms: TermsInput,
    start_percent: Option<f64>,
    end_percent: Option<f64>,
    step_percent: Option<f64>,
    /// Yield (percent) to highlight on the curve
    yield_percent: Option<f64>,
}

/// Curve response.
#[derive(Debug, Serialize)]
pub struct CurveResponse {
    samples: Vec<CurveSample>,
    highlighted_index: Option<usize>,
}

/// Sample the price/yield curve.
pub async fn price_curve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CurveRequest>,
) -> ApiResult<Json<CurveResponse>> {
    let defaults = state.config.sweep();
    let sweep = YieldSweep::new(
        req.start_percent.unwrap_or(defaults.start),
        req.end_percent.unwrap_or(defaults.end),
        req.step_percent.unwrap_or(defaults.step),
    );
    let terms = req.terms.to_terms(&state.config, 0.0)?;
    let samples = sample_curve_with(&state.config.pricer(), &terms, &sweep)?;

    let highlighted_index = match req.yield_percent {
        Some(pct) => {
            check_percent("yield_percent", pct)?;
            locate_nearest_sample(&samples, pct)
        }
        None => None,
    };

    Ok(Json(CurveResponse {
        samples,
        highlighted_index,
    }))
}

// =============================================================================
// MARKET DATA
// =============================================================================

/// Live yield query.
#[derive(Debug, Deserialize)]
pub struct LiveYieldQuery {
    symbol: Option<String>,
}

/// Current yield of a treasury benchmark.
pub async fn live_yield(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LiveYieldQuery>,
) -> ApiResult<Json<YieldQuote>> {
    let code = query
        .symbol
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("symbol query parameter is required"))?;
    let symbol = parse_symbol(&code)?;
    Ok(Json(state.yields.get_yield(&symbol).await?))
}

// =============================================================================
// PORTFOLIO
// =============================================================================

/// List portfolio entries.
pub async fn list_portfolio(State(state): State<Arc<AppState>>) -> Json<Portfolio> {
    Json(state.session.lock().portfolio().clone())
}

/// Add-entry response.
#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    #[serde(flatten)]
    entry: PortfolioEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_warning: Option<String>,
}

/// Add the last priced bond to the portfolio.
pub async fn add_to_portfolio(
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let mut session = state.session.lock();
    let id = session.add_last_priced()?;
    let entry = session
        .portfolio()
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::internal(format!("entry {id} missing after insert")))?;
    let storage_warning = session.last_storage_error().map(ToString::to_string);

    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            entry,
            storage_warning,
        }),
    ))
}

/// Clear query.
#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    #[serde(default)]
    confirm: bool,
}

/// Remove every entry. Requires `?confirm=true`.
pub async fn clear_portfolio(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClearQuery>,
) -> ApiResult<StatusCode> {
    if !query.confirm {
        return Err(ApiError::bad_request(
            "clearing the portfolio requires confirm=true",
        ));
    }
    state.session.lock().clear();
    Ok(StatusCode::NO_CONTENT)
}

/// Remove-entry response.
#[derive(Debug, Serialize)]
pub struct RemoveEntryResponse {
    id: Uuid,
    removed: bool,
}

/// Remove one entry. An unknown id leaves the portfolio unchanged.
pub async fn remove_from_portfolio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Json<RemoveEntryResponse> {
    let removed = state.session.lock().remove(id);
    Json(RemoveEntryResponse { id, removed })
}

/// Metrics response.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    metrics: PortfolioMetrics,
    benchmark: Option<BenchmarkComparison>,
    price_series: Vec<SeriesPoint>,
    yield_series: Vec<SeriesPoint>,
}

/// Portfolio metrics with a benchmark comparison.
///
/// The comparison is omitted for an empty portfolio.
pub async fn portfolio_metrics(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsResponse>> {
    let (metrics, price_series, yield_series) = {
        let session = state.session.lock();
        let portfolio = session.portfolio();
        (
            portfolio.metrics(),
            portfolio.price_series(),
            portfolio.yield_series(),
        )
    };

    let benchmark = if metrics.bond_count == 0 {
        None
    } else {
        let symbol = state.config.market_data.benchmark_symbol;
        let quote = state.yields.get_yield(&symbol).await?;
        Some(compare_to_benchmark(&metrics, symbol, quote.yield_value))
    };

    Ok(Json(MetricsResponse {
        metrics,
        benchmark,
        price_series,
        yield_series,
    }))
}
