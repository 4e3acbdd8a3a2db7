//! Route handlers.
//!
//! Parameter checks run on the async side before any provider call; the
//! blocking core (directory, validation, fetches) runs on the blocking pool.

use super::AppState;
use super::error::{ApiError, ErrorBody};
use crate::combine::fetch_combined;
use crate::config::{
    DATA_END_YEAR, DATA_START_YEAR, SERIES_END_YEAR, SERIES_START_YEAR, default_countries,
};
use crate::directory::list_countries;
use crate::error::Error;
use crate::indicators::fetch_indicator;
use crate::models::{CombinedDataset, Country, IndicatorSeries};
use crate::validate::{check_year_range, parse_country_list, parse_year, validate_country_codes};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use log::info;
use serde::Serialize;

/// Raw query string as key/value pairs, in request order.
type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Query parameters; years stay text so bad input becomes our own 400.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DataQuery {
    pub countries: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

impl DataQuery {
    /// The first value of a repeated key wins. Unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "countries" => &mut q.countries,
                "start_year" => &mut q.start_year,
                "end_year" => &mut q.end_year,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        q
    }

    fn extract(raw: RawQuery, failure: &'static str) -> Result<Self, ApiError> {
        match raw {
            Ok(Query(pairs)) => Ok(Self::from_pairs(pairs)),
            Err(rejection) => Err(ApiError::new(
                Error::MalformedInput(rejection.body_text()),
                failure,
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub success: bool,
    pub data: IndicatorSeries,
    pub data_type: &'static str,
    pub requested_countries: Vec<String>,
    pub valid_countries: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesKind {
    Gdp,
    Fertility,
}

impl SeriesKind {
    fn data_type(self) -> &'static str {
        match self {
            Self::Gdp => "gdp",
            Self::Fertility => "fertility",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Self::Gdp => "Failed to fetch GDP data",
            Self::Fertility => "Failed to fetch fertility data",
        }
    }
}

/// Run blocking core work off the async workers.
async fn run_blocking<T, F>(failure: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(res) => res.map_err(|e| ApiError::new(e, failure)),
        Err(join) => Err(ApiError::new(Error::Internal(join.to_string()), failure)),
    }
}

/// Absent or empty. Whitespace counts as present and fails validation later.
fn is_missing(param: Option<&str>) -> bool {
    param.is_none_or(str::is_empty)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "GDP Fertility Viz API is running",
    })
}

pub async fn countries(
    State(state): State<AppState>,
) -> Result<Json<CountriesResponse>, ApiError> {
    let provider = state.provider.clone();
    let countries = run_blocking("Failed to fetch countries", move || {
        list_countries(provider.as_ref())
    })
    .await?;
    Ok(Json(CountriesResponse { countries }))
}

/// GET /data
///
/// Combined GDP + fertility dataset. Without `countries`, a fixed list of 30
/// major economies is used.
pub async fn data(
    State(state): State<AppState>,
    raw: RawQuery,
) -> Result<Json<CombinedDataset>, ApiError> {
    const FAILURE: &str = "Failed to fetch data";
    let bad = |e: Error| ApiError::new(e, FAILURE);
    let q = DataQuery::extract(raw, FAILURE)?;

    let start_year =
        parse_year(q.start_year.as_deref(), "start_year", DATA_START_YEAR).map_err(bad)?;
    let end_year = parse_year(q.end_year.as_deref(), "end_year", DATA_END_YEAR).map_err(bad)?;
    check_year_range(start_year, end_year).map_err(bad)?;

    let requested = if is_missing(q.countries.as_deref()) {
        default_countries()
    } else {
        parse_country_list(q.countries.as_deref().unwrap_or_default())
    };
    if requested.is_empty() {
        return Err(bad(Error::InvalidCountries));
    }

    let provider = state.provider.clone();
    let indicators = state.indicators.clone();
    let dataset = run_blocking(FAILURE, move || {
        let valid = validate_country_codes(provider.as_ref(), &requested)?;
        if valid.is_empty() {
            return Err(Error::InvalidCountries);
        }
        info!(
            "Fetching data for countries: {:?}, years: {}-{}",
            valid, start_year, end_year
        );
        fetch_combined(provider.as_ref(), &indicators, &valid, start_year, end_year)
    })
    .await?;

    Ok(Json(dataset))
}

async fn series(
    state: AppState,
    raw: RawQuery,
    kind: SeriesKind,
) -> Result<Json<SeriesResponse>, ApiError> {
    let bad = |e: Error| ApiError::new(e, kind.failure());
    let q = DataQuery::extract(raw, kind.failure())?;

    if is_missing(q.countries.as_deref()) {
        return Err(bad(Error::MissingParameter("countries")));
    }
    let start_year =
        parse_year(q.start_year.as_deref(), "start_year", SERIES_START_YEAR).map_err(bad)?;
    let end_year = parse_year(q.end_year.as_deref(), "end_year", SERIES_END_YEAR).map_err(bad)?;
    let requested = parse_country_list(q.countries.as_deref().unwrap_or_default());
    if requested.is_empty() {
        return Err(bad(Error::InvalidCountries));
    }

    let provider = state.provider.clone();
    let indicator = match kind {
        SeriesKind::Gdp => state.indicators.gdp.clone(),
        SeriesKind::Fertility => state.indicators.fertility.clone(),
    };
    let requested_countries = requested.clone();
    let (valid, data) = run_blocking(kind.failure(), move || {
        let valid = validate_country_codes(provider.as_ref(), &requested)?;
        if valid.is_empty() {
            return Err(Error::InvalidCountries);
        }
        let data = fetch_indicator(provider.as_ref(), &indicator, &valid, start_year, end_year)?;
        Ok((valid, data))
    })
    .await?;

    Ok(Json(SeriesResponse {
        success: true,
        data,
        data_type: kind.data_type(),
        requested_countries,
        valid_countries: valid,
    }))
}

pub async fn gdp_data(
    State(state): State<AppState>,
    raw: RawQuery,
) -> Result<Json<SeriesResponse>, ApiError> {
    series(state, raw, SeriesKind::Gdp).await
}

pub async fn fertility_data(
    State(state): State<AppState>,
    raw: RawQuery,
) -> Result<Json<SeriesResponse>, ApiError> {
    series(state, raw, SeriesKind::Fertility).await
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            error: "Not found".into(),
            message: format!("Resource not found: {}", uri.path()),
        }),
    )
}
