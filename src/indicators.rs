use crate::api::DataProvider;
use crate::error::{Error, Result};
use crate::models::{IndicatorSeries, RawObservation};
use log::{error, info};

/// Year key for a provider time token: `"YR2020"` and `"2020"` both give `"2020"`.
pub fn year_key(token: &str) -> String {
    let token = token.trim();
    token.strip_prefix("YR").unwrap_or(token).to_string()
}

/// Reshape raw records into `series[country][year] = value`.
///
/// Null-valued records are skipped entirely, so a country only appears once it
/// has at least one observation.
pub fn reshape<I>(records: I) -> IndicatorSeries
where
    I: IntoIterator<Item = RawObservation>,
{
    let mut series = IndicatorSeries::new();
    for record in records {
        let Some(value) = record.value else {
            continue;
        };
        series
            .entry(record.economy)
            .or_default()
            .insert(year_key(&record.time), value);
    }
    series
}

/// Fetch one indicator for `countries` over `start_year..=end_year`.
///
/// Arguments are passed through untouched; range and country checks belong
/// to the caller.
pub fn fetch_indicator<P: DataProvider + ?Sized>(
    provider: &P,
    indicator_id: &str,
    countries: &[String],
    start_year: i32,
    end_year: i32,
) -> Result<IndicatorSeries> {
    info!(
        "Fetching {} for countries: {:?} ({}-{})",
        indicator_id, countries, start_year, end_year
    );

    let records = provider
        .observations(indicator_id, countries, start_year, end_year)
        .map_err(|e| {
            error!("Error fetching {}: {:#}", indicator_id, e);
            Error::upstream(e)
        })?;

    let series = reshape(records);
    info!(
        "Successfully fetched {} for {} countries",
        indicator_id,
        series.len()
    );
    Ok(series)
}
