use crate::api::DataProvider;
use crate::config::Indicators;
use crate::error::Result;
use crate::indicators::fetch_indicator;
use crate::models::{CombinedDataset, CountrySeries, DatasetMetadata, IndicatorSeries};
use log::info;
use std::collections::BTreeMap;

/// Contiguous ascending years `start..=end` (empty when `start > end`).
pub fn year_range(start: i32, end: i32) -> Vec<i32> {
    (start..=end).collect()
}

/// Merge two already-fetched series into a chart-ready dataset.
///
/// Countries with no observation in either series are left out.
pub fn merge(
    indicators: &Indicators,
    countries: &[String],
    start_year: i32,
    end_year: i32,
    gdp: &IndicatorSeries,
    fertility: &IndicatorSeries,
) -> CombinedDataset {
    let mut merged: BTreeMap<String, CountrySeries> = BTreeMap::new();
    for country in countries {
        let g = gdp.get(country);
        let f = fertility.get(country);
        if g.is_none() && f.is_none() {
            continue;
        }
        merged.insert(
            country.clone(),
            CountrySeries {
                gdp: g.cloned().unwrap_or_default(),
                fertility: f.cloned().unwrap_or_default(),
            },
        );
    }

    CombinedDataset {
        countries: merged,
        years: year_range(start_year, end_year),
        metadata: DatasetMetadata {
            gdp_indicator_id: indicators.gdp.clone(),
            fertility_indicator_id: indicators.fertility.clone(),
            start_year,
            end_year,
        },
    }
}

/// Fetch GDP and fertility for `countries` and merge them.
///
/// Both fetches must succeed; there is no partial result.
pub fn fetch_combined<P: DataProvider + ?Sized>(
    provider: &P,
    indicators: &Indicators,
    countries: &[String],
    start_year: i32,
    end_year: i32,
) -> Result<CombinedDataset> {
    info!("Fetching combined data for countries: {:?}", countries);

    let gdp = fetch_indicator(provider, &indicators.gdp, countries, start_year, end_year)?;
    let fertility = fetch_indicator(
        provider,
        &indicators.fertility,
        countries,
        start_year,
        end_year,
    )?;

    let dataset = merge(indicators, countries, start_year, end_year, &gdp, &fertility);
    info!(
        "Successfully combined data for {} countries",
        dataset.countries.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rows: &[(&str, &str, f64)]) -> IndicatorSeries {
        let mut s = IndicatorSeries::new();
        for (c, y, v) in rows {
            s.entry(c.to_string())
                .or_default()
                .insert(y.to_string(), *v);
        }
        s
    }

    #[test]
    fn year_range_is_contiguous() {
        assert_eq!(year_range(2018, 2021), vec![2018, 2019, 2020, 2021]);
        assert_eq!(year_range(2020, 2020), vec![2020]);
        assert!(year_range(2021, 2020).is_empty());
    }

    #[test]
    fn merge_keeps_one_sided_countries_and_drops_empty_ones() {
        let gdp = series(&[("USA", "2020", 63_000.0)]);
        let fert = series(&[("USA", "2020", 1.64), ("GBR", "2020", 1.56)]);
        let countries: Vec<String> = ["USA", "GBR", "ZZZ"].iter().map(|c| c.to_string()).collect();

        let ds = merge(&Indicators::default(), &countries, 2020, 2020, &gdp, &fert);

        assert_eq!(ds.countries.len(), 2);
        assert_eq!(ds.countries["USA"].gdp["2020"], 63_000.0);
        assert_eq!(ds.countries["USA"].fertility["2020"], 1.64);
        assert!(ds.countries["GBR"].gdp.is_empty());
        assert!(!ds.countries.contains_key("ZZZ"));
        assert_eq!(ds.years, vec![2020]);
        assert_eq!(ds.metadata.gdp_indicator_id, "NY.GDP.PCAP.CD");
        assert_eq!(ds.metadata.fertility_indicator_id, "SP.DYN.TFRT.IN");
    }

    #[test]
    fn merge_ignores_series_entries_for_unrequested_countries() {
        let gdp = series(&[("FRA", "2020", 39_000.0)]);
        let ds = merge(
            &Indicators::default(),
            &["USA".to_string()],
            2020,
            2020,
            &gdp,
            &IndicatorSeries::new(),
        );
        assert!(ds.countries.is_empty());
    }
}
