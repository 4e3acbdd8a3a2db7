//! In-memory provider shared by the integration tests.
#![allow(dead_code)]

use anyhow::{Result, bail};
use gdp_fertility_viz::DataProvider;
use gdp_fertility_viz::config::{FERTILITY_INDICATOR, GDP_INDICATOR};
use gdp_fertility_viz::models::{Economy, RawObservation, Region};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct StubProvider {
    pub regions: Vec<Region>,
    pub economies: Vec<Economy>,
    /// indicator id -> records
    pub observations: HashMap<String, Vec<RawObservation>>,
    pub fail_regions: bool,
    pub fail_economies: bool,
    /// Indicator ids whose fetch fails.
    pub fail_indicators: Vec<String>,
    pub economy_calls: AtomicUsize,
    pub observation_calls: AtomicUsize,
}

pub fn economy(id: &str, name: &str, region: Option<&str>, aggregate: bool) -> Economy {
    Economy {
        id: id.into(),
        name: name.into(),
        region_code: region.map(|r| r.to_string()),
        aggregate,
    }
}

pub fn obs(economy: &str, time: &str, value: Option<f64>) -> RawObservation {
    RawObservation {
        economy: economy.into(),
        time: time.into(),
        value,
    }
}

pub fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

impl StubProvider {
    /// A small catalog: three countries, one aggregate, GDP and fertility for 2020-2021.
    pub fn sample() -> Self {
        let mut observations = HashMap::new();
        observations.insert(
            GDP_INDICATOR.to_string(),
            vec![
                obs("USA", "YR2020", Some(64_317.4)),
                obs("USA", "YR2021", Some(71_055.9)),
                obs("GBR", "2020", Some(40_217.0)),
                obs("GBR", "2021", Some(46_869.8)),
                obs("DEU", "2020", None),
            ],
        );
        observations.insert(
            FERTILITY_INDICATOR.to_string(),
            vec![
                obs("USA", "2020", Some(1.64)),
                obs("USA", "2021", Some(1.66)),
                obs("GBR", "2020", Some(1.56)),
                obs("GBR", "2021", None),
            ],
        );

        Self {
            regions: vec![
                Region {
                    code: "NAC".into(),
                    name: "North America".into(),
                },
                Region {
                    code: "ECS".into(),
                    name: "Europe & Central Asia".into(),
                },
            ],
            economies: vec![
                economy("USA", "United States", Some("NAC"), false),
                economy("GBR", "United Kingdom", Some("ECS"), false),
                economy("DEU", "Germany", Some("ECS"), false),
                economy("ZZZ", "Nowhere", Some("XYZ"), false),
                economy("WLD", "World", Some("NA"), true),
            ],
            observations,
            ..Self::default()
        }
    }

    pub fn economy_calls(&self) -> usize {
        self.economy_calls.load(Ordering::SeqCst)
    }

    pub fn observation_calls(&self) -> usize {
        self.observation_calls.load(Ordering::SeqCst)
    }
}

impl DataProvider for StubProvider {
    fn regions(&self) -> Result<Vec<Region>> {
        if self.fail_regions {
            bail!("region endpoint unavailable");
        }
        Ok(self.regions.clone())
    }

    fn economies(&self) -> Result<Vec<Economy>> {
        self.economy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_economies {
            bail!("country endpoint unavailable");
        }
        Ok(self.economies.clone())
    }

    fn observations(
        &self,
        indicator: &str,
        countries: &[String],
        start: i32,
        end: i32,
    ) -> Result<Vec<RawObservation>> {
        self.observation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_indicators.iter().any(|i| i == indicator) {
            bail!("indicator {} unavailable", indicator);
        }
        let rows = self.observations.get(indicator).cloned().unwrap_or_default();
        Ok(rows
            .into_iter()
            .filter(|r| countries.contains(&r.economy))
            .filter(|r| {
                let year: i32 = r.time.trim_start_matches("YR").parse().unwrap_or(0);
                year >= start && year <= end
            })
            .collect())
    }
}
