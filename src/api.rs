//! Synchronous client for the **World Bank Indicators API (v2)**.
//!
//! Three endpoints are used: `region`, `country` and
//! `country/{codes}/indicator/{id}`. All of them return `[Meta, [rows...]]`
//! and are paged; the client follows the page header until the feed is
//! exhausted.
//!
//! ### Notes
//! - The API sometimes serializes `per_page` as a **string**; we accept both string/number.
//! - The API has no switch to omit blank observations, so null values are dropped here.
//! - Failures are reported immediately. There is no retry.
//!
//! Typical usage:
//! ```no_run
//! # use gdp_fertility_viz::{Client, DataProvider, config::ProviderConfig};
//! let client = Client::new(&ProviderConfig::default())?;
//! let rows = client.observations("NY.GDP.PCAP.CD", &["DEU".into()], 2019, 2020)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::ProviderConfig;
use crate::models::{
    DateSpec, Economy, EconomyEntry, Entry, Meta, RawObservation, Region, RegionEntry,
};
use anyhow::{Context, Result, bail};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Source of raw catalog and observation records.
///
/// `Client` talks to the World Bank; tests plug in an in-memory table.
pub trait DataProvider {
    /// Region code -> name rows.
    fn regions(&self) -> Result<Vec<Region>>;

    /// Every economy in the catalog, aggregates included.
    fn economies(&self) -> Result<Vec<Economy>>;

    /// Observations of `indicator` for `countries` over `start..=end`.
    fn observations(
        &self,
        indicator: &str,
        countries: &[String],
        start: i32,
        end: i32,
    ) -> Result<Vec<RawObservation>>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

// Safety cap to avoid pathological jobs
const MAX_PAGES: u32 = 1000;

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Split one page into its header and rows.
///
/// The API returns `[Meta, [row, ...]]`, or a `"message"` object in position 0 on error.
pub fn parse_page<T: DeserializeOwned>(v: Value) -> Result<(Meta, Vec<T>)> {
    let arr = v
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("unexpected response shape: not a top-level array"))?;
    if arr.is_empty() {
        bail!("unexpected response: empty array");
    }
    if arr[0].get("message").is_some() {
        bail!("world bank api error: {}", arr[0]);
    }

    let meta: Meta = serde_json::from_value(arr[0].clone()).context("parse meta")?;
    // Position 1 is `null` when the query matched nothing.
    let rows: Vec<T> = match arr.get(1) {
        Some(Value::Null) | None => vec![],
        Some(rows) => serde_json::from_value(rows.clone()).context("parse rows")?,
    };
    Ok((meta, rows))
}

impl Client {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout) // total request timeout
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("gdp_fertility_viz/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().context("send request")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("request failed with HTTP {}", status);
        }
        resp.json().context("decode json")
    }

    /// Fetch every page of `url` (which must already carry a query string).
    fn get_paged<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut page = 1u32;
        let mut out: Vec<T> = Vec::new();
        loop {
            if page > MAX_PAGES {
                bail!("page limit exceeded ({})", MAX_PAGES);
            }
            let page_url = format!("{}&page={}", url, page);
            let v = self
                .get_json(&page_url)
                .with_context(|| format!("GET {}", page_url))?;
            let (meta, rows) = parse_page::<T>(v).with_context(|| format!("GET {}", page_url))?;
            out.extend(rows);

            if page >= meta.pages {
                break;
            }
            page += 1;
        }
        Ok(out)
    }
}

impl DataProvider for Client {
    fn regions(&self) -> Result<Vec<Region>> {
        let url = format!("{}/region?format=json&per_page=1000", self.base_url);
        let rows: Vec<RegionEntry> = self.get_paged(&url)?;
        Ok(rows.into_iter().map(Region::from).collect())
    }

    fn economies(&self) -> Result<Vec<Economy>> {
        let url = format!("{}/country?format=json&per_page=1000", self.base_url);
        let rows: Vec<EconomyEntry> = self.get_paged(&url)?;
        Ok(rows.into_iter().map(Economy::from).collect())
    }

    fn observations(
        &self,
        indicator: &str,
        countries: &[String],
        start: i32,
        end: i32,
    ) -> Result<Vec<RawObservation>> {
        if countries.is_empty() {
            return Ok(vec![]);
        }

        let country_spec = enc_join(countries.iter().map(|s| s.as_str()));
        let indicator_spec = enc_join([indicator]);
        let date = DateSpec { start, end };
        let url = format!(
            "{}/country/{}/indicator/{}?format=json&per_page=1000&date={}",
            self.base_url,
            country_spec,
            indicator_spec,
            date.to_query_param()
        );

        let rows: Vec<Entry> = self.get_paged(&url)?;
        Ok(rows
            .into_iter()
            .filter(|e| e.value.is_some())
            .filter_map(Entry::into_observation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enc_join_trims_and_escapes() {
        assert_eq!(enc_join([" USA", "GBR "]), "USA;GBR");
        assert_eq!(enc_join(["NY.GDP.PCAP.CD"]), "NY.GDP.PCAP.CD");
        assert_eq!(enc_join(["A/B"]), "A%2FB");
    }

    #[test]
    fn parse_page_surfaces_api_error() {
        let v: Value = serde_json::from_str(
            r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#,
        )
        .unwrap();
        let err = parse_page::<Entry>(v).unwrap_err();
        assert!(err.to_string().contains("world bank api error"));
    }

    #[test]
    fn parse_page_accepts_null_rows() {
        let v: Value =
            serde_json::from_str(r#"[{"page":1,"pages":0,"per_page":"50","total":0},null]"#)
                .unwrap();
        let (meta, rows) = parse_page::<Entry>(v).unwrap();
        assert_eq!(meta.pages, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn parse_page_rejects_non_array() {
        let v: Value = serde_json::from_str(r#"{"oops":true}"#).unwrap();
        assert!(parse_page::<Entry>(v).is_err());
    }
}
