use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-country, per-year observations of one indicator.
///
/// Outer key is the ISO-3 country code, inner key the 4-digit year as text.
/// A missing year means "no observation"; nothing is zero-filled.
pub type IndicatorSeries = BTreeMap<String, BTreeMap<String, f64>>;

/// Inclusive year range sent to the provider as `start:end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpec {
    pub start: i32,
    pub end: i32,
}

impl DateSpec {
    pub fn to_query_param(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

/// Metadata section returned by the API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("negative value for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeName {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub value: String,
}

/// Raw indicator observation from the API (position 1 array).
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub indicator: CodeName,
    pub country: CodeName,
    #[serde(default)]
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}

impl Entry {
    /// Keyed by `countryiso3code`. `country.id` is the ISO-2 code and never
    /// matches a requested ISO-3 code, so rows without an ISO-3 code are dropped.
    pub fn into_observation(self) -> Option<RawObservation> {
        let economy = self.countryiso3code.trim();
        if economy.is_empty() {
            return None;
        }
        Some(RawObservation {
            economy: economy.to_string(),
            time: self.date,
            value: self.value,
        })
    }
}

/// Raw region row from `/region`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Raw economy row from `/country`. Only the fields we read are declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: CodeName,
}

/// Region code and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: String,
    pub name: String,
}

impl From<RegionEntry> for Region {
    fn from(e: RegionEntry) -> Self {
        // `code` carries the three-letter key; `id` is usually blank.
        let code = if e.code.trim().is_empty() { e.id } else { e.code };
        Self {
            code: code.trim().to_string(),
            name: e.name.trim().to_string(),
        }
    }
}

/// Catalog entry: either a real country or an aggregate (region, income group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Economy {
    pub id: String,
    pub name: String,
    pub region_code: Option<String>,
    pub aggregate: bool,
}

impl From<EconomyEntry> for Economy {
    fn from(e: EconomyEntry) -> Self {
        let region_id = e.region.id.trim();
        let aggregate = region_id == "NA" || e.region.value.trim() == "Aggregates";
        Self {
            id: e.id.trim().to_string(),
            name: e.name.trim().to_string(),
            region_code: (!region_id.is_empty()).then(|| region_id.to_string()),
            aggregate,
        }
    }
}

/// One observation as handed to the reshaping step.
///
/// `time` is either a bare year (`"2020"`) or a `"YR2020"` token.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub economy: String,
    pub time: String,
    pub value: Option<f64>,
}

/// A real (non-aggregate) country as listed by the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub region: String,
}

/// Both indicator series for one country.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CountrySeries {
    pub gdp: BTreeMap<String, f64>,
    pub fertility: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetMetadata {
    pub gdp_indicator_id: String,
    pub fertility_indicator_id: String,
    /// Requested range, not the range actually covered by data.
    pub start_year: i32,
    pub end_year: i32,
}

/// Chart-ready merge of the GDP and fertility series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedDataset {
    pub countries: BTreeMap<String, CountrySeries>,
    pub years: Vec<i32>,
    pub metadata: DatasetMetadata,
}
