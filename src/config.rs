//! Fixed indicator codes, request defaults and runtime settings.

use std::time::Duration;

/// GDP per capita (current US$).
pub const GDP_INDICATOR: &str = "NY.GDP.PCAP.CD";
/// Fertility rate, total (births per woman).
pub const FERTILITY_INDICATOR: &str = "SP.DYN.TFRT.IN";

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";

/// Accepted bounds for `/data` year parameters.
pub const MIN_YEAR: i32 = 1960;
pub const MAX_YEAR: i32 = 2030;

/// Defaults for the combined dataset.
pub const DATA_START_YEAR: i32 = 1960;
pub const DATA_END_YEAR: i32 = 2023;

/// Defaults for the single-indicator routes.
pub const SERIES_START_YEAR: i32 = 1990;
pub const SERIES_END_YEAR: i32 = 2022;

/// Countries used when `/data` is called without a `countries` parameter.
pub const DEFAULT_COUNTRIES: [&str; 30] = [
    "USA", "CHN", "IND", "JPN", "DEU", "GBR", "FRA", "BRA", "CAN", "AUS", "KOR", "MEX", "IDN",
    "TUR", "RUS", "ITA", "ESP", "NLD", "CHE", "SWE", "NOR", "DNK", "FIN", "BEL", "AUT", "NZL",
    "SGP", "ARE", "ISR", "HKG",
];

pub fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

/// The two indicators merged into a combined dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    pub gdp: String,
    pub fertility: String,
}

impl Default for Indicators {
    fn default() -> Self {
        Self {
            gdp: GDP_INDICATOR.into(),
            fertility: FERTILITY_INDICATOR.into(),
        }
    }
}

/// Settings for the World Bank HTTP client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
