//! gdp_fertility_viz
//!
//! Serves World Bank GDP per capita and fertility rate series for a set of
//! countries, reshaped for charting. Pairs with the `gfv` CLI, which also
//! runs the HTTP API.
//!
//! ### Features
//! - List real countries (aggregates removed) with their region names
//! - Validate user-supplied ISO-3 codes against that list
//! - Fetch one indicator as a per-country, per-year series
//! - Merge GDP and fertility into one dataset with a contiguous year axis
//! - Export the dataset as JSON or tidy CSV
//!
//! ### Example
//! ```no_run
//! use gdp_fertility_viz::{Client, config::{Indicators, ProviderConfig}};
//! use gdp_fertility_viz::{combine, validate};
//!
//! let client = Client::new(&ProviderConfig::default())?;
//! let codes = validate::parse_country_list("usa, gbr");
//! let valid = validate::validate_country_codes(&client, &codes)?;
//! let data = combine::fetch_combined(&client, &Indicators::default(), &valid, 2020, 2021)?;
//! gdp_fertility_viz::storage::save_csv(&data, "gdp_fertility.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod combine;
pub mod config;
pub mod directory;
pub mod error;
pub mod indicators;
pub mod models;
pub mod server;
pub mod storage;
pub mod validate;

pub use api::{Client, DataProvider};
pub use error::{Error, Result};
pub use models::{CombinedDataset, Country, CountrySeries, DatasetMetadata, IndicatorSeries};
