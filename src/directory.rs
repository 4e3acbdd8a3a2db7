use crate::api::DataProvider;
use crate::error::{Error, Result};
use crate::models::Country;
use log::{info, warn};
use std::collections::HashMap;

/// List every real country known to the provider, with its region name.
///
/// Aggregates (regions, income groups) are skipped. A failed region lookup
/// only costs the friendly region names; a failed economy lookup fails the call.
pub fn list_countries<P: DataProvider + ?Sized>(provider: &P) -> Result<Vec<Country>> {
    info!("Fetching available countries");

    let region_map: HashMap<String, String> = match provider.regions() {
        Ok(regions) => regions
            .into_iter()
            .filter(|r| !r.code.is_empty())
            .map(|r| (r.code, r.name))
            .collect(),
        Err(e) => {
            warn!("Could not fetch region mappings: {:#}", e);
            HashMap::new()
        }
    };

    let economies = provider.economies().map_err(Error::upstream)?;

    let countries: Vec<Country> = economies
        .into_iter()
        .filter(|e| !e.aggregate)
        .map(|e| {
            let region = match e.region_code {
                Some(code) => region_map.get(&code).cloned().unwrap_or(code),
                None => "Unknown".to_string(),
            };
            Country {
                code: e.id,
                name: e.name,
                region,
            }
        })
        .collect();

    info!("Found {} available countries", countries.len());
    Ok(countries)
}
