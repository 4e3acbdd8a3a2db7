//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use gdp_fertility_viz::config::{Indicators, ProviderConfig};
use gdp_fertility_viz::{Client, combine, directory, validate};

fn client() -> Client {
    Client::new(&ProviderConfig::default()).unwrap()
}

#[test]
fn directory_lists_real_countries() {
    let countries = directory::list_countries(&client()).unwrap();
    assert!(countries.len() > 150);
    assert!(countries.iter().any(|c| c.code == "USA"));
    // Aggregates are filtered
    assert!(countries.iter().all(|c| c.code != "WLD"));
}

#[test]
fn validate_and_combine_small_range() {
    let cli = client();
    let valid =
        validate::validate_country_codes(&cli, &validate::parse_country_list("usa, gbr, invalid"))
            .unwrap();
    assert_eq!(valid, vec!["USA", "GBR"]);

    let ds = combine::fetch_combined(&cli, &Indicators::default(), &valid, 2019, 2020).unwrap();
    assert_eq!(ds.years, vec![2019, 2020]);
    assert!(ds.countries.contains_key("USA"));
    assert!(ds.countries["USA"].gdp.contains_key("2019"));
}
