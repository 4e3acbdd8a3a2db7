mod common;

use common::{StubProvider, codes};
use gdp_fertility_viz::Error;
use gdp_fertility_viz::config::{FERTILITY_INDICATOR, GDP_INDICATOR};
use gdp_fertility_viz::indicators::fetch_indicator;

#[test]
fn series_is_keyed_by_country_and_year() {
    let p = StubProvider::sample();
    let s = fetch_indicator(&p, GDP_INDICATOR, &codes(&["USA", "GBR"]), 2020, 2021).unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s["USA"]["2020"], 64_317.4);
    assert_eq!(s["USA"]["2021"], 71_055.9);
    assert_eq!(s["GBR"]["2021"], 46_869.8);
}

#[test]
fn null_observations_leave_no_key() {
    let p = StubProvider::sample();
    let s = fetch_indicator(&p, FERTILITY_INDICATOR, &codes(&["GBR"]), 2020, 2021).unwrap();
    assert_eq!(s["GBR"].len(), 1);
    assert!(!s["GBR"].contains_key("2021"));

    // DEU only has a null GDP record, so it never shows up.
    let s = fetch_indicator(&p, GDP_INDICATOR, &codes(&["DEU"]), 2020, 2020).unwrap();
    assert!(s.is_empty());
}

#[test]
fn year_range_is_passed_through() {
    let p = StubProvider::sample();
    let s = fetch_indicator(&p, GDP_INDICATOR, &codes(&["USA"]), 2021, 2021).unwrap();
    assert_eq!(s["USA"].keys().collect::<Vec<_>>(), vec!["2021"]);
}

#[test]
fn empty_country_set_is_left_to_the_provider() {
    let p = StubProvider::sample();
    let s = fetch_indicator(&p, GDP_INDICATOR, &[], 2020, 2021).unwrap();
    assert!(s.is_empty());
    assert_eq!(p.observation_calls(), 1);
}

#[test]
fn provider_failure_is_upstream_error() {
    let p = StubProvider {
        fail_indicators: vec![GDP_INDICATOR.into()],
        ..StubProvider::sample()
    };
    let err = fetch_indicator(&p, GDP_INDICATOR, &codes(&["USA"]), 2020, 2021).unwrap_err();
    assert!(matches!(err, Error::UpstreamFetch { .. }));
    assert!(err.to_string().contains("unavailable"));
}
