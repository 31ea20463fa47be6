use std::time::Duration;

use fips_search::{Error, Options, SelectorRule};

#[test]
fn defaults_target_fips_registry() {
    let options = Options::default();
    assert_eq!(options.search_url, "https://www.fips.ru/iiss/search.xhtml");
    assert_eq!(options.repository_domain, "fips.ru");
    assert_eq!(options.max_records, 10);
    assert_eq!(options.link_cap, 50);
    assert_eq!(options.settle_timeout(), Duration::from_secs(30));
    assert!(options.negative_phrases.iter().any(|p| p == "ничего не найдено"));
    assert!(options.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let options = Options::from_json(
        r##"{
            "max_records": 25,
            "document_indicators": ["utility model"],
            "results_marker": {"by": "css", "selector": "#resultsTable"}
        }"##,
    )
    .unwrap();

    assert_eq!(options.max_records, 25);
    assert_eq!(options.document_indicators, vec!["utility model".to_string()]);
    assert_eq!(options.results_marker, Some(SelectorRule::css("#resultsTable")));
    assert_eq!(options.repository_domain, "fips.ru");
    assert_eq!(options.submit_rules, Options::default().submit_rules);
}

#[test]
fn json_with_zero_records_rejected() {
    assert!(matches!(
        Options::from_json(r#"{"max_records": 0}"#),
        Err(Error::InvalidOptions(_))
    ));
}

#[test]
fn malformed_json_is_config_error() {
    assert!(matches!(Options::from_json("{max_records:"), Err(Error::Config(_))));
}

#[test]
fn validate_rejects_blank_domain_and_zero_timeout() {
    let blank_domain = Options {
        repository_domain: "  ".into(),
        ..Options::default()
    };
    assert!(matches!(blank_domain.validate(), Err(Error::InvalidOptions(_))));

    let zero_timeout = Options {
        settle_timeout_ms: 0,
        ..Options::default()
    };
    assert!(matches!(zero_timeout.validate(), Err(Error::InvalidOptions(_))));
}

#[test]
fn options_round_trip_through_json() {
    let options = Options {
        max_records: 3,
        negative_phrases: vec!["nothing here".into()],
        ..Options::default()
    };
    let json = serde_json::to_string(&options).unwrap();
    let back = Options::from_json(&json).unwrap();
    assert_eq!(back.max_records, 3);
    assert_eq!(back.negative_phrases, options.negative_phrases);
    assert_eq!(back.field_rules, options.field_rules);
}

#[test]
fn missing_config_file_is_io_error() {
    assert!(matches!(
        Options::from_file("/nonexistent/fips-search/options.json"),
        Err(Error::Io(_))
    ));
}
