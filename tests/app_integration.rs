use japan_car_calc::core::config::AppConfig;
use japan_car_calc::core::rate::FALLBACK_RATE;
use japan_car_calc::core::{Provenance, RateResolver, ResultField, Session};
use std::fs;
use std::time::Duration;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_frankfurter_mock(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_open_er_api_mock(response: ResponseTemplate, calls: u64) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v6/latest/JPY"))
            .respond_with(response)
            .expect(calls)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn frankfurter_ok(rate: f64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"amount": 1.0, "base": "JPY", "date": "2025-06-30", "rates": {{"EUR": {rate}}}}}"#
        ))
    }

    pub fn open_er_api_ok(rate: f64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"result": "success", "base_code": "JPY", "rates": {{"JPY": 1, "EUR": {rate}}}}}"#
        ))
    }
}

use test_utils::*;
use wiremock::ResponseTemplate;

fn config_for(frankfurter: &str, open_er_api: &str, timeout_secs: u64) -> AppConfig {
    let yaml = format!(
        r#"
        providers:
          frankfurter:
            base_url: {frankfurter}
          open_er_api:
            base_url: {open_er_api}
        timeout_secs: {timeout_secs}
    "#
    );
    serde_yaml::from_str(&yaml).expect("Failed to parse test config")
}

#[test_log::test(tokio::test)]
async fn test_primary_source_wins() {
    let primary = create_frankfurter_mock(frankfurter_ok(0.0061)).await;
    let secondary = create_open_er_api_mock(open_er_api_ok(0.0065), 0).await;

    let config = config_for(&primary.uri(), &secondary.uri(), 5);
    let quote = RateResolver::from_config(&config).unwrap().resolve().await;

    assert_eq!(quote.value, 0.0061);
    assert_eq!(quote.provenance, Provenance::Primary);
    assert_eq!(quote.source, "frankfurter");
    assert!(quote.caveat.is_none());
}

#[test_log::test(tokio::test)]
async fn test_secondary_source_after_primary_error() {
    let primary = create_frankfurter_mock(ResponseTemplate::new(503)).await;
    let secondary = create_open_er_api_mock(open_er_api_ok(0.0065), 1).await;

    let config = config_for(&primary.uri(), &secondary.uri(), 5);
    let quote = RateResolver::from_config(&config).unwrap().resolve().await;

    info!(?quote, "Resolved after primary failure");
    assert_eq!(quote.value, 0.0065);
    assert_eq!(quote.provenance, Provenance::Secondary);
    assert_eq!(quote.source, "open.er-api");
    assert!(quote.caveat.is_none());
}

#[test_log::test(tokio::test)]
async fn test_secondary_source_after_missing_eur() {
    let primary = create_frankfurter_mock(
        ResponseTemplate::new(200).set_body_string(r#"{"base": "JPY", "rates": {"USD": 0.0067}}"#),
    )
    .await;
    let secondary = create_open_er_api_mock(open_er_api_ok(0.0065), 1).await;

    let config = config_for(&primary.uri(), &secondary.uri(), 5);
    let quote = RateResolver::from_config(&config).unwrap().resolve().await;

    assert_eq!(quote.provenance, Provenance::Secondary);
    assert_eq!(quote.value, 0.0065);
}

#[test_log::test(tokio::test)]
async fn test_timeout_advances_chain() {
    let primary =
        create_frankfurter_mock(frankfurter_ok(0.0061).set_delay(Duration::from_secs(5))).await;
    let secondary = create_open_er_api_mock(open_er_api_ok(0.0065), 1).await;

    let config = config_for(&primary.uri(), &secondary.uri(), 1);
    let quote = RateResolver::from_config(&config).unwrap().resolve().await;

    assert_eq!(quote.provenance, Provenance::Secondary);
    assert_eq!(quote.value, 0.0065);
}

#[test_log::test(tokio::test)]
async fn test_total_failure_falls_back() {
    let primary = create_frankfurter_mock(ResponseTemplate::new(500)).await;
    let secondary = create_open_er_api_mock(
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        1,
    )
    .await;

    let config = config_for(&primary.uri(), &secondary.uri(), 5);
    let quote = RateResolver::from_config(&config).unwrap().resolve().await;

    assert_eq!(quote.value, FALLBACK_RATE);
    assert_eq!(quote.provenance, Provenance::Fallback);
    assert!(!quote.caveat.unwrap_or_default().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_session_with_resolved_rate() {
    let primary = create_frankfurter_mock(ResponseTemplate::new(500)).await;
    let secondary = create_open_er_api_mock(ResponseTemplate::new(500), 1).await;

    let config = config_for(&primary.uri(), &secondary.uri(), 5);
    let resolver = std::sync::Arc::new(RateResolver::from_config(&config).unwrap());

    let mut session = Session::new(&config.defaults);
    let task = resolver.spawn();
    session.set_yen_price("1,000");
    session.set_markup_percent("5");
    assert!(session.is_loading());
    assert!(session.result().is_absent());

    session.apply_quote(task.join().await.expect("Resolution was cancelled"));

    assert!(session.caveat().is_some());
    let result = session.result();
    assert_eq!(result.get(ResultField::Base), Some("9300.00"));
    assert_eq!(result.get(ResultField::Final), Some("12640.00"));
    assert_eq!(result.get(ResultField::BaseWithMarkup), Some("9610.00"));
    assert_eq!(result.get(ResultField::FinalWithMarkup), Some("13043.00"));
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let primary = create_frankfurter_mock(frankfurter_ok(0.0062)).await;
    let secondary = create_open_er_api_mock(open_er_api_ok(0.0065), 0).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        providers:
          frankfurter:
            base_url: {}
          open_er_api:
            base_url: {}
        defaults:
          delivery_cost: "500"
    "#,
        primary.uri(),
        secondary.uri()
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let request = japan_car_calc::QuoteRequest {
        yen_price: "1000".to_string(),
        delivery_cost: None,
        markup_percent: Some("5".to_string()),
        field: None,
    };
    let result = japan_car_calc::run_command(
        japan_car_calc::AppCommand::Quote(request),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Quote command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_single_field_with_invalid_price_fails() {
    let primary = create_frankfurter_mock(frankfurter_ok(0.0062)).await;
    let secondary = create_open_er_api_mock(open_er_api_ok(0.0065), 0).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        "providers:\n  frankfurter:\n    base_url: {}\n  open_er_api:\n    base_url: {}\n",
        primary.uri(),
        secondary.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let request = japan_car_calc::QuoteRequest {
        yen_price: "abc".to_string(),
        field: Some(ResultField::Final),
        ..Default::default()
    };
    let result = japan_car_calc::run_command(
        japan_car_calc::AppCommand::Quote(request),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    let result =
        japan_car_calc::run_command(japan_car_calc::AppCommand::Rate, missing.to_str()).await;
    assert!(result.is_err());
}
