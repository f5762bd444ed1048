// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{crawlers_dir, MockSession};
use farecrawl::domain::models::trip::TripQuery;
use farecrawl::domain::repositories::config_repository::{ConfigError, ScrapeConfigRepository};
use farecrawl::domain::services::crawl_service::CrawlService;
use farecrawl::infrastructure::repositories::file_config_repo_impl::FileConfigRepository;
use farecrawl::utils::errors::CrawlError;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn query() -> TripQuery {
    TripQuery::new("GRU", "JFK", "2024-06-01", "2024-06-10")
}

// Three LATAM result cards; the middle flight is direct and carries no stops badge
const LATAM_RESULTS_DOM: &str = r#"
<html><body>
  <ol aria-label="Voos disponiveis">
    <li data-testid="wrapper-card-flight-0">
      <div data-testid="flight-operator"><span>LATAM Airlines</span></div>
      <div data-testid="departure-time"><span>08:15</span></div>
      <div data-testid="departure-airport"><span>GRU</span></div>
      <div data-testid="arrival-time"><span>16:40</span></div>
      <div data-testid="arrival-airport"><span>JFK</span></div>
      <div data-testid="duration"><span>9h 25min</span></div>
      <div data-testid="stops"><a>1 parada</a></div>
      <div data-testid="price"><span class="display-currency-amount">R$ 3.541,22</span></div>
    </li>
    <li data-testid="wrapper-card-flight-1">
      <div data-testid="flight-operator"><span>LATAM Airlines</span></div>
      <div data-testid="departure-time"><span>10:05</span></div>
      <div data-testid="departure-airport"><span>GRU</span></div>
      <div data-testid="arrival-time"><span>18:20</span></div>
      <div data-testid="arrival-airport"><span>JFK</span></div>
      <div data-testid="duration"><span>10h 15min</span></div>
      <div data-testid="price"><span class="display-currency-amount">R$ 4.102,90</span></div>
    </li>
    <li data-testid="wrapper-card-flight-2">
      <div data-testid="flight-operator"><span>LATAM Airlines</span></div>
      <div data-testid="departure-time"><span>23:55</span></div>
      <div data-testid="departure-airport"><span>GRU</span></div>
      <div data-testid="arrival-time"><span>09:10</span></div>
      <div data-testid="arrival-airport"><span>JFK</span></div>
      <div data-testid="duration"><span>11h 15min</span></div>
      <div data-testid="stops"><a>2 paradas</a></div>
      <div data-testid="price"><span class="display-currency-amount">R$ 2.988,00</span></div>
    </li>
  </ol>
</body></html>
"#;

#[tokio::test]
async fn test_latam_end_to_end_against_mock_dom() {
    let repo = Arc::new(FileConfigRepository::new(crawlers_dir()));
    let service = CrawlService::new(repo);
    let (session, calls, closed) = MockSession::new(LATAM_RESULTS_DOM);

    let report = service.crawl("Latam", &query(), session).await.unwrap();

    // One record per result card, in document order
    assert_eq!(report.records.len(), 3);
    let prices: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.get("flight_price").unwrap())
        .collect();
    assert_eq!(prices, vec!["R$ 3.541,22", "R$ 4.102,90", "R$ 2.988,00"]);

    // The direct flight has no stops badge; every sibling field still extracts
    let direct = &report.records[1];
    assert!(direct.has_field("stops_info"));
    assert_eq!(direct.get("stops_info"), None);
    assert_eq!(direct.get("airline_name"), Some("LATAM Airlines"));
    assert_eq!(direct.get("departure_time"), Some("10:05"));
    assert_eq!(direct.get("departure_airport_code"), Some("GRU"));
    assert_eq!(direct.get("arrival_time"), Some("18:20"));
    assert_eq!(direct.get("arrival_airport_code"), Some("JFK"));
    assert_eq!(direct.get("duration"), Some("10h 15min"));

    assert_eq!(report.records[0].get("stops_info"), Some("1 parada"));
    assert_eq!(report.records[2].get("stops_info"), Some("2 paradas"));

    // Script ran fully substituted, then the snapshot was taken
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("goto https://www.latamairlines.com/"));
    assert!(calls[0].contains("origin=GRU"));
    assert!(calls[0].contains("destination=JFK"));
    assert!(calls[0].contains("outbound=2024-06-01"));
    assert!(calls[0].contains("inbound=2024-06-10"));
    assert!(!calls[0].contains("{{"));
    assert_eq!(calls[1], "wait 15s");
    assert_eq!(calls[2], "document");

    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_latam_with_empty_results_page_yields_no_records() {
    let repo = Arc::new(FileConfigRepository::new(crawlers_dir()));
    let service = CrawlService::new(repo);
    let (session, _calls, closed) = MockSession::new("<html><body>Sem voos</body></html>");

    let report = service.crawl("latam", &query(), session).await.unwrap();

    assert!(report.records.is_empty());
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_gol_script_drives_inputs_and_key_press_in_order() {
    let repo = Arc::new(FileConfigRepository::new(crawlers_dir()));
    let service = CrawlService::new(repo);
    let (session, calls, _closed) = MockSession::new("<html></html>");

    let report = service.crawl("gol", &query(), session).await.unwrap();
    assert!(report.records.is_empty());

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            "goto https://b2c.voegol.com.br/compra/busca-passagens",
            "click #onetrust-accept-btn-handler",
            "type input[name='originAirport']=GRU",
            "type input[name='destinationAirport']=JFK",
            "type input[name='departureDate']=2024-06-01",
            "type input[name='returnDate']=2024-06-10",
            "press Some(\"input[name='returnDate']\") Enter",
            "wait 12s",
            "document",
        ]
    );
}

#[tokio::test]
async fn test_unknown_airline_never_touches_the_session() {
    let repo = Arc::new(FileConfigRepository::new(crawlers_dir()));
    let service = CrawlService::new(repo);
    let (session, calls, closed) = MockSession::new("<html></html>");

    let err = service.crawl("emirates", &query(), session).await.unwrap_err();

    assert!(matches!(
        err,
        CrawlError::Config(ConfigError::NotFound(_))
    ));
    assert!(calls.lock().unwrap().is_empty());
    assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_bundled_scripts_parse_and_validate() {
    for name in ["latam", "gol"] {
        let raw = std::fs::read_to_string(crawlers_dir().join(format!("{name}.json"))).unwrap();
        let config: farecrawl::domain::models::scrape_config::ScrapeConfig =
            serde_json::from_str(&raw).unwrap();
        config
            .validate()
            .unwrap_or_else(|e| panic!("bundled script '{name}' is invalid: {e}"));
    }
}
