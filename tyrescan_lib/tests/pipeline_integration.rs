use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde_json::json;
use tyrescan_lib::companies_house_api::Client;
use tyrescan_lib::{
    enrich_all, find_candidates, BusinessType, Classifier, ClassifierRules, Dataset, PacedClient,
    ScanConfig, ScanError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn config(uri: &str, queries: &[&str]) -> ScanConfig {
    ScanConfig {
        api_key: "test-key".into(),
        base_url: uri.into(),
        min_request_interval_ms: 0,
        rate_limit_backoff_secs: 0,
        queries: queries.iter().map(|q| q.to_string()).collect(),
        ..Default::default()
    }
}

fn paced(uri: &str, backoff: Duration) -> PacedClient {
    let inner = Client::with_base_url(uri, "test-key").unwrap();
    PacedClient::with_client(inner, Duration::ZERO, backoff)
}

async fn mount_search(server: &MockServer, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search/companies"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn single_hit(number: &str, name: &str) -> serde_json::Value {
    json!({
        "total_results": 1,
        "items": [{
            "company_number": number,
            "title": name,
            "company_status": "active",
            "company_type": "ltd",
            "date_of_creation": "2010-01-01"
        }]
    })
}

async fn mount_company(server: &MockServer, number: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/company/{}", number)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "company_number": number,
            "company_name": "TRUCK TYRE CO LIMITED",
            "company_status": "active",
            "type": "ltd",
            "registered_office_address": {
                "address_line_1": "1 High St",
                "locality": "Leeds",
                "postal_code": "LS1 1AA",
                "country": "England"
            },
            "sic_codes": ["22110", "99999", "45200"]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/company/{}/officers", number)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"name": "A", "officer_role": "director"},
                {"name": "B", "officer_role": "director", "resigned_on": "2020-01-01"},
                {"name": "C", "officer_role": "secretary"}
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/company/{}/filing-history", number)))
        .and(query_param("items_per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"date": "2024-02-01", "type": "CS01", "description": "confirmation-statement"}]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[tokio::test]
async fn duplicate_hits_across_queries_yield_one_record() {
    let server = MockServer::start().await;
    mount_search(&server, "truck tyre", single_hit("01234567", "Truck Tyre Co")).await;
    mount_search(&server, "lorry tyre", single_hit("01234567", "Truck Tyre Co")).await;
    mount_company(&server, "01234567").await;
    // charges and PSC are not mounted: wiremock answers 404

    let config = config(&server.uri(), &["truck tyre", "lorry tyre"]);
    let client = paced(&server.uri(), Duration::ZERO);
    let classifier = Classifier::default();

    let candidates = find_candidates(&client, &config, &classifier).await.unwrap();
    assert_eq!(candidates.len(), 1);

    let mut seen = 0;
    let records = enrich_all(&client, &candidates, &config, &classifier, |_| seen += 1).await;
    assert_eq!(seen, 1);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.company_number, "01234567");
    assert_eq!(record.company_name, "TRUCK TYRE CO LIMITED");
    assert_eq!(record.registered_address, "1 High St, Leeds, LS1 1AA, England");
    assert_eq!(
        record.sic_descriptions,
        "22110: Manufacture of rubber tyres and tubes; 99999: SIC code 99999; \
         45200: Maintenance and repair of motor vehicles"
    );
    assert_eq!(record.active_directors, 1);
    assert_eq!(record.director_names, "A");
    assert_eq!(record.total_filings, 1);
    assert_eq!(record.latest_filing_type, "CS01");
    assert_eq!(record.total_charges, 0);
    assert_eq!(record.psc_count, 0);
    assert_eq!(record.business_type, BusinessType::Specialist);
    assert_eq!(record.query_term, "truck tyre");

    let generated = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let dataset = Dataset::build(records, &config.queries, generated);
    assert_eq!(dataset.active_only.len(), 1);
    assert_eq!(dataset.truck_commercial.len(), 1);
    assert!(dataset.mobile_services.is_empty());
}

#[tokio::test]
async fn enrichment_survives_server_errors() {
    let server = MockServer::start().await;
    mount_search(&server, "hgv tyre", single_hit("07654321", "HGV Tyre Wholesale Ltd")).await;
    Mock::given(method("GET"))
        .and(path("/company/07654321"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/company/07654321/officers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/company/07654321/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"status": "outstanding"}, {"status": "satisfied"}]
        })))
        .mount(&server)
        .await;

    let config = config(&server.uri(), &["hgv tyre"]);
    let client = paced(&server.uri(), Duration::ZERO);
    let classifier = Classifier::default();

    let candidates = find_candidates(&client, &config, &classifier).await.unwrap();
    let records = enrich_all(&client, &candidates, &config, &classifier, |_| {}).await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.company_name, "HGV Tyre Wholesale Ltd");
    assert_eq!(record.status, "active");
    assert_eq!(record.total_officers, 0);
    assert_eq!(record.total_charges, 2);
    assert_eq!(record.outstanding_charges, 1);
    assert_eq!(record.business_type, BusinessType::Wholesaler);

    let summary = client.tracker().summary();
    assert_eq!(summary.requests_failed, 2);
}

#[tokio::test]
async fn rate_limited_enrichment_call_is_retried() {
    let server = MockServer::start().await;
    mount_search(&server, "truck tyre", single_hit("01234567", "Truck Tyre Co")).await;
    Mock::given(method("GET"))
        .and(path("/company/01234567"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_company(&server, "01234567").await;

    let config = config(&server.uri(), &["truck tyre"]);
    let backoff = Duration::from_millis(200);
    let client = paced(&server.uri(), backoff);
    let classifier = Classifier::default();

    let start = Instant::now();
    let candidates = find_candidates(&client, &config, &classifier).await.unwrap();
    let records = enrich_all(&client, &candidates, &config, &classifier, |_| {}).await;

    assert!(start.elapsed() >= backoff);
    assert_eq!(records[0].company_name, "TRUCK TYRE CO LIMITED");
    assert_eq!(client.tracker().summary().requests_rate_limited, 1);
}

#[tokio::test]
async fn search_only_mode_makes_no_company_calls() {
    let server = MockServer::start().await;
    mount_search(&server, "tyre retread", single_hit("01234567", "ACME Tyre Retread")).await;
    Mock::given(method("GET"))
        .and(path("/company/01234567"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config(&server.uri(), &["tyre retread"]);
    config.enrich = false;
    let client = paced(&server.uri(), Duration::ZERO);
    let classifier = Classifier::new(ClassifierRules::default(), true);

    let candidates = find_candidates(&client, &config, &classifier).await.unwrap();
    let records = enrich_all(&client, &candidates, &config, &classifier, |_| {}).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].business_type, BusinessType::Retreader);
    assert_eq!(records[0].categories, "retread");
    assert_eq!(records[0].total_officers, 0);
    assert_eq!(client.tracker().summary().requests_made, 1);
}

#[tokio::test]
async fn bad_credentials_abort_before_any_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/companies"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server.uri(), &["truck tyre", "lorry tyre"]);
    let client = paced(&server.uri(), Duration::ZERO);

    let result = find_candidates(&client, &config, &Classifier::default()).await;
    assert!(matches!(result, Err(ScanError::FirstSearchFailed(_))));
}

#[tokio::test]
async fn paced_client_from_config_hits_configured_base_url() {
    let server = MockServer::start().await;
    mount_search(&server, "fleet tyre", single_hit("01234567", "Fleet Tyre Services")).await;

    let config = config(&server.uri(), &["fleet tyre"]);
    let client = PacedClient::new(&config).unwrap();
    let candidates = find_candidates(&client, &config, &Classifier::default())
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].business_type, BusinessType::Fitter);
}
