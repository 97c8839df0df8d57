use companies_house_api::{Client, Error, FilingHistoryQuery, Query, SearchQuery};
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn search_sends_basic_auth_and_paging() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("search_truck_tyre.json");

    Mock::given(method("GET"))
        .and(path("/search/companies"))
        .and(basic_auth(KEY, ""))
        .and(query_param("q", "truck tyre"))
        .and(query_param("items_per_page", "100"))
        .and(query_param("start_index", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let query = SearchQuery::new("truck tyre")
        .with_items_per_page(100)
        .with_start_index(0);
    let page = client.search_companies(&query).await.unwrap().unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].company_number, "01234567");
}

#[tokio::test]
async fn profile_not_found_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company/00000000"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"errors":[]}"#))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let result = client.get_company_profile("00000000").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company/01234567/officers"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let result = client.get_officers("01234567").await;
    assert!(matches!(result, Err(Error::RateLimited)));
}

#[tokio::test]
async fn server_error_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company/01234567/charges"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    match client.get_charges("01234567").await {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn unauthorized_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/companies"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let result = client.search_companies(&SearchQuery::new("truck tyre")).await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 401, .. })));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company/01234567"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let result = client.get_company_profile("01234567").await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn filing_history_passes_page_size() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("filing_history.json");

    Mock::given(method("GET"))
        .and(path("/company/01234567/filing-history"))
        .and(query_param("items_per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let query = FilingHistoryQuery::default().with_items_per_page(10);
    let list = client
        .get_filing_history("01234567", &query)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(list.items.len(), 2);
}

#[tokio::test]
async fn psc_endpoint_path() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("psc.json");

    Mock::given(method("GET"))
        .and(path("/company/01234567/persons-with-significant-control"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), KEY).unwrap();
    let list = client
        .get_persons_with_significant_control("01234567")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(list.items.len(), 2);
}

#[tokio::test]
async fn unreachable_host_is_request_failed() {
    let client = Client::with_base_url("http://127.0.0.1:1", KEY).unwrap();
    let result = client.get_company_profile("01234567").await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
