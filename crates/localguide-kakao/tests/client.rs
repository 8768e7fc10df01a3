//! Integration tests for `KakaoClient` using wiremock HTTP mocks.

use localguide_core::Coordinate;
use localguide_kakao::{KakaoClient, KakaoError, PlaceSearch, SearchQuery, SortOrder};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/v2/local/search/keyword.json";

fn test_client(base_url: &str) -> KakaoClient {
    KakaoClient::with_base_url("test-key", 5, "localguide-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn busan_city_hall() -> Coordinate {
    Coordinate {
        lon: 129.0756,
        lat: 35.1796,
    }
}

#[tokio::test]
async fn search_returns_places_in_provider_order() {
    let server = MockServer::start().await;

    let body = json!({
        "meta": { "total_count": 2, "pageable_count": 2, "is_end": true },
        "documents": [
            {
                "id": "1",
                "place_name": "쌍둥이돼지국밥",
                "category_name": "음식점 > 한식 > 국밥",
                "phone": "051-628-7020",
                "address_name": "부산 남구 대연동 1",
                "road_address_name": "부산 남구 유엔평화로 35-1",
                "x": "129.0951",
                "y": "35.1345",
                "place_url": "http://place.map.kakao.com/1",
                "distance": "250"
            },
            {
                "id": "2",
                "place_name": "본전돼지국밥",
                "category_name": "음식점 > 한식 > 국밥",
                "phone": "",
                "address_name": "부산 동구 초량동 2",
                "road_address_name": "",
                "x": "129.0396",
                "y": "35.1150",
                "place_url": "",
                "distance": "780"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "KakaoAK test-key"))
        .and(query_param("query", "돼지국밥"))
        .and(query_param("x", "129.0756"))
        .and(query_param("y", "35.1796"))
        .and(query_param("radius", "800"))
        .and(query_param("sort", "distance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = SearchQuery::new("돼지국밥")
        .near(busan_city_hall(), 800)
        .sorted_by(SortOrder::Distance);
    let places = client.search(&query).await.expect("should parse documents");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "쌍둥이돼지국밥");
    assert_eq!(places[0].address, "부산 남구 유엔평화로 35-1");
    assert_eq!(places[0].distance_m, Some(250));
    assert_eq!(places[1].name, "본전돼지국밥");
    assert_eq!(places[1].address, "부산 동구 초량동 2");
    assert!(places[1].phone.is_none());
}

#[tokio::test]
async fn null_fields_do_not_discard_the_page() {
    let server = MockServer::start().await;

    let body = json!({
        "meta": { "total_count": 3, "pageable_count": 3, "is_end": true },
        "documents": [
            {
                "id": "1",
                "place_name": "서면 밀면집",
                "category_name": "음식점 > 한식 > 냉면",
                "phone": "051-000-1111",
                "address_name": "부산 부산진구 부전동 1",
                "road_address_name": "부산 부산진구 중앙대로 1",
                "x": "129.0590",
                "y": "35.1577",
                "place_url": "http://place.map.kakao.com/1",
                "distance": "120"
            },
            {
                "id": null,
                "place_name": "전포 카페",
                "category_name": null,
                "phone": null,
                "address_name": "부산 부산진구 전포동 2",
                "road_address_name": null,
                "x": "129.0650",
                "y": "35.1550",
                "place_url": null,
                "distance": null
            },
            {
                "id": "3",
                "place_name": "좌표 없음",
                "x": null,
                "y": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search(&SearchQuery::new("서면"))
        .await
        .expect("nulls are tolerated per document");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "서면 밀면집");
    assert_eq!(places[1].name, "전포 카페");
    assert_eq!(places[1].address, "부산 부산진구 전포동 2");
    assert!(places[1].phone.is_none());
    assert!(places[1].distance_m.is_none());
}

#[tokio::test]
async fn empty_documents_is_ok_and_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "total_count": 0, "pageable_count": 0, "is_end": true },
            "documents": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search(&SearchQuery::new("없는가게"))
        .await
        .expect("empty page is not an error");
    assert!(places.is_empty());
}

#[tokio::test]
async fn unauthorized_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorType": "AccessDeniedError",
            "message": "wrong appKey"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(3, 0);
    let result = client.search(&SearchQuery::new("카페")).await;
    assert!(
        matches!(result, Err(KakaoError::UnexpectedStatus { status: 401, .. })),
        "expected UnexpectedStatus(401), got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_json_maps_to_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&SearchQuery::new("카페")).await;
    assert!(matches!(result, Err(KakaoError::Deserialize { .. })));
}

#[tokio::test]
async fn rate_limit_is_retried_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "place_name": "서면역",
                "address_name": "부산 부산진구 부전동",
                "x": "129.0592",
                "y": "35.1579"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(1, 0);
    let places = client
        .search(&SearchQuery::new("지하철역"))
        .await
        .expect("second attempt should succeed");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "서면역");
}

#[tokio::test]
async fn rate_limit_without_retry_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&SearchQuery::new("카페")).await;
    assert!(matches!(
        result,
        Err(KakaoError::RateLimited {
            retry_after_secs: 30
        })
    ));
}
