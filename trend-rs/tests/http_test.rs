//! HTTP-level tests for the provider adapters and the Reddit source,
//! served from a local mock server

use serde_json::{json, Value};
use std::time::Duration;
use trend_rs::prelude::*;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOUR_SECS: i64 = 3_600;
const START_SECS: i64 = 1_699_999_200;

fn client() -> reqwest::Client {
    http_client(Duration::from_secs(5)).unwrap()
}

fn no_backoff() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff: Duration::ZERO,
    }
}

/// CoinGecko, CryptoCompare and CoinPaprika all pointed at `server`
fn standard_chain(server: &MockServer, cryptocompare_key: Option<&str>) -> ProviderChain {
    let client = client();
    let providers: Vec<Box<dyn CandleProvider>> = vec![
        Box::new(CoinGecko::with_base_url(client.clone(), &server.uri())),
        Box::new(CryptoCompare::with_base_url(
            client.clone(),
            cryptocompare_key.map(str::to_string),
            &server.uri(),
        )),
        Box::new(CoinPaprika::with_base_url(client, &server.uri())),
    ];
    ProviderChain::new(providers, no_backoff())
}

fn histohour_body(count: i64) -> Value {
    let rows: Vec<Value> = (0..count)
        .map(|i| {
            let p = 100.0 + i as f64;
            json!({
                "time": START_SECS + i * HOUR_SECS,
                "open": p, "high": p + 1.0, "low": p - 1.0, "close": p + 0.5,
                "volumefrom": 10.0, "volumeto": 1000.0
            })
        })
        .collect();
    json!({"Response": "Success", "Message": "", "Data": {"Aggregated": false, "Data": rows}})
}

fn paprika_body(count: i64) -> Value {
    let rows: Vec<Value> = (0..count)
        .map(|i| {
            let open = chrono::DateTime::from_timestamp(START_SECS + i * HOUR_SECS, 0).unwrap();
            let p = 50.0 + i as f64;
            json!({
                "time_open": open.to_rfc3339(),
                "open": p, "high": p + 1.0, "low": p - 1.0, "close": p,
                "volume": 5.0, "market_cap": 0
            })
        })
        .collect();
    Value::Array(rows)
}

fn market_chart_body(count: i64) -> Value {
    // samples a couple of minutes past each hour
    let prices: Vec<Value> = (0..count)
        .map(|i| json!([(START_SECS + i * HOUR_SECS + 120) * 1000, 200.0 + i as f64]))
        .collect();
    json!({"prices": prices, "market_caps": [], "total_volumes": []})
}

#[tokio::test]
async fn test_rate_limited_primary_falls_over_to_keyed_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/v2/histohour"))
        .and(header("authorization", "Apikey secret-key"))
        .and(query_param("fsym", "BTC"))
        .and(query_param("tsym", "USD"))
        .and(query_param("limit", "99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(histohour_body(100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/btc-bitcoin/ohlcv/historical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paprika_body(100)))
        .expect(0)
        .mount(&server)
        .await;

    let chain = standard_chain(&server, Some("secret-key"));
    let candles = chain
        .fetch_candles(&Symbol::new("BTC"), Timeframe::Hour, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 100);
    assert_eq!(candles[0].timestamp, START_SECS * 1000);
    assert_eq!(candles[99].close, 199.5);
    assert_eq!(candles[0].volume, 10.0);
}

#[tokio::test]
async fn test_server_error_is_not_retried_and_unkeyed_provider_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/ethereum/market_chart"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/v2/histohour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(histohour_body(100)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/eth-ethereum/ohlcv/historical"))
        .and(query_param("interval", "1h"))
        .and(query_param("limit", "100"))
        .and(query_param("quote", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paprika_body(100)))
        .expect(1)
        .mount(&server)
        .await;

    let chain = standard_chain(&server, None);
    let candles = chain
        .fetch_candles(&Symbol::new("ETH"), Timeframe::Hour, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 100);
    assert_eq!(candles[0].timestamp, START_SECS * 1000);
    assert_eq!(candles[0].volume, 5.0);
}

#[tokio::test]
async fn test_hourly_market_chart_serves_the_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/solana/market_chart"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("days", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart_body(120)))
        .expect(1)
        .mount(&server)
        .await;

    let chain = standard_chain(&server, None);
    let candles = chain
        .fetch_candles(&Symbol::new("SOL"), Timeframe::Hour, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 100);
    for pair in candles.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, HOUR_SECS * 1000);
        assert_eq!(pair[1].open, pair[0].close);
    }
    assert_eq!(candles[99].close, 319.0);
}

#[tokio::test]
async fn test_status_codes_map_to_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/cardano/market_chart"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/ada-cardano/ohlcv/historical"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/v2/histohour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "Error",
            "Message": "You are over your rate limit please upgrade your account!",
            "Data": {}
        })))
        .mount(&server)
        .await;

    let asset = Asset::lookup("ADA");
    let gecko = CoinGecko::with_base_url(client(), &server.uri());
    let paprika = CoinPaprika::with_base_url(client(), &server.uri());
    let compare = CryptoCompare::with_base_url(client(), Some("k".to_string()), &server.uri());

    assert!(matches!(
        gecko.fetch(&asset, Timeframe::Hour, 100).await,
        Err(ProviderError::RateLimited)
    ));
    assert!(matches!(
        paprika.fetch(&asset, Timeframe::Hour, 100).await,
        Err(ProviderError::Status(404))
    ));
    assert!(matches!(
        compare.fetch(&asset, Timeframe::Hour, 100).await,
        Err(ProviderError::RateLimited)
    ));
}

fn reddit_source(server: &MockServer) -> RedditSource {
    let credentials = RedditCredentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        username: "trader".to_string(),
        password: "hunter2".to_string(),
    };
    RedditSource::new(Some(credentials), "CryptoCurrency", "trend-rs-test", Duration::from_secs(5))
        .unwrap()
        .with_urls(&format!("{}/api/v1/access_token", server.uri()), &server.uri())
}

#[tokio::test]
async fn test_reddit_password_grant_then_search() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=trader"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok", "token_type": "bearer", "expires_in": 86400})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/CryptoCurrency/search"))
        .and(header("authorization", "Bearer tok"))
        .and(header("user-agent", "trend-rs-test"))
        .and(query_param("q", "bitcoin"))
        .and(query_param("restrict_sr", "1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Listing",
            "data": {"children": [
                {"kind": "t3", "data": {"title": "great rally, very bullish", "selftext": ""}},
                {"kind": "t3", "data": {"title": "love it", "selftext": ""}}
            ]}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let engine = SentimentEngine::with_lexicon(Box::new(reddit_source(&server)));
    let first = engine.measure("bitcoin").await;
    let second = engine.measure("bitcoin").await;

    assert_eq!(first.posts, 2);
    assert_eq!(first.sentiment, Sentiment::Positive);
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_reddit_token_error_degrades_to_neutral() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized", "error": 401})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/CryptoCurrency/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let engine = SentimentEngine::with_lexicon(Box::new(reddit_source(&server)));
    assert_eq!(engine.measure("bitcoin").await, SentimentReading::neutral());
}

#[tokio::test]
async fn test_reddit_search_unauthorized_drops_cached_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "stale"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/CryptoCurrency/search"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let source = reddit_source(&server);
    for _ in 0..2 {
        assert!(matches!(
            source.recent_posts("bitcoin", 50).await,
            Err(SentimentError::Status(401))
        ));
    }
}
