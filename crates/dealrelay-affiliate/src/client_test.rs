//! Wiremock tests for [`AffiliateApiClient`].

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::AffiliateApiClient;

const PRODUCT_URL: &str = "https://www.aliexpress.com/item/42.html";

fn client(server: &MockServer, token: Option<&str>) -> AffiliateApiClient {
    AffiliateApiClient::new(&format!("{}/generate", server.uri()), token, 5)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn generate_accepts_affiliate_link_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(serde_json::json!({ "url": PRODUCT_URL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "affiliate_link": "https://portal.example/aff/42" }),
        ))
        .mount(&server)
        .await;

    let link = client(&server, None).generate(PRODUCT_URL).await.unwrap();
    assert_eq!(link, "https://portal.example/aff/42");
}

#[tokio::test]
async fn generate_accepts_promotion_link_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "promotion_link": "https://portal.example/promo/42" }),
        ))
        .mount(&server)
        .await;

    let link = client(&server, None).generate(PRODUCT_URL).await.unwrap();
    assert_eq!(link, "https://portal.example/promo/42");
}

#[tokio::test]
async fn generate_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "affiliate_link": "https://portal.example/aff/42" }),
        ))
        .mount(&server)
        .await;

    let result = client(&server, Some("secret-token"))
        .generate(PRODUCT_URL)
        .await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn generate_soft_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client(&server, None).generate(PRODUCT_URL).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn generate_soft_fails_on_missing_link_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let result = client(&server, None).generate(PRODUCT_URL).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn generate_soft_fails_on_empty_link_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "affiliate_link": "" })),
        )
        .mount(&server)
        .await;

    let result = client(&server, None).generate(PRODUCT_URL).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn generate_soft_fails_when_api_echoes_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "affiliate_link": PRODUCT_URL })),
        )
        .mount(&server)
        .await;

    let result = client(&server, None).generate(PRODUCT_URL).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn generate_soft_fails_on_unreachable_endpoint() {
    let client = AffiliateApiClient::new("http://127.0.0.1:1/generate", None, 1)
        .expect("client construction should not fail");
    let result = client.generate(PRODUCT_URL).await;
    assert!(result.is_err());
}
