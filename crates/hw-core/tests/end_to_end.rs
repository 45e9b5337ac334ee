//! Poller wired to the real HTTP clients, against wiremock servers.

use std::sync::Arc;
use std::time::Duration;

use hw_core::{BotConfig, PollOutcome, Poller, PracticumClient, TelegramNotifier};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn poller_for(practicum: &MockServer, telegram: &MockServer) -> Poller {
    let lookup = |name: &str| match name {
        "PRACTICUM_TOKEN" => Some("practicum-token".to_string()),
        "TELEGRAM_TOKEN" => Some("42:telegram".to_string()),
        "TELEGRAM_CHAT_ID" => Some("1001".to_string()),
        _ => None,
    };
    let config = BotConfig::from_lookup(lookup)
        .unwrap()
        .with_endpoint(Url::parse(&format!("{}/homework_statuses/", practicum.uri())).unwrap())
        .with_telegram_api_url(Url::parse(&telegram.uri()).unwrap());

    let client = PracticumClient::build_client(Duration::from_secs(5)).unwrap();
    let api = Arc::new(PracticumClient::from_config(&config, client.clone()));
    let notifier = Arc::new(TelegramNotifier::from_config(&config, client));
    Poller::from_config(&config, api, notifier).with_from_date(1_700_000_000)
}

fn telegram_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"message_id": 7}}))
}

#[tokio::test]
async fn status_change_reaches_telegram() {
    let practicum = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homework_statuses/"))
        .and(header("Authorization", "OAuth practicum-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "homeworks": [{"homework_name": "hw08_blog.zip", "status": "approved"}],
            "current_date": 1_700_000_600
        })))
        .mount(&practicum)
        .await;

    Mock::given(method("POST"))
        .and(path("/bot42:telegram/sendMessage"))
        .and(body_string_contains("hw08_blog.zip"))
        .respond_with(telegram_ok())
        .expect(1)
        .mount(&telegram)
        .await;

    let mut poller = poller_for(&practicum, &telegram);
    assert_eq!(poller.interval(), Duration::from_secs(600));
    let outcome = poller.tick().await.unwrap();
    assert!(matches!(outcome, PollOutcome::StatusChanged { delivered: true, .. }));

    assert_eq!(poller.tick().await.unwrap(), PollOutcome::Unchanged);
}

#[tokio::test]
async fn server_error_is_forwarded_to_chat() {
    let practicum = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&practicum)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("500"))
        .respond_with(telegram_ok())
        .expect(1)
        .mount(&telegram)
        .await;

    let mut poller = poller_for(&practicum, &telegram);
    let err = poller.tick().await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn empty_list_sends_nothing() {
    let practicum = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"homeworks": []})))
        .mount(&practicum)
        .await;

    Mock::given(method("POST"))
        .respond_with(telegram_ok())
        .expect(0)
        .mount(&telegram)
        .await;

    let mut poller = poller_for(&practicum, &telegram);
    assert_eq!(poller.tick().await.unwrap(), PollOutcome::NoUpdates);
}

#[tokio::test]
async fn telegram_outage_does_not_fail_the_iteration() {
    let practicum = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "homeworks": [{"homework_name": "hw", "status": "rejected"}]
        })))
        .mount(&practicum)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&telegram)
        .await;

    let mut poller = poller_for(&practicum, &telegram);
    let outcome = poller.tick().await.unwrap();
    assert!(matches!(outcome, PollOutcome::StatusChanged { delivered: false, .. }));
    assert!(poller.state().last_status.contains("hw"));
}
