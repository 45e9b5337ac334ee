use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{FetchError, HomeworkApi};
use crate::config::BotConfig;

/// Homework statuses client for the Practicum API. No retries.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl PracticumClient {
    pub fn new(client: Client, endpoint: Url, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            token: token.into(),
        }
    }

    pub fn from_config(config: &BotConfig, client: Client) -> Self {
        Self::new(client, config.endpoint.clone(), &config.practicum_token)
    }

    pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, FetchError> {
        let url = self.endpoint.as_str();
        debug!(url, from_date, "Requesting homework statuses");

        let unreachable = |e: reqwest::Error| FetchError::Unreachable {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "Homework endpoint unreachable");
                unreachable(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, status = status.as_u16(), "Homework endpoint returned unexpected status");
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(unreachable)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            body,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PracticumClient {
        let endpoint =
            Url::parse(&format!("{}/api/user_api/homework_statuses/", server.uri())).unwrap();
        let client = PracticumClient::build_client(Duration::from_secs(5)).unwrap();
        PracticumClient::new(client, endpoint, "secret-token")
    }

    #[tokio::test]
    async fn returns_json_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user_api/homework_statuses/"))
            .and(header("Authorization", "OAuth secret-token"))
            .and(query_param("from_date", "1700000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "homeworks": [{"homework_name": "hw1", "status": "approved"}],
                "current_date": 1700000100
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server).homework_statuses(1_700_000_000).await.unwrap();
        assert_eq!(value["homeworks"][0]["homework_name"], "hw1");
        assert_eq!(value["current_date"], 1700000100);
    }

    #[tokio::test]
    async fn returns_status_error_on_500_without_retrying() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).homework_statuses(0).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn non_ok_success_codes_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client_for(&server).homework_statuses(0).await.unwrap_err();
        assert_eq!(err.status_code(), Some(204));
    }

    #[tokio::test]
    async fn returns_parse_error_with_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).homework_statuses(0).await.unwrap_err();
        match err {
            FetchError::Parse { body, .. } => assert_eq!(body, "<html>maintenance</html>"),
            other => panic!("expected FetchError::Parse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        let endpoint = Url::parse("http://127.0.0.1:1/homework_statuses/").unwrap();
        let client = PracticumClient::build_client(Duration::from_secs(5)).unwrap();
        let api = PracticumClient::new(client, endpoint, "secret-token");

        let err = api.homework_statuses(0).await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable { .. }), "{err:?}");
    }

    #[test]
    fn debug_hides_token() {
        let endpoint = Url::parse("http://localhost/").unwrap();
        let api = PracticumClient::new(Client::new(), endpoint, "secret-token");
        assert!(!format!("{api:?}").contains("secret-token"));
    }
}
