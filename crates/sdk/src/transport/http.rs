//! HTTP transport layer for the Orbital SDK.

use crate::config::ClientConfig;
use crate::error::{OrbitalError, OrbitalResult};
use crate::transport::response::{normalize, Envelope, ErrorBody};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    /// Bare client for pre-signed URLs; must not leak the API key header to
    /// third-party storage hosts.
    external: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> OrbitalResult<Self> {
        let mut headers = header::HeaderMap::new();

        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::HeaderName::from_static("x-orbital-agents-api-key"),
                header::HeaderValue::from_str(api_key)
                    .map_err(|_| OrbitalError::Config("Invalid API key format".to_string()))?,
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let external = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            external,
            config,
        })
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> OrbitalResult<url::Url> {
        self.config
            .base_url
            .join(path)
            .map_err(OrbitalError::InvalidUrl)
    }

    /// Execute a request with retries.
    ///
    /// Returns the response for any success status; a non-success status
    /// after the retry budget becomes a normalized [`OrbitalError::Api`].
    async fn execute_with_retry(&self, request_builder: RequestBuilder) -> OrbitalResult<Response> {
        let retry_config = &self.config.retry_config;
        let mut attempts = 0;

        loop {
            let request = request_builder
                .try_clone()
                .ok_or_else(|| OrbitalError::Config("Request cannot be cloned".to_string()))?;

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if response.status().is_success() {
                        return Ok(response);
                    }

                    if attempts < retry_config.max_retries
                        && retry_config.should_retry_status(status)
                    {
                        let backoff = retry_config.backoff_for_attempt(attempts);
                        warn!(
                            status = status,
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    return Err(OrbitalError::Api {
                        message: ErrorBody::from_body(&body).message(),
                    });
                }
                Err(e) => {
                    if attempts < retry_config.max_retries && e.is_timeout() {
                        let backoff = retry_config.backoff_for_attempt(attempts);
                        warn!(
                            attempt = attempts + 1,
                            backoff_ms = backoff.as_millis(),
                            "Request timed out, retrying"
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Decode a success response body through the normalizer.
    ///
    /// Empty and `null` bodies both count as missing data.
    async fn decode<T: DeserializeOwned>(
        response: Response,
        missing_data_message: Option<&str>,
    ) -> OrbitalResult<T> {
        let body = response.text().await?;
        let data = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Option<T>>(&body)?
        };
        normalize(Envelope { data, error: None }, missing_data_message)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> OrbitalResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute_with_retry(self.client.get(url)).await?;
        Self::decode(response, None).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> OrbitalResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        let response = self
            .execute_with_retry(self.client.get(url).query(query))
            .await?;
        Self::decode(response, None).await
    }

    /// Execute a GET request for a plain-text resource.
    ///
    /// Accepts either a raw text body or a JSON-encoded string.
    pub async fn get_text(
        &self,
        path: &str,
        missing_data_message: Option<&str>,
    ) -> OrbitalResult<String> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request (text)");

        let response = self.execute_with_retry(self.client.get(url)).await?;
        let body = response.text().await?;
        let body = serde_json::from_str::<String>(&body).unwrap_or(body);
        let data = if body.trim().is_empty() { None } else { Some(body) };
        normalize(Envelope { data, error: None }, missing_data_message)
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> OrbitalResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .execute_with_retry(self.client.post(url).json(body))
            .await?;
        Self::decode(response, None).await
    }

    /// Execute a POST request without a response body.
    pub async fn post_no_response<B: Serialize>(&self, path: &str, body: &B) -> OrbitalResult<()> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request (no response)");

        self.execute_with_retry(self.client.post(url).json(body))
            .await?;
        Ok(())
    }

    /// Execute a multipart POST request.
    ///
    /// Multipart bodies cannot be cloned, so these requests bypass the retry
    /// loop and are sent exactly once.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> OrbitalResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request (multipart)");

        let response = self.client.post(url).multipart(form).send().await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrbitalError::Api {
                message: ErrorBody::from_body(&body).message(),
            });
        }
        Self::decode(response, None).await
    }

    /// Execute a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> OrbitalResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "PUT request");

        let response = self
            .execute_with_retry(self.client.put(url).json(body))
            .await?;
        Self::decode(response, None).await
    }

    /// Execute a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> OrbitalResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "DELETE request");

        let response = self.execute_with_retry(self.client.delete(url)).await?;
        Self::decode(response, None).await
    }

    /// Fetch an absolute URL (e.g. a pre-signed storage link) without the
    /// API headers.
    pub(crate) async fn fetch_absolute(&self, url: &str) -> OrbitalResult<Response> {
        debug!(url = %url, "GET request (absolute)");

        let response = self.external.get(url).send().await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrbitalError::Api {
                message: ErrorBody::from_body(&body).message(),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    #[derive(Debug, Serialize)]
    struct TestRequest {
        name: String,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: url::Url::parse(base_url).unwrap(),
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::no_retry(),
        })
    }

    fn create_config_with_auth(base_url: &str, api_key: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: url::Url::parse(base_url).unwrap(),
            api_key: Some(api_key.to_string()),
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::no_retry(),
        })
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "success".to_string(),
                value: 42,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/test").await.unwrap();
        assert_eq!(result.message, "success");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "created".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let request = TestRequest {
            name: "test".to_string(),
        };
        let result: TestResponse = transport.post("/create", &request).await.unwrap();
        assert_eq!(result.message, "created");
    }

    #[tokio::test]
    async fn test_api_key_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/protected"))
            .and(header("x-orbital-agents-api-key", "sk-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "authorized".to_string(),
                value: 100,
            }))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(create_config_with_auth(&server.uri(), "sk-test-key")).unwrap();

        let result: TestResponse = transport.get("/protected").await.unwrap();
        assert_eq!(result.message, "authorized");
    }

    #[tokio::test]
    async fn test_error_message_from_tagged_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Bad Request"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport.get::<TestResponse>("/bad").await.unwrap_err();
        match err {
            OrbitalError::Api { message } => assert_eq!(message, "Bad Request"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_message_from_text_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notfound"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport.get::<TestResponse>("/notfound").await.unwrap_err();
        match err {
            OrbitalError::Api { message } => assert_eq!(message, "Not found"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_is_unknown_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport.get::<TestResponse>("/broken").await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[tokio::test]
    async fn test_empty_success_body_is_missing_data() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport.get::<TestResponse>("/empty").await.unwrap_err();
        assert_eq!(err.to_string(), "No response data received");
    }

    #[tokio::test]
    async fn test_null_success_body_is_missing_data() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/null"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport.get::<TestResponse>("/null").await.unwrap_err();
        assert_eq!(err.to_string(), "No response data received");
    }

    #[tokio::test]
    async fn test_get_text_custom_missing_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pem"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let err = transport
            .get_text("/pem", Some("Public key not found"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Public key not found");
    }

    #[tokio::test]
    async fn test_get_text_accepts_json_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pem"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("\"-----BEGIN PUBLIC KEY-----\""),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let pem = transport.get_text("/pem", None).await.unwrap();
        assert_eq!(pem, "-----BEGIN PUBLIC KEY-----");
    }

    #[tokio::test]
    async fn test_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "recovered".to_string(),
                value: 7,
            }))
            .mount(&server)
            .await;

        let config = Arc::new(ClientConfig {
            base_url: url::Url::parse(&server.uri()).unwrap(),
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig {
                max_retries: 3,
                initial_backoff: Duration::from_millis(5),
                ..Default::default()
            },
        });
        let transport = HttpTransport::new(config).unwrap();

        let result: TestResponse = transport.get("/flaky").await.unwrap();
        assert_eq!(result.message, "recovered");
    }

    #[tokio::test]
    async fn test_put_request() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "updated".to_string(),
                value: 2,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let request = TestRequest {
            name: "updated".to_string(),
        };
        let result: TestResponse = transport.put("/update", &request).await.unwrap();
        assert_eq!(result.message, "updated");
    }

    #[tokio::test]
    async fn test_delete_request() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/remove"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "deleted".to_string(),
                value: 0,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.delete("/remove").await.unwrap();
        assert_eq!(result.message, "deleted");
    }

    #[tokio::test]
    async fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8080")).unwrap();

        let url = transport.build_url("/execution/E1/status").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/execution/E1/status");
    }
}
