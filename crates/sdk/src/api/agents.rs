//! Agents API endpoints.

use crate::client::OrbitalClient;
use crate::error::OrbitalResult;
use orbital_core::types::{Agent, Paginated};
use serde::Serialize;

/// Agents API for browsing the agent catalog.
pub struct AgentsApi<'a> {
    client: &'a OrbitalClient,
}

impl<'a> AgentsApi<'a> {
    pub(crate) fn new(client: &'a OrbitalClient) -> Self {
        Self { client }
    }

    /// List agents for an organization, one page at a time.
    pub async fn list(
        &self,
        organization_id: &str,
        page: u32,
        page_size: u32,
    ) -> OrbitalResult<Vec<Agent>> {
        let query = ListAgentsQuery {
            organization_id,
            page,
            page_size,
        };
        let response: Paginated<Agent> = self
            .client
            .http
            .get_with_query("/agents", &query)
            .await
            .map_err(|e| e.with_context("get agents"))?;
        Ok(response.items)
    }
}

#[derive(Debug, Serialize)]
struct ListAgentsQuery<'a> {
    organization_id: &'a str,
    page: u32,
    page_size: u32,
}

#[cfg(test)]
mod tests {
    use crate::client::OrbitalClient;
    use crate::config::RetryConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_unwraps_page_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/agents"))
            .and(query_param("organization_id", "org_1"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": "iris", "name": "Iris", "created_at": "2026-01-01T00:00:00Z"}
                ],
                "page": 2,
                "page_size": 10,
                "total": 11
            })))
            .mount(&server)
            .await;

        let client = OrbitalClient::builder()
            .base_url(server.uri())
            .retry_config(RetryConfig::no_retry())
            .build()
            .unwrap();

        let agents = client.agents().list("org_1", 2, 10).await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name, "Iris");
    }
}
