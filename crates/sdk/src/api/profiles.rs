//! Agent profiles API endpoints.
//!
//! Profile writes are the only operations that carry plaintext secrets, so
//! both of them encrypt credentials with a freshly fetched public key before
//! the request leaves the client.

use crate::client::OrbitalClient;
use crate::crypto::encrypt_credentials;
use crate::error::OrbitalResult;
use orbital_core::profile::{AgentProfile, Credential, ProfileCookie};
use orbital_core::types::ProfileId;
use serde::{Deserialize, Serialize};

/// Profiles API for managing agent profiles and their credentials.
pub struct ProfilesApi<'a> {
    client: &'a OrbitalClient,
}

impl<'a> ProfilesApi<'a> {
    pub(crate) fn new(client: &'a OrbitalClient) -> Self {
        Self { client }
    }

    /// List agent profiles, optionally scoped to one organization.
    pub async fn list(&self, organization_id: Option<&str>) -> OrbitalResult<Vec<AgentProfile>> {
        let query = ListProfilesQuery { organization_id };
        self.client
            .http
            .get_with_query("/agent_profiles", &query)
            .await
            .map_err(|e| e.with_context("get agent profiles"))
    }

    /// Get a specific agent profile by ID.
    pub async fn get(&self, profile_id: &ProfileId) -> OrbitalResult<AgentProfile> {
        self.client
            .http
            .get(&format!("/agent_profile/{}", profile_id))
            .await
            .map_err(|e| e.with_context("get agent profile"))
    }

    /// Create a new agent profile.
    ///
    /// Plaintext credentials are encrypted in place before submission; names
    /// and every other field pass through untouched.
    pub async fn create(&self, mut request: CreateProfileRequest) -> OrbitalResult<AgentProfile> {
        if !request.credentials.is_empty() {
            let public_key = self.client.credentials().public_key().await?;
            request.credentials = encrypt_credentials(request.credentials, &public_key)?;
        }

        self.client
            .http
            .post("/agent_profile", &request)
            .await
            .map_err(|e| e.with_context("create agent profile"))
    }

    /// Update an existing agent profile.
    ///
    /// Credentials in `credentials_to_add` are encrypted the same way
    /// [`create`](Self::create) encrypts them; deletions reference stored
    /// credentials by name and need no key fetch.
    pub async fn update(
        &self,
        profile_id: &ProfileId,
        mut request: UpdateProfileRequest,
    ) -> OrbitalResult<AgentProfile> {
        if !request.credentials_to_add.is_empty() {
            let public_key = self.client.credentials().public_key().await?;
            request.credentials_to_add =
                encrypt_credentials(request.credentials_to_add, &public_key)?;
        }

        self.client
            .http
            .put(&format!("/agent_profile/{}", profile_id), &request)
            .await
            .map_err(|e| e.with_context("update agent profile"))
    }

    /// Delete an agent profile by ID.
    pub async fn delete(&self, profile_id: &ProfileId) -> OrbitalResult<DeleteProfileResponse> {
        self.client
            .http
            .delete(&format!("/agent_profile/{}", profile_id))
            .await
            .map_err(|e| e.with_context("delete agent profile"))
    }
}

#[derive(Debug, Serialize)]
struct ListProfilesQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_id: Option<&'a str>,
}

/// Request to create an agent profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_type: Option<String>,
    #[serde(default)]
    pub captcha_solver_active: bool,
    #[serde(default)]
    pub sticky_ip: bool,
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<ProfileCookie>,
}

/// Request to update an agent profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials_to_add: Vec<Credential>,
    /// Names of stored credentials to remove.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials_to_delete: Vec<String>,
}

/// Response from deleting a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
