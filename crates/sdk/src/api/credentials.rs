//! Credentials API endpoints.

use crate::client::OrbitalClient;
use crate::error::OrbitalResult;

/// Credentials API for the platform encryption key.
pub struct CredentialsApi<'a> {
    client: &'a OrbitalClient,
}

impl<'a> CredentialsApi<'a> {
    pub(crate) fn new(client: &'a OrbitalClient) -> Self {
        Self { client }
    }

    /// Fetch the PEM public key used to encrypt credentials.
    ///
    /// The key is fetched fresh for every credential-bearing write; the SDK
    /// never caches it.
    pub async fn public_key(&self) -> OrbitalResult<String> {
        self.client
            .http
            .get_text("/credentials/public_key", Some("Public key not found"))
            .await
            .map_err(|e| e.with_context("get credentials public key"))
    }
}
