use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ProfileId;

/// A named secret attached to an agent profile
///
/// `data` is plaintext when the credential is constructed by the caller. The
/// SDK encrypts it with the platform public key before it is transmitted;
/// profiles returned by the server only ever carry ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The credential name
    pub name: String,
    /// The credential value: plaintext at construction, base64 RSA
    /// ciphertext on the wire.
    pub data: String,
}

impl Credential {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A browser cookie attached to an agent profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Reusable execution configuration: credentials, cookies and proxy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: ProfileId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub organization_id: String,
    /// Two-letter country code for the egress proxy.
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
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let profile: AgentProfile = serde_json::from_value(serde_json::json!({
            "id": "profile_1",
            "name": "Default",
            "organization_id": "org_1",
            "created_at": "2026-02-01T00:00:00Z"
        }))
        .unwrap();
        assert!(profile.credentials.is_empty());
        assert!(profile.cookies.is_empty());
        assert!(!profile.captcha_solver_active);
    }

    #[test]
    fn test_credential_serializes_both_fields() {
        let credential = Credential::new("API_KEY", "ciphertext");
        let json = serde_json::to_value(&credential).unwrap();
        assert_eq!(json["name"], "API_KEY");
        assert_eq!(json["data"], "ciphertext");
    }
}
