//! Agent profile management example.
//!
//! Creates a profile with credentials (encrypted client-side before
//! submission), rotates one credential, then cleans up.
//!
//! Run with: cargo run --example profiles

use orbital_sdk::api::profiles::{CreateProfileRequest, UpdateProfileRequest};
use orbital_sdk::{Credential, OrbitalClient, OrbitalResult};

#[tokio::main]
async fn main() -> OrbitalResult<()> {
    tracing_subscriber::fmt::init();

    let client = OrbitalClient::builder()
        .api_key("sk-your-api-key")
        .build()?;

    // Credentials are plaintext here; the SDK fetches the platform public
    // key and encrypts them before the request is sent
    let profile = client
        .profiles()
        .create(CreateProfileRequest {
            name: "Checkout bot".to_string(),
            description: Some("Profile for the checkout flow".to_string()),
            organization_id: "org_123".to_string(),
            proxy_country: Some("us".to_string()),
            credentials: vec![
                Credential::new("SHOP_USERNAME", "alice@example.com"),
                Credential::new("SHOP_PASSWORD", "hunter2"),
            ],
            ..Default::default()
        })
        .await?;
    println!("Created profile {}", profile.id);

    // Rotate the password: add the new value, delete the old entry
    let updated = client
        .profiles()
        .update(
            &profile.id,
            UpdateProfileRequest {
                credentials_to_add: vec![Credential::new("SHOP_PASSWORD", "correct horse")],
                credentials_to_delete: vec!["SHOP_PASSWORD".to_string()],
                ..Default::default()
            },
        )
        .await?;
    println!("Profile now holds {} credentials", updated.credentials.len());

    let response = client.profiles().delete(&profile.id).await?;
    println!("Deleted: {}", response.message.unwrap_or_default());

    Ok(())
}
