//! Basic SDK usage example.
//!
//! This example demonstrates how to connect to the Orbital agents API and
//! perform basic operations like checking health and listing agents.
//!
//! Run with: cargo run --example basic_usage

use orbital_sdk::{OrbitalClient, OrbitalResult};
use std::time::Duration;

#[tokio::main]
async fn main() -> OrbitalResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    // Build the client with configuration
    let client = OrbitalClient::builder()
        .base_url("http://localhost:9090")
        .api_key("sk-your-api-key")
        .timeout(Duration::from_secs(30))
        .build()?;

    // Check server health
    println!("Checking server health...");
    let health = client.health().check().await?;
    println!("Server status: {}", health.status);

    // Browse the agent catalog
    println!("\nListing agents...");
    let agents = client.agents().list("org_123", 1, 20).await?;
    println!("Found {} agents", agents.len());

    for agent in agents.iter().take(5) {
        println!(
            "  Agent {}: {} (created: {})",
            agent.id,
            agent.name,
            agent.created_at
        );
    }

    Ok(())
}
