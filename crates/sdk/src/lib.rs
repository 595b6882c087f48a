//! # Orbital SDK
//!
//! Official Rust SDK for Orbital - Browser Agent Automation Platform.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orbital_sdk::{AgentId, ExecuteAgentRequest, OrbitalClient, OrbitalResult};
//!
//! #[tokio::main]
//! async fn main() -> OrbitalResult<()> {
//!     // Build client
//!     let client = OrbitalClient::builder()
//!         .api_key("sk-your-api-key")
//!         .build()?;
//!
//!     // Start an execution
//!     let execution_id = client
//!         .executions()
//!         .execute(&AgentId::new("iris"), ExecuteAgentRequest::default())
//!         .await?;
//!
//!     // Block until it reaches a terminal state
//!     let result = client.executions().wait_for_result(&execution_id).await?;
//!     println!("Result: {:?}", result);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Credentials
//!
//! Profile writes encrypt credential values with the platform public key
//! before they leave the process, so plaintext secrets never cross the wire:
//!
//! ```rust,no_run
//! use orbital_sdk::api::profiles::CreateProfileRequest;
//! use orbital_sdk::{Credential, OrbitalClient};
//!
//! # async fn example(client: OrbitalClient) -> orbital_sdk::OrbitalResult<()> {
//! let profile = client
//!     .profiles()
//!     .create(CreateProfileRequest {
//!         name: "Checkout bot".to_string(),
//!         organization_id: "org_123".to_string(),
//!         credentials: vec![Credential::new("SHOP_PASSWORD", "hunter2")],
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{OrbitalClient, OrbitalClientBuilder, DEFAULT_BASE_URL};
pub use config::{ClientConfig, PollOptions, RetryConfig};
pub use error::{OrbitalError, OrbitalResult};

// Re-export request types used by the high-level operations
pub use api::executions::ExecuteAgentRequest;
pub use api::files::FileUpload;
pub use api::profiles::{CreateProfileRequest, UpdateProfileRequest};

// Re-export core types for convenience
pub use orbital_core::activity::ExecutionActivity;
pub use orbital_core::files::ExecutionFile;
pub use orbital_core::profile::{AgentProfile, Credential, ProfileCookie};
pub use orbital_core::types::{
    Agent, AgentId, BrowserSessionRecording, ExecutionId, ExecutionResult, ExecutionState,
    ExecutionStatus, Paginated, ProfileId,
};

// Re-export the cancellation token used by [`PollOptions`]
pub use tokio_util::sync::CancellationToken;
