//! Execute an agent and wait for its result.
//!
//! Starts an execution, polls until it reaches a terminal state, then prints
//! the result and the last few activities.
//!
//! Run with: cargo run --example run_agent

use orbital_sdk::{
    AgentId, ExecuteAgentRequest, OrbitalClient, OrbitalError, OrbitalResult, PollOptions,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> OrbitalResult<()> {
    tracing_subscriber::fmt::init();

    let client = OrbitalClient::builder()
        .api_key("sk-your-api-key")
        .build()?;

    // Dynamic data is merged into the agent's saved prompt configuration
    let mut dynamic_data = serde_json::Map::new();
    dynamic_data.insert("email".to_string(), "test@example.com".into());

    let execution_id = client
        .executions()
        .execute(
            &AgentId::new("iris"),
            ExecuteAgentRequest {
                agent_profile_id: None,
                dynamic_data: Some(dynamic_data),
            },
        )
        .await?;
    println!("Execution started: {}", execution_id);

    // Poll every 2 seconds for up to 10 minutes
    let options = PollOptions::new(Duration::from_secs(2), Duration::from_secs(600));
    match client
        .executions()
        .wait_for_result_with(&execution_id, options)
        .await
    {
        Ok(result) => {
            println!("Execution completed:");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Err(OrbitalError::ExecutionTerminated { status, reason, .. }) => {
            println!("Execution ended with status {status}");
            if let Some(reason) = reason {
                println!("Reason: {reason}");
            }
        }
        Err(err) => return Err(err),
    }

    // Show what the agent did last
    let activities = client.executions().last_activities(&execution_id, 5).await?;
    println!("\nLast {} activities:", activities.len());
    for activity in activities {
        println!("  [{}] {}", activity.created_at, activity.kind);
    }

    Ok(())
}
