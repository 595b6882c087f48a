//! Executions API endpoints and result polling.

use crate::client::OrbitalClient;
use crate::config::PollOptions;
use crate::error::{OrbitalError, OrbitalResult};
use orbital_core::activity::ExecutionActivity;
use orbital_core::types::{
    AgentId, BrowserSessionRecording, ExecutionId, ExecutionResult, ExecutionState,
    ExecutionStatus,
};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::{debug, instrument};

/// Executions API for running agents and resolving their results.
pub struct ExecutionsApi<'a> {
    client: &'a OrbitalClient,
}

impl<'a> ExecutionsApi<'a> {
    pub(crate) fn new(client: &'a OrbitalClient) -> Self {
        Self { client }
    }

    /// Start an agent execution.
    ///
    /// The returned id references a server-owned job; pass it to
    /// [`status`](Self::status), [`result`](Self::result) or
    /// [`wait_for_result`](Self::wait_for_result).
    pub async fn execute(
        &self,
        agent_id: &AgentId,
        request: ExecuteAgentRequest,
    ) -> OrbitalResult<ExecutionId> {
        let response: ExecuteAgentResponse = self
            .client
            .http
            .post(&format!("/agent/{}/execute", agent_id), &request)
            .await
            .map_err(|e| e.with_context("execute agent"))?;
        Ok(response.execution_id)
    }

    /// Fetch the current status snapshot for an execution.
    pub async fn status(&self, execution_id: &ExecutionId) -> OrbitalResult<ExecutionStatus> {
        self.client
            .http
            .get(&format!("/execution/{}/status", execution_id))
            .await
            .map_err(|e| e.with_context("get execution status"))
    }

    /// Fetch the final result of an execution.
    ///
    /// Result payloads can embed an error even when the HTTP call succeeds;
    /// that second channel surfaces as [`OrbitalError::Payload`].
    pub async fn result(&self, execution_id: &ExecutionId) -> OrbitalResult<ExecutionResult> {
        let payload: ExecutionResultPayload = self
            .client
            .http
            .get(&format!("/execution/{}/result", execution_id))
            .await
            .map_err(|e| e.with_context("get execution result"))?;

        if let Some(message) = payload.error {
            return Err(OrbitalError::Payload { message });
        }

        Ok(payload.execution_result.unwrap_or_default())
    }

    /// Wait for an execution to reach a terminal state and return its result.
    ///
    /// Polls every second for up to an hour; see
    /// [`wait_for_result_with`](Self::wait_for_result_with) to tune the
    /// budget, switch to a deadline, or attach a cancellation token.
    pub async fn wait_for_result(
        &self,
        execution_id: &ExecutionId,
    ) -> OrbitalResult<ExecutionResult> {
        self.wait_for_result_with(execution_id, PollOptions::default())
            .await
    }

    /// Wait for an execution with explicit polling options.
    ///
    /// A fresh status snapshot is fetched every iteration. `completed`
    /// resolves to the final result; `failed` and `cancelled` raise
    /// [`OrbitalError::ExecutionTerminated`]; `starting`, `running` and
    /// `paused` keep polling. In the default attempt-count mode the budget
    /// is `timeout / interval` iterations, so slow fetches can stretch the
    /// elapsed wall-clock time past `timeout`.
    #[instrument(skip(self, options), fields(execution_id = %execution_id))]
    pub async fn wait_for_result_with(
        &self,
        execution_id: &ExecutionId,
        options: PollOptions,
    ) -> OrbitalResult<ExecutionResult> {
        let timeout_ms = options.timeout.as_millis() as u64;
        let deadline = Instant::now() + options.timeout;
        let mut attempts_left = options.max_attempts();

        loop {
            let exhausted = if options.deadline_based {
                Instant::now() >= deadline
            } else {
                attempts_left == 0
            };
            if exhausted {
                return Err(OrbitalError::ExecutionTimeout {
                    execution_id: execution_id.clone(),
                    timeout_ms,
                });
            }

            let snapshot = self.status(execution_id).await?;
            debug!(status = %snapshot.status, "polled execution status");

            match snapshot.status {
                ExecutionState::Completed => return self.result(execution_id).await,
                ExecutionState::Failed | ExecutionState::Cancelled => {
                    return Err(OrbitalError::ExecutionTerminated {
                        execution_id: execution_id.clone(),
                        status: snapshot.status,
                        reason: snapshot.reason,
                    });
                }
                ExecutionState::Starting | ExecutionState::Running | ExecutionState::Paused => {}
            }

            match options.cancellation.as_ref() {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            return Err(OrbitalError::Cancelled {
                                execution_id: execution_id.clone(),
                            });
                        }
                        _ = sleep(options.interval) => {}
                    }
                }
                None => sleep(options.interval).await,
            }
            attempts_left = attempts_left.saturating_sub(1);
        }
    }

    /// Get the browser session recording for an execution.
    pub async fn browser_session_recording(
        &self,
        execution_id: &ExecutionId,
    ) -> OrbitalResult<BrowserSessionRecording> {
        self.client
            .http
            .get(&format!(
                "/execution/{}/browser_session/recording",
                execution_id
            ))
            .await
            .map_err(|e| e.with_context("get browser session recording"))
    }

    /// Send a message to a running execution.
    pub async fn add_message(
        &self,
        execution_id: &ExecutionId,
        message: impl Into<String>,
    ) -> OrbitalResult<()> {
        let request = AddMessageRequest {
            message: message.into(),
        };
        self.client
            .http
            .post_no_response(&format!("/execution/{}/user_messages", execution_id), &request)
            .await
            .map_err(|e| e.with_context("add message to execution"))
    }

    /// Get the last `n` activities for an execution, most recent first.
    pub async fn last_activities(
        &self,
        execution_id: &ExecutionId,
        n: u32,
    ) -> OrbitalResult<Vec<ExecutionActivity>> {
        let query = ActivitiesQuery {
            limit: n,
            order: "desc",
        };
        self.client
            .http
            .get_with_query(&format!("/execution/{}/activities", execution_id), &query)
            .await
            .map_err(|e| e.with_context("get execution activities"))
    }
}

/// Request to start an agent execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteAgentRequest {
    /// Profile whose credentials, cookies and proxy settings apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_profile_id: Option<String>,
    /// Dynamic values merged into the agent's saved configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_data: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ExecuteAgentResponse {
    execution_id: ExecutionId,
}

#[derive(Debug, Deserialize)]
struct ExecutionResultPayload {
    #[serde(alias = "result")]
    execution_result: Option<ExecutionResult>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddMessageRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ActivitiesQuery {
    limit: u32,
    order: &'static str,
}
