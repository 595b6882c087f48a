use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ExecutionId;

/// A timeline entry recorded while an execution runs
///
/// The set of kinds is owned by the server and grows over time, so it is kept
/// as a plain string rather than a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionActivity {
    pub id: String,
    pub execution_id: ExecutionId,
    /// Activity kind, e.g. `"navigation"`, `"click"`, `"user_message"`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
