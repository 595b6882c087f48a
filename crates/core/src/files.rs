use serde::{Deserialize, Serialize};

use crate::types::ExecutionId;

/// A file produced by or attached to an execution
///
/// Content is fetched through `signed_url`, a pre-signed link that embeds its
/// own authorization and expires server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionFile {
    pub id: String,
    pub execution_id: ExecutionId,
    pub file_name: String,
    /// Size in bytes, used to verify downloads.
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub signed_url: String,
}
