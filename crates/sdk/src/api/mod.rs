//! API endpoint groups for the Orbital SDK.

pub mod agents;
pub mod credentials;
pub mod executions;
pub mod files;
pub mod health;
pub mod profiles;

pub use agents::AgentsApi;
pub use credentials::CredentialsApi;
pub use executions::ExecutionsApi;
pub use files::FilesApi;
pub use health::HealthApi;
pub use profiles::ProfilesApi;
