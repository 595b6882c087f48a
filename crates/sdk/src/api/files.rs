//! Execution files API endpoints.

use crate::client::OrbitalClient;
use crate::error::{OrbitalError, OrbitalResult};
use orbital_core::files::ExecutionFile;
use orbital_core::types::ExecutionId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Files API for listing, uploading and downloading execution files.
pub struct FilesApi<'a> {
    client: &'a OrbitalClient,
}

impl<'a> FilesApi<'a> {
    pub(crate) fn new(client: &'a OrbitalClient) -> Self {
        Self { client }
    }

    /// List the files associated with an execution.
    pub async fn list(&self, execution_id: &ExecutionId) -> OrbitalResult<Vec<ExecutionFile>> {
        self.client
            .http
            .get(&format!("/execution/{}/files", execution_id))
            .await
            .map_err(|e| e.with_context("get execution files"))
    }

    /// Upload files to an execution.
    pub async fn upload(
        &self,
        execution_id: &ExecutionId,
        files: Vec<FileUpload>,
    ) -> OrbitalResult<UploadFilesResponse> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let mut part =
                reqwest::multipart::Part::bytes(file.content).file_name(file.file_name);
            if let Some(content_type) = file.content_type {
                part = part.mime_str(&content_type)?;
            }
            form = form.part("files", part);
        }

        self.client
            .http
            .post_multipart(&format!("/execution/{}/files", execution_id), form)
            .await
            .map_err(|e| e.with_context("upload execution files"))
    }

    /// Download an execution file through its pre-signed URL.
    ///
    /// `download_path` may be an existing directory (the server-side file
    /// name is appended) or a full target path. Parent directories are
    /// created when `create_dirs` is set; otherwise a missing parent is an
    /// error. The downloaded size is verified against
    /// [`ExecutionFile::file_size`] before anything is written to disk.
    ///
    /// Returns the path the file was written to.
    pub async fn download(
        &self,
        file: &ExecutionFile,
        download_path: impl AsRef<Path>,
        create_dirs: bool,
    ) -> OrbitalResult<PathBuf> {
        let download_path = download_path.as_ref();
        let target = if download_path.is_dir() {
            download_path.join(&file.file_name)
        } else {
            download_path.to_path_buf()
        };

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                if create_dirs {
                    tokio::fs::create_dir_all(parent).await?;
                } else {
                    return Err(OrbitalError::Config(format!(
                        "Parent directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        let response = self
            .client
            .http
            .fetch_absolute(&file.signed_url)
            .await
            .map_err(|e| e.with_context("download execution file"))?;

        if let Some(length) = response.content_length() {
            if length != file.file_size {
                return Err(OrbitalError::Payload {
                    message: format!(
                        "Content length mismatch: expected {}, got {}",
                        file.file_size, length
                    ),
                });
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| OrbitalError::from(e).with_context("download execution file"))?;

        if bytes.len() as u64 != file.file_size {
            return Err(OrbitalError::Payload {
                message: format!(
                    "Downloaded file size mismatch: expected {}, got {}",
                    file.file_size,
                    bytes.len()
                ),
            });
        }

        tokio::fs::write(&target, &bytes).await?;
        Ok(target)
    }
}

/// A file to upload to an execution.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            content_type: None,
        }
    }
}

/// Response from uploading execution files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFilesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::OrbitalClient;
    use crate::config::RetryConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> OrbitalClient {
        OrbitalClient::builder()
            .base_url(server.uri())
            .retry_config(RetryConfig::no_retry())
            .build()
            .unwrap()
    }

    fn execution_file(server: &MockServer, file_size: u64) -> ExecutionFile {
        ExecutionFile {
            id: "file_1".to_string(),
            execution_id: ExecutionId::new("E1"),
            file_name: "report.txt".to_string(),
            file_size,
            content_type: Some("text/plain".to_string()),
            signed_url: format!("{}/storage/file_1?sig=abc", server.uri()),
        }
    }

    #[tokio::test]
    async fn test_list_files() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/execution/E1/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "file_1",
                    "execution_id": "E1",
                    "file_name": "report.txt",
                    "file_size": 11,
                    "signed_url": "https://storage.example.com/file_1"
                }
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let files = client.files().list(&ExecutionId::new("E1")).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "report.txt");
    }

    #[tokio::test]
    async fn test_upload_files() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/execution/E1/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "uploaded",
                "file_ids": ["file_1"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let upload = FileUpload::new("input.csv", b"a,b,c\n".to_vec());
        let response = client
            .files()
            .upload(&ExecutionId::new("E1"), vec![upload])
            .await
            .unwrap();

        assert_eq!(response.file_ids, vec!["file_1"]);
    }

    #[tokio::test]
    async fn test_download_into_directory() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/storage/file_1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let dir = tempfile::tempdir().unwrap();
        let saved = client
            .files()
            .download(&execution_file(&server, 11), dir.path(), true)
            .await
            .unwrap();

        assert_eq!(saved, dir.path().join("report.txt"));
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_download_creates_parent_dirs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/storage/file_1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.txt");
        let saved = client
            .files()
            .download(&execution_file(&server, 11), &target, true)
            .await
            .unwrap();

        assert_eq!(saved, target);
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_download_missing_parent_without_create_dirs() {
        let server = MockServer::start().await;

        let client = test_client(&server);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing/out.txt");
        let err = client
            .files()
            .download(&execution_file(&server, 11), &target, false)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Parent directory does not exist"));
    }

    #[tokio::test]
    async fn test_download_size_mismatch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/storage/file_1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"short".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let dir = tempfile::tempdir().unwrap();
        let err = client
            .files()
            .download(&execution_file(&server, 9999), dir.path(), true)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("mismatch"));
    }
}
