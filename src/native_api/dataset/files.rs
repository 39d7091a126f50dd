use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::address::Provenance;
use crate::client::BaseClient;
use crate::datasetversion::DatasetVersion;
use crate::error::Result;
use crate::handle::Handle;

/// A file as listed in a dataset version.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub label: String,
    pub directory_label: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub restricted: bool,
    pub data_file: DataFile,
}

impl FileEntry {
    /// Path of the file within the dataset, `directoryLabel/label`.
    pub fn full_path(&self) -> String {
        match self.directory_label.as_deref().filter(|d| !d.is_empty()) {
            Some(directory) => format!("{}/{}", directory.trim_end_matches('/'), self.label),
            None => self.label.clone(),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFile {
    pub id: i64,
    pub persistent_id: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub filesize: Option<u64>,
    pub checksum: Option<Checksum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checksum {
    #[serde(rename = "type")]
    pub algorithm: String,
    pub value: String,
}

/// Lists the files of a dataset version.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `target` - The dataset.
/// * `version` - The version whose files are listed, e.g. `:latest` or `1.0`.
///
/// # Returns
///
/// The files, addressed by `.../datasets/{id}/versions/{version}/files`.
pub fn get_dataset_files(
    client: &BaseClient,
    target: &impl Provenance,
    version: &DatasetVersion,
) -> Result<Handle<Vec<FileEntry>>> {
    let address = target.address().version_files(version)?;
    client.get(&address)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{envelope, mock_address};

    #[test]
    fn test_get_dataset_files_for_version() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/datasets/42/versions/1.0/files")
                .header("X-Dataverse-key", "secret");
            then.status(200).json_body(envelope(json!([
                {
                    "label": "data.csv",
                    "directoryLabel": "raw",
                    "restricted": false,
                    "dataFile": {
                        "id": 100,
                        "filename": "data.csv",
                        "contentType": "text/csv",
                        "filesize": 1024,
                        "checksum": {"type": "MD5", "value": "abc"}
                    }
                },
                {
                    "label": "README.md",
                    "dataFile": {"id": 101}
                }
            ])));
        });

        let client = BaseClient::new().unwrap();
        let dataset = mock_address(&server, "/api/datasets/42");
        let version = DatasetVersion::Version { major: 1, minor: 0 };

        let handle =
            get_dataset_files(&client, &dataset, &version).expect("Failed to list files");

        mock.assert();
        assert_eq!(handle.data.len(), 2);
        assert_eq!(handle.data[0].full_path(), "raw/data.csv");
        assert_eq!(handle.data[0].data_file.checksum.as_ref().unwrap().algorithm, "MD5");
        assert_eq!(handle.data[1].full_path(), "README.md");
        assert_eq!(
            handle.request_uri().as_str(),
            server.url("/api/datasets/42/versions/1.0/files")
        );
    }

    #[test]
    fn test_default_version_is_latest() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/datasets/42/versions/:latest/files");
            then.status(200).json_body(envelope(json!([])));
        });

        let client = BaseClient::new().unwrap();
        let dataset = mock_address(&server, "/api/datasets/42");

        let handle = get_dataset_files(&client, &dataset, &DatasetVersion::default())
            .expect("Failed to list files");

        mock.assert();
        assert!(handle.data.is_empty());
    }
}
