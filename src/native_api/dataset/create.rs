use serde::{Deserialize, Serialize};

use crate::address::Provenance;
use crate::client::BaseClient;
use crate::descriptor::dataset::DataSetDescriptor;
use crate::error::Result;
use crate::handle::Handle;
use crate::request::RequestType;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDatasetBody<'a> {
    dataset_version: &'a DataSetDescriptor,
}

/// Identifiers assigned to a freshly created dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDataset {
    pub id: i64,
    pub persistent_id: String,
}

/// Creates a dataset in the dataverse `parent`.
///
/// The descriptor is posted as `{"datasetVersion": ...}` to
/// `.../dataverses/{alias}/datasets`. The returned handle points at the new
/// dataset (`.../api/datasets/{id}`), not at the creation endpoint.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `parent` - The dataverse the dataset is created in.
/// * `descriptor` - License, terms of use and metadata blocks of the dataset.
///
/// # Returns
///
/// The database id and the persistent identifier of the new dataset.
pub fn create_dataset(
    client: &BaseClient,
    parent: &impl Provenance,
    descriptor: &DataSetDescriptor,
) -> Result<Handle<CreatedDataset>> {
    let parent = parent.address();
    let endpoint = parent.dataset_collection()?;
    let base = parent.datasets_base()?;
    let context = RequestType::json(&CreateDatasetBody {
        dataset_version: descriptor,
    })?;

    let created: Handle<CreatedDataset> = client.post(&endpoint, context, None)?;

    // The id is only known once the server answered
    let address = base.derive(0, &[created.data.id.to_string().as_str()])?;
    Ok(Handle::new(created.into_data(), address))
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::error::DataverseError;
    use crate::test_utils::{envelope, mock_address, sample_citation};

    #[test]
    fn test_create_dataset_wraps_descriptor() {
        let descriptor = DataSetDescriptor::new("CC0 1.0", "none", sample_citation());
        let expected_body = json!({ "datasetVersion": descriptor });

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/dataverses/visus/datasets")
                .header("X-Dataverse-key", "secret")
                .header("Content-Type", "application/json")
                .json_body(expected_body);
            then.status(201).json_body(envelope(json!({
                "id": 42,
                "persistentId": "doi:10.5072/FK2/ABC"
            })));
        });

        let client = BaseClient::new().unwrap();
        let parent = mock_address(&server, "/api/dataverses/visus");

        let handle =
            create_dataset(&client, &parent, &descriptor).expect("Failed to create dataset");

        mock.assert();
        assert_eq!(handle.data.persistent_id, "doi:10.5072/FK2/ABC");
        assert_eq!(
            handle.request_uri().as_str(),
            server.url("/api/datasets/42")
        );
    }

    #[test]
    fn test_create_dataset_fails_before_posting_on_short_parent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/visus/datasets");
            then.status(201).json_body(envelope(json!({
                "id": 42,
                "persistentId": "doi:10.5072/FK2/ABC"
            })));
        });

        let client = BaseClient::new().unwrap();
        let parent = mock_address(&server, "/visus");
        let descriptor = DataSetDescriptor::new("CC0 1.0", "none", sample_citation());

        let result = create_dataset(&client, &parent, &descriptor);

        assert!(matches!(result, Err(DataverseError::Precondition(_))));
        mock.assert_hits(0);
    }
}
