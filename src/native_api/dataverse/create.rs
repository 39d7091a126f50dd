use crate::address::Provenance;
use crate::client::BaseClient;
use crate::descriptor::dataverse::DataverseDescriptor;
use crate::error::Result;
use crate::handle::Handle;
use crate::request::RequestType;

use super::get::Dataverse;

/// Creates a dataverse below `parent`.
///
/// The descriptor is posted to the parent's address, but the returned handle
/// points at the new dataverse itself (`.../api/dataverses/{alias}`), so it
/// can be used right away for the next call.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `parent` - The dataverse to create the new one in.
/// * `descriptor` - Alias, name, contacts and type of the new dataverse.
///
/// # Errors
///
/// Fails with a validation error before any request is made if the
/// descriptor is invalid.
pub fn create_dataverse(
    client: &BaseClient,
    parent: &impl Provenance,
    descriptor: &DataverseDescriptor,
) -> Result<Handle<Dataverse>> {
    descriptor.validate()?;

    let parent = parent.address();
    let child = parent.sibling(&descriptor.alias)?;
    let context = RequestType::json(descriptor)?;

    client.post(&parent, context, Some(child))
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::error::DataverseError;
    use crate::test_utils::{envelope, mock_address};

    #[test]
    fn test_create_dataverse_points_at_child() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/dataverses/root")
                .header("X-Dataverse-key", "secret")
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "alias": "visus",
                    "name": "VISUS",
                    "dataverseContacts": [{"contactEmail": "a@b.org"}],
                    "dataverseType": "UNCATEGORIZED"
                }));
            then.status(201).json_body(envelope(json!({
                "id": 7,
                "alias": "visus",
                "name": "VISUS"
            })));
        });

        let client = BaseClient::new().unwrap();
        let parent = mock_address(&server, "/api/dataverses/root");
        let descriptor = DataverseDescriptor::new("visus", "VISUS", ["a@b.org"]).unwrap();

        let handle =
            create_dataverse(&client, &parent, &descriptor).expect("Failed to create dataverse");

        mock.assert();
        assert_eq!(handle.data.id, 7);
        assert_eq!(
            handle.request_uri().as_str(),
            server.url("/api/dataverses/visus")
        );
        assert_eq!(handle.credential().secret(), "secret");
    }

    #[test]
    fn test_invalid_descriptor_is_not_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(201);
        });

        let client = BaseClient::new().unwrap();
        let parent = mock_address(&server, "/api/dataverses/root");
        let descriptor = DataverseDescriptor {
            alias: "not valid".to_string(),
            name: "Name".to_string(),
            dataverse_contacts: vec![],
            dataverse_type: Default::default(),
            affiliation: None,
            description: None,
        };

        let result = create_dataverse(&client, &parent, &descriptor);

        assert!(matches!(result, Err(DataverseError::Validation(_))));
        mock.assert_hits(0);
    }
}
