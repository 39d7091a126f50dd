use crate::address::Provenance;
use crate::client::BaseClient;
use crate::error::Result;
use crate::handle::Handle;
use crate::response::Confirmation;

/// Deletes an unpublished, empty dataverse.
pub fn delete_dataverse(
    client: &BaseClient,
    target: &impl Provenance,
) -> Result<Handle<Confirmation>> {
    client.delete(target)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{envelope, mock_address};

    #[test]
    fn test_delete_dataverse() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/dataverses/visus")
                .header("X-Dataverse-key", "secret");
            then.status(200)
                .json_body(envelope(json!({"message": "Dataverse 7 deleted"})));
        });

        let client = BaseClient::new().unwrap();
        let address = mock_address(&server, "/api/dataverses/visus");

        let handle = delete_dataverse(&client, &address).expect("Failed to delete dataverse");

        mock.assert();
        assert_eq!(handle.data.message, "Dataverse 7 deleted");
        assert_eq!(handle.request_uri(), address.uri());
    }
}
