use httpmock::MockServer;
use serde_json::{json, Value};

use crate::address::Address;
use crate::credential::ApiKey;
use crate::metadata::citation::{CitationBuilder, CitationDocument};
use crate::metadata::compound::{Author, Contact, PersonName};

/// Token used by every mocked request.
pub const TEST_TOKEN: &str = "secret";

/// Address of `path` on the mock server, authenticated with [`TEST_TOKEN`].
pub fn mock_address(server: &MockServer, path: &str) -> Address {
    Address::from_uri(&server.url(path), Some(ApiKey::new(TEST_TOKEN)))
        .expect("Failed to build mock address")
}

/// Wraps `data` in a successful Dataverse response envelope.
pub fn envelope(data: Value) -> Value {
    json!({ "status": "OK", "data": data })
}

/// A citation document with one author, one contact and one description.
pub fn sample_citation() -> CitationDocument {
    CitationBuilder::new("title")
        .author(Author::new(PersonName::new("author", "the")))
        .contact(Contact::new(PersonName::new("contact", "a"), "test@test.com"))
        .description("description")
        .depositor(PersonName::new("depositor", "ze"))
        .deposit_date(chrono::NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date"))
        .build()
        .expect("Failed to build sample citation")
}
