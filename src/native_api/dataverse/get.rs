use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::address::Provenance;
use crate::client::BaseClient;
use crate::descriptor::dataverse::{DataverseContact, DataverseType};
use crate::error::Result;
use crate::handle::Handle;

/// A dataverse as returned by the native API.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataverse {
    pub id: i64,
    pub alias: String,
    pub name: String,
    pub affiliation: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub dataverse_contacts: Vec<DataverseContact>,
    #[serde(default)]
    pub dataverse_type: DataverseType,
    pub owner_id: Option<i64>,
    pub creation_date: Option<String>,
}

/// Retrieves a dataverse.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `target` - A dataverse handle or an [`Address`](crate::address::Address)
///   of the form `.../api/dataverses/{alias}`.
///
/// # Returns
///
/// The dataverse, addressed by the URI it was fetched from.
pub fn get_dataverse(client: &BaseClient, target: &impl Provenance) -> Result<Handle<Dataverse>> {
    client.get(target)
}
