use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::address::{Address, Provenance};
use crate::client::BaseClient;
use crate::error::Result;
use crate::handle::Handle;

/// One entry of a dataverse listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Dataverse(DataverseSummary),
    Dataset(DatasetSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataverseSummary {
    pub id: i64,
    pub title: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub id: i64,
    pub identifier: Option<String>,
    pub persistent_url: Option<String>,
    pub protocol: Option<String>,
    pub authority: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
}

impl ContentItem {
    pub fn id(&self) -> i64 {
        match self {
            ContentItem::Dataverse(dataverse) => dataverse.id,
            ContentItem::Dataset(dataset) => dataset.id,
        }
    }

    /// Canonical address of the item, given the address of the dataverse
    /// that listed it.
    ///
    /// Dataverses are siblings of their parent (`.../dataverses/{id}`), datasets
    /// live under `.../datasets/{id}`.
    pub fn address(&self, parent: &Address) -> Result<Address> {
        match self {
            ContentItem::Dataverse(dataverse) => parent.sibling(&dataverse.id.to_string()),
            ContentItem::Dataset(dataset) => parent.dataset(dataset.id),
        }
    }
}

/// Lists the direct children of a dataverse.
///
/// Each returned handle carries the item's own canonical address, so a child
/// can be passed straight into [`get_dataverse`](super::get_dataverse) or
/// [`get_dataset`](crate::native_api::dataset::get_dataset).
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `target` - The dataverse whose contents are listed.
///
/// # Returns
///
/// The dataverses and datasets in the order the server lists them.
pub fn get_contents(
    client: &BaseClient,
    target: &impl Provenance,
) -> Result<Vec<Handle<ContentItem>>> {
    let parent = target.address();
    let listing: Handle<Vec<ContentItem>> = client.get(&parent.contents()?)?;

    listing
        .into_data()
        .into_iter()
        .map(|item| {
            let address = item.address(&parent)?;
            Ok(Handle::new(item, address))
        })
        .collect()
}
