use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::address::Provenance;
use crate::client::BaseClient;
use crate::error::Result;
use crate::handle::Handle;
use crate::metadata::block::MetadataBlock;

use super::files::FileEntry;

/// A dataset as returned by the native API.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: i64,
    pub identifier: Option<String>,
    pub persistent_url: Option<String>,
    pub protocol: Option<String>,
    pub authority: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub latest_version: Option<VersionInfo>,
}

impl Dataset {
    /// The persistent identifier in `protocol:authority/identifier` form.
    pub fn persistent_id(&self) -> Option<String> {
        match (&self.protocol, &self.authority, &self.identifier) {
            (Some(protocol), Some(authority), Some(identifier)) => {
                Some(format!("{protocol}:{authority}/{identifier}"))
            }
            _ => None,
        }
    }
}

/// A version of a dataset with its metadata blocks and files.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub id: Option<i64>,
    pub version_state: Option<String>,
    pub version_number: Option<u32>,
    pub version_minor_number: Option<u32>,
    /// A plain name on older installations, `{name, uri}` on newer ones.
    pub license: Option<serde_json::Value>,
    pub terms_of_use: Option<String>,
    #[serde(default)]
    pub metadata_blocks: IndexMap<String, MetadataBlock>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Retrieves a dataset, including its latest version.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `target` - A dataset handle, e.g. from a dataverse listing, or an
///   address built with [`Address::for_dataset`](crate::address::Address::for_dataset).
pub fn get_dataset(client: &BaseClient, target: &impl Provenance) -> Result<Handle<Dataset>> {
    client.get(target)
}
