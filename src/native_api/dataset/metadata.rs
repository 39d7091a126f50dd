use indexmap::IndexMap;

use crate::address::Provenance;
use crate::client::BaseClient;
use crate::datasetversion::DatasetVersion;
use crate::error::Result;
use crate::handle::Handle;
use crate::metadata::block::MetadataBlock;
use crate::metadata::field::MetadataField;

/// All metadata blocks of a dataset version, keyed by block name.
pub type MetadataBlocks = IndexMap<String, MetadataBlock>;

/// Retrieves all metadata blocks of a dataset version.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `target` - The dataset.
/// * `version` - The version to read, e.g. `:draft` or `1.0`.
///
/// # Returns
///
/// The blocks, addressed by `.../datasets/{id}/versions/{version}/metadata`.
pub fn get_dataset_metadata(
    client: &BaseClient,
    target: &impl Provenance,
    version: &DatasetVersion,
) -> Result<Handle<MetadataBlocks>> {
    let address = target.address().version_metadata(version, None)?;
    client.get(&address)
}

/// Retrieves a single metadata block, e.g. `citation`, of a dataset version.
pub fn get_metadata_block(
    client: &BaseClient,
    target: &impl Provenance,
    version: &DatasetVersion,
    block: &str,
) -> Result<Handle<MetadataBlock>> {
    let address = target.address().version_metadata(version, Some(block))?;
    client.get(&address)
}

impl Handle<MetadataBlocks> {
    /// Picks one block out of the listing, addressed as if fetched on its own.
    pub fn block(&self, name: &str) -> Result<Option<Handle<MetadataBlock>>> {
        match self.data.get(name) {
            Some(block) => {
                let address = self.address().derive(0, &[name])?;
                Ok(Some(Handle::new(block.clone(), address)))
            }
            None => Ok(None),
        }
    }
}

impl Handle<MetadataBlock> {
    /// Looks up a field of the block. No request is made; the field keeps the
    /// block's address.
    pub fn field(&self, name: &str) -> Option<Handle<MetadataField>> {
        self.data
            .field(name)
            .map(|field| Handle::new(field.clone(), self.address()))
    }
}
