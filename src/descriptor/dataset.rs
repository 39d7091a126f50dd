use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::client::print_debug;
use crate::metadata::block::MetadataBlock;
use crate::metadata::citation::CitationDocument;

/// Key of the citation block in `metadataBlocks`.
pub const CITATION_BLOCK: &str = "citation";

/// The body of a dataset creation request.
///
/// Holds the license, the terms of use and the metadata blocks keyed by
/// block name. The `citation` block is always present. Block names are
/// unique: once a name is taken, later blocks of the same name are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetDescriptor {
    license: String,
    terms_of_use: String,
    metadata_blocks: IndexMap<String, MetadataBlock>,
}

impl DataSetDescriptor {
    pub fn new(
        license: impl Into<String>,
        terms_of_use: impl Into<String>,
        citation: CitationDocument,
    ) -> Self {
        let mut metadata_blocks = IndexMap::new();
        metadata_blocks.insert(CITATION_BLOCK.to_string(), citation.into_block());

        DataSetDescriptor {
            license: license.into(),
            terms_of_use: terms_of_use.into(),
            metadata_blocks,
        }
    }

    /// Adds a named block unless the name is already taken.
    pub fn block(mut self, name: impl Into<String>, block: MetadataBlock) -> Self {
        self.insert_first(name.into(), block);
        self
    }

    /// Merges the caller's remaining metadata blocks.
    ///
    /// Entries whose name is already present (`citation` or an earlier named
    /// block) are dropped.
    pub fn other_metadata(mut self, blocks: IndexMap<String, MetadataBlock>) -> Self {
        for (name, block) in blocks {
            self.insert_first(name, block);
        }
        self
    }

    fn insert_first(&mut self, name: String, block: MetadataBlock) {
        if self.metadata_blocks.contains_key(&name) {
            print_debug(
                "Descriptor",
                format!("Dropping metadata block '{name}', it is already present"),
            );
            return;
        }
        self.metadata_blocks.insert(name, block);
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn terms_of_use(&self) -> &str {
        &self.terms_of_use
    }

    pub fn metadata_blocks(&self) -> &IndexMap<String, MetadataBlock> {
        &self.metadata_blocks
    }

    pub fn citation(&self) -> Option<&MetadataBlock> {
        self.metadata_blocks.get(CITATION_BLOCK)
    }
}
