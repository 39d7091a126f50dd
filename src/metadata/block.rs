use serde::{Deserialize, Serialize};

use crate::error::{DataverseError, Result};
use crate::metadata::field::MetadataField;

/// A named group of metadata fields, such as `citation` or a custom block.
///
/// Field names are unique within a block; the field list keeps its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlock {
    display_name: String,
    fields: Vec<MetadataField>,
}

impl MetadataBlock {
    pub fn new(display_name: impl Into<String>) -> Self {
        MetadataBlock {
            display_name: display_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn fields(&self) -> &[MetadataField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&MetadataField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut MetadataField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Appends a field to the end of the block.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field with the same name exists.
    pub fn push(&mut self, field: MetadataField) -> Result<()> {
        if self.field(field.name()).is_some() {
            return Err(DataverseError::validation(format!(
                "field '{}' already exists in block '{}'",
                field.name(),
                self.display_name
            )));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Builder-style variant of [`MetadataBlock::push`].
    pub fn with(mut self, field: MetadataField) -> Result<Self> {
        self.push(field)?;
        Ok(self)
    }
}
