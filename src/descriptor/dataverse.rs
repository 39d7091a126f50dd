use lazy_static::lazy_static;
use regress::Regex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::error::{DataverseError, Result};

lazy_static! {
    /// Aliases end up as a path segment of every address below the dataverse.
    static ref ALIAS_PATTERN: Regex =
        Regex::new("^[A-Za-z0-9_-]+$").expect("alias pattern is a valid regex");
}

/// Category of a dataverse, as listed by the native API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataverseType {
    Department,
    Journals,
    Laboratory,
    OrganizationsInstitutions,
    Researchers,
    ResearchGroup,
    ResearchProjects,
    TeachingCourses,
    #[default]
    Uncategorized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataverseContact {
    pub contact_email: String,
}

/// The body of a dataverse creation request.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataverseDescriptor {
    pub alias: String,
    pub name: String,
    pub dataverse_contacts: Vec<DataverseContact>,
    #[serde(default)]
    pub dataverse_type: DataverseType,
    pub affiliation: Option<String>,
    pub description: Option<String>,
}

impl DataverseDescriptor {
    /// Creates a descriptor of an uncategorized dataverse.
    ///
    /// # Errors
    ///
    /// Returns a validation error if:
    /// - `alias` is not made of ASCII letters, digits, `_` and `-`.
    /// - `name` is blank.
    /// - no non-empty contact email is given.
    pub fn new<E: Into<String>>(
        alias: impl Into<String>,
        name: impl Into<String>,
        contact_emails: impl IntoIterator<Item = E>,
    ) -> Result<Self> {
        let descriptor = DataverseDescriptor {
            alias: alias.into(),
            name: name.into(),
            dataverse_contacts: contact_emails
                .into_iter()
                .map(|email| DataverseContact {
                    contact_email: email.into(),
                })
                .collect(),
            dataverse_type: DataverseType::default(),
            affiliation: None,
            description: None,
        };

        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn with_type(mut self, dataverse_type: DataverseType) -> Self {
        self.dataverse_type = dataverse_type;
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the invariants of a descriptor, e.g. one read from a file.
    pub fn validate(&self) -> Result<()> {
        if ALIAS_PATTERN.find(&self.alias).is_none() {
            return Err(DataverseError::validation(format!(
                "'{}' is not a valid dataverse alias, use letters, digits, '_' and '-'",
                self.alias
            )));
        }

        if self.name.trim().is_empty() {
            return Err(DataverseError::validation(
                "dataverse name must not be empty",
            ));
        }

        if self.dataverse_contacts.is_empty()
            || self
                .dataverse_contacts
                .iter()
                .any(|c| c.contact_email.trim().is_empty())
        {
            return Err(DataverseError::validation(
                "at least one non-empty contact email is required",
            ));
        }

        Ok(())
    }
}
