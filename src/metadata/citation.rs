//! Assembly of the `citation` metadata block.
//!
//! [`CitationBuilder`] collects scalar facts and compound values and lays them
//! out in the field order Dataverse uses for the citation block. The built
//! [`CitationDocument`] can be grown afterwards with
//! [`CitationDocument::add_author`] and [`CitationDocument::add_keyword`],
//! both of which mutate the document in place:
//!
//! ```
//! use dvscript::metadata::citation::CitationBuilder;
//! use dvscript::metadata::compound::{Author, Contact, Keyword, PersonName};
//!
//! let mut citation = CitationBuilder::new("Flow around a cylinder")
//!     .author(Author::new(PersonName::new("Doe", "Jane")))
//!     .contact(Contact::new(PersonName::new("Doe", "Jane"), "jane@example.org"))
//!     .description("Simulation data")
//!     .depositor(PersonName::new("Doe", "Jane"))
//!     .build()?;
//!
//! citation
//!     .add_author(&Author::new(PersonName::new("Roe", "Richard")))?
//!     .add_keyword(&Keyword::new("CFD"))?;
//!
//! assert_eq!(citation.field("author").unwrap().elements().len(), 2);
//! # Ok::<(), dvscript::error::DataverseError>(())
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DataverseError, Result};
use crate::metadata::block::MetadataBlock;
use crate::metadata::compound::{
    format_date, Author, Contact, Description, Keyword, PersonName,
};
use crate::metadata::field::{Document, MetadataField};

/// Display name of the citation block.
pub const CITATION_DISPLAY_NAME: &str = "Citation Metadata";

/// A citation metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationDocument(MetadataBlock);

impl CitationDocument {
    pub fn block(&self) -> &MetadataBlock {
        &self.0
    }

    pub fn into_block(self) -> MetadataBlock {
        self.0
    }

    pub fn field(&self, name: &str) -> Option<&MetadataField> {
        self.0.field(name)
    }

    /// Appends an author to the document's `author` field.
    ///
    /// The document is changed in place; the returned reference only exists
    /// to allow chaining further additions.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the author is invalid or the document has
    /// no `author` field (only possible for documents parsed from elsewhere).
    pub fn add_author(&mut self, author: &Author) -> Result<&mut Self> {
        let document = author.to_document()?;

        self.0
            .field_mut("author")
            .ok_or_else(|| DataverseError::validation("the document has no author field"))?
            .push(document)?;

        Ok(self)
    }

    /// Appends a keyword, creating the `keyword` field on first use.
    ///
    /// Like [`CitationDocument::add_author`] this mutates the document in place.
    pub fn add_keyword(&mut self, keyword: &Keyword) -> Result<&mut Self> {
        let document = keyword.to_document()?;

        match self.0.field_mut("keyword") {
            Some(field) => field.push(document)?,
            None => self.0.push(MetadataField::new("keyword", vec![document])?)?,
        }

        Ok(self)
    }
}

impl From<CitationDocument> for MetadataBlock {
    fn from(value: CitationDocument) -> Self {
        value.0
    }
}

// Generates a setter for an optional single-valued text field
macro_rules! optional_setter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub fn $name(mut self, value: impl Into<String>) -> Self {
            self.$name = Some(value.into());
            self
        }
    };
}

// Generates a setter appending to an optional multi-valued text field
macro_rules! list_setter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub fn $name(mut self, value: impl Into<String>) -> Self {
            self.$name.push(value.into());
            self
        }
    };
}

/// Collects the inputs of a citation block.
///
/// Title, at least one author, a contact, at least one description and the
/// depositor are mandatory; everything else is appended only when given.
#[derive(Debug, Clone, Default)]
pub struct CitationBuilder {
    title: String,
    subtitle: Option<String>,
    alternative_title: Option<String>,
    alternative_url: Option<String>,
    authors: Vec<Author>,
    contact: Option<Contact>,
    descriptions: Vec<String>,
    description_date: Option<NaiveDate>,
    keywords: Vec<Keyword>,
    notes_text: Option<String>,
    production_date: Option<String>,
    production_place: Option<String>,
    distribution_date: Option<String>,
    depositor: Option<PersonName>,
    deposit_date: Option<NaiveDate>,
    kind_of_data: Vec<String>,
    related_material: Vec<String>,
    related_datasets: Vec<String>,
    other_references: Vec<String>,
    data_sources: Vec<String>,
    origin_of_sources: Option<String>,
    characteristic_of_sources: Option<String>,
    access_to_sources: Option<String>,
}

impl CitationBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        CitationBuilder {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    pub fn authors(mut self, authors: impl IntoIterator<Item = Author>) -> Self {
        self.authors.extend(authors);
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.descriptions.push(text.into());
        self
    }

    /// Date stamped on every description; defaults to the build date.
    pub fn description_date(mut self, date: NaiveDate) -> Self {
        self.description_date = Some(date);
        self
    }

    pub fn keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn depositor(mut self, depositor: PersonName) -> Self {
        self.depositor = Some(depositor);
        self
    }

    /// Defaults to the build date.
    pub fn deposit_date(mut self, date: NaiveDate) -> Self {
        self.deposit_date = Some(date);
        self
    }

    optional_setter!(subtitle);
    optional_setter!(alternative_title);
    optional_setter!(
        /// A URL where the dataset can be viewed, such as a personal or project website.
        alternative_url
    );
    optional_setter!(notes_text);
    optional_setter!(
        /// Free-form date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
        production_date
    );
    optional_setter!(production_place);
    optional_setter!(
        /// Free-form date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
        distribution_date
    );
    optional_setter!(origin_of_sources);
    optional_setter!(characteristic_of_sources);
    optional_setter!(access_to_sources);

    list_setter!(kind_of_data);
    list_setter!(related_material);
    list_setter!(related_datasets);
    list_setter!(other_references);
    list_setter!(data_sources);

    /// Validates the inputs and assembles the citation block.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is blank, no author or no
    /// description was given, the contact or depositor is missing, or any
    /// compound value is invalid.
    pub fn build(self) -> Result<CitationDocument> {
        if self.title.trim().is_empty() {
            return Err(DataverseError::validation("citation: title is required"));
        }
        if self.authors.is_empty() {
            return Err(DataverseError::validation(
                "citation: at least one author is required",
            ));
        }
        let descriptions: Vec<&String> = self
            .descriptions
            .iter()
            .filter(|d| !d.trim().is_empty())
            .collect();
        if descriptions.is_empty() {
            return Err(DataverseError::validation(
                "citation: at least one description is required",
            ));
        }
        let contact = self
            .contact
            .as_ref()
            .ok_or_else(|| DataverseError::validation("citation: a contact is required"))?;
        let depositor = self
            .depositor
            .as_ref()
            .ok_or_else(|| DataverseError::validation("citation: a depositor is required"))?;
        if depositor.surname.trim().is_empty() {
            return Err(DataverseError::validation(
                "citation: depositor surname must not be empty",
            ));
        }

        // One stamp for all descriptions of this build
        let today = Local::now().date_naive();
        let description_date = self.description_date.unwrap_or(today);
        let deposit_date = self.deposit_date.unwrap_or(today);

        let authors = self
            .authors
            .iter()
            .map(Author::to_document)
            .collect::<Result<Vec<Document>>>()?;
        let descriptions = descriptions
            .into_iter()
            .map(|text| Description::dated(text.as_str(), description_date).to_document())
            .collect::<Result<Vec<Document>>>()?;
        let keywords = self
            .keywords
            .iter()
            .map(Keyword::to_document)
            .collect::<Result<Vec<Document>>>()?;

        let mut block = MetadataBlock::new(CITATION_DISPLAY_NAME);

        block.push(MetadataField::new("title", self.title.trim())?)?;
        push_optional(&mut block, "subtitle", &self.subtitle)?;
        push_optional(&mut block, "alternativeTitle", &self.alternative_title)?;
        push_optional(&mut block, "alternativeURL", &self.alternative_url)?;
        block.push(MetadataField::new("author", authors)?)?;
        block.push(MetadataField::new(
            "datasetContact",
            vec![contact.to_document()?],
        )?)?;
        block.push(MetadataField::new("dsDescription", descriptions)?)?;
        if !keywords.is_empty() {
            block.push(MetadataField::new("keyword", keywords)?)?;
        }
        push_optional(&mut block, "notesText", &self.notes_text)?;
        push_optional(&mut block, "productionDate", &self.production_date)?;
        push_optional(&mut block, "productionPlace", &self.production_place)?;
        push_optional(&mut block, "distributionDate", &self.distribution_date)?;
        block.push(MetadataField::new("depositor", depositor.to_string())?)?;
        block.push(MetadataField::new(
            "dateOfDeposit",
            format_date(&deposit_date),
        )?)?;
        push_list(&mut block, "kindOfData", &self.kind_of_data)?;
        push_list(&mut block, "relatedMaterial", &self.related_material)?;
        push_list(&mut block, "relatedDatasets", &self.related_datasets)?;
        push_list(&mut block, "otherReferences", &self.other_references)?;
        push_list(&mut block, "dataSources", &self.data_sources)?;
        push_optional(&mut block, "originOfSources", &self.origin_of_sources)?;
        push_optional(
            &mut block,
            "characteristicOfSources",
            &self.characteristic_of_sources,
        )?;
        push_optional(&mut block, "accessToSources", &self.access_to_sources)?;

        Ok(CitationDocument(block))
    }
}

fn push_optional(block: &mut MetadataBlock, name: &str, value: &Option<String>) -> Result<()> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => block.push(MetadataField::new(name, value)?),
        _ => Ok(()),
    }
}

fn push_list(block: &mut MetadataBlock, name: &str, values: &[String]) -> Result<()> {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        return Ok(());
    }
    block.push(MetadataField::new(name, values)?)
}
