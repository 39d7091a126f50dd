//! Fixed-shape compound values of the citation block.
//!
//! Each type here turns a handful of scalar facts into the [`Document`] the
//! citation block stores for it, e.g. an [`Author`] becomes
//! `{ authorName, authorAffiliation?, authorIdentifierScheme?, authorIdentifier? }`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Local, NaiveDate};

use crate::error::{DataverseError, Result};
use crate::metadata::field::{Document, MetadataField};

/// Date format of every date value sent to Dataverse.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date the way Dataverse expects it, independent of any locale.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A person's name, rendered as `Surname, ChristianName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub surname: String,
    pub christian_name: String,
}

impl PersonName {
    pub fn new(surname: impl Into<String>, christian_name: impl Into<String>) -> Self {
        PersonName {
            surname: surname.into(),
            christian_name: christian_name.into(),
        }
    }

    fn validate(&self, role: &str) -> Result<()> {
        if self.surname.trim().is_empty() {
            return Err(DataverseError::validation(format!(
                "{role}: surname must not be empty"
            )));
        }
        Ok(())
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let surname = self.surname.trim();
        let christian_name = self.christian_name.trim();
        if christian_name.is_empty() {
            write!(f, "{surname}")
        } else {
            write!(f, "{surname}, {christian_name}")
        }
    }
}

/// Adds `name = value` to `document` unless `value` is absent or blank.
fn insert_optional(document: &mut Document, name: &str, value: Option<&str>) -> Result<()> {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        document.insert(MetadataField::new(name, value)?);
    }
    Ok(())
}

/// An author of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: PersonName,
    pub affiliation: Option<String>,
    /// ORCID iD; when present the identifier scheme is set to `ORCID`.
    pub orcid: Option<String>,
}

impl Author {
    pub fn new(name: PersonName) -> Self {
        Author {
            name,
            affiliation: None,
            orcid: None,
        }
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }

    pub fn to_document(&self) -> Result<Document> {
        self.name.validate("author")?;

        let mut document =
            Document::new().with(MetadataField::new("authorName", self.name.to_string())?);
        insert_optional(
            &mut document,
            "authorAffiliation",
            self.affiliation.as_deref(),
        )?;

        // Scheme and identifier only ever travel together
        if let Some(orcid) = self.orcid.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            document.insert(MetadataField::controlled("authorIdentifierScheme", "ORCID")?);
            document.insert(MetadataField::new("authorIdentifier", orcid)?);
        }

        Ok(document)
    }
}

/// The contact person of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: PersonName,
    pub email: String,
    pub affiliation: Option<String>,
}

impl Contact {
    pub fn new(name: PersonName, email: impl Into<String>) -> Self {
        Contact {
            name,
            email: email.into(),
            affiliation: None,
        }
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn to_document(&self) -> Result<Document> {
        self.name.validate("contact")?;
        if self.email.trim().is_empty() {
            return Err(DataverseError::validation(
                "contact: email must not be empty",
            ));
        }

        let mut document = Document::new()
            .with(MetadataField::new(
                "datasetContactName",
                self.name.to_string(),
            )?)
            .with(MetadataField::new(
                "datasetContactEmail",
                self.email.trim(),
            )?);
        insert_optional(
            &mut document,
            "datasetContactAffiliation",
            self.affiliation.as_deref(),
        )?;

        Ok(document)
    }
}

/// A free-text description with the date it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub text: String,
    pub date: NaiveDate,
}

impl Description {
    /// A description dated today.
    pub fn new(text: impl Into<String>) -> Self {
        Self::dated(text, Local::now().date_naive())
    }

    pub fn dated(text: impl Into<String>, date: NaiveDate) -> Self {
        Description {
            text: text.into(),
            date,
        }
    }

    pub fn to_document(&self) -> Result<Document> {
        if self.text.trim().is_empty() {
            return Err(DataverseError::validation(
                "description: text must not be empty",
            ));
        }

        Ok(Document::new()
            .with(MetadataField::new("dsDescriptionValue", self.text.as_str())?)
            .with(MetadataField::new(
                "dsDescriptionDate",
                format_date(&self.date),
            )?))
    }
}

/// Keyword vocabularies known by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Gnd,
    Lcsh,
    Mesh,
}

impl Vocabulary {
    pub fn display_name(&self) -> &'static str {
        match self {
            Vocabulary::Gnd => "GND-Sachgruppen",
            Vocabulary::Lcsh => "LCSH",
            Vocabulary::Mesh => "MeSH",
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            Vocabulary::Gnd => "https://d-nb.info/standards/vocab/gnd/gnd-sc.html",
            Vocabulary::Lcsh => "https://id.loc.gov/authorities/subjects.html",
            Vocabulary::Mesh => "https://www.nlm.nih.gov/mesh/meshhome.html",
        }
    }
}

impl FromStr for Vocabulary {
    type Err = DataverseError;

    /// Case-insensitive, so `Lcsh`, `LCSH` and `lcsh` all name the same vocabulary.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gnd" => Ok(Vocabulary::Gnd),
            "lcsh" => Ok(Vocabulary::Lcsh),
            "mesh" => Ok(Vocabulary::Mesh),
            _ => Err(DataverseError::validation(format!(
                "unsupported vocabulary '{s}', expected one of GND, LCSH, MeSH"
            ))),
        }
    }
}

/// Where the term of a keyword comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordVocabulary {
    BuiltIn(Vocabulary),
    Custom { name: String, uri: Option<String> },
}

/// A keyword, optionally tied to a vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub value: String,
    pub vocabulary: Option<KeywordVocabulary>,
}

impl Keyword {
    pub fn new(value: impl Into<String>) -> Self {
        Keyword {
            value: value.into(),
            vocabulary: None,
        }
    }

    /// Ties the keyword to a built-in vocabulary looked up by key (`GND`, `LCSH`, `MeSH`).
    pub fn with_vocabulary(self, key: &str) -> Result<Self> {
        let vocabulary = key.parse::<Vocabulary>()?;
        self.set_vocabulary(KeywordVocabulary::BuiltIn(vocabulary))
    }

    /// Ties the keyword to a vocabulary of the caller's choosing.
    pub fn with_custom_vocabulary(
        self,
        name: impl Into<String>,
        uri: Option<String>,
    ) -> Result<Self> {
        self.set_vocabulary(KeywordVocabulary::Custom {
            name: name.into(),
            uri,
        })
    }

    fn set_vocabulary(mut self, vocabulary: KeywordVocabulary) -> Result<Self> {
        if self.vocabulary.is_some() {
            return Err(DataverseError::validation(
                "keyword: a built-in and a custom vocabulary are mutually exclusive",
            ));
        }
        self.vocabulary = Some(vocabulary);
        Ok(self)
    }

    /// Assembles a keyword from loose scalar inputs, as read from a file or
    /// the command line.
    ///
    /// # Errors
    ///
    /// Returns a validation error if both a built-in and a custom vocabulary
    /// are named, if a custom URI comes without a custom name, or if the
    /// built-in key is unknown.
    pub fn from_parts(
        value: &str,
        vocabulary: Option<&str>,
        custom_vocabulary: Option<&str>,
        custom_vocabulary_uri: Option<&str>,
    ) -> Result<Self> {
        let keyword = Keyword::new(value);
        match (vocabulary, custom_vocabulary, custom_vocabulary_uri) {
            (None, None, None) => Ok(keyword),
            (Some(key), None, None) => keyword.with_vocabulary(key),
            (None, Some(name), uri) => {
                keyword.with_custom_vocabulary(name, uri.map(str::to_string))
            }
            (None, None, Some(_)) => Err(DataverseError::validation(
                "keyword: a vocabulary URI requires a vocabulary name",
            )),
            (Some(_), _, _) => Err(DataverseError::validation(
                "keyword: a built-in and a custom vocabulary are mutually exclusive",
            )),
        }
    }

    pub fn to_document(&self) -> Result<Document> {
        if self.value.trim().is_empty() {
            return Err(DataverseError::validation(
                "keyword: value must not be empty",
            ));
        }

        let mut document =
            Document::new().with(MetadataField::new("keywordValue", self.value.trim())?);

        match &self.vocabulary {
            Some(KeywordVocabulary::BuiltIn(vocabulary)) => {
                document.insert(MetadataField::new(
                    "keywordVocabulary",
                    vocabulary.display_name(),
                )?);
                document.insert(MetadataField::new(
                    "keywordVocabularyURI",
                    vocabulary.uri(),
                )?);
            }
            Some(KeywordVocabulary::Custom { name, uri }) => {
                document.insert(MetadataField::new("keywordVocabulary", name.as_str())?);
                insert_optional(&mut document, "keywordVocabularyURI", uri.as_deref())?;
            }
            None => {}
        }

        Ok(document)
    }
}
