//! The typed field/value model of Dataverse metadata blocks.
//!
//! A [`MetadataField`] serializes to the shape the native API expects:
//!
//! ```json
//! { "typeName": "title", "multiple": false, "typeClass": "primitive", "value": "My title" }
//! ```
//!
//! Its multiplicity and type class are derived from the value once, at
//! construction. Fields deserialized from a server response are taken as they
//! come, since the server is the authority on its own blocks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DataverseError, Result};

/// Type class of a metadata field, as named by the native API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeClass {
    Primitive,
    Compound,
    ControlledVocabulary,
}

/// An ordered mapping of sub-field names to fields.
///
/// This is the value of a compound field. Insertion order is kept through
/// serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, MetadataField>);

impl Document {
    pub fn new() -> Self {
        Document(IndexMap::new())
    }

    /// Inserts `field` under its own name and returns the document.
    pub fn with(mut self, field: MetadataField) -> Self {
        self.insert(field);
        self
    }

    /// Inserts `field` under its own name, returning any field it replaced.
    pub fn insert(&mut self, field: MetadataField) -> Option<MetadataField> {
        self.0.insert(field.name().to_string(), field)
    }

    pub fn get(&self, name: &str) -> Option<&MetadataField> {
        self.0.get(name)
    }

    /// Shortcut for the scalar value of the sub-field `name`.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(MetadataField::as_scalar)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataField)> {
        self.0.iter()
    }
}

/// One element of a multi-valued field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Scalar(String),
    Document(Document),
}

impl Element {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Element::Scalar(value) => Some(value),
            Element::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Element::Document(document) => Some(document),
            Element::Scalar(_) => None,
        }
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::Scalar(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::Scalar(value)
    }
}

impl From<Document> for Element {
    fn from(value: Document) -> Self {
        Element::Document(value)
    }
}

/// The value of a metadata field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Document(Document),
    Sequence(Vec<Element>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Document> for FieldValue {
    fn from(value: Document) -> Self {
        FieldValue::Document(value)
    }
}

impl<T: Into<Element>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// A named, typed metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataField {
    type_name: String,
    multiple: bool,
    type_class: TypeClass,
    value: FieldValue,
}

impl MetadataField {
    /// Creates a field, deriving multiplicity and type class from `value`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if:
    /// - `name` is empty.
    /// - `value` is an empty sequence.
    /// - `value` mixes scalars and documents.
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Result<Self> {
        Self::build(name.into(), value.into(), false)
    }

    /// Creates a single-valued primitive field drawn from a controlled vocabulary.
    ///
    /// # Errors
    ///
    /// Same as [`MetadataField::new`], and additionally if `value` is a
    /// document or a sequence.
    pub fn controlled(name: impl Into<String>, value: impl Into<FieldValue>) -> Result<Self> {
        Self::build(name.into(), value.into(), true)
    }

    fn build(name: String, value: FieldValue, controlled: bool) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(DataverseError::validation(
                "metadata field name must not be empty",
            ));
        }

        let (multiple, compound) = match &value {
            FieldValue::Scalar(_) => (false, false),
            FieldValue::Document(_) => (false, true),
            FieldValue::Sequence(elements) => {
                if elements.is_empty() {
                    return Err(DataverseError::validation(format!(
                        "{name}: at least one element required"
                    )));
                }

                let documents = elements
                    .iter()
                    .filter(|e| matches!(e, Element::Document(_)))
                    .count();

                if documents != 0 && documents != elements.len() {
                    return Err(DataverseError::validation(format!(
                        "{name}: cannot mix scalar and compound elements"
                    )));
                }

                (true, documents != 0)
            }
        };

        if controlled && (multiple || compound) {
            return Err(DataverseError::validation(format!(
                "{name}: a controlled vocabulary field must hold a single primitive value"
            )));
        }

        let type_class = match (compound, controlled) {
            (true, _) => TypeClass::Compound,
            (false, true) => TypeClass::ControlledVocabulary,
            (false, false) => TypeClass::Primitive,
        };

        Ok(MetadataField {
            type_name: name,
            multiple,
            type_class,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.type_name
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn type_class(&self) -> TypeClass {
        self.type_class
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match &self.value {
            FieldValue::Document(document) => Some(document),
            _ => None,
        }
    }

    /// The elements of a multi-valued field; empty for single values.
    pub fn elements(&self) -> &[Element] {
        match &self.value {
            FieldValue::Sequence(elements) => elements,
            _ => &[],
        }
    }

    /// Appends an element to a multi-valued field.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the field is single-valued or if the
    /// element's kind does not match the field's type class.
    pub fn push(&mut self, element: impl Into<Element>) -> Result<()> {
        let element = element.into();
        let expects_document = self.type_class == TypeClass::Compound;

        let elements = match &mut self.value {
            FieldValue::Sequence(elements) if self.multiple => elements,
            _ => {
                return Err(DataverseError::validation(format!(
                    "{}: cannot append to a single-valued field",
                    self.type_name
                )))
            }
        };

        if matches!(element, Element::Document(_)) != expects_document {
            return Err(DataverseError::validation(format!(
                "{}: element kind does not match the field's type class",
                self.type_name
            )));
        }

        elements.push(element);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sub_document() -> Document {
        Document::new().with(MetadataField::new("authorName", "Doe, Jane").unwrap())
    }

    #[test]
    fn test_scalar_value_is_single_primitive() {
        let field = MetadataField::new("title", "My title").unwrap();

        assert!(!field.is_multiple());
        assert_eq!(field.type_class(), TypeClass::Primitive);
        assert_eq!(field.as_scalar(), Some("My title"));
    }

    #[test]
    fn test_document_value_is_single_compound() {
        let field = MetadataField::new("author", sub_document()).unwrap();

        assert!(!field.is_multiple());
        assert_eq!(field.type_class(), TypeClass::Compound);
        assert_eq!(
            field.as_document().unwrap().scalar("authorName"),
            Some("Doe, Jane")
        );
    }

    #[test]
    fn test_scalar_sequence_is_multiple_primitive() {
        let field = MetadataField::new("kindOfData", vec!["survey", "interview"]).unwrap();

        assert!(field.is_multiple());
        assert_eq!(field.type_class(), TypeClass::Primitive);
        assert_eq!(field.elements().len(), 2);
    }

    #[test]
    fn test_document_sequence_is_multiple_compound() {
        let field = MetadataField::new("author", vec![sub_document(), sub_document()]).unwrap();

        assert!(field.is_multiple());
        assert_eq!(field.type_class(), TypeClass::Compound);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let result = MetadataField::new("kindOfData", Vec::<String>::new());

        match result {
            Err(DataverseError::Validation(message)) => {
                assert!(message.contains("at least one element required"))
            }
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_sequence_is_rejected() {
        let elements = vec![Element::from("plain"), Element::from(sub_document())];
        let result = MetadataField::new("mixed", elements);
        assert!(matches!(result, Err(DataverseError::Validation(_))));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let result = MetadataField::new(" ", "value");
        assert!(matches!(result, Err(DataverseError::Validation(_))));
    }

    #[test]
    fn test_controlled_vocabulary_on_scalar() {
        let field = MetadataField::controlled("authorIdentifierScheme", "ORCID").unwrap();

        assert!(!field.is_multiple());
        assert_eq!(field.type_class(), TypeClass::ControlledVocabulary);
    }

    #[test]
    fn test_controlled_vocabulary_rejects_compound_and_multiple() {
        let compound = MetadataField::controlled("author", sub_document());
        let multiple = MetadataField::controlled("subject", vec!["Physics", "Chemistry"]);

        assert!(matches!(compound, Err(DataverseError::Validation(_))));
        assert!(matches!(multiple, Err(DataverseError::Validation(_))));
    }

    #[test]
    fn test_push_appends_matching_elements() {
        let mut field = MetadataField::new("author", vec![sub_document()]).unwrap();
        field.push(sub_document()).unwrap();
        assert_eq!(field.elements().len(), 2);

        let result = field.push("not a document");
        assert!(matches!(result, Err(DataverseError::Validation(_))));
        assert_eq!(field.elements().len(), 2);
    }

    #[test]
    fn test_push_rejects_single_valued_field() {
        let mut field = MetadataField::new("title", "My title").unwrap();
        let result = field.push("another");
        assert!(matches!(result, Err(DataverseError::Validation(_))));
    }

    #[test]
    fn test_serializes_to_native_api_shape() {
        let field = MetadataField::new("author", vec![sub_document()]).unwrap();
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(
            json,
            json!({
                "typeName": "author",
                "multiple": true,
                "typeClass": "compound",
                "value": [{
                    "authorName": {
                        "typeName": "authorName",
                        "multiple": false,
                        "typeClass": "primitive",
                        "value": "Doe, Jane"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_deserializes_server_fields_as_is() {
        let raw = json!({
            "typeName": "subject",
            "multiple": true,
            "typeClass": "controlledVocabulary",
            "value": ["Computer and Information Science"]
        });

        let field: MetadataField = serde_json::from_value(raw).unwrap();

        assert!(field.is_multiple());
        assert_eq!(field.type_class(), TypeClass::ControlledVocabulary);
        assert_eq!(
            field.elements()[0].as_scalar(),
            Some("Computer and Information Science")
        );
    }
}
