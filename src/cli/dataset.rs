//! Dataset-related CLI commands
//!
//! This module provides commands for dataset management tasks like:
//! - Creating datasets from a JSON/YAML citation file
//! - Retrieving and deleting datasets
//! - Listing the files and reading the metadata of a dataset version

use std::path::PathBuf;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use structopt::StructOpt;

use crate::datasetversion::DatasetVersion;
use crate::descriptor::dataset::DataSetDescriptor;
use crate::error::{DataverseError, Result};
use crate::identifier::Identifier;
use crate::metadata::block::MetadataBlock;
use crate::metadata::citation::CitationBuilder;
use crate::metadata::compound::{Author, Contact, Keyword, PersonName};
use crate::native_api::dataset;

use super::base::{evaluate_and_print_response, exit_with_error, parse_file, CliContext, Matcher};

/// Subcommands for managing datasets in a Dataverse instance
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle datasets of the Dataverse instance")]
pub enum DatasetSubCommand {
    /// Retrieve a dataset
    #[structopt(about = "Retrieve a dataset")]
    Get {
        #[structopt(help = "(Persistent) identifier or URI of the dataset to retrieve")]
        id: Identifier,
    },

    /// Create a new dataset in a dataverse
    #[structopt(about = "Create a dataset")]
    Create {
        #[structopt(long, short, help = "Alias or URI of the dataverse to create the dataset in")]
        dataverse: String,

        #[structopt(
            long,
            short,
            help = "Path to the JSON/YAML file containing license, terms and citation"
        )]
        body: PathBuf,
    },

    /// Delete an unpublished dataset
    #[structopt(about = "Deletes a dataset")]
    Delete {
        #[structopt(help = "(Persistent) identifier or URI of the dataset to delete")]
        id: Identifier,
    },

    /// List the files of a dataset version
    #[structopt(about = "List files in a dataset")]
    Files {
        #[structopt(help = "(Persistent) identifier or URI of the dataset")]
        id: Identifier,

        #[structopt(
            short,
            long,
            default_value = ":latest",
            help = "Version of the dataset, e.g. ':draft' or '1.0'"
        )]
        version: DatasetVersion,
    },

    /// Read the metadata of a dataset version
    #[structopt(about = "Retrieve the metadata blocks of a dataset")]
    Metadata {
        #[structopt(help = "(Persistent) identifier or URI of the dataset")]
        id: Identifier,

        #[structopt(
            short,
            long,
            default_value = ":latest",
            help = "Version of the dataset, e.g. ':draft' or '1.0'"
        )]
        version: DatasetVersion,

        #[structopt(short, long, help = "Only retrieve this block, e.g. 'citation'")]
        block: Option<String>,
    },
}

impl Matcher for DatasetSubCommand {
    fn process(self, context: &CliContext) {
        let client = &context.client;
        match self {
            DatasetSubCommand::Get { id } => {
                let response = context
                    .dataset(&id)
                    .and_then(|target| dataset::get_dataset(client, &target));
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DatasetSubCommand::Create { dataverse, body } => {
                let input: DatasetInput = match parse_file(&body) {
                    Ok(input) => input,
                    Err(e) => exit_with_error(&DataverseError::validation(format!(
                        "{}: {e}",
                        body.display()
                    ))),
                };
                let response = input.into_descriptor().and_then(|descriptor| {
                    let parent = context.dataverse(&dataverse)?;
                    dataset::create_dataset(client, &parent, &descriptor)
                });
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DatasetSubCommand::Delete { id } => {
                let response = context
                    .dataset(&id)
                    .and_then(|target| dataset::delete_dataset(client, &target));
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DatasetSubCommand::Files { id, version } => {
                let response = context
                    .dataset(&id)
                    .and_then(|target| dataset::get_dataset_files(client, &target, &version));
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DatasetSubCommand::Metadata { id, version, block } => {
                let target = match context.dataset(&id) {
                    Ok(target) => target,
                    Err(e) => exit_with_error(&e),
                };
                match block {
                    Some(block) => {
                        let response =
                            dataset::get_metadata_block(client, &target, &version, &block);
                        evaluate_and_print_response(response.map(|h| h.data));
                    }
                    None => {
                        let response = dataset::get_dataset_metadata(client, &target, &version);
                        evaluate_and_print_response(response.map(|h| h.data));
                    }
                }
            }
        };
    }
}

#[derive(Debug, Deserialize)]
pub struct NameInput {
    pub surname: String,
    #[serde(default)]
    pub christian_name: String,
}

impl From<NameInput> for PersonName {
    fn from(value: NameInput) -> Self {
        PersonName::new(value.surname, value.christian_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthorInput {
    #[serde(flatten)]
    pub name: NameInput,
    pub affiliation: Option<String>,
    pub orcid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactInput {
    #[serde(flatten)]
    pub name: NameInput,
    pub email: String,
    pub affiliation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordInput {
    pub value: String,
    pub vocabulary: Option<String>,
    pub custom_vocabulary: Option<String>,
    pub custom_vocabulary_uri: Option<String>,
}

/// The file read by `dataset create`.
///
/// ```yaml
/// license: CC0 1.0
/// terms_of_use: Free to use
/// title: Flow around a cylinder
/// authors:
///   - surname: Doe
///     christian_name: Jane
///     orcid: 0000-0002-1825-0097
/// contact:
///   surname: Doe
///   christian_name: Jane
///   email: jane@example.org
/// descriptions:
///   - Simulation data
/// depositor:
///   surname: Doe
///   christian_name: Jane
/// keywords:
///   - value: CFD
///     vocabulary: LCSH
/// ```
#[derive(Debug, Deserialize)]
pub struct DatasetInput {
    pub license: String,
    #[serde(default)]
    pub terms_of_use: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub alternative_title: Option<String>,
    pub alternative_url: Option<String>,
    pub authors: Vec<AuthorInput>,
    pub contact: ContactInput,
    pub descriptions: Vec<String>,
    pub description_date: Option<NaiveDate>,
    #[serde(default)]
    pub keywords: Vec<KeywordInput>,
    pub notes_text: Option<String>,
    pub production_date: Option<String>,
    pub production_place: Option<String>,
    pub distribution_date: Option<String>,
    pub depositor: NameInput,
    pub deposit_date: Option<NaiveDate>,
    #[serde(default)]
    pub kind_of_data: Vec<String>,
    #[serde(default)]
    pub related_material: Vec<String>,
    #[serde(default)]
    pub related_datasets: Vec<String>,
    #[serde(default)]
    pub other_references: Vec<String>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    pub origin_of_sources: Option<String>,
    pub characteristic_of_sources: Option<String>,
    pub access_to_sources: Option<String>,
    /// Further blocks keyed by name; a `citation` entry here is ignored.
    #[serde(default)]
    pub other_metadata: IndexMap<String, MetadataBlock>,
}

// Forwards the optional scalars of the input to the builder setters of the same name
macro_rules! set_if_some {
    ($builder:ident, $input:ident, $($field:ident),+) => {
        $(
            if let Some(value) = $input.$field {
                $builder = $builder.$field(value);
            }
        )+
    };
}

impl DatasetInput {
    /// Builds the citation block and wraps it with the other blocks.
    pub fn into_descriptor(self) -> Result<DataSetDescriptor> {
        let input = self;
        let mut builder = CitationBuilder::new(input.title)
            .contact(contact(input.contact))
            .depositor(input.depositor.into());

        for author in input.authors {
            let mut built = Author::new(author.name.into());
            if let Some(affiliation) = author.affiliation {
                built = built.with_affiliation(affiliation);
            }
            if let Some(orcid) = author.orcid {
                built = built.with_orcid(orcid);
            }
            builder = builder.author(built);
        }

        for description in input.descriptions {
            builder = builder.description(description);
        }

        for keyword in input.keywords {
            builder = builder.keyword(Keyword::from_parts(
                &keyword.value,
                keyword.vocabulary.as_deref(),
                keyword.custom_vocabulary.as_deref(),
                keyword.custom_vocabulary_uri.as_deref(),
            )?);
        }

        if let Some(date) = input.description_date {
            builder = builder.description_date(date);
        }
        if let Some(date) = input.deposit_date {
            builder = builder.deposit_date(date);
        }

        set_if_some!(
            builder,
            input,
            subtitle,
            alternative_title,
            alternative_url,
            notes_text,
            production_date,
            production_place,
            distribution_date,
            origin_of_sources,
            characteristic_of_sources,
            access_to_sources
        );

        for value in input.kind_of_data {
            builder = builder.kind_of_data(value);
        }
        for value in input.related_material {
            builder = builder.related_material(value);
        }
        for value in input.related_datasets {
            builder = builder.related_datasets(value);
        }
        for value in input.other_references {
            builder = builder.other_references(value);
        }
        for value in input.data_sources {
            builder = builder.data_sources(value);
        }

        Ok(
            DataSetDescriptor::new(input.license, input.terms_of_use, builder.build()?)
                .other_metadata(input.other_metadata),
        )
    }
}

fn contact(input: ContactInput) -> Contact {
    let contact = Contact::new(input.name.into(), input.email);
    match input.affiliation {
        Some(affiliation) => contact.with_affiliation(affiliation),
        None => contact,
    }
}
