//! Dataverse-related CLI commands
//!
//! This module provides commands for dataverse management tasks like:
//! - Creating dataverses within parent dataverses
//! - Listing contents, child dataverses and datasets, optionally recursively
//! - Assigning roles and deleting dataverses

use std::path::PathBuf;

use structopt::StructOpt;

use crate::descriptor::dataverse::DataverseDescriptor;
use crate::error::{DataverseError, Result};
use crate::native_api::dataverse::{self, RoleAssignment};

use super::base::{evaluate_and_print_response, exit_with_error, parse_file, CliContext, Matcher};

/// Subcommands for managing dataverses in a Dataverse instance
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle dataverses of a Dataverse instance")]
pub enum DataverseSubCommand {
    /// Retrieve a dataverse
    #[structopt(about = "Retrieve a dataverse")]
    Get {
        #[structopt(help = "Alias, id or URI of the dataverse")]
        alias: String,
    },

    /// Create a new dataverse in a parent dataverse
    #[structopt(about = "Create a dataverse")]
    Create {
        #[structopt(long, short, help = "Alias or URI of the parent dataverse")]
        parent: String,

        #[structopt(
            long,
            short,
            help = "Path to the JSON/YAML file containing the dataverse body"
        )]
        body: PathBuf,
    },

    /// Delete an empty, unpublished dataverse
    #[structopt(about = "Delete a dataverse")]
    Delete {
        #[structopt(help = "Alias, id or URI of the dataverse to delete")]
        alias: String,
    },

    /// List the direct contents of a dataverse
    #[structopt(about = "Dataverse contents")]
    Contents {
        #[structopt(help = "Alias, id or URI of the dataverse")]
        alias: String,
    },

    /// List the child dataverses of a dataverse
    #[structopt(about = "Child dataverses")]
    Children {
        #[structopt(help = "Alias, id or URI of the dataverse")]
        alias: String,

        #[structopt(short, long, help = "Descend into child dataverses")]
        recursive: bool,
    },

    /// List the datasets of a dataverse
    #[structopt(about = "Datasets of a dataverse")]
    Datasets {
        #[structopt(help = "Alias, id or URI of the dataverse")]
        alias: String,

        #[structopt(short, long, help = "Descend into child dataverses")]
        recursive: bool,
    },

    /// Assign a role on a dataverse
    #[structopt(about = "Assign a role")]
    Assign {
        #[structopt(help = "Alias, id or URI of the dataverse")]
        alias: String,

        #[structopt(long, short, help = "User or group to assign the role to, e.g. '@jdoe'")]
        assignee: String,

        #[structopt(long, short, help = "Alias of the role, e.g. 'curator'")]
        role: String,
    },
}

impl Matcher for DataverseSubCommand {
    fn process(self, context: &CliContext) {
        let client = &context.client;
        match self {
            DataverseSubCommand::Get { alias } => {
                let response = context
                    .dataverse(&alias)
                    .and_then(|target| dataverse::get_dataverse(client, &target));
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DataverseSubCommand::Create { parent, body } => {
                let descriptor: DataverseDescriptor = match parse_file(&body) {
                    Ok(descriptor) => descriptor,
                    Err(e) => exit_with_error(&DataverseError::validation(format!(
                        "{}: {e}",
                        body.display()
                    ))),
                };
                let response = context
                    .dataverse(&parent)
                    .and_then(|parent| dataverse::create_dataverse(client, &parent, &descriptor));
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DataverseSubCommand::Delete { alias } => {
                let response = context
                    .dataverse(&alias)
                    .and_then(|target| dataverse::delete_dataverse(client, &target));
                evaluate_and_print_response(response.map(|h| h.data));
            }
            DataverseSubCommand::Contents { alias } => {
                let response = context
                    .dataverse(&alias)
                    .and_then(|target| dataverse::get_contents(client, &target));
                evaluate_and_print_response(
                    response.map(|items| items.into_iter().map(|h| h.data).collect::<Vec<_>>()),
                );
            }
            DataverseSubCommand::Children { alias, recursive } => {
                let response = context.dataverse(&alias).and_then(|target| {
                    dataverse::child_dataverses(client, &target, recursive)
                        .map(|r| r.map(|h| h.data))
                        .collect::<Result<Vec<_>>>()
                });
                evaluate_and_print_response(response);
            }
            DataverseSubCommand::Datasets { alias, recursive } => {
                let response = context.dataverse(&alias).and_then(|target| {
                    dataverse::datasets(client, &target, recursive)
                        .map(|r| r.map(|h| h.data))
                        .collect::<Result<Vec<_>>>()
                });
                evaluate_and_print_response(response);
            }
            DataverseSubCommand::Assign {
                alias,
                assignee,
                role,
            } => {
                let assignment = RoleAssignment::new(assignee, role);
                let response = context
                    .dataverse(&alias)
                    .and_then(|target| dataverse::assign_role(client, &target, &assignment));
                evaluate_and_print_response(response.map(|h| h.data));
            }
        };
    }
}
