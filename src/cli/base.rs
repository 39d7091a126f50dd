//! Base functionality for the dvscript CLI
//!
//! This module provides core utilities and traits used across the CLI including:
//! - The connection context every command runs against
//! - Result printing and exit codes
//! - File parsing for JSON/YAML request bodies

use std::error::Error;
use std::fs;
use std::path::Path;

use atty::Stream;
use colored::Colorize;
use colored_json::ToColoredJson;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::address::Address;
use crate::client::{print_error, BaseClient};
use crate::credential::ApiKey;
use crate::error::{DataverseError, Result};
use crate::identifier::Identifier;

/// The instance and credential a CLI invocation talks to.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub client: BaseClient,
    base_url: String,
    credential: ApiKey,
}

impl CliContext {
    pub fn new(base_url: impl Into<String>, credential: ApiKey) -> Result<Self> {
        Ok(CliContext {
            client: BaseClient::new()?,
            base_url: base_url.into(),
            credential,
        })
    }

    /// Address of the dataverse `alias`. A full resource URI is taken as is.
    pub fn dataverse(&self, alias: &str) -> Result<Address> {
        if is_uri(alias) {
            return self.resolve_uri(alias);
        }
        Address::for_dataverse(&self.base_url, alias, self.credential.clone())
    }

    /// Address of a dataset by id, persistent identifier or resource URI.
    pub fn dataset(&self, id: &Identifier) -> Result<Address> {
        match id {
            Identifier::PersistentId(target) if is_uri(target) => self.resolve_uri(target),
            _ => Address::for_dataset(&self.base_url, id, self.credential.clone()),
        }
    }

    /// Addresses a raw resource URI with the credential of this invocation.
    pub fn resolve_uri(&self, uri: &str) -> Result<Address> {
        Address::resolve(None, Some(uri), Some(self.credential.clone()))
    }
}

fn is_uri(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Prints the outcome of a command and exits with the matching code.
///
/// # Arguments
/// * `result` - The payload of a successful call or the error that stopped it
pub fn evaluate_and_print_response<T: Serialize>(result: Result<T>) {
    match result {
        Ok(data) => match serde_json::to_string_pretty(&data) {
            Ok(json) => {
                redirect_stream(&json);
                std::process::exit(exitcode::OK);
            }
            Err(e) => exit_with_error(&DataverseError::from(e)),
        },
        Err(e) => exit_with_error(&e),
    }
}

/// Prints `error` and exits with the code matching its kind.
pub fn exit_with_error(error: &DataverseError) -> ! {
    print_error(error.to_string());
    std::process::exit(exit_code(error));
}

fn exit_code(error: &DataverseError) -> exitcode::ExitCode {
    match error {
        DataverseError::Precondition(_) => exitcode::USAGE,
        DataverseError::Validation(_)
        | DataverseError::Request { .. }
        | DataverseError::Serialization(_) => exitcode::DATAERR,
    }
}

/// Redirects output to appropriate stream based on context
///
/// If users are redirecting the output to a file, we don't want to print
/// the success message but only the JSON response to ensure that the output
/// is clean and can be used in other scripts
fn redirect_stream(json_str: &str) {
    if atty::is(Stream::Stdout) {
        println!("{}", success_message());
        let colored = json_str
            .to_colored_json_auto()
            .unwrap_or_else(|_| json_str.to_string());
        println!("{}\n", colored);
    } else {
        println!("{}", json_str);
    }
}

fn success_message() -> String {
    format!(
        "{} {} - Received the following response: \n",
        "└── ".bold(),
        "Success!".green().bold()
    )
}

/// Parses a JSON or YAML file into the specified type
///
/// # Arguments
/// * `path` - Path to the file to parse
///
/// # Returns
/// * `Ok(T)` - Successfully parsed file contents
/// * `Err` - File reading or parsing error
pub fn parse_file<P, T>(path: P) -> std::result::Result<T, Box<dyn Error>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;

    if let Ok(content) = serde_json::from_str(&content) {
        Ok(content)
    } else if let Ok(content) = serde_yaml::from_str(&content) {
        Ok(content)
    } else {
        Err("Failed to parse the file as either JSON or YAML".into())
    }
}

/// Trait for processing CLI subcommands
///
/// Implementors define how to handle their specific subcommand variant
/// against the given instance.
pub trait Matcher {
    /// Process this subcommand
    ///
    /// # Arguments
    /// * `context` - Client, base URL and credential of the invocation
    fn process(self, context: &CliContext);
}
