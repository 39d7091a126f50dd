//! A scripted client for the Dataverse native API.
//!
//! The crate covers two things: building metadata documents (most notably
//! the citation block) that Dataverse accepts, and a request layer in which
//! every result remembers its own address and credential. A handle returned
//! by one call can therefore be passed straight into the next one:
//!
//! ```no_run
//! use dvscript::prelude::*;
//!
//! let client = BaseClient::new()?;
//! let root = Address::for_dataverse("https://demo.dataverse.org", "root", ApiKey::new("token"))?;
//!
//! for found in dataverse::datasets(&client, &root, true) {
//!     let found = found?;
//!     let files = dataset::get_dataset_files(&client, &found, &DatasetVersion::Latest)?;
//!     println!("{}: {} files", found.data.id, files.data.len());
//! }
//! # Ok::<(), dvscript::error::DataverseError>(())
//! ```

#![warn(unused_crate_dependencies)]

/// Resource addresses and the rules for deriving them
pub mod address;

/// Client functionality for interacting with Dataverse APIs
pub mod client;

/// API tokens
pub mod credential;

/// Types and utilities for working with dataset versions
pub mod datasetversion;

/// The error type of the crate
pub mod error;

/// Results paired with their provenance
pub mod handle;

/// Types for handling Dataverse identifiers
pub mod identifier;

/// Types for making requests to Dataverse APIs
pub mod request;

/// Types for handling responses from Dataverse APIs
pub mod response;

/// Metadata fields, blocks and the citation document
pub mod metadata {
    /// Compound values such as authors and keywords
    pub mod compound;
    /// The field/value model
    pub mod field;
    /// Named groups of fields
    pub mod block;
    /// The citation block builder
    pub mod citation;
}

/// Bodies of creation requests
pub mod descriptor {
    /// Dataset creation body
    pub mod dataset;
    /// Dataverse creation body
    pub mod dataverse;
}

/// Native API functionality
pub mod native_api {
    /// Dataverse operations
    pub mod dataverse {
        pub use assign::{assign_role, Assignment, RoleAssignment};
        pub use children::{child_dataverses, datasets, ChildDataverses, Datasets};
        pub use contents::{get_contents, ContentItem};
        pub use create::create_dataverse;
        pub use delete::delete_dataverse;
        pub use get::{get_dataverse, Dataverse};

        /// Role assignments
        pub mod assign;
        /// Recursive listings
        pub mod children;
        /// Dataverse contents
        pub mod contents;
        /// Dataverse creation
        pub mod create;
        /// Dataverse deletion
        pub mod delete;
        /// Dataverse retrieval
        pub mod get;
    }

    /// Dataset operations
    pub mod dataset {
        pub use create::{create_dataset, CreatedDataset};
        pub use delete::delete_dataset;
        pub use files::{get_dataset_files, FileEntry};
        pub use get::{get_dataset, Dataset};
        pub use metadata::{get_dataset_metadata, get_metadata_block};

        /// Dataset creation
        pub mod create;
        /// Dataset deletion
        pub mod delete;
        /// File listing
        pub mod files;
        /// Dataset retrieval
        pub mod get;
        /// Metadata operations
        pub mod metadata;
    }
}

/// Commonly used types and functions
pub mod prelude {
    pub use super::address::{Address, Provenance};
    pub use super::client::BaseClient;
    pub use super::credential::ApiKey;
    pub use super::datasetversion::DatasetVersion;
    pub use super::handle::Handle;
    pub use super::identifier::Identifier;
    pub use super::metadata::citation::{CitationBuilder, CitationDocument};
    pub use super::metadata::compound::{Author, Contact, Keyword, PersonName};
    pub use super::native_api::dataset;
    pub use super::native_api::dataverse;
}

/// Command-line interface functionality
pub mod cli {
    /// Authentication profiles
    pub mod auth;
    /// Base CLI functionality
    pub mod base;
    /// Dataset commands
    pub mod dataset;
    /// Dataverse commands
    pub mod dataverse;
}

/// Test utilities
#[cfg(test)]
mod test_utils;
