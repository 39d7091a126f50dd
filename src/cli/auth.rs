//! Authentication profiles of the dvscript CLI
//!
//! A profile pairs the base URL of a Dataverse instance with an API token and
//! is stored in the system keyring, so scripts can select it with
//! `--profile <name>` instead of exporting `DVCLI_URL` and `DVCLI_TOKEN`.

use colored::Colorize;
use keyring::Entry;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

use crate::credential::ApiKey;
use crate::error::{DataverseError, Result};

/// Keyring service all profiles are stored under.
pub const KEYRING_SERVICE: &str = "dvscript";

/// Subcommands for handling authentication in the dvscript CLI
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle authentication of the dvscript CLI")]
pub enum AuthSubCommand {
    /// Set an authentication profile with a name, URL and token
    #[structopt(about = "Set the authentication profile")]
    Set {
        /// Name to identify this authentication profile
        #[structopt(short, long, help = "Name of the profile")]
        name: String,

        /// URL of the Dataverse server to authenticate against
        #[structopt(short, long, help = "URL of the Dataverse server")]
        url: String,

        /// API token used for authentication with the Dataverse server
        #[structopt(short, long, help = "API token for authentication")]
        token: String,
    },
}

impl AuthSubCommand {
    /// Stores the profile in the keyring. Needs no connection to an instance.
    pub fn process(self) -> Result<()> {
        match self {
            AuthSubCommand::Set { name, url, token } => {
                let profile = AuthProfile::new(name, url, &token)?;
                profile.set_to_keyring()?;

                println!(
                    "{} Profile '{}' saved. Use it with {}",
                    "✓".green().bold(),
                    profile.name().bold(),
                    format!("--profile {}", profile.name()).dimmed().italic()
                );
                Ok(())
            }
        }
    }
}

/// Base URL and token of a Dataverse instance, stored under a name.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthProfile {
    name: String,
    url: String,
    token: ApiKey,
}

// What goes into the keyring entry
#[derive(Serialize, Deserialize)]
struct StoredProfile {
    url: String,
    token: String,
}

impl AuthProfile {
    /// Creates a new profile.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank, the URL does not
    /// parse or the token is blank.
    pub fn new(name: String, url: String, token: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(DataverseError::validation("profile name must not be empty"));
        }

        Url::parse(&url)
            .map_err(|e| DataverseError::validation(format!("invalid URL '{url}': {e}")))?;

        let token = token
            .parse::<ApiKey>()
            .map_err(DataverseError::validation)?;

        Ok(AuthProfile { name, url, token })
    }

    /// Stores the profile in the system keyring.
    pub fn set_to_keyring(&self) -> Result<()> {
        let stored = serde_json::to_string(&StoredProfile {
            url: self.url.clone(),
            token: self.token.secret().to_string(),
        })?;

        entry(&self.name)?
            .set_password(&stored)
            .map_err(|e| keyring_error(&self.name, e))
    }

    /// Loads the profile `name` from the system keyring.
    pub fn get_from_keyring(name: &str) -> Result<Self> {
        let stored = entry(name)?
            .get_password()
            .map_err(|e| keyring_error(name, e))?;
        let stored: StoredProfile = serde_json::from_str(&stored)?;

        Self::new(name.to_string(), stored.url, &stored.token)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &ApiKey {
        &self.token
    }
}

fn entry(name: &str) -> Result<Entry> {
    Entry::new(KEYRING_SERVICE, name).map_err(|e| keyring_error(name, e))
}

fn keyring_error(name: &str, error: keyring::Error) -> DataverseError {
    DataverseError::precondition(format!("keyring profile '{name}': {error}"))
}
