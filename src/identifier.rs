use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Datasets can be addressed either by their database id or by their
// persistent identifier (DOI, Handle, ...). Callers hand in whatever they
// have and the address layer picks the matching URI form:
//
//   Id(42)                  -> .../datasets/42
//   PersistentId("doi:...") -> .../datasets/:persistentId?persistentId=doi:...
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Identifier {
    PersistentId(String),
    Id(i64),
}

impl Identifier {
    /// The path segment used in place of the dataset id.
    pub fn path_segment(&self) -> String {
        match self {
            Identifier::Id(id) => id.to_string(),
            Identifier::PersistentId(_) => ":persistentId".to_string(),
        }
    }

    /// The query parameter required by the `:persistentId` form, if any.
    pub fn query_pair(&self) -> Option<(&'static str, &str)> {
        match self {
            Identifier::PersistentId(pid) => Some(("persistentId", pid.as_str())),
            Identifier::Id(_) => None,
        }
    }
}

impl FromStr for Identifier {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Identifier must not be empty".to_string());
        }

        // If it can be parsed as an integer, it is an id
        // Otherwise, it is a persistent id
        match s.parse::<i64>() {
            Ok(id) => Ok(Identifier::Id(id)),
            Err(_) => Ok(Identifier::PersistentId(s.to_owned())),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::PersistentId(pid) => write!(f, "{}", pid),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Id(value)
    }
}
