use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::address::Provenance;
use crate::client::BaseClient;
use crate::error::Result;
use crate::handle::Handle;
use crate::request::RequestType;

/// The body of a role assignment, e.g. `{"assignee": "@jdoe", "role": "curator"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub assignee: String,
    pub role: String,
}

impl RoleAssignment {
    pub fn new(assignee: impl Into<String>, role: impl Into<String>) -> Self {
        RoleAssignment {
            assignee: assignee.into(),
            role: role.into(),
        }
    }
}

/// A role assignment as stored by the server.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub assignee: String,
    pub role_id: Option<i64>,
    #[serde(rename = "_roleAlias")]
    pub role_alias: Option<String>,
    pub definition_point_id: Option<i64>,
}

/// Assigns a role on a dataverse to a user or group.
///
/// # Arguments
///
/// * `client` - The `BaseClient` used to send the request.
/// * `target` - The dataverse the role applies to.
/// * `assignment` - Who gets which role.
pub fn assign_role(
    client: &BaseClient,
    target: &impl Provenance,
    assignment: &RoleAssignment,
) -> Result<Handle<Assignment>> {
    let address = target.address().assignments()?;
    client.post(&address, RequestType::json(assignment)?, None)
}
