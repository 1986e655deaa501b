//! Per-request actor context

use super::RoleId;
use std::collections::BTreeSet;

/// The account making the current request, as supplied by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Host user identifier
    pub id: String,

    /// Roles held by the account
    pub roles: BTreeSet<RoleId>,
}

impl Actor {
    /// Create an actor from an id and any collection of role names
    pub fn new<I, R>(id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        Self { id: id.into(), roles: roles.into_iter().map(Into::into).collect() }
    }

    /// Check if the actor holds a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
