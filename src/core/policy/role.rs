//! Roles and the inheritance graph between them

use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Built-in roles in increasing privilege order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access to stored content
    Consumer,
    /// Upload and manage content
    Creator,
    /// Move funds
    Accountant,
    /// Full node operation
    Maintainer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Consumer, Role::Creator, Role::Accountant, Role::Maintainer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "consumer",
            Role::Creator => "creator",
            Role::Accountant => "accountant",
            Role::Maintainer => "maintainer",
        }
    }

    /// The role this one directly inherits from
    pub fn parent(&self) -> Option<Role> {
        match self {
            Role::Consumer => None,
            Role::Creator => Some(Role::Consumer),
            Role::Accountant => Some(Role::Creator),
            Role::Maintainer => Some(Role::Accountant),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// Directed inheritance graph over role names
///
/// An edge `child → parent` grants the child every permission of the parent,
/// transitively. The full ancestor set of each role is computed once at
/// construction so lookups never walk the graph.
#[derive(Debug, Clone)]
pub struct RoleHierarchy {
    /// role → itself plus every role it inherits from
    closure: HashMap<String, HashSet<String>>,
}

impl RoleHierarchy {
    /// Build a hierarchy from role names and `(child, parent)` edges
    ///
    /// # Errors
    ///
    /// Returns `Internal` if an edge names an undeclared role or the graph
    /// contains a cycle.
    pub fn new<R, E, S>(roles: R, edges: E) -> Result<Self>
    where
        R: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for role in roles {
            parents.entry(role.into()).or_default();
        }

        for (child, parent) in edges {
            let (child, parent) = (child.into(), parent.into());
            if !parents.contains_key(&parent) {
                return Err(AuthError::Internal(format!(
                    "role hierarchy references unknown role '{}'",
                    parent
                )));
            }
            match parents.get_mut(&child) {
                Some(p) => p.push(parent),
                None => {
                    return Err(AuthError::Internal(format!(
                        "role hierarchy references unknown role '{}'",
                        child
                    )))
                }
            }
        }

        check_acyclic(&parents)?;

        let closure = parents
            .keys()
            .map(|role| (role.clone(), ancestors(role, &parents)))
            .collect();

        Ok(RoleHierarchy { closure })
    }

    /// The built-in chain `maintainer → accountant → creator → consumer`
    pub fn builtin() -> Self {
        let mut closure = HashMap::new();
        for role in Role::ALL {
            let mut set = HashSet::new();
            let mut cur = Some(role);
            while let Some(r) = cur {
                set.insert(r.as_str().to_string());
                cur = r.parent();
            }
            closure.insert(role.as_str().to_string(), set);
        }
        RoleHierarchy { closure }
    }

    /// Whether `role` is a declared role
    pub fn contains(&self, role: &str) -> bool {
        self.closure.contains_key(role)
    }

    /// Whether `role` is `subject` or inherits from it
    ///
    /// Unknown roles satisfy nothing.
    pub fn satisfies(&self, role: &str, subject: &str) -> bool {
        self.closure
            .get(role)
            .map(|set| set.contains(subject))
            .unwrap_or(false)
    }

    /// Declared role names, sorted
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.closure.keys().map(String::as_str).collect();
        roles.sort_unstable();
        roles
    }
}

/// Depth-first search with three colours; a grey node reached again is a cycle
fn check_acyclic(parents: &HashMap<String, Vec<String>>) -> Result<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Grey,
        Black,
    }

    fn visit<'a>(
        node: &'a str,
        parents: &'a HashMap<String, Vec<String>>,
        marks: &mut HashMap<&'a str, Mark>,
    ) -> Result<()> {
        match marks.get(node) {
            Some(Mark::Black) => return Ok(()),
            Some(Mark::Grey) => {
                return Err(AuthError::Internal(format!(
                    "role hierarchy contains a cycle through '{}'",
                    node
                )))
            }
            None => {}
        }
        marks.insert(node, Mark::Grey);
        for parent in parents.get(node).into_iter().flatten() {
            visit(parent, parents, marks)?;
        }
        marks.insert(node, Mark::Black);
        Ok(())
    }

    let mut marks = HashMap::new();
    for node in parents.keys() {
        visit(node, parents, &mut marks)?;
    }
    Ok(())
}

fn ancestors(role: &str, parents: &HashMap<String, Vec<String>>) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut stack = vec![role.to_string()];
    while let Some(r) = stack.pop() {
        if seen.insert(r.clone()) {
            stack.extend(parents.get(&r).into_iter().flatten().cloned());
        }
    }
    seen
}
