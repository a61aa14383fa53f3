//! Immutable policy snapshot: role hierarchy plus rule table

use super::table::{ROLE_INHERITANCE, RULES};
use super::{Role, RoleHierarchy, Rule, RuleSpec};
use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};

/// Policy written as data, e.g. in the `[policy]` section of the config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    /// Declared role names
    pub roles: Vec<String>,

    /// `[child, parent]` pairs
    #[serde(default)]
    pub inherits: Vec<(String, String)>,

    pub rules: Vec<RuleSpec>,
}

impl PolicySpec {
    /// The built-in table as data
    pub fn builtin() -> Self {
        PolicySpec {
            roles: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            inherits: ROLE_INHERITANCE
                .iter()
                .map(|(c, p)| (c.to_string(), p.to_string()))
                .collect(),
            rules: RULES
                .iter()
                .map(|(s, r, a)| RuleSpec::new(*s, *r, *a))
                .collect(),
        }
    }
}

/// Validated, read-only policy
///
/// Built once before serving and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct PolicySet {
    hierarchy: RoleHierarchy,
    rules: Vec<Rule>,
}

impl PolicySet {
    /// Validate and compile a policy
    ///
    /// # Errors
    ///
    /// Returns `Internal` when the hierarchy is cyclic or names unknown
    /// roles, when a rule subject is not a declared role, or when an action
    /// pattern is not a valid regex.
    pub fn from_spec(spec: &PolicySpec) -> Result<Self> {
        let hierarchy = RoleHierarchy::new(
            spec.roles.iter().cloned(),
            spec.inherits.iter().cloned(),
        )?;

        let rules = spec
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule_spec)| {
                if !hierarchy.contains(&rule_spec.subject) {
                    return Err(AuthError::Internal(format!(
                        "rule {} references unknown role '{}'",
                        i, rule_spec.subject
                    )));
                }
                Rule::try_from(rule_spec)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PolicySet { hierarchy, rules })
    }

    /// The gateway's fixed policy
    pub fn builtin() -> Result<Self> {
        Self::from_spec(&PolicySpec::builtin())
    }

    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
