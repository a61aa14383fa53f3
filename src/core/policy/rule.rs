//! Policy rules: subject, resource key pattern, action regex

use crate::error::{AuthError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Version segment also accepted in front of every resource pattern
pub const VERSION_PREFIX: &str = "/v1";

/// Resource key pattern
///
/// A pattern containing `*` matches every resource that starts with the text
/// before the first `*`; anything after that star is ignored. A pattern
/// without `*` matches only the identical string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePattern {
    pattern: String,
    versioned: String,
}

impl ResourcePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let versioned = format!("{}{}", VERSION_PREFIX, pattern);
        ResourcePattern { pattern, versioned }
    }

    /// Match `resource` against the pattern, then against its `/v1` form
    ///
    /// # Examples
    /// ```
    /// use gatehouse::policy::ResourcePattern;
    ///
    /// let p = ResourcePattern::new("/bytes/*");
    /// assert!(p.matches("/bytes/abc"));
    /// assert!(p.matches("/v1/bytes/abc"));
    /// assert!(!p.matches("/bytes"));
    /// ```
    pub fn matches(&self, resource: &str) -> bool {
        key_match(resource, &self.pattern) || key_match(resource, &self.versioned)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// Prefix-up-to-first-star matching
fn key_match(resource: &str, pattern: &str) -> bool {
    match pattern.find('*') {
        Some(star) => resource.as_bytes().starts_with(&pattern.as_bytes()[..star]),
        None => resource == pattern,
    }
}

/// Action pattern, a regex searched anywhere in the request method
#[derive(Debug, Clone)]
pub struct ActionPattern {
    regex: Regex,
}

impl ActionPattern {
    /// # Errors
    ///
    /// Returns `Internal` if the pattern is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| AuthError::Internal(format!("invalid action pattern '{}': {}", pattern, e)))?;
        Ok(ActionPattern { regex })
    }

    pub fn matches(&self, action: &str) -> bool {
        self.regex.is_match(action)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for ActionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ActionPattern {}

/// One allow rule of the policy table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub subject: String,
    pub resource: ResourcePattern,
    pub action: ActionPattern,
}

impl Rule {
    pub fn new(subject: impl Into<String>, resource: impl Into<String>, action: &str) -> Result<Self> {
        Ok(Rule {
            subject: subject.into(),
            resource: ResourcePattern::new(resource),
            action: ActionPattern::new(action)?,
        })
    }

    /// Check resource and action; the subject is checked by the engine
    pub fn applies_to(&self, resource: &str, action: &str) -> bool {
        self.resource.matches(resource) && self.action.matches(action)
    }
}

/// Serializable form of a rule, as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub subject: String,
    pub resource: String,
    pub action: String,
}

impl RuleSpec {
    pub fn new(
        subject: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        RuleSpec {
            subject: subject.into(),
            resource: resource.into(),
            action: action.into(),
        }
    }
}

impl TryFrom<&RuleSpec> for Rule {
    type Error = AuthError;

    fn try_from(spec: &RuleSpec) -> Result<Self> {
        Rule::new(spec.subject.clone(), spec.resource.clone(), &spec.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_resource() {
        let p = ResourcePattern::new("/bytes");
        assert!(p.matches("/bytes"));
        assert!(p.matches("/v1/bytes"));
        assert!(!p.matches("/bytes/"));
        assert!(!p.matches("/bytesx"));
    }

    #[test]
    fn test_wildcard_is_prefix() {
        let p = ResourcePattern::new("/bytes/*");
        assert!(p.matches("/bytes/"));
        assert!(p.matches("/bytes/abc/def"));
        assert!(!p.matches("/bytes"));
        assert!(!p.matches("/chunks/abc"));
    }

    #[test]
    fn test_only_first_star_counts() {
        // "/bzz/*/*" behaves like "/bzz/*"
        let p = ResourcePattern::new("/bzz/*/*");
        assert!(p.matches("/bzz/ref"));
        assert!(p.matches("/bzz/ref/path/to/file"));
    }

    #[test]
    fn test_query_wildcard() {
        let p = ResourcePattern::new("/tags?*");
        assert!(p.matches("/tags?offset=1"));
        assert!(!p.matches("/tags"));
    }

    #[test]
    fn test_action_alternation() {
        let a = ActionPattern::new("(GET)|(DELETE)").unwrap();
        assert!(a.matches("GET"));
        assert!(a.matches("DELETE"));
        assert!(!a.matches("POST"));
    }

    #[test]
    fn test_action_is_unanchored() {
        let a = ActionPattern::new("GET").unwrap();
        assert!(a.matches("XGETX"));
        assert!(!a.matches("get"));
    }

    #[test]
    fn test_invalid_action_rejected() {
        assert!(matches!(ActionPattern::new("(GET"), Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_rule_from_spec() {
        let rule = Rule::try_from(&RuleSpec::new("creator", "/bzz", "POST")).unwrap();
        assert_eq!(rule.subject, "creator");
        assert!(rule.applies_to("/bzz", "POST"));
        assert!(!rule.applies_to("/bzz", "GET"));
    }
}
