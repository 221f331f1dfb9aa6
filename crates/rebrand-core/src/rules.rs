use std::fmt;

use crate::RenameError;

/// A single literal substring substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub find: String,
    pub replace: String,
}

impl ReplacementRule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

impl fmt::Display for ReplacementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.find, self.replace)
    }
}

/// An ordered chain of replacement rules.
///
/// Rules apply sequentially: each rule rewrites the output of the previous
/// one, so applying `[(A,B), (B,C)]` to `"A"` yields `"C"`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    /// Validates and wraps an ordered rule list. An empty list and a rule
    /// with empty match text are both rejected before any traversal can
    /// start.
    pub fn new(rules: Vec<ReplacementRule>) -> Result<Self, RenameError> {
        if rules.is_empty() {
            return Err(RenameError::EmptyRuleSet);
        }
        if let Some(rule) = rules.iter().find(|rule| rule.find.is_empty()) {
            return Err(RenameError::EmptyMatchText {
                replacement: rule.replace.clone(),
            });
        }
        Ok(Self { rules })
    }

    pub fn apply(&self, input: &str) -> String {
        let mut output = input.to_string();
        for rule in &self.rules {
            output = output.replace(&rule.find, &rule.replace);
        }
        output
    }

    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }
}
