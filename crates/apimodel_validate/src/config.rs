//! Validation configuration.

use std::collections::BTreeSet;

use apimodel_foundation::Severity;

/// Configuration for one validation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Severity of empty-namespace findings.
    pub empty_namespace: Severity,

    /// Names of rules that do not run.
    pub disabled: BTreeSet<String>,

    /// Whether an identity reference to untyped content is reported as a
    /// warning (true) or silently accepted (false).
    pub warn_untyped_idref: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            empty_namespace: Severity::Error,
            disabled: BTreeSet::new(),
            warn_untyped_idref: true,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration that only warns about empty namespaces.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            empty_namespace: Severity::Warning,
            ..Self::default()
        }
    }

    /// Sets the severity of empty-namespace findings.
    #[must_use]
    pub fn with_empty_namespace(mut self, severity: Severity) -> Self {
        self.empty_namespace = severity;
        self
    }

    /// Disables a rule by name.
    #[must_use]
    pub fn with_disabled(mut self, rule: impl Into<String>) -> Self {
        self.disabled.insert(rule.into());
        self
    }

    /// Sets whether identity references to untyped content are reported.
    #[must_use]
    pub fn with_untyped_idref_warning(mut self, warn: bool) -> Self {
        self.warn_untyped_idref = warn;
        self
    }

    /// Returns true unless the rule has been disabled.
    #[must_use]
    pub fn is_enabled(&self, rule: &str) -> bool {
        !self.disabled.contains(rule)
    }
}
