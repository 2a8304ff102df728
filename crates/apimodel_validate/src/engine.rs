//! The validation engine.
//!
//! The engine owns an ordered rule list. A run walks the model once to list
//! its nodes, then hands every rule each node of the kind it checks. Rules
//! return diagnostics as values, so one rule's findings never stop another
//! rule from running.

use std::fmt;

use apimodel_foundation::{Diagnostic, NodeRef};
use apimodel_model::{
    EndpointInterface, Fault, Model, Operation, Resource, ResourceMethod, RootElementDeclaration,
    TypeDefinition,
};

use crate::claims::ClaimedNames;
use crate::config::ValidationConfig;
use crate::rule::{Rule, default_rules};

// =============================================================================
// Nodes
// =============================================================================

/// The kinds of model node a rule can check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A type definition.
    Type,
    /// A root element declaration.
    RootElement,
    /// An endpoint interface.
    EndpointInterface,
    /// An operation, with its interface.
    Operation,
    /// A fault.
    Fault,
    /// A resource.
    Resource,
    /// A resource method, with its resource.
    ResourceMethod,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Type => "type",
            Self::RootElement => "root element",
            Self::EndpointInterface => "endpoint interface",
            Self::Operation => "operation",
            Self::Fault => "fault",
            Self::Resource => "resource",
            Self::ResourceMethod => "resource method",
        };
        write!(f, "{s}")
    }
}

/// A borrowed model node.
#[derive(Clone, Copy, Debug)]
pub enum Node<'m> {
    /// A type definition.
    Type(&'m TypeDefinition),
    /// A root element declaration.
    RootElement(&'m RootElementDeclaration),
    /// An endpoint interface.
    EndpointInterface(&'m EndpointInterface),
    /// An operation and the interface that declares it.
    Operation(&'m EndpointInterface, &'m Operation),
    /// A fault.
    Fault(&'m Fault),
    /// A resource.
    Resource(&'m Resource),
    /// A resource method and the resource that declares it.
    ResourceMethod(&'m Resource, &'m ResourceMethod),
}

impl<'m> Node<'m> {
    /// Lists every node of a model, kind by kind.
    #[must_use]
    pub fn all(model: &'m Model) -> Vec<Self> {
        let mut nodes: Vec<Self> = model.type_definitions().iter().map(Node::Type).collect();
        nodes.extend(model.root_elements().iter().map(Node::RootElement));
        nodes.extend(
            model
                .endpoint_interfaces()
                .iter()
                .map(Node::EndpointInterface),
        );
        nodes.extend(model.operations().map(|(ei, op)| Node::Operation(ei, op)));
        nodes.extend(model.faults().iter().map(Node::Fault));
        nodes.extend(model.resources().iter().map(Node::Resource));
        nodes.extend(
            model
                .resource_methods()
                .map(|(r, m)| Node::ResourceMethod(r, m)),
        );
        nodes
    }

    /// Returns the node's kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Type(_) => NodeKind::Type,
            Self::RootElement(_) => NodeKind::RootElement,
            Self::EndpointInterface(_) => NodeKind::EndpointInterface,
            Self::Operation(..) => NodeKind::Operation,
            Self::Fault(_) => NodeKind::Fault,
            Self::Resource(_) => NodeKind::Resource,
            Self::ResourceMethod(..) => NodeKind::ResourceMethod,
        }
    }

    /// Returns the diagnostic reference for this node.
    #[must_use]
    pub fn node_ref(&self) -> NodeRef {
        match self {
            Self::Type(t) => NodeRef::Type(t.declaration.clone()),
            Self::RootElement(r) => NodeRef::RootElement(r.qname.clone()),
            Self::EndpointInterface(ei) => ei.node_ref(),
            Self::Operation(ei, op) => op.node_ref(ei),
            Self::Fault(f) => f.node_ref(),
            Self::Resource(r) => r.node_ref(),
            Self::ResourceMethod(r, m) => m.node_ref(r),
        }
    }
}

// =============================================================================
// Rule Context
// =============================================================================

/// What a rule can see besides the node it checks.
pub struct RuleContext<'a> {
    /// The model under validation.
    pub model: &'a Model,
    /// The run's configuration.
    pub config: &'a ValidationConfig,
    /// Synthetic class names claimed so far.
    pub claimed: &'a mut ClaimedNames,
}

// =============================================================================
// Engine
// =============================================================================

/// Runs an ordered list of rules over a model.
pub struct ValidationEngine {
    rules: Vec<Box<dyn Rule>>,
    config: ValidationConfig,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_default_rules(ValidationConfig::default())
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.rule_names())
            .field("config", &self.config)
            .finish()
    }
}

impl ValidationEngine {
    /// Creates an engine with no rules.
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Creates an engine running the default rule set.
    #[must_use]
    pub fn with_default_rules(config: ValidationConfig) -> Self {
        Self {
            rules: default_rules(),
            config,
        }
    }

    /// Appends a rule; it runs after every rule already present.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Returns the rule names, in run order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validates a model.
    ///
    /// Every enabled rule runs against every node of its kind, in rule order
    /// then model order. Diagnostics come back tagged with the rule that
    /// produced them.
    pub fn validate(&self, model: &Model, claimed: &mut ClaimedNames) -> Vec<Diagnostic> {
        let nodes = Node::all(model);
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if !self.config.is_enabled(rule.name()) {
                tracing::trace!(rule = rule.name(), "rule disabled");
                continue;
            }
            let before = diagnostics.len();
            let mut cx = RuleContext {
                model,
                config: &self.config,
                claimed: &mut *claimed,
            };
            for node in nodes.iter().filter(|n| n.kind() == rule.kind()) {
                diagnostics.extend(rule.check(*node, &mut cx).into_iter().map(|d| {
                    if d.rule.is_some() {
                        d
                    } else {
                        d.with_rule(rule.name())
                    }
                }));
            }
            tracing::debug!(
                rule = rule.name(),
                kind = %rule.kind(),
                count = diagnostics.len() - before,
                "ran validation rule"
            );
        }

        diagnostics
    }
}
