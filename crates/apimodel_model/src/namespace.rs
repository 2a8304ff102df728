//! Namespace assignment and per-namespace schema grouping.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use apimodel_declaration::{Declaration, DeclarationSource, names};
use apimodel_foundation::{Diagnostic, NodeRef, QName};

use crate::schema::{RootElementDeclaration, SchemaInfo};
use crate::shape::TypeId;
use crate::types::TypeDefinition;

/// Groups published names by namespace and hands out prefixes.
///
/// A registry is owned by one build. Schemas are kept in first-seen order,
/// which is what makes prefix assignment stable across runs over the same
/// input.
#[derive(Clone, Debug)]
pub struct NamespaceRegistry {
    schemas: Vec<SchemaInfo>,
    index: HashMap<String, usize>,
    known_prefixes: BTreeMap<String, String>,
    refused_prefixes: HashSet<(String, String)>,
    types: HashMap<QName, (TypeId, String)>,
    root_elements: HashMap<QName, String>,
    prefix_stem: String,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceRegistry {
    /// Creates an empty registry generating `ns0`, `ns1`, ... prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: Vec::new(),
            index: HashMap::new(),
            known_prefixes: BTreeMap::new(),
            refused_prefixes: HashSet::new(),
            types: HashMap::new(),
            root_elements: HashMap::new(),
            prefix_stem: "ns".to_string(),
        }
    }

    /// Sets the stem of generated prefixes.
    #[must_use]
    pub fn with_prefix_stem(mut self, stem: impl Into<String>) -> Self {
        self.prefix_stem = stem.into();
        self
    }

    /// Preloads well-known prefixes (namespace, prefix).
    #[must_use]
    pub fn with_known_prefixes<I, N, P>(mut self, known: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        for (namespace, prefix) in known {
            self.known_prefixes.insert(namespace.into(), prefix.into());
        }
        self
    }

    // =========================================================================
    // Namespace assignment
    // =========================================================================

    /// Returns the namespace of a data type declaration.
    ///
    /// An explicit namespace on the type annotation wins, then the owning
    /// package's namespace, then the empty string.
    #[must_use]
    pub fn assign_namespace(declaration: &Declaration, source: &dyn DeclarationSource) -> String {
        let explicit = declaration
            .annotation(names::TYPE)
            .and_then(|a| a.str("namespace"));
        Self::resolve_namespace(explicit, declaration.package(), source)
    }

    /// Resolves a namespace from an explicit override and a package.
    #[must_use]
    pub fn resolve_namespace(
        explicit: Option<&str>,
        package: &str,
        source: &dyn DeclarationSource,
    ) -> String {
        if let Some(ns) = explicit {
            return ns.to_string();
        }
        source
            .package(package)
            .and_then(|p| p.namespace.clone())
            .unwrap_or_default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Returns the schema for a namespace, creating it on first use.
    pub fn schema_mut(&mut self, namespace: &str) -> &mut SchemaInfo {
        let index = if let Some(&i) = self.index.get(namespace) {
            i
        } else {
            let i = self.schemas.len();
            self.schemas.push(SchemaInfo::new(namespace));
            self.index.insert(namespace.to_string(), i);
            i
        };
        &mut self.schemas[index]
    }

    /// Adds a type to its namespace's schema.
    ///
    /// # Errors
    ///
    /// Returns an error diagnostic naming both types if another type already
    /// uses the same qualified name; the new type is not added.
    pub fn register_type(&mut self, definition: &TypeDefinition) -> Result<(), Diagnostic> {
        if let Some((_, existing)) = self.types.get(&definition.qname) {
            tracing::warn!(
                "type name {} of {} is already used by {existing}",
                definition.qname,
                definition.declaration
            );
            return Err(Diagnostic::error(
                NodeRef::Type(definition.declaration.clone()),
                format!(
                    "type name {} is already used by {existing}",
                    definition.qname
                ),
            )
            .with_related(NodeRef::Type(existing.clone()))
            .with_rule("unique-type-names"));
        }
        self.types.insert(
            definition.qname.clone(),
            (definition.id, definition.declaration.clone()),
        );
        self.schema_mut(definition.namespace()).types.push(definition.id);
        Ok(())
    }

    /// Adds a root element (stored at `index` in the model) to its schema.
    ///
    /// # Errors
    ///
    /// Returns an error diagnostic if the element name is already taken.
    pub fn register_root_element(
        &mut self,
        index: usize,
        root: &RootElementDeclaration,
    ) -> Result<(), Diagnostic> {
        if let Some(existing) = self.root_elements.get(&root.qname) {
            return Err(Diagnostic::error(
                NodeRef::RootElement(root.qname.clone()),
                format!(
                    "root element {} of {} is already declared by {existing}",
                    root.qname, root.declaration
                ),
            )
            .with_related(NodeRef::Type(existing.clone()))
            .with_rule("unique-root-element-names"));
        }
        self.root_elements
            .insert(root.qname.clone(), root.declaration.clone());
        self.schema_mut(root.namespace()).root_elements.push(index);
        Ok(())
    }

    /// Returns the type registered under a qualified name.
    #[must_use]
    pub fn lookup(&self, qname: &QName) -> Option<TypeId> {
        self.types.get(qname).map(|(id, _)| *id)
    }

    /// Records that a package contributes to a namespace.
    pub fn add_package(&mut self, namespace: &str, package: &str) {
        self.schema_mut(namespace)
            .packages
            .insert(package.to_string());
    }

    /// Records a prefix declared by the package of `declaration`.
    ///
    /// The first mapping for a namespace wins. A prefix already bound to
    /// another namespace is refused, and the namespace falls back to a
    /// generated prefix.
    ///
    /// # Errors
    ///
    /// Returns a warning diagnostic the first time a prefix is refused for a
    /// namespace.
    pub fn add_prefix(
        &mut self,
        namespace: &str,
        prefix: &str,
        declaration: &str,
    ) -> Result<(), Diagnostic> {
        if self.known_prefixes.contains_key(namespace) {
            return Ok(());
        }
        let holder = self
            .known_prefixes
            .iter()
            .find(|(_, p)| p.as_str() == prefix)
            .map(|(ns, _)| ns.clone());
        let Some(holder) = holder else {
            self.known_prefixes
                .insert(namespace.to_string(), prefix.to_string());
            return Ok(());
        };
        if !self
            .refused_prefixes
            .insert((namespace.to_string(), prefix.to_string()))
        {
            return Ok(());
        }
        tracing::warn!("prefix {prefix} for {namespace} is already bound to {holder}");
        Err(Diagnostic::warning(
            NodeRef::Type(declaration.to_string()),
            format!(
                "prefix {prefix} declared for {namespace} is already bound to {holder}; \
                 {namespace} gets a generated prefix"
            ),
        )
        .with_rule("unique-prefixes"))
    }

    /// Records that `from` references `to`.
    pub fn add_import(&mut self, from: &str, to: &str) {
        if from != to {
            self.schema_mut(from).imports.insert(to.to_string());
        }
    }

    // =========================================================================
    // Prefixes
    // =========================================================================

    /// Assigns a prefix to every schema.
    ///
    /// Known prefixes are used as-is; other namespaces get generated ones in
    /// first-seen order, skipping any prefix already taken. The empty
    /// namespace gets the empty prefix.
    pub fn assign_prefixes(&mut self) {
        let mut taken: BTreeSet<String> = self.known_prefixes.values().cloned().collect();
        let mut next = 0usize;

        for schema in &mut self.schemas {
            if schema.namespace.is_empty() {
                schema.prefix = String::new();
                continue;
            }
            if let Some(prefix) = self.known_prefixes.get(&schema.namespace) {
                schema.prefix = prefix.clone();
                continue;
            }
            let prefix = loop {
                let candidate = format!("{}{next}", self.prefix_stem);
                next += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(prefix.clone());
            schema.prefix = prefix;
        }
    }

    /// Returns the prefix for a namespace, known or assigned.
    #[must_use]
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.index
            .get(namespace)
            .map(|&i| self.schemas[i].prefix.as_str())
            .filter(|p| !p.is_empty() || namespace.is_empty())
            .or_else(|| self.known_prefixes.get(namespace).map(String::as_str))
    }

    /// Returns the schemas, in first-seen order.
    #[must_use]
    pub fn schemas(&self) -> &[SchemaInfo] {
        &self.schemas
    }

    /// Consumes the registry, returning its schemas.
    #[must_use]
    pub fn into_schemas(self) -> Vec<SchemaInfo> {
        self.schemas
    }
}
