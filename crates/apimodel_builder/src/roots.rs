//! Build roots.

use apimodel_declaration::{DeclarationSource, names};

/// The declarations a build starts from.
///
/// Everything else in the model is reached from these.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootSet {
    /// Explicitly published data types.
    pub types: Vec<String>,
    /// Factory classes whose methods publish types.
    pub registries: Vec<String>,
    /// Endpoint interfaces.
    pub endpoint_interfaces: Vec<String>,
    /// Root resource classes.
    pub resources: Vec<String>,
}

impl RootSet {
    /// Creates an empty root set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a data type root.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.types.push(name.into());
        self
    }

    /// Adds a registry root.
    #[must_use]
    pub fn with_registry(mut self, name: impl Into<String>) -> Self {
        self.registries.push(name.into());
        self
    }

    /// Adds an endpoint interface root.
    #[must_use]
    pub fn with_endpoint_interface(mut self, name: impl Into<String>) -> Self {
        self.endpoint_interfaces.push(name.into());
        self
    }

    /// Adds a root resource.
    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>) -> Self {
        self.resources.push(name.into());
        self
    }

    /// Sorts the named declarations into roots by their annotations.
    ///
    /// Registries, endpoint interfaces and path-annotated resource classes
    /// go to their own lists; everything else, including names the source
    /// does not know, is treated as a data type.
    #[must_use]
    pub fn discover(source: &dyn DeclarationSource, candidates: &[&str]) -> Self {
        let mut roots = Self::new();
        for &name in candidates {
            let target = match source.declaration(name) {
                Some(d) if d.has(names::REGISTRY) => &mut roots.registries,
                Some(d) if d.has(names::WEB_SERVICE) => &mut roots.endpoint_interfaces,
                Some(d) if d.has(names::PATH) => &mut roots.resources,
                _ => &mut roots.types,
            };
            target.push(name.to_string());
        }
        roots
    }

    /// Returns the total number of roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
            + self.registries.len()
            + self.endpoint_interfaces.len()
            + self.resources.len()
    }

    /// Returns true if there are no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
