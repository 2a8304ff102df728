//! Declaration lookup.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::declaration::{Declaration, PackageDecl};
use crate::types::TypeRef;

/// Supplies declarations and package metadata by qualified name.
///
/// Implementations may read source trees or pre-built artifacts; the core
/// only ever calls these synchronous lookups. A source is not required to
/// be safe for concurrent builds, so callers serialize `build` invocations.
pub trait DeclarationSource {
    /// Returns the declaration with the given qualified name.
    fn declaration(&self, name: &str) -> Option<&Declaration>;

    /// Returns package metadata for the given package name.
    fn package(&self, name: &str) -> Option<&PackageDecl>;

    /// Returns every declaration structurally reachable from the roots.
    ///
    /// Follows supertypes, interfaces, field types, method signatures and
    /// types named in annotations. Each declaration appears once, in
    /// breadth-first discovery order; names with no declaration are skipped.
    fn declarations_reachable_from(&self, roots: &[&str]) -> Vec<&Declaration> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = roots.iter().map(ToString::to_string).collect();
        let mut found = Vec::new();

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            let Some(decl) = self.declaration(&name) else {
                tracing::trace!("no declaration for {name}; skipping");
                continue;
            };
            found.push(decl);

            let mut names = Vec::new();
            for ty in referenced_types(decl) {
                ty.collect_names(&mut names);
            }
            queue.extend(names.into_iter().filter(|n| !seen.contains(n)));
        }

        found
    }
}

/// Every type reference that appears anywhere in a declaration.
fn referenced_types(decl: &Declaration) -> Vec<&TypeRef> {
    let mut types: Vec<&TypeRef> = Vec::new();
    types.extend(decl.supertype.iter());
    types.extend(decl.interfaces.iter());
    for a in decl.annotations.iter() {
        a.collect_types(&mut types);
    }
    for field in &decl.fields {
        types.push(&field.ty);
        for a in field.annotations.iter() {
            a.collect_types(&mut types);
        }
    }
    for method in &decl.methods {
        types.push(&method.returns);
        types.extend(method.throws.iter());
        for a in method.annotations.iter() {
            a.collect_types(&mut types);
        }
        for p in &method.params {
            types.push(&p.ty);
            for a in p.annotations.iter() {
                a.collect_types(&mut types);
            }
        }
    }
    types
}

/// An in-memory declaration source.
#[derive(Clone, Debug, Default)]
pub struct DeclarationSet {
    declarations: BTreeMap<String, Declaration>,
    packages: BTreeMap<String, PackageDecl>,
}

impl DeclarationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, returning any previous one with the same name.
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        self.declarations
            .insert(declaration.name.clone(), declaration)
    }

    /// Adds package metadata, returning any previous entry.
    pub fn insert_package(&mut self, package: PackageDecl) -> Option<PackageDecl> {
        self.packages.insert(package.name.clone(), package)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, declaration: Declaration) -> Self {
        self.insert(declaration);
        self
    }

    /// Builder form of [`insert_package`](Self::insert_package).
    #[must_use]
    pub fn with_package(mut self, package: PackageDecl) -> Self {
        self.insert_package(package);
        self
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over declarations in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }
}

impl DeclarationSource for DeclarationSet {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    fn package(&self, name: &str) -> Option<&PackageDecl> {
        self.packages.get(name)
    }
}
