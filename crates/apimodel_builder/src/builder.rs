//! Two-pass model construction.
//!
//! The registration pass walks outward from the roots and allocates one
//! arena slot per reachable data type, keyed by declaration name. Nothing
//! is resolved yet; a declaration is enqueued once and registered once, so
//! self-referential and mutually referential types terminate.
//!
//! The resolution pass fills every slot in arena order. By then every
//! reachable name has an id, so members can point forward, backward or at
//! their own type without special cases.

#![allow(clippy::too_many_lines)]

mod services;

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use apimodel_declaration::{
    AnnotationValue, Annotations, DeclKind, Declaration, DeclarationSource, FormDefault,
    MemberDecl, Primitive, TypeRef, names,
};
use apimodel_foundation::{
    Diagnostic, Error, ErrorContext, ErrorKind, NodeRef, QName, Result, decapitalize,
};
use apimodel_model::{
    Cardinality, ComplexType, EndpointInterface, EnumType, EnumValue, Facet, Fault, FaultId,
    Identity, Member, MemberKind, Model, ModelParts, NamespaceRegistry, PathTemplate,
    RootElementDeclaration, Shape, SimpleType, TypeDefinition, TypeId, TypeKind,
};

use crate::classify::{NamedShape, TypeClassifier};
use crate::config::BuildConfig;
use crate::roots::RootSet;

/// Builds a model from a root set.
///
/// Returns the model together with the diagnostics found while building it
/// (name collisions, missing root declarations). Rule-based validation is a
/// separate step.
///
/// # Errors
///
/// Returns the first structural error. No partial model is produced.
pub fn build(
    source: &dyn DeclarationSource,
    roots: &RootSet,
    config: &BuildConfig,
) -> Result<(Model, Vec<Diagnostic>)> {
    let mut builder = ModelBuilder::new(source, config);
    builder.register(roots)?;
    builder.resolve()
}

/// A data type registered but not yet resolved.
struct Placeholder<'s> {
    id: TypeId,
    decl: &'s Declaration,
    qname: QName,
    enum_type: Option<EnumType>,
}

/// A resource class with the full path it was reached at.
struct ResourceSite<'s> {
    decl: &'s Declaration,
    path: PathTemplate,
    parent: Option<String>,
}

/// Owns the state of one build.
///
/// Nothing here outlives the build, so repeated builds in one process
/// share no state.
pub struct ModelBuilder<'s> {
    source: &'s dyn DeclarationSource,
    config: &'s BuildConfig,
    classifier: TypeClassifier<'s>,
    registry: NamespaceRegistry,
    diagnostics: Vec<Diagnostic>,

    placeholders: Vec<Placeholder<'s>>,
    type_ids: HashMap<String, TypeId>,
    skipped: HashSet<String>,
    skip_reasons: BTreeMap<String, String>,
    queue: VecDeque<String>,
    referrers: HashMap<String, String>,
    missing: HashSet<String>,

    endpoints: Vec<&'s Declaration>,
    resource_sites: Vec<ResourceSite<'s>>,
    reached_faults: HashSet<String>,
    faults: Vec<Fault>,
    fault_index: HashMap<(String, String), FaultId>,
}

impl<'s> ModelBuilder<'s> {
    /// Creates a builder over a declaration source.
    #[must_use]
    pub fn new(source: &'s dyn DeclarationSource, config: &'s BuildConfig) -> Self {
        let registry = NamespaceRegistry::new()
            .with_prefix_stem(config.prefix_stem.clone())
            .with_known_prefixes(
                config
                    .known_prefixes
                    .iter()
                    .map(|(ns, prefix)| (ns.clone(), prefix.clone())),
            );
        Self {
            source,
            config,
            classifier: TypeClassifier::new(source, config),
            registry,
            diagnostics: Vec::new(),
            placeholders: Vec::new(),
            type_ids: HashMap::new(),
            skipped: HashSet::new(),
            skip_reasons: BTreeMap::new(),
            queue: VecDeque::new(),
            referrers: HashMap::new(),
            missing: HashSet::new(),
            endpoints: Vec::new(),
            resource_sites: Vec::new(),
            reached_faults: HashSet::new(),
            faults: Vec::new(),
            fault_index: HashMap::new(),
        }
    }

    /// Returns the number of data types registered so far.
    #[must_use]
    pub fn registered(&self) -> usize {
        self.placeholders.len()
    }

    // =========================================================================
    // Registration pass
    // =========================================================================

    /// Registers everything reachable from the roots.
    ///
    /// # Errors
    ///
    /// Returns a structural error for declarations that cannot be
    /// classified, enums with conflicting values and annotated interfaces.
    pub fn register(&mut self, roots: &RootSet) -> Result<()> {
        for name in &roots.types {
            if self.source.declaration(name).is_none() {
                self.report_missing(NodeRef::Type(name.clone()), name);
            }
            self.enqueue(name, None);
        }
        for name in &roots.registries {
            self.register_registry(name)?;
        }
        for name in &roots.endpoint_interfaces {
            self.register_endpoint(name)?;
        }
        for name in &roots.resources {
            self.register_resource(name, &PathTemplate::default(), None)?;
        }
        while let Some(name) = self.queue.pop_front() {
            self.register_type(&name)?;
        }
        tracing::debug!(
            "registered {} types from {} roots",
            self.placeholders.len(),
            roots.len()
        );
        Ok(())
    }

    fn enqueue(&mut self, name: &str, referrer: Option<&str>) {
        if self.type_ids.contains_key(name) || self.skipped.contains(name) {
            return;
        }
        if let Some(referrer) = referrer.filter(|r| *r != name) {
            self.referrers
                .entry(name.to_string())
                .or_insert_with(|| referrer.to_string());
        }
        self.queue.push_back(name.to_string());
    }

    fn skip(&mut self, name: &str, reason: &str) {
        self.skipped.insert(name.to_string());
        self.skip_reasons.insert(name.to_string(), reason.to_string());
    }

    fn enqueue_shape(&mut self, shape: &NamedShape, referrer: &str) {
        let mut refs = Vec::new();
        shape.collect_refs(&mut refs);
        for name in refs {
            self.enqueue(name, Some(referrer));
        }
    }

    /// Classifies a use site and enqueues every type it mentions.
    fn reach(
        &mut self,
        ty: &TypeRef,
        annotations: &Annotations,
        site: &str,
        member: Option<&str>,
    ) -> Result<()> {
        let shape = self.shape_of(ty, annotations, site, member)?;
        self.enqueue_shape(&shape, site);
        for also in see_also(annotations) {
            let shape = self.shape_of(also, &Annotations::new(), site, member)?;
            self.enqueue_shape(&shape, site);
        }
        Ok(())
    }

    fn register_type(&mut self, name: &str) -> Result<()> {
        if self.type_ids.contains_key(name) || self.skipped.contains(name) {
            return Ok(());
        }
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            self.skipped.insert(name.to_string());
            return Ok(());
        };

        if decl.kind == DeclKind::Interface {
            if decl.has(names::TYPE) {
                let error = Error::new(ErrorKind::AnnotatedInterface(name.to_string()));
                return Err(self.locate(error, name, None));
            }
            tracing::trace!("interface {name} is not a data type");
            self.skip(name, "an unannotated interface");
            return Ok(());
        }
        if decl.has(names::TRANSIENT) {
            tracing::trace!("{name} is transient");
            self.skip(name, "transient");
            return Ok(());
        }

        // A type-level converter replaces the declaration at every use.
        let own = self.shape_of(&TypeRef::named(name), &Annotations::new(), name, None)?;
        if matches!(own, Shape::AdaptedVia { .. }) {
            self.skipped.insert(name.to_string());
            self.enqueue_shape(&own, name);
            return Ok(());
        }

        let enum_type = if decl.kind == DeclKind::Enum {
            Some(enum_type(decl).map_err(|e| self.locate(e, name, None))?)
        } else {
            None
        };

        let namespace = NamespaceRegistry::assign_namespace(decl, source);
        let local = decl
            .annotation(names::TYPE)
            .and_then(|a| a.str("name"))
            .map_or_else(|| decapitalize(decl.simple_name()), ToString::to_string);
        self.registry.add_package(&namespace, decl.package());
        if let Some(package) = source.package(decl.package()) {
            for (ns, prefix) in &package.prefixes {
                if let Err(diagnostic) = self.registry.add_prefix(ns, prefix, name) {
                    self.diagnostics.push(diagnostic);
                }
            }
        }

        let id = self.next_type_id()?;
        let qname = QName::new(namespace, local);
        tracing::debug!("registered type {name} as {qname} ({id})");
        self.type_ids.insert(name.to_string(), id);
        self.placeholders.push(Placeholder {
            id,
            decl,
            qname,
            enum_type,
        });

        if decl.kind != DeclKind::Enum {
            let (fields, base) = self.fields_of(decl);
            if let Some(base) = base {
                self.reach(base, &Annotations::new(), name, None)?;
            }
            for field in fields {
                self.reach(&field.ty, &field.annotations, name, Some(&field.name))?;
            }
            if let Some(union) = decl.annotation(names::UNION) {
                for ty in union.types("types") {
                    self.reach(ty, &Annotations::new(), name, None)?;
                }
            }
        }
        for ty in see_also(&decl.annotations) {
            self.reach(ty, &Annotations::new(), name, None)?;
        }
        Ok(())
    }

    fn next_type_id(&self) -> Result<TypeId> {
        u32::try_from(self.placeholders.len())
            .map(TypeId)
            .map_err(|_| Error::new(ErrorKind::Internal("type arena overflow".to_string())))
    }

    /// Returns the fields that become members of `decl`, and its base type.
    ///
    /// Transient ancestors contribute their fields to the subclass and are
    /// skipped as a base; the base is the first non-transient ancestor.
    fn fields_of(&self, decl: &'s Declaration) -> (Vec<&'s MemberDecl>, Option<&'s TypeRef>) {
        let source = self.source;
        let mut chain = vec![decl];
        let mut seen = HashSet::from([decl.name.as_str()]);
        let mut base = decl.supertype.as_ref();

        while let Some(supertype) = base {
            let Some(parent) = supertype
                .declared_name()
                .and_then(|n| source.declaration(n))
            else {
                break;
            };
            if !parent.has(names::TRANSIENT) || !seen.insert(parent.name.as_str()) {
                break;
            }
            chain.push(parent);
            base = parent.supertype.as_ref();
        }

        let fields = chain
            .into_iter()
            .rev()
            .flat_map(|d| d.fields.iter())
            .filter(|f| !f.is_static && !f.has(names::TRANSIENT))
            .collect();
        (fields, base)
    }

    // =========================================================================
    // Resolution pass
    // =========================================================================

    /// Resolves every registered node and assembles the model.
    ///
    /// # Errors
    ///
    /// Returns a structural error for members with contradictory
    /// annotations or broken converters.
    pub fn resolve(mut self) -> Result<(Model, Vec<Diagnostic>)> {
        let placeholders = std::mem::take(&mut self.placeholders);

        let mut types = Vec::with_capacity(placeholders.len());
        for placeholder in &placeholders {
            types.push(self.resolve_type(placeholder)?);
        }
        for definition in &types {
            if let Err(diagnostic) = self.registry.register_type(definition) {
                self.diagnostics.push(diagnostic);
            }
        }
        let root_elements = self.root_elements(&placeholders);

        let endpoints = self.endpoints.clone();
        let mut endpoint_interfaces = Vec::with_capacity(endpoints.len());
        for decl in endpoints {
            endpoint_interfaces.push(self.resolve_endpoint(decl)?);
        }

        let sites = std::mem::take(&mut self.resource_sites);
        let mut resources = Vec::with_capacity(sites.len());
        for site in &sites {
            resources.push(self.resolve_resource(site)?);
        }

        self.add_imports(&types, &root_elements, &endpoint_interfaces);
        self.registry.assign_prefixes();

        let model = Model::from(ModelParts {
            types,
            schemas: self.registry.into_schemas(),
            root_elements,
            endpoint_interfaces,
            resources,
            faults: self.faults,
            skipped: self.skip_reasons,
        });
        let (complex, simple, enums) = model.kind_counts();
        tracing::debug!(
            "built model: {complex} complex, {simple} simple, {enums} enum types in {} schemas",
            model.schemas().len()
        );
        Ok((model, self.diagnostics))
    }

    fn resolve_type(&mut self, placeholder: &Placeholder<'s>) -> Result<TypeDefinition> {
        let decl = placeholder.decl;
        let kind = if let Some(enum_type) = &placeholder.enum_type {
            TypeKind::Enum(enum_type.clone())
        } else {
            let (fields, base) = self.fields_of(decl);
            let mut members = Vec::with_capacity(fields.len());
            for field in fields {
                members.push(self.member(decl, &placeholder.qname.namespace, field)?);
            }
            let base = base
                .and_then(TypeRef::declared_name)
                .and_then(|n| self.type_ids.get(n).copied());
            let substitutes = see_also(&decl.annotations)
                .into_iter()
                .filter_map(TypeRef::declared_name)
                .filter_map(|n| self.type_ids.get(n).copied())
                .filter(|id| *id != placeholder.id)
                .collect();
            self.narrow(
                decl,
                ComplexType {
                    members,
                    base,
                    substitutes,
                },
            )?
        };
        Ok(TypeDefinition {
            id: placeholder.id,
            qname: placeholder.qname.clone(),
            declaration: decl.name.clone(),
            doc: decl.doc.clone(),
            kind,
        })
    }

    /// Turns a text-only complex type into a simple type.
    fn narrow(&mut self, decl: &Declaration, mut complex: ComplexType) -> Result<TypeKind> {
        let only_value = complex.base.is_none()
            && complex.members.len() == 1
            && complex.members[0].is_value()
            && complex.members[0].identity == Identity::None;

        if let Some(union) = decl.annotation(names::UNION) {
            if !only_value {
                return Err(self.locate(
                    Error::unclassifiable(&decl.name, "a union must have a value member only"),
                    &decl.name,
                    None,
                ));
            }
            let mut members = Vec::new();
            for ty in union.types("types") {
                let shape = self.shape_of(ty, &Annotations::new(), &decl.name, None)?;
                members.push(self.resolve_shape(&shape));
            }
            return Ok(TypeKind::Simple(SimpleType::Union { members }));
        }

        if !only_value || !is_text(complex.members[0].shape.item()) {
            return Ok(TypeKind::Complex(complex));
        }
        let Some(value) = complex.members.pop() else {
            return Ok(TypeKind::Complex(complex));
        };
        if value.shape.is_repeated() {
            return Ok(TypeKind::Simple(SimpleType::List {
                item: value.shape.item().clone(),
            }));
        }
        Ok(TypeKind::Simple(SimpleType::Restriction {
            base: value.shape,
            facets: facets(decl),
        }))
    }

    /// Builds one member of `owner` from a field.
    fn member(
        &mut self,
        owner: &'s Declaration,
        namespace: &str,
        field: &'s MemberDecl,
    ) -> Result<Member> {
        let site = format!("{}.{}", owner.name, field.name);
        let categories: Vec<&str> = [names::ELEMENT, names::ATTRIBUTE, names::VALUE]
            .into_iter()
            .filter(|n| field.has(n))
            .collect();
        if categories.len() > 1 {
            let error = Error::contradictory_annotations(&site, &categories);
            return Err(self.locate(error, &owner.name, Some(&field.name)));
        }
        if field.has(names::ID) && field.has(names::IDREF) {
            let error = Error::contradictory_annotations(&site, &[names::ID, names::IDREF]);
            return Err(self.locate(error, &owner.name, Some(&field.name)));
        }
        if field.has(names::ELEMENT_WRAPPER) {
            if let Some(other) = [names::ATTRIBUTE, names::VALUE]
                .into_iter()
                .find(|n| field.has(n))
            {
                let error =
                    Error::contradictory_annotations(&site, &[other, names::ELEMENT_WRAPPER]);
                return Err(self.locate(error, &owner.name, Some(&field.name)));
            }
        }

        let named = self.shape_of(&field.ty, &field.annotations, &owner.name, Some(&field.name))?;
        let shape = self.resolve_shape(&named);

        let package = self.source.package(owner.package());
        let element_form = package.map_or(FormDefault::Unset, |p| p.element_form);
        let attribute_form = package.map_or(FormDefault::Unset, |p| p.attribute_form);
        let qualified = |form: FormDefault| {
            if form == FormDefault::Qualified {
                namespace.to_string()
            } else {
                String::new()
            }
        };

        let mut member = if let Some(a) = field.annotations.get(names::ATTRIBUTE) {
            let ns = a
                .str("namespace")
                .map_or_else(|| qualified(attribute_form), ToString::to_string);
            let local = a.str("name").unwrap_or(&field.name);
            Member::new(
                &field.name,
                QName::new(ns, local),
                MemberKind::Attribute {
                    required: a.flag("required"),
                },
                shape,
            )
        } else if field.has(names::VALUE) {
            Member::value(&field.name, shape)
        } else {
            let a = field.annotations.get(names::ELEMENT);
            let ns = a
                .and_then(|a| a.str("namespace"))
                .map_or_else(|| qualified(element_form), ToString::to_string);
            let local = a.and_then(|a| a.str("name")).unwrap_or(&field.name);
            let required = a.and_then(|a| a.bool("required")).unwrap_or_else(|| {
                matches!(shape, Shape::Value(p) if p.is_value_type())
            });
            let cardinality = if a.is_some_and(|a| a.flag("nillable")) {
                Cardinality::Nillable
            } else if required {
                Cardinality::Required
            } else {
                Cardinality::Optional
            };
            let mut element = Member::element(&field.name, QName::new(ns.clone(), local), shape)
                .with_cardinality(cardinality);
            if let Some(w) = field.annotations.get(names::ELEMENT_WRAPPER) {
                let wrapper = QName::new(
                    w.str("namespace").map_or(ns, ToString::to_string),
                    w.str("name").unwrap_or(&field.name),
                );
                element = element.with_wrapper(wrapper);
            }
            element
        };

        if field.has(names::ID) {
            member = member.with_identity(Identity::Id);
        } else if field.has(names::IDREF) {
            member = member.with_identity(Identity::IdRef);
        }
        member.doc.clone_from(&field.doc);
        Ok(member)
    }

    fn root_elements(&mut self, placeholders: &[Placeholder<'s>]) -> Vec<RootElementDeclaration> {
        let mut roots = Vec::new();
        for placeholder in placeholders {
            let Some(annotation) = placeholder.decl.annotation(names::ROOT_ELEMENT) else {
                continue;
            };
            let namespace = annotation
                .str("namespace")
                .map_or_else(|| placeholder.qname.namespace.clone(), ToString::to_string);
            let local = annotation.str("name").map_or_else(
                || decapitalize(placeholder.decl.simple_name()),
                ToString::to_string,
            );
            let root = RootElementDeclaration {
                qname: QName::new(namespace, local),
                type_id: placeholder.id,
                declaration: placeholder.decl.name.clone(),
            };
            match self.registry.register_root_element(roots.len(), &root) {
                Ok(()) => {
                    tracing::debug!(
                        "registered root element {} for {}",
                        root.qname,
                        root.declaration
                    );
                    roots.push(root);
                }
                Err(diagnostic) => self.diagnostics.push(diagnostic),
            }
        }
        roots
    }

    /// Records cross-namespace references as schema imports.
    fn add_imports(
        &mut self,
        types: &[TypeDefinition],
        roots: &[RootElementDeclaration],
        endpoints: &[EndpointInterface],
    ) {
        let namespace_of = |id: TypeId| types.get(id.index()).map(|t| t.namespace().to_string());

        for definition in types {
            let mut refs = Vec::new();
            match &definition.kind {
                TypeKind::Complex(complex) => {
                    for member in &complex.members {
                        shape_refs(&member.shape, &mut refs);
                        if !member.qname.namespace.is_empty() {
                            self.registry
                                .add_import(definition.namespace(), &member.qname.namespace);
                        }
                    }
                    refs.extend(complex.base);
                    refs.extend(complex.substitutes.iter().copied());
                }
                TypeKind::Simple(SimpleType::Restriction { base, .. }) => {
                    shape_refs(base, &mut refs);
                }
                TypeKind::Simple(SimpleType::List { item }) => shape_refs(item, &mut refs),
                TypeKind::Simple(SimpleType::Union { members }) => {
                    for shape in members {
                        shape_refs(shape, &mut refs);
                    }
                }
                TypeKind::Enum(_) => {}
            }
            for id in refs {
                if let Some(ns) = namespace_of(id) {
                    self.registry.add_import(definition.namespace(), &ns);
                }
            }
        }

        for root in roots {
            if let Some(ns) = namespace_of(root.type_id) {
                self.registry.add_import(root.namespace(), &ns);
            }
        }

        for endpoint in endpoints {
            let mut refs = Vec::new();
            for operation in &endpoint.operations {
                for param in &operation.params {
                    shape_refs(&param.shape, &mut refs);
                }
                if let Some(result) = &operation.result {
                    shape_refs(&result.shape, &mut refs);
                }
            }
            for id in refs {
                if let Some(ns) = namespace_of(id) {
                    self.registry.add_import(&endpoint.namespace, &ns);
                }
            }
        }
    }

    // =========================================================================
    // Shared helpers
    // =========================================================================

    fn shape_of(
        &mut self,
        ty: &TypeRef,
        annotations: &Annotations,
        site: &str,
        member: Option<&str>,
    ) -> Result<NamedShape> {
        self.classifier
            .classify_use(ty, annotations)
            .map_err(|e| self.locate(e, site, member))
    }

    /// Replaces declaration names with arena ids.
    ///
    /// Names that were never registered stay as [`Shape::Unresolved`].
    fn resolve_shape(&self, shape: &NamedShape) -> Shape {
        shape.map_refs(&mut |name: &String| {
            self.type_ids.get(name).copied().ok_or_else(|| name.clone())
        })
    }

    /// Attaches the chain of declarations through which `site` was reached.
    fn locate(&self, error: Error, site: &str, member: Option<&str>) -> Error {
        if error.context.is_some() {
            return error;
        }
        let mut context = ErrorContext::new()
            .with_member(member.map_or_else(|| site.to_string(), |m| format!("{site}.{m}")));
        let mut seen = HashSet::new();
        let mut current = self.referrers.get(site);
        while let Some(frame) = current {
            if !seen.insert(frame) {
                break;
            }
            context = context.with_frame(frame.clone());
            current = self.referrers.get(frame);
        }
        error.with_context(context)
    }

    /// Reports a root or fault declaration the source does not have, once.
    fn report_missing(&mut self, node: NodeRef, name: &str) {
        if self.missing.insert(name.to_string()) {
            tracing::warn!("{name} is not available in the declaration source");
            self.diagnostics.push(
                Diagnostic::error(node, format!("no declaration for {name}"))
                    .with_rule("unresolved-reference"),
            );
        }
    }
}

// =============================================================================
// Free helpers
// =============================================================================

fn see_also(annotations: &Annotations) -> Vec<&TypeRef> {
    annotations
        .get(names::SEE_ALSO)
        .map(|a| a.types("types"))
        .unwrap_or_default()
}

fn shape_refs(shape: &Shape, out: &mut Vec<TypeId>) {
    let mut refs = Vec::new();
    shape.collect_refs(&mut refs);
    out.extend(refs.into_iter().copied());
}

fn is_text(shape: &Shape) -> bool {
    match shape {
        Shape::Value(_) | Shape::EnumRef(_) => true,
        Shape::AdaptedVia { target, .. } => is_text(target),
        _ => false,
    }
}

fn facets(decl: &Declaration) -> Vec<Facet> {
    decl.annotation(names::FACETS)
        .map(|a| {
            a.values
                .iter()
                .map(|(name, value)| Facet::new(name, annotation_text(value)))
                .collect()
        })
        .unwrap_or_default()
}

fn annotation_text(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Str(s) => s.clone(),
        AnnotationValue::Bool(b) => b.to_string(),
        AnnotationValue::Int(n) => n.to_string(),
        AnnotationValue::Type(t) => t.to_string(),
        AnnotationValue::List(items) => items
            .iter()
            .map(annotation_text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Builds an enum type, rejecting a second fallback or a repeated value.
fn enum_type(decl: &Declaration) -> Result<EnumType> {
    let base = match decl.annotation(names::ENUM).and_then(|a| a.type_ref("base")) {
        Some(TypeRef::Primitive(p)) => *p,
        _ => Primitive::String,
    };
    let mut values = Vec::with_capacity(decl.constants.len());
    let mut fallback: Option<&str> = None;
    let mut tokens = HashSet::new();

    for constant in &decl.constants {
        let external = constant
            .annotations
            .get(names::ENUM_VALUE)
            .and_then(|a| a.value("value"))
            .map(annotation_text);
        let is_fallback = constant.annotations.has(names::UNKNOWN_ENUM_VALUE);
        if is_fallback {
            if let Some(first) = fallback {
                return Err(Error::duplicate_fallback(&decl.name, first, &constant.name));
            }
            fallback = Some(&constant.name);
        } else {
            let token = external.clone().unwrap_or_else(|| constant.name.clone());
            if tokens.contains(&token) {
                return Err(Error::duplicate_enum_value(&decl.name, &token));
            }
            tokens.insert(token);
        }

        let mut value = EnumValue::new(&constant.name);
        value.external = external;
        value.fallback = is_fallback;
        value.doc.clone_from(&constant.doc);
        values.push(value);
    }
    Ok(EnumType { base, values })
}
