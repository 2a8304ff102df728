//! Type classification.
//!
//! Unwraps a [`TypeRef`] one layer at a time into a [`Shape`]. Shapes
//! produced here still reference type definitions by declaration name; the
//! builder resolves them to arena ids once registration is complete.

use std::collections::{HashMap, HashSet};

use apimodel_declaration::{
    Annotations, DeclKind, DeclarationSource, Primitive, TypeRef, names,
};
use apimodel_foundation::{Error, ErrorKind, Result};
use apimodel_model::Shape;

use crate::config::BuildConfig;

/// An unresolved shape: references are declaration names.
pub type NamedShape = Shape<String>;

/// The two types a converter binds to its base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterBinding {
    /// The type values are written as.
    pub value: TypeRef,
    /// The type the converter accepts at use sites.
    pub bound: TypeRef,
}

/// Classifies declared types into shapes.
///
/// Results are memoized per type reference, so repeated unwrapping of
/// recursive or widely shared types costs one lookup.
pub struct TypeClassifier<'s> {
    source: &'s dyn DeclarationSource,
    converter_base: String,
    tolerate_raw_collections: bool,
    cache: HashMap<TypeRef, NamedShape>,
    bindings: HashMap<String, ConverterBinding>,
    in_progress: HashSet<TypeRef>,
}

impl<'s> TypeClassifier<'s> {
    /// Creates a classifier over a declaration source.
    #[must_use]
    pub fn new(source: &'s dyn DeclarationSource, config: &BuildConfig) -> Self {
        Self {
            source,
            converter_base: config.converter_base.clone(),
            tolerate_raw_collections: config.tolerate_raw_collections,
            cache: HashMap::new(),
            bindings: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Returns the number of memoized classifications.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Classifies a type reference.
    ///
    /// Declared types with no declaration in the source classify as
    /// [`Shape::Unresolved`]; validation reports them.
    ///
    /// # Errors
    ///
    /// Returns a structural error for `void`, for raw collections when they
    /// are not tolerated, and for broken converters.
    pub fn classify(&mut self, ty: &TypeRef) -> Result<NamedShape> {
        if let Some(shape) = self.cache.get(ty) {
            tracing::trace!("classification cache hit for {ty}");
            return Ok(shape.clone());
        }
        if !self.in_progress.insert(ty.clone()) {
            return Err(Error::unclassifiable(
                &ty.to_string(),
                "adapted through a cycle of converters",
            ));
        }
        let result = self.classify_uncached(ty);
        self.in_progress.remove(ty);
        let shape = result?;
        self.cache.insert(ty.clone(), shape.clone());
        Ok(shape)
    }

    fn classify_uncached(&mut self, ty: &TypeRef) -> Result<NamedShape> {
        match ty {
            TypeRef::Primitive(p) => Ok(Shape::Value(*p)),
            TypeRef::Void => Err(Error::unclassifiable("void", "void has no shape")),
            TypeRef::Variable(_) => Ok(Shape::Any),
            TypeRef::Array(component) if **component == TypeRef::Primitive(Primitive::Byte) => {
                Ok(Shape::Value(Primitive::Binary))
            }
            TypeRef::Array(component) => Ok(self.classify(component)?.array()),
            TypeRef::Collection(Some(item)) => Ok(self.classify(item)?.collection()),
            TypeRef::Collection(None) => {
                self.raw("collection")?;
                Ok(Shape::Any.collection())
            }
            TypeRef::Map(Some((k, v))) => Ok(Shape::MapOf(
                Box::new(self.classify(k)?),
                Box::new(self.classify(v)?),
            )),
            TypeRef::Map(None) => {
                self.raw("map")?;
                Ok(Shape::MapOf(Box::new(Shape::Any), Box::new(Shape::Any)))
            }
            TypeRef::Declared { name, .. } => self.classify_declared(name),
        }
    }

    fn raw(&self, what: &str) -> Result<()> {
        if self.tolerate_raw_collections {
            Ok(())
        } else {
            Err(Error::unclassifiable(what, "written without type arguments"))
        }
    }

    fn classify_declared(&mut self, name: &str) -> Result<NamedShape> {
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            return Ok(Shape::Unresolved(name.to_string()));
        };
        if let Some(converter) = decl
            .annotation(names::CONVERTER)
            .and_then(|a| a.type_ref("type"))
        {
            let converter = converter.declared_name().ok_or_else(|| {
                Error::unclassifiable(name, format!("converter {converter} is not a declared type"))
            })?;
            return self.adapt(converter);
        }
        Ok(match decl.kind {
            DeclKind::Enum => Shape::EnumRef(name.to_string()),
            DeclKind::Class | DeclKind::Interface => Shape::Reference(name.to_string()),
        })
    }

    /// Classifies a use site that may carry a member-level converter.
    ///
    /// When the use site is a collection or array whose component is the
    /// converter's bound type, the component is adapted and the container
    /// kept.
    ///
    /// # Errors
    ///
    /// Propagates classification and converter errors.
    pub fn classify_use(&mut self, ty: &TypeRef, annotations: &Annotations) -> Result<NamedShape> {
        let Some(converter) = annotations
            .get(names::CONVERTER)
            .and_then(|a| a.type_ref("type"))
        else {
            return self.classify(ty);
        };
        let converter = converter.declared_name().ok_or_else(|| {
            Error::unclassifiable(&ty.to_string(), format!("converter {converter} is not a declared type"))
        })?;
        let binding = self.converter_binding(converter)?;
        let adapted = self.adapt(converter)?;

        match ty {
            TypeRef::Collection(Some(item)) if same_type(item, &binding.bound) => {
                Ok(adapted.collection())
            }
            TypeRef::Array(item) if same_type(item, &binding.bound) => Ok(adapted.array()),
            _ => Ok(adapted),
        }
    }

    fn adapt(&mut self, converter: &str) -> Result<NamedShape> {
        let binding = self.converter_binding(converter)?;
        Ok(self.classify(&binding.value)?.adapted(converter))
    }

    /// Finds the value and bound types a converter binds to its base.
    ///
    /// Walks the converter's supertype chain, substituting type parameters
    /// at each step, so a converter that inherits its binding from a
    /// generic ancestor resolves to the concrete types.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotAConverter`] if the base type is not in the
    /// ancestry and [`ErrorKind::ConverterArity`] if the binding does not
    /// carry two type arguments.
    pub fn converter_binding(&mut self, converter: &str) -> Result<ConverterBinding> {
        if let Some(binding) = self.bindings.get(converter) {
            return Ok(binding.clone());
        }

        let source = self.source;
        let mut current = TypeRef::named(converter);
        let mut seen = HashSet::new();
        let binding = loop {
            let TypeRef::Declared { name, args } = &current else {
                return Err(Error::not_a_converter(converter));
            };
            if *name == self.converter_base {
                if args.len() < 2 {
                    return Err(Error::new(ErrorKind::ConverterArity {
                        converter: converter.to_string(),
                        found: args.len(),
                    }));
                }
                break ConverterBinding {
                    value: args[0].clone(),
                    bound: args[1].clone(),
                };
            }
            if !seen.insert(name.clone()) {
                return Err(Error::not_a_converter(converter));
            }
            let decl = source
                .declaration(name)
                .ok_or_else(|| Error::not_a_converter(converter))?;
            let bindings = decl.bindings(args);
            let supertype = decl
                .supertype
                .as_ref()
                .ok_or_else(|| Error::not_a_converter(converter))?;
            current = supertype.substitute(&bindings);
        };

        tracing::trace!(
            "converter {converter} binds {} to {}",
            binding.bound,
            binding.value
        );
        self.bindings.insert(converter.to_string(), binding.clone());
        Ok(binding)
    }
}

/// Compares two use-site types by declaration, ignoring type arguments.
fn same_type(a: &TypeRef, b: &TypeRef) -> bool {
    match (a.declared_name(), b.declared_name()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}
