//! Declarations: classes, interfaces, enumerations and their members.

use std::collections::BTreeMap;

use crate::annotation::{Annotation, Annotations};
use crate::types::TypeRef;

/// Kind of a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// A concrete or abstract class.
    Class,
    /// An interface.
    Interface,
    /// An enumeration.
    Enum,
}

/// A type declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    /// Qualified name (`package.Simple`).
    pub name: String,
    /// Declaration kind.
    pub kind: DeclKind,
    /// Documentation text.
    pub doc: Option<String>,
    /// Type-level annotations.
    pub annotations: Annotations,
    /// Direct supertype, if any.
    pub supertype: Option<TypeRef>,
    /// Implemented interfaces.
    pub interfaces: Vec<TypeRef>,
    /// Type parameter names, in order.
    pub type_params: Vec<String>,
    /// Fields, in declaration order.
    pub fields: Vec<MemberDecl>,
    /// Methods, in declaration order.
    pub methods: Vec<MethodDecl>,
    /// Enum constants, in declaration order.
    pub constants: Vec<EnumConstant>,
}

impl Declaration {
    /// Creates a declaration of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            doc: None,
            annotations: Annotations::new(),
            supertype: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Creates a class declaration.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Class)
    }

    /// Creates an interface declaration.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Interface)
    }

    /// Creates an enumeration declaration.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Enum)
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Sets the supertype.
    #[must_use]
    pub fn extends(mut self, supertype: TypeRef) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Adds a type parameter.
    #[must_use]
    pub fn with_type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, field: MemberDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds an enum constant.
    #[must_use]
    pub fn with_constant(mut self, constant: EnumConstant) -> Self {
        self.constants.push(constant);
        self
    }

    /// Returns the simple (unqualified) name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// Returns the owning package name.
    #[must_use]
    pub fn package(&self) -> &str {
        package_of(&self.name)
    }

    /// Returns the annotation with the given name.
    #[must_use]
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.get(name)
    }

    /// Returns true if the declaration carries the named annotation.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.annotations.has(name)
    }

    /// Binds this declaration's type parameters to the given arguments.
    ///
    /// Missing arguments leave the variable unbound.
    #[must_use]
    pub fn bindings(&self, args: &[TypeRef]) -> Vec<(String, TypeRef)> {
        self.type_params
            .iter()
            .zip(args)
            .map(|(p, a)| (p.clone(), a.clone()))
            .collect()
    }
}

/// Returns the part of a qualified name after the last `.`.
#[must_use]
pub fn simple_name_of(qualified: &str) -> &str {
    qualified.rsplit_once('.').map_or(qualified, |(_, s)| s)
}

/// Returns the part of a qualified name before the last `.`.
#[must_use]
pub fn package_of(qualified: &str) -> &str {
    qualified.rsplit_once('.').map_or("", |(p, _)| p)
}

/// A field of a declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDecl {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Field annotations.
    pub annotations: Annotations,
    /// Documentation text.
    pub doc: Option<String>,
    /// Static fields never become members.
    pub is_static: bool,
}

impl MemberDecl {
    /// Creates an instance field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Annotations::new(),
            doc: None,
            is_static: false,
        }
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Marks the field static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Returns true if the field carries the named annotation.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.annotations.has(name)
    }
}

/// A method of a declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    /// Method name.
    pub name: String,
    /// Parameters, in order.
    pub params: Vec<ParamDecl>,
    /// Return type.
    pub returns: TypeRef,
    /// Declared thrown types.
    pub throws: Vec<TypeRef>,
    /// Method annotations.
    pub annotations: Annotations,
    /// Documentation text.
    pub doc: Option<String>,
}

impl MethodDecl {
    /// Creates a method with no parameters returning `returns`.
    #[must_use]
    pub fn new(name: impl Into<String>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns,
            throws: Vec::new(),
            annotations: Annotations::new(),
            doc: None,
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a thrown type.
    #[must_use]
    pub fn throws(mut self, ty: TypeRef) -> Self {
        self.throws.push(ty);
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Returns true if the method carries the named annotation.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.annotations.has(name)
    }
}

/// A method parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Parameter annotations.
    pub annotations: Annotations,
}

impl ParamDecl {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Annotations::new(),
        }
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }
}

/// An enumeration constant.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumConstant {
    /// Constant name.
    pub name: String,
    /// Constant annotations.
    pub annotations: Annotations,
    /// Documentation text.
    pub doc: Option<String>,
}

impl EnumConstant {
    /// Creates a constant.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
            doc: None,
        }
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }
}

/// Whether local names in a package default to the schema namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormDefault {
    /// Not declared.
    #[default]
    Unset,
    /// Local names are qualified with the type's namespace.
    Qualified,
    /// Local names are in the empty namespace.
    Unqualified,
}

/// Package-level metadata.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PackageDecl {
    /// Package name.
    pub name: String,
    /// Namespace declared for every type in the package.
    pub namespace: Option<String>,
    /// Element form default.
    pub element_form: FormDefault,
    /// Attribute form default.
    pub attribute_form: FormDefault,
    /// Explicit prefix mappings (namespace to prefix).
    pub prefixes: BTreeMap<String, String>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl PackageDecl {
    /// Creates a package with no metadata.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the package namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the element form default.
    #[must_use]
    pub fn with_element_form(mut self, form: FormDefault) -> Self {
        self.element_form = form;
        self
    }

    /// Sets the attribute form default.
    #[must_use]
    pub fn with_attribute_form(mut self, form: FormDefault) -> Self {
        self.attribute_form = form;
        self
    }

    /// Adds an explicit prefix mapping.
    #[must_use]
    pub fn with_prefix(mut self, namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.prefixes.insert(namespace.into(), prefix.into());
        self
    }
}
