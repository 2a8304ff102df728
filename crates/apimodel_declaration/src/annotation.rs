//! Declaration metadata.
//!
//! Metadata is queried by name and returns an optional structured value.
//! There is no reflection: the adapter fills [`Annotations`] once and the
//! builder only asks "does this declaration carry X, and with which values".

use std::collections::BTreeMap;

use crate::types::TypeRef;

/// Well-known annotation names understood by the model builder.
pub mod names {
    /// Publishes a type; attributes `name`, `namespace`.
    pub const TYPE: &str = "type";
    /// Declares a published top-level element; attributes `name`, `namespace`.
    pub const ROOT_ELEMENT: &str = "root-element";
    /// Element member; attributes `name`, `namespace`, `required`, `nillable`.
    pub const ELEMENT: &str = "element";
    /// Wrapper around a repeated element; attributes `name`, `namespace`.
    pub const ELEMENT_WRAPPER: &str = "element-wrapper";
    /// Attribute member; attributes `name`, `namespace`, `required`.
    pub const ATTRIBUTE: &str = "attribute";
    /// Text content member.
    pub const VALUE: &str = "value";
    /// Identity key member.
    pub const ID: &str = "id";
    /// Identity reference member.
    pub const IDREF: &str = "idref";
    /// External converter; attribute `type`.
    pub const CONVERTER: &str = "converter";
    /// Additional subtypes to consider; attribute `types`.
    pub const SEE_ALSO: &str = "see-also";
    /// Excludes a type or member from the model.
    pub const TRANSIENT: &str = "transient";
    /// External representation of an enum constant; attribute `value`.
    pub const ENUM_VALUE: &str = "enum-value";
    /// Marks the enum constant used for unrecognized external tokens.
    pub const UNKNOWN_ENUM_VALUE: &str = "unknown-enum-value";
    /// Enumeration value type; attribute `base` (a primitive type).
    pub const ENUM: &str = "enum";
    /// Restriction facets; each attribute is one facet.
    pub const FACETS: &str = "facets";
    /// Declares a simple type as a union; attribute `types`.
    pub const UNION: &str = "union";
    /// Marks a factory class whose methods publish types.
    pub const REGISTRY: &str = "registry";

    /// Endpoint interface; attributes `name`, `namespace`.
    pub const WEB_SERVICE: &str = "web-service";
    /// Operation; attributes `operation-name`, `exclude`.
    pub const WEB_METHOD: &str = "web-method";
    /// One-way operation.
    pub const ONE_WAY: &str = "one-way";
    /// Parameter style; attribute `style` = `wrapped` | `bare`.
    pub const BINDING: &str = "binding";
    /// Operation parameter; attributes `name`, `mode`, `header`.
    pub const WEB_PARAM: &str = "web-param";
    /// Operation result; attributes `name`, `header`.
    pub const WEB_RESULT: &str = "web-result";
    /// Request wrapper override; attributes `class-name`, `local-name`, `namespace`.
    pub const REQUEST_WRAPPER: &str = "request-wrapper";
    /// Response wrapper override; attributes `class-name`, `local-name`, `namespace`.
    pub const RESPONSE_WRAPPER: &str = "response-wrapper";
    /// Fault; attributes `name`, `namespace`, `fault-bean`, `info`.
    pub const WEB_FAULT: &str = "web-fault";

    /// URI path template; attribute `value`.
    pub const PATH: &str = "path";
    /// HTTP method of a resource method; attribute `value`.
    pub const HTTP_METHOD: &str = "http-method";
    /// Path parameter; attribute `value`.
    pub const PATH_PARAM: &str = "path-param";
    /// Query parameter; attribute `value`.
    pub const QUERY_PARAM: &str = "query-param";
    /// Header parameter; attribute `value`.
    pub const HEADER_PARAM: &str = "header-param";
    /// Form parameter; attribute `value`.
    pub const FORM_PARAM: &str = "form-param";
    /// Cookie parameter; attribute `value`.
    pub const COOKIE_PARAM: &str = "cookie-param";
    /// Matrix parameter; attribute `value`.
    pub const MATRIX_PARAM: &str = "matrix-param";
    /// Accepted media types; attribute `value` (list).
    pub const CONSUMES: &str = "consumes";
    /// Produced media types; attribute `value` (list).
    pub const PRODUCES: &str = "produces";
}

/// A structured annotation attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationValue {
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Type value.
    Type(TypeRef),
    /// List of values.
    List(Vec<AnnotationValue>),
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AnnotationValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<TypeRef> for AnnotationValue {
    fn from(t: TypeRef) -> Self {
        Self::Type(t)
    }
}

impl<T: Into<AnnotationValue>> From<Vec<T>> for AnnotationValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// One annotation: a name plus named attribute values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation name.
    pub name: String,
    /// Attribute values by name.
    pub values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    /// Creates an annotation with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Sets an attribute value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns a raw attribute value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    /// Returns a non-empty string attribute.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AnnotationValue::Str(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Returns a boolean attribute.
    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(AnnotationValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns a boolean attribute, `false` when absent.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.bool(key).unwrap_or(false)
    }

    /// Returns a type attribute.
    #[must_use]
    pub fn type_ref(&self, key: &str) -> Option<&TypeRef> {
        match self.values.get(key) {
            Some(AnnotationValue::Type(t)) => Some(t),
            _ => None,
        }
    }

    /// Returns every type named by an attribute (single value or list).
    #[must_use]
    pub fn types(&self, key: &str) -> Vec<&TypeRef> {
        match self.values.get(key) {
            Some(AnnotationValue::Type(t)) => vec![t],
            Some(AnnotationValue::List(items)) => items
                .iter()
                .filter_map(|v| match v {
                    AnnotationValue::Type(t) => Some(t),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns every string named by an attribute (single value or list).
    #[must_use]
    pub fn strings(&self, key: &str) -> Vec<&str> {
        match self.values.get(key) {
            Some(AnnotationValue::Str(s)) => vec![s.as_str()],
            Some(AnnotationValue::List(items)) => items
                .iter()
                .filter_map(|v| match v {
                    AnnotationValue::Str(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Appends every type mentioned in any attribute.
    pub fn collect_types<'a>(&'a self, out: &mut Vec<&'a TypeRef>) {
        fn walk<'a>(value: &'a AnnotationValue, out: &mut Vec<&'a TypeRef>) {
            match value {
                AnnotationValue::Type(t) => out.push(t),
                AnnotationValue::List(items) => items.iter().for_each(|v| walk(v, out)),
                _ => {}
            }
        }
        for value in self.values.values() {
            walk(value, out);
        }
    }
}

/// The annotations carried by one declaration, member, method or parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotations {
    items: Vec<Annotation>,
}

impl Annotations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation, replacing one of the same name.
    pub fn insert(&mut self, annotation: Annotation) {
        if let Some(existing) = self.items.iter_mut().find(|a| a.name == annotation.name) {
            *existing = annotation;
        } else {
            self.items.push(annotation);
        }
    }

    /// Returns the annotation with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.items.iter().find(|a| a.name == name)
    }

    /// Returns true if an annotation with the given name is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over all annotations.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    /// Returns true if there are no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        let mut set = Self::new();
        for a in iter {
            set.insert(a);
        }
        set
    }
}
