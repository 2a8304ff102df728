//! Service-side nodes: endpoint interfaces, operations, faults and resources.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use apimodel_foundation::{NodeRef, QName};

use crate::member::Member;
use crate::path::PathTemplate;
use crate::shape::Shape;

/// Index of a fault in the model's deduplicated fault table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaultId(pub u32);

impl FaultId {
    /// Returns the table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// RPC-style services
// =============================================================================

/// An RPC-style service contract.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EndpointInterface {
    /// Qualified name of the originating declaration.
    pub declaration: String,
    /// Published service name.
    pub name: String,
    /// Target namespace of the service's messages.
    pub namespace: String,
    /// Operations, in declaration order.
    pub operations: Vec<Operation>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl EndpointInterface {
    /// Returns the diagnostic reference for this interface.
    #[must_use]
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::EndpointInterface(self.declaration.clone())
    }
}

/// How operation parameters map onto messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParameterStyle {
    /// Parameters are children of a synthetic wrapper element.
    #[default]
    Wrapped,
    /// Each parameter is a message part of its own.
    Bare,
}

impl fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapped => write!(f, "wrapped"),
            Self::Bare => write!(f, "bare"),
        }
    }
}

/// Direction of an operation parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamMode {
    /// Sent with the request.
    #[default]
    In,
    /// Returned with the response.
    Out,
    /// Sent and returned.
    InOut,
}

impl ParamMode {
    /// Returns true if the parameter is part of the request.
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    /// Returns true if the parameter is part of the response.
    #[must_use]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

/// An operation parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// Published part name.
    pub name: String,
    /// Element name of the part.
    pub element: QName,
    /// Resolved shape.
    pub shape: Shape,
    /// Direction.
    pub mode: ParamMode,
    /// Whether the part travels in a message header.
    pub header: bool,
}

/// An operation's return value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperationResult {
    /// Published part name.
    pub name: String,
    /// Element name of the part.
    pub element: QName,
    /// Resolved shape.
    pub shape: Shape,
    /// Whether the part travels in a message header.
    pub header: bool,
}

/// A synthetic wrapper element and the class name generators emit for it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wrapper {
    /// Wrapper element name.
    pub element: QName,
    /// Synthetic class name.
    pub class_name: String,
}

/// A callable unit of an endpoint interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    /// Published operation name.
    pub name: String,
    /// Name of the declaring method.
    pub method: String,
    /// Parameter style.
    pub style: ParameterStyle,
    /// Whether the caller expects no response.
    pub one_way: bool,
    /// Parameters, in declaration order.
    pub params: Vec<Parameter>,
    /// Return value; `None` for void.
    pub result: Option<OperationResult>,
    /// Deduplicated faults, in declaration order.
    pub faults: Vec<FaultId>,
    /// Request wrapper (wrapped style only).
    pub request_wrapper: Option<Wrapper>,
    /// Response wrapper (wrapped style, two-way only).
    pub response_wrapper: Option<Wrapper>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Operation {
    /// Iterates over request parameters.
    pub fn inputs(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.mode.is_input())
    }

    /// Iterates over response parameters.
    pub fn outputs(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.mode.is_output())
    }

    /// Returns the diagnostic reference for this operation.
    #[must_use]
    pub fn node_ref(&self, interface: &EndpointInterface) -> NodeRef {
        NodeRef::Operation {
            interface: interface.declaration.clone(),
            operation: self.name.clone(),
        }
    }
}

/// What a fault carries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaultDetail {
    /// An explicitly declared fault-info type.
    Explicit(Shape),
    /// A synthetic bean built from the fault's own properties.
    Implicit(Vec<Member>),
}

/// A declared error condition of an operation or resource method.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fault {
    /// Table index.
    pub id: FaultId,
    /// Qualified name of the originating declaration.
    pub declaration: String,
    /// Published fault element name.
    pub element: QName,
    /// Synthetic bean class name; the deduplication key.
    pub bean_name: String,
    /// Fault payload.
    pub detail: FaultDetail,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Fault {
    /// Returns true when the fault carries a synthetic bean.
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        matches!(self.detail, FaultDetail::Implicit(_))
    }

    /// Returns the diagnostic reference for this fault.
    #[must_use]
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::Fault(self.declaration.clone())
    }
}

// =============================================================================
// URI-addressed resources
// =============================================================================

/// A URI-addressed resource class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resource {
    /// Qualified name of the originating declaration.
    pub declaration: String,
    /// Full path, including any parent locator's path.
    pub path: PathTemplate,
    /// Declaration of the resource whose locator leads here, if any.
    pub parent: Option<String>,
    /// Accepted media types.
    pub consumes: Vec<String>,
    /// Produced media types.
    pub produces: Vec<String>,
    /// Methods, in declaration order.
    pub methods: Vec<ResourceMethod>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Resource {
    /// Returns the diagnostic reference for this resource.
    #[must_use]
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::Resource(self.declaration.clone())
    }
}

/// Where a resource method parameter is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResourceParamKind {
    /// A path template variable.
    Path,
    /// A query string parameter.
    Query,
    /// A request header.
    Header,
    /// A form field.
    Form,
    /// A cookie.
    Cookie,
    /// A matrix parameter.
    Matrix,
    /// The request body.
    Entity,
}

impl fmt::Display for ResourceParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Form => "form",
            Self::Cookie => "cookie",
            Self::Matrix => "matrix",
            Self::Entity => "entity",
        };
        write!(f, "{s}")
    }
}

/// A resource method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceParameter {
    /// Published name (the declared parameter name for entities).
    pub name: String,
    /// Where the value comes from.
    pub kind: ResourceParamKind,
    /// Resolved shape.
    pub shape: Shape,
}

/// A callable unit of a resource, or a sub-resource locator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceMethod {
    /// Name of the declaring method.
    pub name: String,
    /// HTTP method; `None` for sub-resource locators.
    pub http_method: Option<String>,
    /// Method-level path relative to the resource, if any.
    pub subpath: Option<PathTemplate>,
    /// Full path: resource path joined with the subpath.
    pub path: PathTemplate,
    /// Parameters, in declaration order.
    pub params: Vec<ResourceParameter>,
    /// Response shape; `None` for void.
    pub response: Option<Shape>,
    /// Deduplicated faults, in declaration order.
    pub faults: Vec<FaultId>,
    /// Accepted media types (inherited from the resource when not declared).
    pub consumes: Vec<String>,
    /// Produced media types (inherited from the resource when not declared).
    pub produces: Vec<String>,
    /// Declaration of the sub-resource a locator returns.
    pub locates: Option<String>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl ResourceMethod {
    /// Returns true for sub-resource locators.
    #[must_use]
    pub const fn is_locator(&self) -> bool {
        self.locates.is_some()
    }

    /// Iterates over entity (request body) parameters.
    pub fn entities(&self) -> impl Iterator<Item = &ResourceParameter> {
        self.params
            .iter()
            .filter(|p| p.kind == ResourceParamKind::Entity)
    }

    /// Returns the diagnostic reference for this method.
    #[must_use]
    pub fn node_ref(&self, resource: &Resource) -> NodeRef {
        NodeRef::ResourceMethod {
            resource: resource.declaration.clone(),
            method: self.name.clone(),
        }
    }
}
