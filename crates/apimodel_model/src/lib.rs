//! The API model.
//!
//! This crate provides the read-only graph that every backend consumes:
//! - [`TypeDefinition`] - Complex, simple and enum data shapes in a [`TypeId`] arena
//! - [`Member`] - Elements, attributes and values of complex types
//! - [`Shape`] - The classified form of a declared type
//! - [`SchemaInfo`] - Per-namespace grouping with prefixes and imports
//! - [`EndpointInterface`], [`Operation`], [`Fault`] - RPC-style services
//! - [`Resource`], [`ResourceMethod`] - URI-addressed resources
//! - [`PathTemplate`] - Parsed URI templates
//! - [`NamespaceRegistry`] - Namespace assignment and collision detection
//! - [`Model`] - The assembled, immutable result

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod infoset;
pub mod member;
pub mod model;
pub mod namespace;
pub mod path;
pub mod schema;
pub mod service;
pub mod shape;
pub mod types;

pub use apimodel_declaration::Primitive;
pub use infoset::{CodecError, Event, Instance};
pub use member::{Cardinality, Identity, Member, MemberCategory, MemberKind, Occurs};
pub use model::{Model, ModelParts};
pub use namespace::NamespaceRegistry;
pub use path::{PathSegment, PathTemplate};
pub use schema::{RootElementDeclaration, SchemaInfo};
pub use service::{
    EndpointInterface, Fault, FaultDetail, FaultId, Operation, OperationResult, ParamMode,
    Parameter, ParameterStyle, Resource, ResourceMethod, ResourceParamKind, ResourceParameter,
    Wrapper,
};
pub use shape::{Shape, TypeId};
pub use types::{ComplexType, EnumType, EnumValue, Facet, SimpleType, TypeDefinition, TypeKind};
