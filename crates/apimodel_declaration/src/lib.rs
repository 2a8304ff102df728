//! Declaration view for apimodel.
//!
//! The model builder never sees raw program source or compiled artifacts.
//! It consumes the abstract view defined here:
//! - [`TypeRef`] - A reference to a declared type as written at a use site
//! - [`Declaration`] - A class, interface or enumeration with its members
//! - [`Annotations`] - Metadata queried by name, returning structured values
//! - [`DeclarationSource`] - Lookup of declarations and packages by name
//! - [`DeclarationSet`] - An in-memory [`DeclarationSource`]
//!
//! The flow is: host adapter → `DeclarationSource` → `TypeClassifier` → `ModelBuilder`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod annotation;
pub mod declaration;
pub mod source;
pub mod types;

pub use annotation::{Annotation, AnnotationValue, Annotations, names};
pub use declaration::{
    DeclKind, Declaration, EnumConstant, FormDefault, MemberDecl, MethodDecl, PackageDecl,
    ParamDecl, package_of, simple_name_of,
};
pub use source::{DeclarationSet, DeclarationSource};
pub use types::{Primitive, TypeRef};
