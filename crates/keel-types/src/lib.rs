//! Keel Type System
//!
//! Type representation and type algebra for the Keel builtin DSL: nominal
//! types, function pointer types and ad hoc unions, the subtype relation,
//! common supertypes, and call-site compatibility checks.
//!
//! # Example
//!
//! ```ignore
//! use keel_types::{TypeContext, UnionType};
//!
//! let mut ctx = TypeContext::new();
//! let object = ctx.declare_abstract_type("Object", None, "TNode<Object>")?;
//! let number = ctx.declare_abstract_type("Number", Some(object), "TNode<Number>")?;
//! let smi = ctx.declare_abstract_type("Smi", Some(number), "TNode<Smi>")?;
//! let heap_number = ctx.declare_abstract_type("HeapNumber", Some(number), "TNode<HeapNumber>")?;
//!
//! let mut union = UnionType::from_type(&ctx, smi);
//! union.extend(&ctx, heap_number)?;
//! assert_eq!(union.parent(), number);
//! let id = ctx.union_type(union);
//! ```

#![warn(missing_docs)]

pub mod assignability;
pub mod config;
pub mod context;
mod display;
pub mod error;
pub mod signature;
pub mod subtyping;
pub mod ty;
pub mod union;
pub mod visit_result;

pub use assignability::AssignabilityContext;
pub use config::{TypeSystemConfig, WellKnown};
pub use context::TypeContext;
pub use error::TypeError;
pub use signature::{Arguments, LabelDeclaration, LabelDefinition, NameAndType, ParameterTypes, Signature};
pub use subtyping::SubtypingContext;
pub use ty::{AbstractType, FunctionPointerType, Type, TypeId};
pub use union::{Normalized, UnionType};
pub use visit_result::{VisitResult, VisitResultVector};

/// Check if a value of type `from` may be used where `to` is expected
pub fn is_assignable_from(ctx: &TypeContext, to: TypeId, from: TypeId) -> bool {
    AssignabilityContext::new(ctx).is_assignable_from(to, from)
}

/// Check supplied argument types against declared parameter types
pub fn is_compatible_signature(ctx: &TypeContext, to: &ParameterTypes, from: &[TypeId]) -> bool {
    AssignabilityContext::new(ctx).is_compatible_signature(to, from)
}
