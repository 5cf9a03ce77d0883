//! Assignability and call-site compatibility
//!
//! Implements the assignability relation T ~> U (a value of type T may be
//! used where U is expected): subtyping, plus `never` being assignable to
//! every target. Mismatches are reported as `false`, never as errors; the
//! caller decides whether a mismatch is a compile error or a rejected
//! overload candidate.

use super::context::TypeContext;
use super::signature::ParameterTypes;
use super::subtyping::SubtypingContext;
use super::ty::TypeId;

/// Context for checking assignability
#[derive(Debug, Clone, Copy)]
pub struct AssignabilityContext<'a> {
    /// Type context for resolving types
    type_ctx: &'a TypeContext,

    /// Subtyping context
    subtyping: SubtypingContext<'a>,
}

impl<'a> AssignabilityContext<'a> {
    /// Create a new assignability context
    pub fn new(type_ctx: &'a TypeContext) -> Self {
        AssignabilityContext {
            type_ctx,
            subtyping: SubtypingContext::new(type_ctx),
        }
    }

    /// Check if a value of type `from` may be used where `to` is expected
    pub fn is_assignable_from(&self, to: TypeId, from: TypeId) -> bool {
        // never ~> T: the bottom type need not appear in any parent chain
        if self.type_ctx.is_never(from) {
            return true;
        }
        self.subtyping.is_subtype(from, to)
    }

    /// Check supplied argument types against declared parameter types
    ///
    /// The fixed prefix is checked pairwise. A variadic tail accepts any
    /// number of extra arguments without checking them; without one the
    /// counts must match exactly.
    pub fn is_compatible_signature(&self, to: &ParameterTypes, from: &[TypeId]) -> bool {
        if from.len() < to.types.len() {
            return false;
        }
        if from.len() > to.types.len() && !to.var_args {
            return false;
        }
        to.types
            .iter()
            .zip(from)
            .all(|(&param, &arg)| self.is_assignable_from(param, arg))
    }

    /// Check that a label's declared types can flow into the supplied label
    ///
    /// The callee transfers values of the declared types, so every declared
    /// type must be assignable to the corresponding supplied parameter type.
    pub fn is_compatible_label(&self, declared: &[TypeId], supplied: &[TypeId]) -> bool {
        declared.len() == supplied.len()
            && declared
                .iter()
                .zip(supplied)
                .all(|(&declared, &supplied)| self.is_assignable_from(supplied, declared))
    }
}
